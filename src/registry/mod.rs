//! Package registry lookups
//!
//! Resolves the latest published version of a package, which becomes the
//! release tag.

mod npm;

pub use npm::{NpmRegistry, package_url};

use crate::error::Result;
use async_trait::async_trait;

/// Package registry trait
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Latest published version of a package, verbatim
    ///
    /// Returns an empty string when the registry has no `latest` tag.
    async fn latest_version(&self, package: &str) -> Result<String>;
}

/// Release tag for a registry version
///
/// The version is used as-is; a leading `v` is not stripped.
pub fn tag_for_version(version: &str) -> String {
    format!("v{version}")
}
