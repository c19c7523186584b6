//! npm-compatible registry client

use crate::error::{Error, Result};
use crate::http::build_client;
use crate::registry::PackageRegistry;
use crate::types::ClientSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Registry client speaking the npm package document format
pub struct NpmRegistry {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PackageDocument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: DistTags,
}

#[derive(Deserialize, Default)]
struct DistTags {
    #[serde(default)]
    latest: String,
}

/// URL of a package document
///
/// Scoped names keep their `@` but have the `/` encoded, as npm expects.
pub fn package_url(base_url: &str, package: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if package.starts_with('@') {
        format!("{base}/{}", package.replace('/', "%2F"))
    } else {
        format!("{base}/{package}")
    }
}

impl NpmRegistry {
    /// Create a registry client for a base URL
    pub fn new(base_url: impl Into<String>, settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn latest_version(&self, package: &str) -> Result<String> {
        let url = package_url(&self.base_url, package);
        debug!(%url, "fetching package document");

        let document: PackageDocument = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Registry(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Registry(e.to_string()))?
            .json()
            .await
            .map_err(|e| {
                Error::Registry(format!("malformed package document for {package}: {e}"))
            })?;

        Ok(document.dist_tags.latest)
    }
}
