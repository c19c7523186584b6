//! Changelog assembly
//!
//! Turns a pull request's commit list into release notes, one bullet per
//! commit, in the order the hosting service returned them.

use crate::types::CommitInfo;
use std::fmt;

/// Release notes derived from a commit list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    lines: Vec<String>,
}

impl Changelog {
    /// Formatted lines, one per commit
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-terminated body text
    pub fn body(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Format a single changelog entry
pub fn format_entry(commit: &CommitInfo) -> String {
    format!("* {} @{}", commit.headline, commit.author_login)
}

/// Build the changelog for a commit list, preserving input order
pub fn build_changelog(commits: &[CommitInfo]) -> Changelog {
    Changelog {
        lines: commits.iter().map(format_entry).collect(),
    }
}
