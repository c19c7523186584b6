//! GitHub GraphQL queries and response shapes

use crate::types::{CommitInfo, GHOST_LOGIN, PullRequestInfo};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const PULL_REQUEST_QUERY: &str = r"
query($owner: String!, $repo: String!, $pr: Int!, $commits: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $pr) {
      title baseRefName baseRefOid headRefOid createdAt
      author { login }
      commits(first: $commits) {
        nodes {
          commit {
            messageHeadline
            abbreviatedOid
            author { name user { login } }
            associatedPullRequests(first: 1) {
              nodes { number }
            }
          }
        }
      }
    }
  }
}
";

pub const PACKAGE_JSON_QUERY: &str = r"
query($owner: String!, $repo: String!, $expression: String!) {
  repository(owner: $owner, name: $repo) {
    object(expression: $expression) {
      ... on Blob { text }
    }
  }
}
";

#[derive(Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
}

#[derive(Deserialize)]
pub struct ResponseError {
    pub message: String,
}

#[derive(Deserialize)]
pub struct RepositoryData<R> {
    pub repository: Option<R>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRepository {
    pub pull_request: Option<PullRequestNode>,
}

#[derive(Deserialize)]
pub struct ObjectRepository {
    pub object: Option<Blob>,
}

#[derive(Deserialize)]
pub struct Blob {
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub title: String,
    pub base_ref_name: String,
    pub base_ref_oid: String,
    pub head_ref_oid: String,
    pub created_at: DateTime<Utc>,
    pub author: Option<Actor>,
    pub commits: Connection<CommitNode>,
}

#[derive(Deserialize)]
pub struct CommitNode {
    pub commit: CommitData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitData {
    pub message_headline: String,
    pub abbreviated_oid: String,
    pub author: Option<GitActor>,
    pub associated_pull_requests: Option<Connection<PrNumber>>,
}

#[derive(Deserialize)]
pub struct GitActor {
    pub name: Option<String>,
    pub user: Option<Actor>,
}

#[derive(Deserialize)]
pub struct PrNumber {
    pub number: u64,
}

impl CommitData {
    /// Account login, falling back to the git author name, then `ghost`
    fn author_login(&self) -> String {
        let author = self.author.as_ref();
        author
            .and_then(|a| a.user.as_ref())
            .map(|u| u.login.clone())
            .or_else(|| {
                author
                    .and_then(|a| a.name.clone())
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_else(|| GHOST_LOGIN.to_string())
    }
}

impl From<CommitData> for CommitInfo {
    fn from(commit: CommitData) -> Self {
        let author_login = commit.author_login();
        Self {
            headline: commit.message_headline,
            abbreviated_oid: commit.abbreviated_oid,
            author_login,
            associated_pr_numbers: commit
                .associated_pull_requests
                .map(|c| c.nodes.into_iter().map(|n| n.number).collect())
                .unwrap_or_default(),
        }
    }
}

impl PullRequestNode {
    pub fn into_info(self, number: u64) -> PullRequestInfo {
        PullRequestInfo {
            number,
            title: self.title,
            base_ref_name: self.base_ref_name,
            base_ref_oid: self.base_ref_oid,
            head_ref_oid: self.head_ref_oid,
            created_at: self.created_at,
            author_login: self
                .author
                .map_or_else(|| GHOST_LOGIN.to_string(), |a| a.login),
            commits: self
                .commits
                .nodes
                .into_iter()
                .map(|n| CommitInfo::from(n.commit))
                .collect(),
        }
    }
}
