//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::http::build_client;
use crate::platform::{MAX_PR_COMMITS, PlatformService};
use crate::platform::graphql::{
    ObjectRepository, PACKAGE_JSON_QUERY, PULL_REQUEST_QUERY, PullRequestRepository,
    RepositoryData, Response,
};
use crate::types::{
    ClientSettings, PlatformConfig, PublishedRelease, PullRequestInfo, ReleaseRecord,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// GitHub service using reqwest (REST + GraphQL)
pub struct GitHubService {
    client: Client,
    token: String,
    graphql_url: String,
    config: PlatformConfig,
}

#[derive(Deserialize)]
struct AssociatedPr {
    number: u64,
}

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct CreatedRelease {
    id: Option<u64>,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// GraphQL endpoint for a REST API base
///
/// GitHub Enterprise serves REST under `/api/v3` and GraphQL under
/// `/api/graphql`; github.com serves both from the API root.
pub fn graphql_endpoint(api_url: &str) -> String {
    let base = api_url.trim_end_matches('/');
    base.strip_suffix("/v3").map_or_else(
        || format!("{base}/graphql"),
        |root| format!("{root}/graphql"),
    )
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(
        token: &str,
        owner: String,
        repo: String,
        settings: &ClientSettings,
    ) -> Result<Self> {
        let api_url = settings.api_url.trim_end_matches('/').to_string();

        Ok(Self {
            client: build_client(settings)?,
            token: token.to_string(),
            graphql_url: graphql_endpoint(&api_url),
            config: PlatformConfig {
                owner,
                repo,
                api_url,
            },
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.config.api_url, self.config.owner, self.config.repo, path
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("bearer {}", self.token))
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .authorized(self.client.post(&self.graphql_url))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| Error::Query(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Query(e.to_string()))?
            .json::<Response<T>>()
            .await
            .map_err(|e| Error::Query(format!("malformed GraphQL response: {e}")))?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::Query(messages.join("; ")));
        }

        response
            .data
            .ok_or_else(|| Error::Query("GraphQL response has no data".to_string()))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn find_pr_for_commit(&self, commit_ref: &str) -> Result<u64> {
        let url = self.repo_url(&format!("/commits/{commit_ref}/pulls"));
        debug!(%url, "listing pull requests for commit");

        let prs: Vec<AssociatedPr> = self
            .authorized(self.client.get(&url))
            .header("Accept", ACCEPT_V3)
            .send()
            .await
            .map_err(|e| Error::Query(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Query(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Query(format!("malformed pull request list: {e}")))?;

        Ok(prs.first().map_or(0, |pr| pr.number))
    }

    async fn fetch_pr_details(&self, pr_number: u64) -> Result<PullRequestInfo> {
        let data: RepositoryData<PullRequestRepository> = self
            .graphql(
                PULL_REQUEST_QUERY,
                json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "pr": pr_number,
                    "commits": MAX_PR_COMMITS,
                }),
            )
            .await?;

        let pr = data
            .repository
            .and_then(|r| r.pull_request)
            .ok_or_else(|| {
                Error::Query(format!(
                    "pull request #{pr_number} not found in {}/{}",
                    self.config.owner, self.config.repo
                ))
            })?;

        Ok(pr.into_info(pr_number))
    }

    async fn fetch_package_name(&self, git_ref: &str) -> Result<String> {
        let expression = format!("{git_ref}:package.json");
        let data: RepositoryData<ObjectRepository> = self
            .graphql(
                PACKAGE_JSON_QUERY,
                json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "expression": expression,
                }),
            )
            .await?;

        let text = data
            .repository
            .and_then(|r| r.object)
            .and_then(|blob| blob.text)
            .ok_or_else(|| Error::Query(format!("no package.json at {expression}")))?;

        let package: PackageJson = serde_json::from_str(&text)
            .map_err(|e| Error::Query(format!("invalid package.json at {expression}: {e}")))?;

        package
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Query(format!("package.json at {expression} has no name")))
    }

    async fn publish_release(&self, record: &ReleaseRecord) -> Result<PublishedRelease> {
        let url = self.repo_url("/releases");
        debug!(%url, tag = %record.tag_name, "creating release");

        let response = self
            .authorized(self.client.post(&url))
            .header("Accept", ACCEPT_V3)
            .json(record)
            .send()
            .await
            .map_err(|e| Error::Publish(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Publish(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map_or(body, |m| m.message);
            return Err(Error::Publish(format!("{status}: {message}")));
        }

        let created: CreatedRelease = serde_json::from_str(&body).unwrap_or_default();
        Ok(PublishedRelease {
            id: created.id,
            html_url: created.html_url,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
