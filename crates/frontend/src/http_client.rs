use crate::feed_loader::{AuthorLookup, FeedScope, ProjectPageSource};
use async_trait::async_trait;
use domain::{DomainError, ProjectPage, User};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Reads feed pages and author profiles from the API server.
#[derive(Clone)]
pub struct HttpFeedClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::UpstreamFailure(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Uses `NEXUS_API_URL`, falling back to a local server.
    pub fn from_env() -> Result<Self, DomainError> {
        let base_url = std::env::var("NEXUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_request(&self, scope: &FeedScope, page: u32, page_size: u32) -> reqwest::RequestBuilder {
        let paging = [("page", page.to_string()), ("limit", page_size.to_string())];
        match scope {
            FeedScope::Global => self
                .client
                .get(format!("{}/projects", self.base_url))
                .query(&paging),
            FeedScope::Author(user_id) => self
                .client
                .get(format!("{}/user-projects", self.base_url))
                .query(&[("userId", user_id.as_str())])
                .query(&paging),
        }
    }

    /// `{base}/users/{id}` with the id encoded as a single path segment.
    fn user_url(&self, user_id: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::UpstreamFailure(format!("invalid API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DomainError::UpstreamFailure("API url cannot take a path".to_string()))?
            .pop_if_empty()
            .push("users")
            .push(user_id);
        Ok(url)
    }
}

fn upstream(e: reqwest::Error) -> DomainError {
    DomainError::UpstreamFailure(e.to_string())
}

#[async_trait]
impl ProjectPageSource for HttpFeedClient {
    async fn fetch_page(
        &self,
        scope: &FeedScope,
        page: u32,
        page_size: u32,
    ) -> Result<ProjectPage, DomainError> {
        debug!(?scope, page, page_size, "Fetching feed page");
        let response = self
            .page_request(scope, page, page_size)
            .send()
            .await
            .map_err(upstream)?;

        if !response.status().is_success() {
            return Err(DomainError::QueryFailure(format!(
                "feed page {} returned {}",
                page,
                response.status()
            )));
        }
        response.json::<ProjectPage>().await.map_err(upstream)
    }
}

#[async_trait]
impl AuthorLookup for HttpFeedClient {
    async fn find_author(&self, user_id: &str) -> Result<User, DomainError> {
        let response = self
            .client
            .get(self.user_url(user_id)?)
            .send()
            .await
            .map_err(upstream)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DomainError::UserNotFound(user_id.to_string())),
            status if !status.is_success() => Err(DomainError::QueryFailure(format!(
                "author {} returned {}",
                user_id, status
            ))),
            _ => response.json::<User>().await.map_err(upstream),
        }
    }
}
