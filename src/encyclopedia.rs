//! Short city summaries from the Wikipedia (MediaWiki) query API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::Service;
use crate::http::{check_status, read_json};
use crate::{NavMindError, Result};

/// Shown in place of a summary whenever the lookup fails
pub const PLACEHOLDER_SUMMARY: &str = "No cultural information found.";

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Plain-text introduction for a title, a few sentences long
    async fn summary(&self, title: &str) -> Result<String>;
}

pub struct WikipediaClient {
    client: Client,
    /// Full `api.php` URL
    api_url: String,
    sentences: u8,
}

impl WikipediaClient {
    pub fn new(client: Client, api_url: impl Into<String>, sentences: u8) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            sentences,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<Query>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

fn extract_summary(response: QueryResponse, title: &str) -> Result<String> {
    if let Some(error) = response.error {
        return Err(NavMindError::api(Service::Encyclopedia, error.info));
    }

    let page = response
        .query
        .and_then(|query| query.pages.into_iter().next())
        .ok_or_else(|| NavMindError::not_found(Service::Encyclopedia, title))?;

    if page.missing || page.invalid {
        return Err(NavMindError::not_found(Service::Encyclopedia, title));
    }

    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        return Err(NavMindError::api(
            Service::Encyclopedia,
            format!("'{}' is ambiguous (disambiguation page)", page.title),
        ));
    }

    page.extract
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| NavMindError::not_found(Service::Encyclopedia, title))
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    #[instrument(skip(self))]
    async fn summary(&self, title: &str) -> Result<String> {
        info!("Fetching encyclopedia summary for '{}'", title);

        let sentences = self.sentences.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", sentences.as_str()),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await
            .map_err(|e| NavMindError::transport(Service::Encyclopedia, &e))?;

        let response = check_status(Service::Encyclopedia, response).await?;
        let body: QueryResponse = read_json(Service::Encyclopedia, response).await?;
        let summary = extract_summary(body, title)?;

        debug!("Summary for '{}' has {} chars", title, summary.len());
        Ok(summary)
    }
}

/// Collapse a failed lookup into the placeholder text shown on the dashboard
#[must_use]
pub fn summary_or_placeholder(result: Result<String>) -> String {
    result.unwrap_or_else(|err| {
        tracing::warn!("Encyclopedia lookup failed: {}", err);
        PLACEHOLDER_SUMMARY.to_string()
    })
}
