//! `OmdbClient` - OMDb API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde::de::Error as _;
use tracing::instrument;
use url::Url;

use super::api::OmdbApi;
use super::error::LookupError;
use super::types::{MovieRecord, OmdbStatus, TitleQuery};

/// Default base URL for the OMDb API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `apikey` query parameter.
    api_key: String,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required, its content is not checked).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Decodes a successful HTTP body into a record or a logical failure.
    ///
    /// The body must be a JSON object carrying `"Response":"True"` or
    /// `"Response":"False"`; anything else is a decode error.
    fn parse_body(body: &str) -> Result<MovieRecord, LookupError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("OMDb reply is not a JSON object").into());
        }

        let status = OmdbStatus::deserialize(&value)?;
        match status.succeeded() {
            Some(true) => Ok(MovieRecord::deserialize(value)?),
            Some(false) => Err(LookupError::NotFound(status.error.unwrap_or_default())),
            None => Err(serde_json::Error::custom("OMDb reply has no Response flag").into()),
        }
    }
}

impl OmdbApi for OmdbClient {
    #[instrument(skip_all, fields(title = %query.title))]
    async fn lookup_title(&self, query: &TitleQuery) -> Result<MovieRecord, LookupError> {
        let mut params = query.to_query_pairs();
        params.insert(0, ("apikey", self.api_key.clone()));

        tracing::debug!(base_url = %self.base_url, "OMDb API request");

        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "OMDb API returned non-success status");
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_body(&body)
    }
}
