//! HTTP client for the Swift observatory visibility / planning API.
//!
//! Both calls are plain `GET`s with ISO-8601 UTC bounds; the API answers with
//! `{"entries": [...]}`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ObservatoryEngine, PlanRequest, RawPlanEntry, RawVisibilityEntry, VisibilityRequest};
use crate::error::{EngineError, EngineResult};

pub const DEFAULT_BASE_URL: &str = "https://www.swift.psu.edu/api/v1/swift";

#[derive(Debug, Deserialize)]
struct EntriesEnvelope<T> {
    #[serde(default = "Vec::new")]
    entries: Vec<T>,
}

/// Remote engine backed by the Swift observatory API.
#[derive(Clone)]
pub struct SwiftApiEngine {
    http: Client,
    base: String,
}

impl SwiftApiEngine {
    /// Build a client for `base_url`.
    ///
    /// `timeout` bounds each HTTP exchange; the engine itself defines no
    /// other deadline.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> EngineResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn fetch_entries<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> EngineResult<Vec<T>> {
        let url = format!("{}/{}", self.base, endpoint);
        debug!("Engine request {} {:?}", url, query);

        let resp = self.http.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body: String = resp.text().await.unwrap_or_default().chars().take(200).collect();
            warn!("Engine {} answered HTTP {}", url, status);
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: EntriesEnvelope<T> = resp.json().await?;
        debug!("Engine {} returned {} entries", url, envelope.entries.len());
        Ok(envelope.entries)
    }
}

#[async_trait]
impl ObservatoryEngine for SwiftApiEngine {
    fn name(&self) -> &str {
        "swift-api"
    }

    async fn visibility(&self, request: &VisibilityRequest) -> EngineResult<Vec<RawVisibilityEntry>> {
        let query = [
            ("ra", request.ra.to_string()),
            ("dec", request.dec.to_string()),
            ("begin", request.begin.to_rfc3339()),
            ("end", request.end.to_rfc3339()),
            ("hires", "true".to_string()),
        ];
        self.fetch_entries("visibility", &query).await
    }

    async fn planned_observations(&self, request: &PlanRequest) -> EngineResult<Vec<RawPlanEntry>> {
        let query = [
            ("ra", request.ra.to_string()),
            ("dec", request.dec.to_string()),
            ("radius", request.radius.to_string()),
            ("begin", request.begin.to_rfc3339()),
            ("end", request.end.to_rfc3339()),
        ];
        self.fetch_entries("plan", &query).await
    }
}
