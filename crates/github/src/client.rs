// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking GraphQL client with rate-limit waiting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::response::Envelope;

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Opt-in header needed for the `subIssues` and `parent` fields.
const FEATURES_HEADER: &str = "GraphQL-Features";
const FEATURES: &str = "sub_issues";

/// How many times a rate-limited request is retried after waiting.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Rate-limit budget reported in response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    /// Reads `x-ratelimit-remaining` and `x-ratelimit-reset`.
    pub fn from_headers(headers: &HeaderMap) -> Option<RateLimit> {
        let read = |name: &str| -> Option<i64> { headers.get(name)?.to_str().ok()?.trim().parse().ok() };
        let remaining = u64::try_from(read("x-ratelimit-remaining")?).ok()?;
        let reset = DateTime::from_timestamp(read("x-ratelimit-reset")?, 0)?;
        Some(RateLimit { remaining, reset })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Time left until the budget resets, zero if already past.
    pub fn wait_from(&self, now: DateTime<Utc>) -> Duration {
        (self.reset - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Sends GraphQL documents to one endpoint.
pub struct GraphQlClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidToken("token is empty".to_string()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(GraphQlClient {
            http,
            endpoint: endpoint.into(),
            token: token.trim().to_string(),
        })
    }

    /// Runs `query` with `variables` and decodes the `data` payload.
    pub fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = json!({ "query": query, "variables": variables });
        let mut attempt = 0;
        loop {
            let response = self.send(&body)?;
            let status = response.status();
            let limit = RateLimit::from_headers(response.headers());

            if let Some(limit) = limit.filter(|l| l.is_exhausted()) {
                let limited = status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS;
                if limited && attempt < MAX_RATE_LIMIT_RETRIES {
                    attempt += 1;
                    wait_for(&limit);
                    continue;
                }
                if status.is_success() {
                    let envelope: Envelope<T> = response.json()?;
                    wait_for(&limit);
                    return envelope.into_data();
                }
            }

            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(Error::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            if let Some(limit) = limit {
                debug!("Rate limit remaining: {}", limit.remaining);
            }
            let envelope: Envelope<T> = response.json()?;
            return envelope.into_data();
        }
    }

    fn send(&self, body: &Value) -> Result<Response> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("famaudit/", env!("CARGO_PKG_VERSION")))
            .header(FEATURES_HEADER, FEATURES)
            .json(body)
            .send()?;
        Ok(response)
    }
}

fn wait_for(limit: &RateLimit) {
    let wait = limit.wait_from(Utc::now());
    if wait.is_zero() {
        return;
    }
    warn!("Rate limit reached. Waiting {}s until reset", wait.as_secs());
    std::thread::sleep(wait);
    info!("Rate limit reset, resuming");
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
