// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the GitHub provider.

use thiserror::Error;

/// Errors raised while talking to the GitHub GraphQL API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is missing {0}")]
    MissingData(&'static str),

    #[error("invalid token: {0}\n  hint: set GITHUB_TOKEN or GITHUB_TOKEN_FILE")]
    InvalidToken(String),

    #[error(transparent)]
    Core(#[from] fa_core::Error),
}

/// A specialized Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for fa_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(inner) => inner,
            other => fa_core::Error::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
