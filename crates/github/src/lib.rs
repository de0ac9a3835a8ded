// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fa-github: GitHub Projects provider for famaudit
//!
//! Talks to the GitHub GraphQL API with a blocking client and exposes the
//! results through [`fa_core::FlatProvider`].

pub mod client;
pub mod error;
pub mod provider;
pub mod queries;
pub mod response;

pub use client::{GraphQlClient, RateLimit, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use provider::GithubProvider;
