// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use reqwest::header::HeaderValue;
use yare::parameterized;

fn headers(remaining: &str, reset: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert("x-ratelimit-remaining", HeaderValue::from_str(remaining).unwrap());
    map.insert("x-ratelimit-reset", HeaderValue::from_str(reset).unwrap());
    map
}

#[test]
fn rate_limit_from_headers() {
    let limit = RateLimit::from_headers(&headers("0", "1744243200")).unwrap();
    assert!(limit.is_exhausted());
    assert_eq!(limit.reset.timestamp(), 1_744_243_200);
}

#[parameterized(
    negative = { "-1", "1744243200" },
    garbage = { "lots", "1744243200" },
    bad_reset = { "10", "tomorrow" },
)]
fn rate_limit_rejects_bad_headers(remaining: &str, reset: &str) {
    assert!(RateLimit::from_headers(&headers(remaining, reset)).is_none());
}

#[test]
fn rate_limit_missing_headers() {
    assert!(RateLimit::from_headers(&HeaderMap::new()).is_none());
}

#[test]
fn wait_is_time_until_reset() {
    let limit = RateLimit {
        remaining: 0,
        reset: DateTime::from_timestamp(1_000, 0).unwrap(),
    };
    let now = DateTime::from_timestamp(970, 0).unwrap();
    assert_eq!(limit.wait_from(now), Duration::from_secs(30));
}

#[test]
fn wait_is_zero_after_reset() {
    let limit = RateLimit {
        remaining: 0,
        reset: DateTime::from_timestamp(1_000, 0).unwrap(),
    };
    let now = DateTime::from_timestamp(1_005, 0).unwrap();
    assert_eq!(limit.wait_from(now), Duration::ZERO);
}

#[test]
fn new_rejects_blank_token() {
    assert!(matches!(
        GraphQlClient::new(DEFAULT_ENDPOINT, "  "),
        Err(Error::InvalidToken(_))
    ));
}
