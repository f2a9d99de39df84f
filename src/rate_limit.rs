use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::error::{NameApiError, NameApiResult};

pub const X_RATE_LIMIT_LIMIT: &str = "x-rate-limit-limit";
pub const X_RATE_LIMIT_REMAINING: &str = "x-rate-limit-remaining";
pub const X_RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// Rate-limit window reported by an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    /// Names available in the current time window
    pub limit: u64,
    /// Names left in the current time window
    pub remaining: u64,
    /// Seconds until a new time window opens
    pub reset: u64,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> NameApiResult<Self> {
        Ok(Self {
            limit: header_u64(headers, X_RATE_LIMIT_LIMIT)?,
            remaining: header_u64(headers, X_RATE_LIMIT_REMAINING)?,
            reset: header_u64(headers, X_RATE_LIMIT_RESET)?,
        })
    }
}

pub(crate) fn header_u64(headers: &HeaderMap, header: &'static str) -> NameApiResult<u64> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .ok_or(NameApiError::RateLimitHeader { header })
}
