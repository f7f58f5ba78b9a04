//! HTTP Client Factory
//!
//! Builds the reqwest client used for generation calls.

use std::time::Duration;

use crate::types::{LlmError, LlmResult};

/// Build a `reqwest::Client` whose every request is bounded by `timeout`.
///
/// Environment proxies are ignored: the generation server is expected to be
/// reachable directly.
pub fn build_http_client(timeout: Duration) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(|e| LlmError::Other {
            message: format!("failed to build HTTP client: {}", e),
        })
}
