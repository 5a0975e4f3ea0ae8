use std::time::Duration;

use crate::NewscastError;

/// User agent sent to every external provider.
pub const USER_AGENT: &str = concat!("newscast/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with a per-request timeout.
pub fn create_http_client(timeout_secs: u64) -> Result<reqwest::Client, NewscastError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(Into::into)
}
