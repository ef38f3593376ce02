//! Environment based configuration for tools that run the trigger outside a host

use crate::{
    credentials::{FilloutApiCredentials, FilloutRegion},
    error::{FilloutError, FilloutResult},
};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct FilloutConfig {
    pub credentials: FilloutApiCredentials,
    pub request_timeout: Duration,
}

impl FilloutConfig {
    /// Read `FILLOUT_API_KEY`, `FILLOUT_DOMAIN`, `FILLOUT_BASE_URL` and `FILLOUT_TIMEOUT_SECS`
    pub fn from_env() -> FilloutResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FilloutResult<Self> {
        let api_key = lookup("FILLOUT_API_KEY")
            .ok_or_else(|| FilloutError::Config("FILLOUT_API_KEY not set".to_string()))?;

        let domain = match lookup("FILLOUT_DOMAIN") {
            Some(domain) if !domain.trim().is_empty() => domain.parse::<FilloutRegion>()?,
            _ => FilloutRegion::default(),
        };

        let mut credentials = FilloutApiCredentials::new(api_key, domain)?;
        if let Some(base_url) = lookup("FILLOUT_BASE_URL").filter(|url| !url.trim().is_empty()) {
            credentials = credentials.with_base_url(base_url);
        }

        let request_timeout = match lookup("FILLOUT_TIMEOUT_SECS") {
            Some(secs) => secs.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                FilloutError::Config(format!("FILLOUT_TIMEOUT_SECS is not a number: {}", secs))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            credentials,
            request_timeout,
        })
    }
}
