//! Client configuration.
//!
//! Values come from command-line flags with environment fallbacks:
//! - `STOREFRONT_API_URL` - base URL of the remote API (default: `https://localhost:7155/`)
//! - `STOREFRONT_INSECURE` - accept self-signed TLS certificates (development APIs)

use crate::error::{Result, StorefrontError};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://localhost:7155/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, always ending in `/` so relative joins keep its path.
    pub base_url: Url,
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str, accept_invalid_certs: bool) -> Result<Self> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|e| StorefrontError::ConfigError(format!("invalid API URL {base_url:?}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(StorefrontError::ConfigError(format!(
                "unsupported API URL scheme {:?}",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(StorefrontError::ConfigError(format!(
                "API URL {base_url:?} cannot be used as a base"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            accept_invalid_certs,
        })
    }
}
