use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::{ArrayError, Result};

/// Default timeout applied to every request sent to the array
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings and credentials for one array
///
/// The API token is kept in a [`SecretString`] and is redacted from
/// `Debug` output.
///
/// # Example
///
/// ```rust
/// use pure_array_api::ArrayConfig;
/// use std::time::Duration;
///
/// let config = ArrayConfig::new("array01.example.com", "my-api-token")
///     .unwrap()
///     .with_timeout(Duration::from_secs(10))
///     .with_tls_verification(true);
///
/// assert_eq!(config.base_url().as_str(), "https://array01.example.com/");
/// ```
#[derive(Debug)]
pub struct ArrayConfig {
    base_url: Url,
    api_token: SecretString,
    timeout: Duration,
    verify_tls: bool,
}

impl ArrayConfig {
    /// Create a config for the array reachable at `https://<array>`
    ///
    /// TLS certificate verification is disabled by default since arrays
    /// usually ship with self-signed certificates; see
    /// [`with_tls_verification`](Self::with_tls_verification).
    ///
    /// # Errors
    ///
    /// Returns an error if `array` is not a valid host name.
    pub fn new(array: &str, api_token: impl Into<String>) -> Result<Self> {
        let base_url =
            Url::parse(&format!("https://{array}")).map_err(ArrayError::InvalidUrl)?;
        Ok(Self::with_base_url(base_url, api_token))
    }

    /// Create a config for an arbitrary base URL (scheme included)
    ///
    /// A path prefix such as `https://gateway/pure` is kept: API paths are
    /// resolved below it.
    pub fn with_base_url(mut base_url: Url, api_token: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            api_token: SecretString::from(api_token.into()),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: false,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Get the base URL of the array
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether TLS certificates are verified
    pub fn verifies_tls(&self) -> bool {
        self.verify_tls
    }

    pub(crate) fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArrayConfig::new("array01", "token").unwrap();
        assert_eq!(config.base_url().as_str(), "https://array01/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.verifies_tls());
        assert_eq!(config.api_token(), "token");
    }

    #[test]
    fn test_invalid_array_name() {
        let result = ArrayConfig::new("", "token");
        assert!(matches!(result, Err(ArrayError::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ArrayConfig::with_base_url(Url::parse("http://localhost:8080").unwrap(), "t")
            .with_timeout(Duration::from_secs(5))
            .with_tls_verification(true);
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.verifies_tls());
    }

    #[test]
    fn test_base_url_prefix_gets_trailing_slash() {
        let config = ArrayConfig::with_base_url(Url::parse("https://gateway/pure").unwrap(), "t");
        assert_eq!(config.base_url().as_str(), "https://gateway/pure/");

        let config = ArrayConfig::with_base_url(Url::parse("https://gateway/pure/").unwrap(), "t");
        assert_eq!(config.base_url().as_str(), "https://gateway/pure/");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ArrayConfig::new("array01", "super-secret-token").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"));
    }
}
