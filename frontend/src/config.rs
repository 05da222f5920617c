//! Client configuration.

/// Backend used when no base URL is baked in at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://198.211.105.95:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let raw: String = api_base_url.into();
        Self {
            api_base_url: raw.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Reads `AHORRISTA_API_BASE_URL` from the build environment. The browser
    /// has no process environment, so the value is fixed at compile time.
    pub fn from_build_env() -> Self {
        match option_env!("AHORRISTA_API_BASE_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
