use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dealer_client::{DealerClient, FileTokenStore, TokenStore, DEFAULT_BASE_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Console configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build from any key lookup; unset and empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token_file = match get("DEALER_TOKEN_FILE") {
            Some(path) => PathBuf::from(path),
            None => get("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".dealer")
                .join("token"),
        };

        let timeout_secs = match get("DEALER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("DEALER_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: get("DEALER_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token_file,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// A client whose token persists in [`Config::token_file`].
    pub fn client(&self) -> Result<DealerClient> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(self.token_file.clone()));
        DealerClient::with_timeout(&self.api_url, tokens, self.timeout)
            .with_context(|| format!("Failed to build client for {}", self.api_url))
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  DEALER_API_URL: {}", self.api_url);
        tracing::info!("  DEALER_TOKEN_FILE: {}", self.token_file.display());
        tracing::info!("  DEALER_TIMEOUT_SECS: {}", self.timeout.as_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[("HOME", "/home/sam")])).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.token_file, PathBuf::from("/home/sam/.dealer/token"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DEALER_API_URL", "https://crm.example.com"),
            ("DEALER_TOKEN_FILE", "/tmp/tok"),
            ("DEALER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://crm.example.com");
        assert_eq!(config.token_file, PathBuf::from("/tmp/tok"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DEALER_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("DEALER_TIMEOUT_SECS"));
    }
}
