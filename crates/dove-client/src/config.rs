use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_DB_PATH: &str = "dove.db";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub db_path: PathBuf,
    /// Bearer token of a previously signed-in session.
    pub token: Option<String>,
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Read `DOVE_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("DOVE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let api_url = Url::parse(&api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::config(format!("DOVE_API_URL cannot be a base URL: {api_url}")));
        }

        let db_path = lookup("DOVE_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.into())
            .into();

        let token = lookup("DOVE_TOKEN").filter(|t| !t.trim().is_empty());

        let http_timeout = match lookup("DOVE_HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .map_err(|_| Error::config(format!("DOVE_HTTP_TIMEOUT_SECS is not a number: {v}")))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            db_path,
            token,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/api");
        assert_eq!(config.db_path, PathBuf::from("dove.db"));
        assert!(config.token.is_none());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DOVE_API_URL", "https://dove.example.org/api/"),
            ("DOVE_DB_PATH", "/tmp/favs.db"),
            ("DOVE_TOKEN", "abc"),
            ("DOVE_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.host_str(), Some("dove.example.org"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/favs.db"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_token_is_no_session() {
        let config = ClientConfig::from_lookup(lookup(&[("DOVE_TOKEN", "  ")])).unwrap();
        assert!(config.token.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ClientConfig::from_lookup(lookup(&[("DOVE_API_URL", "not a url")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("DOVE_API_URL", "mailto:a@b.c")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("DOVE_HTTP_TIMEOUT_SECS", "soon")])).is_err());
    }
}
