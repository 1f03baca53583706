use std::{env, path::PathBuf, str::FromStr, time::Duration};

/// How errors are reported over HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Every response is HTTP 200; errors are `{message}` bodies.
    #[default]
    Compat,
    /// Errors carry a status code derived from their kind.
    Strict,
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(ResponseMode::Compat),
            "strict" => Ok(ResponseMode::Strict),
            other => Err(format!("unknown response mode: {other}")),
        }
    }
}

/// Which store backend serves requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreBackend {
    #[default]
    #[value(name = "dynamodb")]
    DynamoDb,
    Memory,
}

/// Connection settings for the DynamoDB client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub region: String,
    pub endpoint_url: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    /// Response mode (default: compat)
    pub response_mode: ResponseMode,
    /// Sample data file read by `/load-sample-data`
    pub sample_data_path: PathBuf,
    /// Maximum puts in flight during a bulk load (default: 16)
    pub bulk_load_concurrency: usize,
    /// Per-request timeout. No timeout when unset.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - store region (default: "us-east-2")
    /// - `DYNAMODB_ENDPOINT` - store endpoint (default: "http://localhost:8000")
    /// - `ACCESS_KEY_ID` / `SECRET_ACCESS_KEY` - static credentials (default: SDK chain)
    /// - `RESPONSE_MODE` - "compat" or "strict" (default: "compat")
    /// - `SAMPLE_DATA_PATH` - sample file (default: "./sample-data/moviedata.json")
    /// - `BULK_LOAD_CONCURRENCY` - bulk put fan-out (default: 16)
    /// - `REQUEST_TIMEOUT_SECS` - request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            store: StoreConfig {
                region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-2".to_string()),
                endpoint_url: lookup("DYNAMODB_ENDPOINT")
                    .unwrap_or_else(|| "http://localhost:8000".to_string()),
                access_key_id: lookup("ACCESS_KEY_ID").filter(|v| !v.is_empty()),
                secret_access_key: lookup("SECRET_ACCESS_KEY").filter(|v| !v.is_empty()),
            },
            response_mode: lookup("RESPONSE_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            sample_data_path: lookup("SAMPLE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./sample-data/moviedata.json")),
            bulk_load_concurrency: lookup("BULK_LOAD_CONCURRENCY")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(16),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

impl Default for Config {
    /// Built-in defaults, ignoring the environment.
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.store.region, "us-east-2");
        assert_eq!(config.store.endpoint_url, "http://localhost:8000");
        assert_eq!(config.store.access_key_id, None);
        assert_eq!(config.response_mode, ResponseMode::Compat);
        assert_eq!(
            config.sample_data_path,
            PathBuf::from("./sample-data/moviedata.json")
        );
        assert_eq!(config.bulk_load_concurrency, 16);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_values_from_lookup() {
        let vars = HashMap::from([
            ("AWS_REGION", "eu-west-1"),
            ("ACCESS_KEY_ID", "local"),
            ("SECRET_ACCESS_KEY", "secret"),
            ("RESPONSE_MODE", "Strict"),
            ("BULK_LOAD_CONCURRENCY", "4"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ]);

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.region, "eu-west-1");
        assert_eq!(config.store.access_key_id.as_deref(), Some("local"));
        assert_eq!(config.response_mode, ResponseMode::Strict);
        assert_eq!(config.bulk_load_concurrency, 4);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let vars = HashMap::from([("RESPONSE_MODE", "loud"), ("BULK_LOAD_CONCURRENCY", "0")]);

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.response_mode, ResponseMode::Compat);
        assert_eq!(config.bulk_load_concurrency, 16);
    }
}
