use std::{env, time::Duration};

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub github_token: Option<String>,
    pub graphql_url: String,
    pub upstream_timeout: Duration,
    pub widget_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let github_token = lookup("GITHUB_TOKEN")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let graphql_url =
            lookup("GITHUB_GRAPHQL_URL").unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let widget_api_url = lookup("WIDGET_API_URL")
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}/api/contributions"));

        Self {
            port,
            github_token,
            graphql_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            widget_api_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_with(&[]);
        assert_eq!(config.port, 8080);
        assert!(config.github_token.is_none());
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(
            config.widget_api_url,
            "http://127.0.0.1:8080/api/contributions"
        );
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = config_with(&[("GITHUB_TOKEN", "   ")]);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn widget_url_follows_port() {
        let config = config_with(&[("PORT", "9191"), ("UPSTREAM_TIMEOUT_SECS", "0")]);
        assert_eq!(
            config.widget_api_url,
            "http://127.0.0.1:9191/api/contributions"
        );
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }
}
