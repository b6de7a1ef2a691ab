use crate::config::Config;
use crate::upstream::GithubClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub github: GithubClient,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let github = GithubClient::new(&config)?;
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout * 2)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            github,
            http,
        })
    }
}
