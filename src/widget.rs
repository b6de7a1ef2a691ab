//! Heatmap widget: fetches aggregated contributions from a caller-supplied
//! endpoint and holds the view state for one display instance.
//!
//! A load cycle runs `Idle -> Loading -> Ready | Error`. Every cycle is
//! tagged with a generation number; completions carrying an older generation
//! than the latest request are dropped, so a slow stale response can never
//! overwrite newer state.

use crate::labels::month_labels;
use crate::models::{clamp_weeks, ContributionsResponse, Week, DEFAULT_WEEKS};
use crate::theme::Theme;
use crate::ui::render_widget;
use chrono::{Local, NaiveDate};
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_CELL_SIZE: u32 = 5;
pub const DEFAULT_CELL_GAP: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub api_url: String,
    pub username: String,
    pub weeks: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub theme: Theme,
    pub cell_size: u32,
    pub cell_gap: u32,
    pub show_loading: bool,
    pub link_to_profile: bool,
    pub class_name: String,
}

impl WidgetConfig {
    pub fn new(api_url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            weeks: DEFAULT_WEEKS,
            start_date: None,
            end_date: None,
            theme: Theme::default(),
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
            show_loading: true,
            link_to_profile: true,
            class_name: String::new(),
        }
    }

    /// True when `other` would fetch different data.
    fn query_differs(&self, other: &WidgetConfig) -> bool {
        self.api_url != other.api_url
            || self.username != other.username
            || self.weeks != other.weeks
            || self.start_date != other.start_date
            || self.end_date != other.end_date
    }

    pub fn request_url(&self, today: NaiveDate) -> Result<Url, WidgetError> {
        let mut url = Url::parse(&self.api_url).map_err(|_| WidgetError::InvalidUrl)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("username", &self.username);
            match self.start_date {
                Some(start) => {
                    let end = self.end_date.unwrap_or(today);
                    pairs.append_pair("startDate", &start.to_string());
                    pairs.append_pair("endDate", &end.to_string());
                }
                None => {
                    let weeks = clamp_weeks(i64::from(self.weeks));
                    pairs.append_pair("weeks", &weeks.to_string());
                }
            }
        }
        Ok(url)
    }
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("invalid api url")]
    InvalidUrl,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub total_contributions: u64,
    pub weeks: Vec<Week>,
    pub month_labels: Vec<Option<&'static str>>,
}

impl From<ContributionsResponse> for ViewState {
    fn from(response: ContributionsResponse) -> Self {
        let month_labels = month_labels(&response.weeks);
        Self {
            total_contributions: response.total_contributions,
            weeks: response.weeks,
            month_labels,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Idle,
    Loading,
    Ready(ViewState),
    Error,
}

/// One outstanding request. Detached from the widget so it can be awaited
/// while the widget keeps accepting new configuration.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    url: Url,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn send(
        &self,
        client: &reqwest::Client,
    ) -> Result<ContributionsResponse, WidgetError> {
        let response = client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status));
        }
        Ok(response.json::<ContributionsResponse>().await?)
    }
}

pub struct HeatmapWidget {
    config: WidgetConfig,
    state: WidgetState,
    generation: u64,
}

impl HeatmapWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            state: WidgetState::Idle,
            generation: 0,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Starts a new cycle, superseding any outstanding one. `None` when the
    /// request cannot even be built; the widget is then in `Error`.
    pub fn begin_load(&mut self, today: NaiveDate) -> Option<LoadTicket> {
        self.generation += 1;
        match self.config.request_url(today) {
            Ok(url) => {
                self.state = WidgetState::Loading;
                Some(LoadTicket {
                    generation: self.generation,
                    url,
                })
            }
            Err(err) => {
                warn!("heatmap for {} not loaded: {err}", self.config.username);
                self.state = WidgetState::Error;
                None
            }
        }
    }

    /// Applies a finished request. Returns false when the ticket is stale and
    /// the result was discarded.
    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        result: Result<ContributionsResponse, WidgetError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "discarding stale heatmap response (generation {} < {})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(response) => WidgetState::Ready(ViewState::from(response)),
            Err(err) => {
                warn!(
                    "failed to load heatmap for {} from {}: {err}",
                    self.config.username, ticket.url
                );
                WidgetState::Error
            }
        };
        true
    }

    /// Replaces the configuration. When the data dependencies changed, a new
    /// cycle is started and its ticket returned.
    pub fn reconfigure(&mut self, config: WidgetConfig, today: NaiveDate) -> Option<LoadTicket> {
        let refetch = self.config.query_differs(&config);
        self.config = config;
        if refetch { self.begin_load(today) } else { None }
    }

    /// Runs one full cycle against the configured endpoint.
    pub async fn load(&mut self, client: &reqwest::Client) {
        let Some(ticket) = self.begin_load(Local::now().date_naive()) else {
            return;
        };
        let result = ticket.send(client).await;
        self.complete(&ticket, result);
    }

    pub fn render(&self) -> String {
        render_widget(&self.config, &self.state)
    }
}
