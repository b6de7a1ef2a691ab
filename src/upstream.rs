//! GitHub GraphQL client for contribution calendars.

use crate::config::Config;
use crate::errors::AggregateError;
use crate::level::ContributionLevel;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

const USER_AGENT: &str = concat!("contribution_heatmap/", env!("CARGO_PKG_VERSION"));

const CALENDAR_QUERY: &str = r#"
query($login: String!, $from: DateTime, $to: DateTime) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            contributionLevel
          }
        }
      }
    }
  }
}
"#;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    login: &'a str,
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: Calendar,
}

/// Calendar as delivered by the provider. `total_contributions` covers the
/// whole queried span and is advisory only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub total_contributions: u64,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub contribution_count: u64,
    pub contribution_level: ContributionLevel,
}

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.graphql_url.clone(),
            token: config.github_token.clone(),
        })
    }

    /// Fetches the user's calendar, either the provider's default trailing
    /// year or the given inclusive range.
    pub async fn fetch_calendar(
        &self,
        username: &str,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Calendar, AggregateError> {
        let token = self
            .token
            .as_deref()
            .ok_or(AggregateError::Misconfigured("GITHUB_TOKEN is not set"))?;

        let (from, to) = match range {
            Some((start, end)) => (
                Some(format!("{start}T00:00:00Z")),
                Some(format!("{end}T23:59:59Z")),
            ),
            None => (None, None),
        };

        let request = GraphqlRequest {
            query: CALENDAR_QUERY,
            variables: Variables {
                login: username,
                from,
                to,
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                error!("upstream request for {username} failed: {err}");
                AggregateError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("upstream returned {status} for {username}");
            return Err(AggregateError::Upstream { status });
        }

        let bytes = response.bytes().await?;
        let payload: GraphqlResponse = serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse upstream payload: {err}");
            AggregateError::MalformedPayload(err.to_string())
        })?;

        let calendar = interpret(username, payload)?;
        debug!(
            "upstream calendar for {username}: {} weeks, {} contributions",
            calendar.weeks.len(),
            calendar.total_contributions
        );
        Ok(calendar)
    }
}

pub fn interpret(username: &str, payload: GraphqlResponse) -> Result<Calendar, AggregateError> {
    let user = payload.data.and_then(|data| data.user);

    if payload
        .errors
        .iter()
        .any(|err| err.kind.as_deref() == Some("NOT_FOUND"))
    {
        return Err(AggregateError::NotFound(username.to_string()));
    }

    match user {
        Some(user) => {
            let calendar = user.contributions_collection.contribution_calendar;
            if calendar.weeks.is_empty() {
                return Err(AggregateError::NotFound(username.to_string()));
            }
            Ok(calendar)
        }
        None if payload.errors.is_empty() => Err(AggregateError::NotFound(username.to_string())),
        None => {
            for err in &payload.errors {
                warn!("upstream graphql error: {}", err.message);
            }
            Err(AggregateError::Upstream {
                status: StatusCode::BAD_GATEWAY,
            })
        }
    }
}
