use crate::aggregate::{resolve_request, shape_calendar};
use crate::errors::AppError;
use crate::models::{parse_weeks, ContributionsQuery, ContributionsResponse};
use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::render_index;
use crate::widget::{HeatmapWidget, WidgetConfig};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_contributions(
    State(state): State<AppState>,
    Query(query): Query<ContributionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = resolve_request(&query, today())?;
    let calendar = state
        .github
        .fetch_calendar(&request.username, request.range())
        .await?;

    let response: ContributionsResponse = shape_calendar(calendar, request.window);
    debug!(
        "contributions for {}: {} weeks, {} total",
        request.username,
        response.weeks.len(),
        response.total_contributions
    );

    Ok(([(header::CACHE_CONTROL, CACHE_CONTROL)], Json(response)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetQuery {
    pub username: Option<String>,
    pub weeks: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub theme: Option<String>,
    pub cell_size: Option<String>,
    pub cell_gap: Option<String>,
    pub link_to_profile: Option<String>,
    pub class_name: Option<String>,
}

/// Server-side render of one widget cycle. Any failure yields an empty
/// fragment; details only go to the log.
pub async fn widget(
    State(state): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> Html<String> {
    let config = widget_config(&state.config.widget_api_url, query);
    if config.username.is_empty() {
        return Html(String::new());
    }

    let mut widget = HeatmapWidget::new(config);
    widget.load(&state.http).await;
    Html(widget.render())
}

fn widget_config(api_url: &str, query: WidgetQuery) -> WidgetConfig {
    let mut config = WidgetConfig::new(api_url, query.username.unwrap_or_default().trim());

    if let Some(weeks) = query.weeks.as_deref().and_then(parse_weeks) {
        config.weeks = weeks;
    }
    config.start_date = parse_date(&query.start_date);
    config.end_date = parse_date(&query.end_date);
    if let Some(theme) = query.theme.as_deref() {
        config.theme = Theme::named(theme);
    }
    if let Some(size) = parse_opt::<u32>(&query.cell_size) {
        config.cell_size = size.clamp(1, 64);
    }
    if let Some(gap) = parse_opt::<u32>(&query.cell_gap) {
        config.cell_gap = gap.min(16);
    }
    if let Some(flag) = parse_opt::<bool>(&query.link_to_profile) {
        config.link_to_profile = flag;
    }
    config.class_name = query.class_name.unwrap_or_default();
    // The fragment is returned whole, there is nothing to show while loading.
    config.show_loading = false;
    config
}

fn parse_opt<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|raw| raw.trim().parse().ok())
}

fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_query_maps_onto_config() {
        let query = WidgetQuery {
            username: Some(" octocat ".into()),
            weeks: Some("80".into()),
            start_date: Some("2024-01-01".into()),
            theme: Some("teal".into()),
            cell_size: Some("12".into()),
            link_to_profile: Some("false".into()),
            ..Default::default()
        };
        let config = widget_config("http://localhost/api", query);

        assert_eq!(config.username, "octocat");
        assert_eq!(config.weeks, 53);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.end_date, None);
        assert_eq!(config.theme, Theme::named("teal"));
        assert_eq!(config.cell_size, 12);
        assert_eq!(config.cell_gap, 1);
        assert!(!config.link_to_profile);
    }

    #[test]
    fn garbage_widget_params_fall_back_to_defaults() {
        let query = WidgetQuery {
            username: Some("octocat".into()),
            weeks: Some("many".into()),
            start_date: Some("yesterday".into()),
            cell_gap: Some("-1".into()),
            ..Default::default()
        };
        let config = widget_config("http://localhost/api", query);

        assert_eq!(config.weeks, 26);
        assert_eq!(config.start_date, None);
        assert_eq!(config.cell_gap, 1);
        assert!(config.link_to_profile);
    }
}
