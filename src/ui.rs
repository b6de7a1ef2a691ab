use crate::labels::{format_count, month_span};
use crate::widget::{ViewState, WidgetConfig, WidgetState};
use reqwest::Url;
use std::fmt::Write;

const PROFILE_BASE_URL: &str = "https://github.com/";

/// Markup for the widget in its current state. Empty for `Error`, for an
/// empty calendar, and while loading when the loading indicator is off.
pub fn render_widget(config: &WidgetConfig, state: &WidgetState) -> String {
    match state {
        WidgetState::Idle | WidgetState::Loading if config.show_loading => render_loading(config),
        WidgetState::Ready(view) if !view.weeks.is_empty() => render_ready(config, view),
        _ => String::new(),
    }
}

fn render_loading(config: &WidgetConfig) -> String {
    format!(
        r#"<div class="{}" aria-busy="true"><span class="heatmap-loading">Loading…</span></div>"#,
        widget_class(config)
    )
}

fn render_ready(config: &WidgetConfig, view: &ViewState) -> String {
    let size = config.cell_size;
    let gap = config.cell_gap;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="{}" style="display:inline-flex;flex-direction:column;gap:4px;">"#,
        widget_class(config)
    );

    let _ = write!(
        html,
        r#"<div class="heatmap-months" style="display:flex;gap:{gap}px;height:12px;font-size:9px;line-height:12px;">"#
    );
    for label in &view.month_labels {
        let _ = write!(
            html,
            r#"<span style="width:{size}px;flex:none;overflow:visible;white-space:nowrap;">{}</span>"#,
            label.unwrap_or("")
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        r#"<div class="heatmap-grid" role="img" aria-label="Contribution heatmap" style="display:flex;gap:{gap}px;">"#
    );
    for week in &view.weeks {
        let _ = write!(
            html,
            r#"<div class="heatmap-week" style="display:flex;flex-direction:column;gap:{gap}px;">"#
        );
        for day in week {
            let _ = write!(
                html,
                r#"<div class="heatmap-cell" data-date="{date}" data-count="{count}" data-level="{level}" title="{date}: {count} contributions" style="width:{size}px;height:{size}px;background-color:{color};"></div>"#,
                date = day.date,
                count = day.count,
                level = day.level,
                color = html_escape(config.theme.color(day.level)),
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="heatmap-stats" style="display:flex;justify-content:space-between;gap:8px;font-size:10px;">"#);
    if let Some((first, last)) = month_span(&view.weeks) {
        let _ = write!(html, r#"<span class="heatmap-range">{first} – {last}</span>"#);
    }
    let _ = write!(
        html,
        r#"<span class="heatmap-total">{} contributions</span>"#,
        format_count(view.total_contributions)
    );
    html.push_str("</div></div>");

    match profile_url(&config.username).filter(|_| config.link_to_profile) {
        Some(href) => format!(
            r#"<a class="heatmap-link" href="{}" target="_blank" rel="noopener noreferrer" style="color:inherit;text-decoration:none;">{html}</a>"#,
            html_escape(&href)
        ),
        None => html,
    }
}

/// Profile page for `username`, encoded as a single path segment.
fn profile_url(username: &str) -> Option<String> {
    let mut url = Url::parse(PROFILE_BASE_URL).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(username);
    Some(url.into())
}

fn widget_class(config: &WidgetConfig) -> String {
    let extra = config.class_name.trim();
    if extra.is_empty() {
        "heatmap".to_string()
    } else {
        format!("heatmap {}", html_escape(extra))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_index() -> String {
    INDEX_HTML.to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Contribution Heatmap</title>
  <style>
    :root {
      --bg: #0d1117;
      --card: #161b22;
      --ink: #e6edf3;
      --muted: #8b949e;
      --accent: #39d353;
      --border: rgba(240, 246, 252, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
    }

    input, select, button {
      font: inherit;
      border-radius: 8px;
      border: 1px solid var(--border);
      background: var(--bg);
      color: var(--ink);
      padding: 8px 12px;
    }

    button {
      background: var(--accent);
      color: #0d1117;
      font-weight: 600;
      cursor: pointer;
    }

    #widget {
      min-height: 80px;
      overflow-x: auto;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Contribution Heatmap</h1>
      <p class="subtitle">Daily contributions, bucketed by week.</p>
    </header>

    <form id="controls">
      <label>Username <input id="username" name="username" required /></label>
      <label>Weeks <input id="weeks" name="weeks" type="number" min="1" max="53" value="26" /></label>
      <label>Theme
        <select id="theme" name="theme">
          <option value="green">Green</option>
          <option value="halloween">Halloween</option>
          <option value="teal">Teal</option>
          <option value="blue">Blue</option>
          <option value="monochrome">Monochrome</option>
        </select>
      </label>
      <label>Cell size <input id="cellSize" name="cellSize" type="number" min="2" max="24" value="10" /></label>
      <button type="submit">Show</button>
    </form>

    <section id="widget"></section>
  </main>

  <script>
    const form = document.getElementById('controls');
    const widgetEl = document.getElementById('widget');
    let generation = 0;

    const load = async () => {
      const current = ++generation;
      const params = new URLSearchParams(new FormData(form));
      widgetEl.innerHTML = '<span class="heatmap-loading">Loading…</span>';
      try {
        const res = await fetch(`/widget?${params}`);
        const html = res.ok ? await res.text() : '';
        if (current === generation) {
          widgetEl.innerHTML = html;
        }
      } catch (err) {
        console.error('heatmap request failed', err);
        if (current === generation) {
          widgetEl.innerHTML = '';
        }
      }
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      load();
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContributionsResponse, Day};
    use chrono::{Duration, NaiveDate};

    fn ready(days: &[(NaiveDate, u64, u8)]) -> WidgetState {
        let week = days
            .iter()
            .map(|&(date, count, level)| Day { date, count, level })
            .collect();
        let total = days.iter().map(|d| d.1).sum();
        WidgetState::Ready(ViewState::from(ContributionsResponse {
            total_contributions: total,
            weeks: vec![week],
        }))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cell_exposes_date_and_count() {
        let config = WidgetConfig::new("http://localhost/api", "octocat");
        let html = render_widget(&config, &ready(&[(date(2024, 7, 4), 5, 2)]));

        assert!(html.contains(r#"data-date="2024-07-04""#));
        assert!(html.contains(r#"data-count="5""#));
        assert!(html.contains(r#"title="2024-07-04: 5 contributions""#));
        assert!(html.contains("background-color:#006d32;"));
    }

    #[test]
    fn cells_follow_chronological_order() {
        let config = WidgetConfig::new("http://localhost/api", "octocat");
        let start = date(2024, 7, 1);
        let days: Vec<_> = (0..3).map(|i| (start + Duration::days(i), 1, 1)).collect();
        let html = render_widget(&config, &ready(&days));

        let first = html.find("2024-07-01").unwrap();
        let second = html.find("2024-07-02").unwrap();
        let third = html.find("2024-07-03").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn stats_show_month_range_and_grouped_total() {
        let config = WidgetConfig::new("http://localhost/api", "octocat");
        let html = render_widget(
            &config,
            &ready(&[(date(2024, 6, 30), 1_000, 4), (date(2024, 7, 1), 234, 1)]),
        );
        assert!(html.contains("Jun – Jul"));
        assert!(html.contains("1,234 contributions"));
    }

    #[test]
    fn profile_link_wraps_widget() {
        let mut config = WidgetConfig::new("http://localhost/api", "octocat");
        let state = ready(&[(date(2024, 7, 4), 5, 2)]);

        let html = render_widget(&config, &state);
        assert!(html.starts_with(r#"<a class="heatmap-link" href="https://github.com/octocat""#));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));

        config.link_to_profile = false;
        let html = render_widget(&config, &state);
        assert!(!html.contains("<a "));
    }

    #[test]
    fn profile_link_keeps_username_in_one_segment() {
        let config = WidgetConfig::new("http://localhost/api", "a/b?tab=x");
        let html = render_widget(&config, &ready(&[(date(2024, 7, 4), 5, 2)]));
        assert!(html.contains(r#"href="https://github.com/a%2Fb%3Ftab=x""#), "{html}");
    }

    #[test]
    fn loading_respects_toggle() {
        let mut config = WidgetConfig::new("http://localhost/api", "octocat");
        assert!(render_widget(&config, &WidgetState::Loading).contains("Loading"));

        config.show_loading = false;
        assert_eq!(render_widget(&config, &WidgetState::Loading), "");
    }

    #[test]
    fn empty_calendar_renders_nothing() {
        let config = WidgetConfig::new("http://localhost/api", "octocat");
        let state = WidgetState::Ready(ViewState::from(ContributionsResponse {
            total_contributions: 0,
            weeks: Vec::new(),
        }));
        assert_eq!(render_widget(&config, &state), "");
    }

    #[test]
    fn class_hook_and_username_are_escaped() {
        let mut config = WidgetConfig::new("http://localhost/api", "<bad>");
        config.class_name = r#"x" onclick="y"#.to_string();
        let html = render_widget(&config, &ready(&[(date(2024, 7, 4), 5, 2)]));
        assert!(html.contains(r#"href="https://github.com/%3Cbad%3E""#));
        assert!(html.contains(r#"class="heatmap x&quot; onclick=&quot;y""#));
    }
}
