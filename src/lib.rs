pub mod aggregate;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod labels;
pub mod level;
pub mod models;
pub mod theme;
pub mod ui;
pub mod upstream;
pub mod state;
pub mod widget;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use widget::{HeatmapWidget, WidgetConfig, WidgetState};
