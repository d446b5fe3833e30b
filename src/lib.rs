pub mod api;
pub mod classify;
pub mod display;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod pagination;
pub mod prefs;
pub mod query;
pub mod screens;
pub mod validate;
pub mod workflow;

pub use crate::api::{ApiClient, Transport, UreqTransport};
pub use crate::classify::{
    appraisal_grade, priority_level, stock_status, stock_status_of, Grade, Priority, StockStatus,
};
pub use crate::errors::{AppError, AppResult};
pub use crate::pagination::{page_window, PageToken};
pub use crate::query::{apply, ListPage, ListQuery, ListSpec, Queryable, SortOrder};
pub use crate::screens::ScreenState;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

pub fn init_tracing(app_data_dir: &Path) -> Result<(), String> {
    let log_dir = app_data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "console.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
