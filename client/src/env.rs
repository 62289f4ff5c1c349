use crate::cli::BaseConfig;
use anyhow::Result;
use market_api::HttpClient;
use tracing::info;
use time::macros::format_description;
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    EnvFilter,
};

/// Initialize the console subscriber for logging. Logs go to stderr, stdout
/// is reserved for page output.
pub fn init_console_subscriber() {
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(timer)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
}

pub fn create_api(config: &BaseConfig) -> Result<HttpClient> {
    let api = HttpClient::new(config.api_url()?)?;
    info!(api = %api.base_url(), user = %config.session(), "using marketplace API");
    Ok(api)
}
