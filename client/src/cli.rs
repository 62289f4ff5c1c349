use crate::{formatter::OutputFormat, session::Session};
use bidding::{BidStatus, EmptyStatus};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;
use url::Url;

#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub enum Command {
    /// List the bids placed on the signed-in buyer's jobs
    BidRequests(BaseConfig),
    /// Change the status of a bid on one of the signed-in buyer's jobs
    SetStatus(SetStatusConfig),
    /// List the bids the signed-in user has placed
    MyBids(BaseConfig),
    /// Show a job
    Job(JobConfig),
    /// Place a bid on a job
    PlaceBid(PlaceBidConfig),
}

#[derive(Clone, Parser, Serialize)]
pub struct BaseConfig {
    /// API protocol
    #[arg(long, env = "API_PROTOCOL", default_value = "http")]
    pub api_protocol: String,

    /// API host
    #[arg(long, env = "API_HOST", default_value = "localhost")]
    pub api_host: String,

    /// API port (optional, not needed behind a reverse proxy)
    #[arg(long, env = "API_PORT")]
    pub api_port: Option<String>,

    /// Email of the signed-in user
    #[arg(long, env = "USER_EMAIL")]
    pub user_email: Option<String>,

    /// Display name of the signed-in user
    #[arg(long, env = "USER_NAME")]
    pub user_name: Option<String>,

    #[arg(long, env = "OUTPUT", value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl BaseConfig {
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        let api_url = match &self.api_port {
            Some(port) => format!("{}://{}:{}", self.api_protocol, self.api_host, port),
            None => format!("{}://{}", self.api_protocol, self.api_host),
        };
        Url::parse(&api_url)
    }

    pub fn session(&self) -> Session {
        Session::new(self.user_email.clone(), self.user_name.clone())
    }
}

#[derive(Clone, Parser, Serialize)]
pub struct SetStatusConfig {
    #[clap(flatten)]
    pub base: BaseConfig,

    #[arg(long)]
    pub id: String,

    /// New status: pending, in-progress (accept), rejected (reject), completed, or any backend value
    #[arg(long, value_parser = parse_status)]
    pub status: BidStatus,
}

#[derive(Clone, Parser, Serialize)]
pub struct JobConfig {
    #[clap(flatten)]
    pub base: BaseConfig,

    #[arg(long)]
    pub id: String,
}

#[derive(Clone, Parser, Serialize)]
pub struct PlaceBidConfig {
    #[clap(flatten)]
    pub base: BaseConfig,

    #[arg(long)]
    pub job_id: String,

    #[arg(long)]
    pub price: String,

    #[arg(long, default_value = "")]
    pub comment: String,

    /// When the work will be delivered, RFC 3339 or YYYY-MM-DD. Defaults to now.
    #[arg(long, value_parser = parse_deadline)]
    pub deadline: Option<DateTime<Utc>>,
}

/// Reads a status the way a person types it, so `complete` and `Completed`
/// land on the same wire value.
pub fn parse_status(s: &str) -> Result<BidStatus, EmptyStatus> {
    s.parse()
}

/// Accepts a full RFC 3339 timestamp or a bare date, which is read as
/// midnight UTC.
pub fn parse_deadline(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("{:?} is neither RFC 3339 nor YYYY-MM-DD", s))
}
