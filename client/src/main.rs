use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use market_client::{
    cli::{BaseConfig, Command, JobConfig, PlaceBidConfig, SetStatusConfig},
    env::{create_api, init_console_subscriber},
    formatter::{OutputFormatter, Perspective},
    pages::{BidRequests, JobDetails, MyBids, SubmitOutcome},
};
use serde::Serialize;
use tracing::info;

fn log_config<C: Serialize>(config: &C) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

async fn bid_requests(config: BaseConfig) -> Result<()> {
    let api = create_api(&config)?;
    let mut page = BidRequests::new(api, config.session());
    page.refresh().await;
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    let formatter = OutputFormatter::new(config.output);
    println!("{}", formatter.format_bids(page.bids(), Perspective::Buyer)?);
    Ok(())
}

async fn set_status(config: SetStatusConfig) -> Result<()> {
    let api = create_api(&config.base)?;
    let mut page = BidRequests::new(api, config.base.session());
    page.refresh().await;
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    let outcome = page.change_status(&config.id, config.status.clone()).await;
    if !outcome.is_success() {
        bail!("{}", outcome);
    }
    eprintln!("{}", outcome);
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    let formatter = OutputFormatter::new(config.base.output);
    println!("{}", formatter.format_bids(page.bids(), Perspective::Buyer)?);
    Ok(())
}

async fn my_bids(config: BaseConfig) -> Result<()> {
    let api = create_api(&config)?;
    let mut page = MyBids::new(api, config.session());
    page.refresh().await;
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    let formatter = OutputFormatter::new(config.output);
    println!("{}", formatter.format_bids(page.bids(), Perspective::Bidder)?);
    Ok(())
}

async fn job(config: JobConfig) -> Result<()> {
    let api = create_api(&config.base)?;
    let mut page = JobDetails::new(api, config.base.session(), config.id.as_str(), Utc::now());
    page.load().await;
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    if let Some(job) = page.job() {
        let formatter = OutputFormatter::new(config.base.output);
        println!("{}", formatter.format_job(job)?);
    }
    Ok(())
}

async fn place_bid(config: PlaceBidConfig) -> Result<()> {
    let api = create_api(&config.base)?;
    let session = config.base.session();
    let mut page = JobDetails::new(api, session.clone(), config.job_id.as_str(), Utc::now());
    page.load().await;
    if let Some(error) = page.error() {
        bail!("{}", error);
    }
    page.form.price = config.price.clone();
    page.form.comment = config.comment.clone();
    if let Some(deadline) = config.deadline {
        page.form.deadline = deadline;
    }

    let outcome = page.submit(Utc::now()).await;
    if !outcome.is_success() {
        bail!("{}", outcome);
    }
    eprintln!("{} ({})", outcome, session);
    if let SubmitOutcome::Placed { redirect, .. } = outcome {
        info!("Redirecting to {}", redirect.path());
        let mut landing = MyBids::new(page.into_api(), session);
        landing.refresh().await;
        if let Some(error) = landing.error() {
            bail!("{}", error);
        }
        let formatter = OutputFormatter::new(config.base.output);
        println!("{}", formatter.format_bids(landing.bids(), Perspective::Bidder)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_console_subscriber();
    match Command::parse() {
        Command::BidRequests(config) => {
            log_config(&config)?;
            bid_requests(config).await
        }
        Command::SetStatus(config) => {
            log_config(&config)?;
            set_status(config).await
        }
        Command::MyBids(config) => {
            log_config(&config)?;
            my_bids(config).await
        }
        Command::Job(config) => {
            log_config(&config)?;
            job(config).await
        }
        Command::PlaceBid(config) => {
            log_config(&config)?;
            place_bid(config).await
        }
    }
}
