use crate::model::Job;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// Reasons a bid is refused before it is sent. The messages are shown to the
/// bidder as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BidRejection {
    #[error("Action not permitted!")]
    SelfBid,
    #[error("Deadline over, placing bid is forbidden!")]
    DeadlineOver,
    #[error("Offer a deadline within provided date!")]
    DeadlineBeyondJob,
    #[error("You shouldn't bid over max-price: ${0}!")]
    OverMaxPrice(f64),
    #[error("Price must be a number, got {0:?}")]
    InvalidPrice(String),
}

pub fn parse_price(text: &str) -> Result<f64, BidRejection> {
    match text.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(BidRejection::InvalidPrice(text.to_string())),
    }
}

/// Advisory checks on a bid, in a fixed order, stopping at the first failure.
/// The backend is still the authority on all of these.
pub fn validate_bid(
    job: &Job,
    bidder_email: &str,
    price: f64,
    bid_deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), BidRejection> {
    if bidder_email == job.buyer.email {
        return Err(BidRejection::SelfBid);
    }
    if now > job.deadline {
        return Err(BidRejection::DeadlineOver);
    }
    if bid_deadline > job.deadline {
        return Err(BidRejection::DeadlineBeyondJob);
    }
    if price > job.max_price {
        return Err(BidRejection::OverMaxPrice(job.max_price));
    }
    debug!(job = %job.id, price, "bid passed client-side validation");
    Ok(())
}
