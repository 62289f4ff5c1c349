use crate::session::Session;
use bidding::{check_status_change, Bid, BidStatus, StatusChangeError};
use market_api::MarketplaceApi;
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

pub const FETCH_ERROR: &str = "Failed to fetch bid requests";

#[derive(Debug, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// The backend accepted the change and the list was refetched.
    Updated,
    /// Refused client-side, nothing was sent.
    NotAllowed(StatusChangeError),
    UnknownBid(String),
    Failed(String),
}

impl StatusChangeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusChangeOutcome::Updated)
    }
}

impl fmt::Display for StatusChangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusChangeOutcome::Updated => write!(f, "Bid status updated"),
            StatusChangeOutcome::NotAllowed(reason) => write!(f, "Not allowed: {}", reason),
            StatusChangeOutcome::UnknownBid(id) => write!(f, "No bid request with id {}", id),
            StatusChangeOutcome::Failed(e) => write!(f, "Could not update bid status: {}", e),
        }
    }
}

/// The recruiter view: bids placed on the signed-in buyer's jobs.
pub struct BidRequests<A> {
    api: A,
    session: Session,
    bids: Vec<Bid>,
    error: Option<String>,
}

impl<A: MarketplaceApi> BidRequests<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            bids: Vec::new(),
            error: None,
        }
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refetch the whole list. Does nothing without a signed-in user.
    #[instrument(skip_all, level = "info", fields(user = %self.session))]
    pub async fn refresh(&mut self) {
        let Some(email) = self.session.email() else {
            debug!("no signed-in user, not fetching bid requests");
            return;
        };
        match self.api.list_bids(email, true).await {
            Ok(bids) => {
                info!(count = bids.len(), "fetched bid requests");
                self.bids = bids;
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching bid requests");
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
    }

    #[instrument(skip_all, level = "info", fields(user = %self.session, bid = id))]
    pub async fn handle_status_change(
        &mut self,
        id: &str,
        prev: &BidStatus,
        next: &BidStatus,
    ) -> StatusChangeOutcome {
        debug!(bid = id, %prev, %next, "status change requested");
        if let Err(reason) = check_status_change(prev, next) {
            warn!(bid = id, %reason, "Not allowed");
            return StatusChangeOutcome::NotAllowed(reason);
        }
        match self.api.update_bid_status(id, next).await {
            Ok(response) => {
                debug!(bid = id, %response, "status update acknowledged");
                self.refresh().await;
                StatusChangeOutcome::Updated
            }
            Err(e) => {
                error!(bid = id, error = %e, "Error updating bid status");
                StatusChangeOutcome::Failed(e.to_string())
            }
        }
    }

    /// Like [`Self::handle_status_change`], taking the current status from the loaded list.
    pub async fn change_status(&mut self, id: &str, next: BidStatus) -> StatusChangeOutcome {
        let prev = self
            .bids
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.status.clone());
        match prev {
            Some(prev) => self.handle_status_change(id, &prev, &next).await,
            None => {
                warn!(bid = id, "no such bid request");
                StatusChangeOutcome::UnknownBid(id.to_string())
            }
        }
    }
}
