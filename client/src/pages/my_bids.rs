use crate::session::Session;
use bidding::Bid;
use market_api::MarketplaceApi;
use tracing::{debug, error, info, instrument};

pub const FETCH_ERROR: &str = "Failed to fetch your bids";

/// Bids the signed-in user has placed. Where a successful bid lands.
pub struct MyBids<A> {
    api: A,
    session: Session,
    bids: Vec<Bid>,
    error: Option<String>,
}

impl<A: MarketplaceApi> MyBids<A> {
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

    #[instrument(skip_all, level = "info", fields(user = %self.session))]
    pub async fn refresh(&mut self) {
        let Some(email) = self.session.email() else {
            debug!("no signed-in user, not fetching bids");
            return;
        };
        match self.api.list_bids(email, false).await {
            Ok(bids) => {
                info!(count = bids.len(), "fetched placed bids");
                self.bids = bids;
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching placed bids");
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
    }
}
