use crate::session::Session;
use bidding::{parse_price, validate_bid, BidRejection, Job, NewBid};
use chrono::{DateTime, Utc};
use market_api::MarketplaceApi;
use std::fmt;
use tracing::{debug, error, info, instrument};

pub const FETCH_ERROR: &str = "Failed to fetch job";
pub const SUBMIT_ERROR: &str = "There was an error submitting the bid. Please try again.";

/// Where the client goes after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    MyBids,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::MyBids => "/my-bids",
        }
    }
}

/// The "place a bid" form. Price is kept as typed so a bad value can be reported back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct BidForm {
    pub price: String,
    pub comment: String,
    pub deadline: DateTime<Utc>,
}

impl BidForm {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            price: String::new(),
            comment: String::new(),
            deadline: now,
        }
    }

    /// Clears the typed fields. The picked deadline stays.
    pub fn reset(&mut self) {
        self.price.clear();
        self.comment.clear();
    }
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The job hasn't been loaded.
    NotReady,
    SignInRequired,
    Rejected(BidRejection),
    Placed {
        inserted_id: String,
        redirect: Route,
    },
    /// Accepted by the backend without an inserted id, so there is nowhere to go.
    Submitted,
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Placed { .. } | SubmitOutcome::Submitted)
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::NotReady => write!(f, "The job hasn't loaded yet"),
            SubmitOutcome::SignInRequired => write!(f, "Sign in to place a bid"),
            SubmitOutcome::Rejected(reason) => write!(f, "{}", reason),
            SubmitOutcome::Placed { .. } => write!(
                f,
                "Bid placed successfully! You will be redirected to your placed bids."
            ),
            SubmitOutcome::Submitted => write!(f, "Bid submitted"),
            SubmitOutcome::Failed(message) => write!(f, "{}", message),
        }
    }
}

/// One job and the form for bidding on it.
pub struct JobDetails<A> {
    api: A,
    session: Session,
    job_id: String,
    job: Option<Job>,
    error: Option<String>,
    pub form: BidForm,
}

impl<A: MarketplaceApi> JobDetails<A> {
    pub fn new(api: A, session: Session, job_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            api,
            session,
            job_id: job_id.into(),
            job: None,
            error: None,
            form: BidForm::new(now),
        }
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_api(self) -> A {
        self.api
    }

    #[instrument(skip_all, level = "info", fields(job = %self.job_id))]
    pub async fn load(&mut self) {
        match self.api.get_job(&self.job_id).await {
            Ok(job) => {
                debug!(job = %job.id, title = %job.title, "fetched job");
                self.job = Some(job);
                self.error = None;
            }
            Err(e) => {
                error!(job = %self.job_id, error = %e, "Error fetching job");
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
    }

    /// Validates the form against the loaded job and posts the bid.
    #[instrument(skip_all, level = "info", fields(user = %self.session, job = %self.job_id))]
    pub async fn submit(&mut self, now: DateTime<Utc>) -> SubmitOutcome {
        let Some(job) = &self.job else {
            return SubmitOutcome::NotReady;
        };
        let Some(email) = self.session.email() else {
            return SubmitOutcome::SignInRequired;
        };
        let bid = match parse_price(&self.form.price).and_then(|price| {
            validate_bid(job, email, price, self.form.deadline, now)?;
            Ok(NewBid::for_job(
                job,
                email,
                price,
                &self.form.comment,
                self.form.deadline,
            ))
        }) {
            Ok(bid) => bid,
            Err(reason) => {
                info!(job = %job.id, %reason, "bid refused before sending");
                return SubmitOutcome::Rejected(reason);
            }
        };

        match self.api.add_bid(&bid).await {
            Ok(response) => {
                self.form.reset();
                match response.inserted_id {
                    Some(inserted_id) => {
                        info!(job = %bid.job_id, bid = %inserted_id, "bid placed");
                        SubmitOutcome::Placed {
                            inserted_id,
                            redirect: Route::MyBids,
                        }
                    }
                    None => {
                        info!(job = %bid.job_id, "bid submitted without an inserted id");
                        SubmitOutcome::Submitted
                    }
                }
            }
            Err(e) => {
                error!(job = %bid.job_id, error = %e, "Error submitting bid");
                SubmitOutcome::Failed(
                    e.server_message()
                        .filter(|m| !m.trim().is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| SUBMIT_ERROR.to_string()),
                )
            }
        }
    }
}
