//! Page-level flows. Each page owns its view state and talks to the backend
//! through a [`MarketplaceApi`](market_api::MarketplaceApi).

pub mod bid_requests;
pub mod job_details;
pub mod my_bids;

pub use bid_requests::{BidRequests, StatusChangeOutcome};
pub use job_details::{BidForm, JobDetails, Route, SubmitOutcome};
pub use my_bids::MyBids;
