pub mod model;
pub mod status;
pub mod validation;

pub use model::{Bid, BidPrice, Buyer, Job, NewBid};
pub use status::{check_status_change, BidStatus, EmptyStatus, StatusChangeError};
pub use validation::{parse_price, validate_bid, BidRejection};
