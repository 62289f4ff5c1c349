pub mod error;
pub mod rpc;
pub mod types;

pub use error::ApiError;
pub use rpc::{HttpClient, MarketplaceApi};
