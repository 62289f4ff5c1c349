use crate::{
    error::ApiError,
    types::{ErrorBody, InsertResponse, JobEnvelope, StatusUpdate},
};
use bidding::{Bid, BidStatus, Job, NewBid};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// The marketplace backend endpoints the pages need.
#[allow(async_fn_in_trait)]
pub trait MarketplaceApi {
    /// Bids placed by `email`, or with `as_buyer` the bids placed on `email`'s jobs.
    async fn list_bids(&self, email: &str, as_buyer: bool) -> Result<Vec<Bid>, ApiError>;

    async fn update_bid_status(
        &self,
        id: &str,
        status: &BidStatus,
    ) -> Result<serde_json::Value, ApiError>;

    async fn get_job(&self, id: &str) -> Result<Job, ApiError>;

    async fn add_bid(&self, bid: &NewBid) -> Result<InsertResponse, ApiError>;
}

impl<T: MarketplaceApi + ?Sized> MarketplaceApi for &T {
    async fn list_bids(&self, email: &str, as_buyer: bool) -> Result<Vec<Bid>, ApiError> {
        (**self).list_bids(email, as_buyer).await
    }

    async fn update_bid_status(
        &self,
        id: &str,
        status: &BidStatus,
    ) -> Result<serde_json::Value, ApiError> {
        (**self).update_bid_status(id, status).await
    }

    async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        (**self).get_job(id).await
    }

    async fn add_bid(&self, bid: &NewBid) -> Result<InsertResponse, ApiError> {
        (**self).add_bid(bid).await
    }
}

#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .user_agent(concat!("market-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn bids_url(&self, email: &str, as_buyer: bool) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["client", "my-bids", email])?;
        if as_buyer {
            url.query_pairs_mut().append_pair("buyer", "true");
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "response received");
        decode_response(status, &body)
    }
}

/// Turns a raw status and body into either the decoded payload or an
/// `ApiError::Status` carrying the backend's message.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(ApiError::Status { status, message });
    }
    Ok(serde_json::from_slice(body)?)
}

impl MarketplaceApi for HttpClient {
    async fn list_bids(&self, email: &str, as_buyer: bool) -> Result<Vec<Bid>, ApiError> {
        let url = self.bids_url(email, as_buyer)?;
        debug!(%url, "GET bids");
        self.send(self.http.get(url)).await
    }

    async fn update_bid_status(
        &self,
        id: &str,
        status: &BidStatus,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&["update-bid-status", id])?;
        debug!(%url, %status, "PATCH bid status");
        let body = StatusUpdate {
            status: status.clone(),
        };
        self.send(self.http.patch(url).json(&body)).await
    }

    async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        let url = self.endpoint(&["update", "job", id])?;
        debug!(%url, "GET job");
        let envelope: JobEnvelope = self.send(self.http.get(url)).await?;
        Ok(envelope.result)
    }

    async fn add_bid(&self, bid: &NewBid) -> Result<InsertResponse, ApiError> {
        let url = self.endpoint(&["client", "add-bid"])?;
        debug!(%url, job = %bid.job_id, "POST bid");
        self.send(self.http.post(url).json(bid)).await
    }
}
