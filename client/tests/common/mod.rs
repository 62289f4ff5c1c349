#![allow(dead_code)]

use bidding::{Bid, BidPrice, BidStatus, Buyer, Job, NewBid};
use chrono::{DateTime, TimeZone, Utc};
use market_api::{types::InsertResponse, ApiError, MarketplaceApi};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListBids { email: String, as_buyer: bool },
    UpdateStatus { id: String, status: BidStatus },
    GetJob(String),
    AddBid(NewBid),
}

/// In-memory backend. Status updates are applied to the stored bids so a
/// refetch sees them.
pub struct FakeApi {
    pub bids: Mutex<Vec<Bid>>,
    pub job: Option<Job>,
    pub fail_list: bool,
    pub fail_update: bool,
    pub add_bid: Result<InsertResponse, (u16, Option<String>)>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            bids: Mutex::new(Vec::new()),
            job: None,
            fail_list: false,
            fail_update: false,
            add_bid: Ok(InsertResponse {
                inserted_id: Some("new-bid-1".into()),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn with_bids(bids: Vec<Bid>) -> Self {
        Self {
            bids: Mutex::new(bids),
            ..Default::default()
        }
    }

    pub fn with_job(job: Job) -> Self {
        Self {
            job: Some(job),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: Some("internal error".into()),
    }
}

impl MarketplaceApi for FakeApi {
    async fn list_bids(&self, email: &str, as_buyer: bool) -> Result<Vec<Bid>, ApiError> {
        self.record(Call::ListBids {
            email: email.to_string(),
            as_buyer,
        });
        if self.fail_list {
            return Err(server_error());
        }
        Ok(self.bids.lock().unwrap().clone())
    }

    async fn update_bid_status(
        &self,
        id: &str,
        status: &BidStatus,
    ) -> Result<serde_json::Value, ApiError> {
        self.record(Call::UpdateStatus {
            id: id.to_string(),
            status: status.clone(),
        });
        if self.fail_update {
            return Err(server_error());
        }
        let mut bids = self.bids.lock().unwrap();
        let mut modified = 0;
        for bid in bids.iter_mut().filter(|b| b.id == id) {
            bid.status = status.clone();
            modified += 1;
        }
        Ok(serde_json::json!({ "modifiedCount": modified }))
    }

    async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        self.record(Call::GetJob(id.to_string()));
        match &self.job {
            Some(job) if job.id == id => Ok(job.clone()),
            _ => Err(ApiError::Status {
                status: 404,
                message: None,
            }),
        }
    }

    async fn add_bid(&self, bid: &NewBid) -> Result<InsertResponse, ApiError> {
        self.record(Call::AddBid(bid.clone()));
        match &self.add_bid {
            Ok(r) => Ok(r.clone()),
            Err((status, message)) => Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

pub const BUYER: &str = "rina@example.com";
pub const BIDDER: &str = "sam@example.com";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn job() -> Job {
    Job {
        id: "665f1c2e9b1d8a0012ab34cd".into(),
        title: "Build a landing page".into(),
        category: "Web Development".into(),
        deadline: Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap(),
        min_price: 100.0,
        max_price: 500.0,
        description: "Single page, responsive".into(),
        buyer: Buyer {
            name: "Rina".into(),
            email: BUYER.into(),
            photo: "https://example.com/rina.png".into(),
        },
    }
}

pub fn bid(id: &str, status: BidStatus) -> Bid {
    Bid {
        id: id.into(),
        title: "Build a landing page".into(),
        buyer_email: BUYER.into(),
        category: "Web Development".into(),
        price: BidPrice::Amount(350.0),
        comment: String::new(),
        email: BIDDER.into(),
        bid_deadline: Utc.with_ymd_and_hms(2026, 11, 20, 0, 0, 0).unwrap(),
        job_id: job().id,
        status,
    }
}
