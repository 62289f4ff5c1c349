use crate::status::BidStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: String,
}

/// A job request posted by a buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub category: String,
    pub deadline: DateTime<Utc>,
    #[serde(deserialize_with = "price::deserialize")]
    pub min_price: f64,
    #[serde(deserialize_with = "price::deserialize")]
    pub max_price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub buyer: Buyer,
}

/// A bid as stored by the marketplace backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub buyer_email: String,
    pub category: String,
    pub price: BidPrice,
    #[serde(default)]
    pub comment: String,
    pub email: String,
    pub bid_deadline: DateTime<Utc>,
    #[serde(rename = "bidId")]
    pub job_id: String,
    pub status: BidStatus,
}

/// Price on a stored bid. Older records may hold form text that was never a
/// number; those are kept verbatim so the rest of a listing still loads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BidPrice {
    Amount(f64),
    Unparsed(String),
}

impl BidPrice {
    pub fn amount(&self) -> Option<f64> {
        match self {
            BidPrice::Amount(n) => Some(*n),
            BidPrice::Unparsed(_) => None,
        }
    }
}

impl From<f64> for BidPrice {
    fn from(n: f64) -> Self {
        BidPrice::Amount(n)
    }
}

impl fmt::Display for BidPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidPrice::Amount(n) => write!(f, "${}", n),
            BidPrice::Unparsed(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for BidPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match price::Raw::deserialize(deserializer)? {
            price::Raw::Number(n) => BidPrice::Amount(n),
            price::Raw::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => BidPrice::Amount(n),
                Err(_) => BidPrice::Unparsed(s),
            },
        })
    }
}

/// The payload posted when a bidder places a bid on a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBid {
    pub title: String,
    pub buyer_email: String,
    pub category: String,
    pub price: f64,
    pub comment: String,
    pub email: String,
    pub bid_deadline: DateTime<Utc>,
    #[serde(rename = "bidId")]
    pub job_id: String,
    pub status: BidStatus,
}

impl NewBid {
    pub fn for_job(
        job: &Job,
        bidder_email: &str,
        price: f64,
        comment: &str,
        bid_deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: job.title.clone(),
            buyer_email: job.buyer.email.clone(),
            category: job.category.clone(),
            price,
            comment: comment.to_string(),
            email: bidder_email.to_string(),
            bid_deadline,
            job_id: job.id.clone(),
            status: BidStatus::Pending,
        }
    }
}

// Prices come back as numbers or as the raw form text, depending on who wrote the record.
mod price {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("invalid price {:?}: {}", s, e))),
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod test_utils {
    use super::{Buyer, Job};
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    // 2020-01-01 .. 2040-01-01
    const EPOCH_FROM: i64 = 1_577_836_800;
    const EPOCH_TO: i64 = 2_208_988_800;

    pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
        (EPOCH_FROM..EPOCH_TO).prop_filter_map("timestamp out of range", |secs| {
            DateTime::<Utc>::from_timestamp(secs, 0)
        })
    }

    impl Arbitrary for Job {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            (
                "[0-9a-f]{24}",
                "[A-Za-z ]{1,24}",
                "[A-Za-z ]{1,16}",
                timestamp(),
                0u32..10_000,
                0u32..10_000,
                "[a-z]{1,10}@[a-z]{1,8}\\.com",
            )
                .prop_map(|(id, title, category, deadline, min, spread, email)| Job {
                    id,
                    title,
                    category,
                    deadline,
                    min_price: min as f64,
                    max_price: (min + spread) as f64,
                    description: String::new(),
                    buyer: Buyer {
                        name: String::new(),
                        email,
                        photo: String::new(),
                    },
                })
                .boxed()
        }
    }
}
