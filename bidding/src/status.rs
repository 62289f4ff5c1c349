use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Lifecycle of a bid. The backend owns the full set of values, anything it
/// sends that we don't know about is carried as `Other` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BidStatus {
    Pending,
    InProgress,
    Rejected,
    Completed,
    Other(String),
}

impl BidStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::InProgress => "In Progress",
            BidStatus::Rejected => "Rejected",
            BidStatus::Completed => "Completed",
            BidStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BidStatus::Completed)
    }
}

impl From<String> for BidStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => BidStatus::Pending,
            "In Progress" => BidStatus::InProgress,
            "Rejected" => BidStatus::Rejected,
            "Completed" => BidStatus::Completed,
            _ => BidStatus::Other(s),
        }
    }
}

impl From<BidStatus> for String {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("bid status can't be empty")]
pub struct EmptyStatus;

/// Lenient parsing for command line input: accepts the wire strings plus
/// shorthands like `accept`, `reject` and `in-progress`.
impl FromStr for BidStatus {
    type Err = EmptyStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyStatus);
        }
        let key = trimmed.to_lowercase().replace(['_', ' '], "-");
        let status = match key.as_str() {
            "pending" => BidStatus::Pending,
            "in-progress" | "accept" | "accepted" => BidStatus::InProgress,
            "rejected" | "reject" => BidStatus::Rejected,
            "completed" | "complete" => BidStatus::Completed,
            _ => BidStatus::Other(trimmed.to_string()),
        };
        Ok(status)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusChangeError {
    #[error("bid is already {0}")]
    Unchanged(BidStatus),
    #[error("bid is completed and can no longer change")]
    Terminal,
}

/// Client-side guard run before asking the backend for a status change.
pub fn check_status_change(prev: &BidStatus, next: &BidStatus) -> Result<(), StatusChangeError> {
    if prev == next {
        return Err(StatusChangeError::Unchanged(prev.clone()));
    }
    if prev.is_terminal() {
        return Err(StatusChangeError::Terminal);
    }
    Ok(())
}

#[cfg(any(test, feature = "test"))]
pub mod test_utils {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for BidStatus {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(BidStatus::Pending),
                Just(BidStatus::InProgress),
                Just(BidStatus::Rejected),
                Just(BidStatus::Completed),
                "[A-Z][a-z]{2,10}".prop_map(|s: String| BidStatus::from(s)),
            ]
            .boxed()
        }
    }
}
