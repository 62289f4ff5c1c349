use bidding::{BidStatus, Job};
use serde::{Deserialize, Serialize};

/// `GET /update/job/{id}` wraps the job in a `result` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub result: Job,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResponse {
    #[serde(rename = "insertedId", default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: BidStatus,
}

/// Error payload the backend sends along with non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
