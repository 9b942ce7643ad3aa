use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A completed rent payment. Append-only; there is no idempotency key, so
/// a retried client request produces a second record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub rent: i64,
    /// Month the payment covers, as entered by the member.
    pub month: String,
    pub transaction_id: String,
}
