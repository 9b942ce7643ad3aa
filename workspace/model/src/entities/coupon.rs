use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A discount code. Immutable once created, except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub code: String,
    /// Discount percentage.
    pub discount: i64,
    pub description: String,
}
