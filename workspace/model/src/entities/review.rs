use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A resident review shown on the public landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
}
