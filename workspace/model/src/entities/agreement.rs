use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lifecycle of a rental agreement. `Pending` moves to `Checked` when an
/// admin resolves the request; `Checked` is terminal.
///
/// The variants are persisted capitalized, matching the historical
/// document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementStatus {
    Pending,
    Checked,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Checked => "Checked",
        }
    }
}

/// A rental request linking a user to an apartment.
///
/// The apartment details are denormalized onto the agreement at submission
/// time so the request list renders without a catalog join. There is no
/// stored creation date; the creation instant is embedded in the ObjectId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_name: String,
    pub user_email: String,
    /// Hex ObjectId of the requested apartment.
    pub apartment_id: String,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub rent: i64,
    pub status: AgreementStatus,
    /// RFC 3339 instant stamped when the request is resolved. Stamped on
    /// rejection too, not only on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_date: Option<String>,
}
