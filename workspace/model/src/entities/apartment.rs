use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Whether an apartment can still be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentStatus {
    Available,
    Unavailable,
}

impl ApartmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A rentable unit in the building.
///
/// The status is mutated only by agreement acceptance; everything else is
/// read-mostly catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub apartment_image: String,
    /// Monthly rent in whole currency units.
    pub rent: i64,
    pub status: ApartmentStatus,
}
