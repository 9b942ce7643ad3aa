use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Access level of a user account.
///
/// Stored as a lowercase string in the document store. Role checks are
/// exact-match: an `Admin` does not satisfy a `Member` requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role assigned on first sign-in.
    User,
    /// Granted when a rental agreement is accepted.
    Member,
    Admin,
}

impl Role {
    /// The string persisted in documents and used in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Capitalized label used in user-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Member => "Member",
            Self::Admin => "Admin",
        }
    }
}

/// A user account, keyed by email.
///
/// Created on first sign-in if not already present; the role is mutated by
/// the agreement workflow (promotion to member) or by admin action
/// (demotion back to user). Accounts are never deleted in-band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub role: Role,
}
