use std::sync::Arc;

use async_trait::async_trait;
use model::entities::agreement::{Agreement, AgreementStatus};
use model::entities::announcement::Announcement;
use model::entities::apartment::{Apartment, ApartmentStatus};
use model::entities::coupon::Coupon;
use model::entities::payment::Payment;
use model::entities::review::Review;
use model::entities::user::{Role, User};
use thiserror::Error;

pub mod mongo;

/// Failure surfaced by a store handle. Propagated unchanged to the caller;
/// there is no retry and no rollback across multi-step workflows.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("malformed identifier: {0}")]
    MalformedId(#[from] mongodb::bson::oid::Error),
}

/// Lookup and mutation of user accounts, keyed by email.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    /// Returns the number of records actually modified.
    async fn set_role(&self, email: &str, role: Role) -> Result<u64, StoreError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    async fn count_by_role(&self, role: Role) -> Result<u64, StoreError>;
}

/// Read-mostly catalog of rentable units.
#[async_trait]
pub trait ApartmentCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Apartment>, StoreError>;
    /// Top `limit` apartments by descending rent.
    async fn featured(&self, limit: i64) -> Result<Vec<Apartment>, StoreError>;
    /// Inclusive rent range, ascending by rent. An omitted bound leaves
    /// that side of the range open.
    async fn search_by_rent(
        &self,
        min_price: Option<i64>,
        max_price: Option<i64>,
    ) -> Result<Vec<Apartment>, StoreError>;
    async fn set_status(&self, id: &str, status: ApartmentStatus) -> Result<u64, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    async fn count_by_status(&self, status: ApartmentStatus) -> Result<u64, StoreError>;
}

/// Rental agreement records driven by the agreement workflow.
#[async_trait]
pub trait AgreementStore: Send + Sync {
    /// Any agreement for the email, regardless of status.
    async fn find_by_email(&self, email: &str) -> Result<Option<Agreement>, StoreError>;
    async fn insert(&self, agreement: &Agreement) -> Result<(), StoreError>;
    async fn list_by_status(&self, status: AgreementStatus) -> Result<Vec<Agreement>, StoreError>;
    /// Marks the agreement `Checked` and stamps the accept date.
    async fn mark_checked(&self, id: &str, accept_date: &str) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait CouponStore: Send + Sync {
    async fn insert(&self, coupon: &Coupon) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Coupon>, StoreError>;
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;
    /// Exact match on the `code` field.
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError>;
}

#[async_trait]
pub trait AnnouncementBoard: Send + Sync {
    async fn insert(&self, announcement: &Announcement) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Announcement>, StoreError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert(&self, review: &Review) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Review>, StoreError>;
}

/// Append-only ledger of completed payments.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    async fn record(&self, payment: &Payment) -> Result<(), StoreError>;
    async fn history_for(&self, email: &str) -> Result<Vec<Payment>, StoreError>;
}

/// Liveness probe against the backing store, used by the health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// The full set of store handles, opened once at startup and injected into
/// the components that need them.
#[derive(Clone)]
pub struct StoreHandles {
    pub users: Arc<dyn UserDirectory>,
    pub apartments: Arc<dyn ApartmentCatalog>,
    pub agreements: Arc<dyn AgreementStore>,
    pub coupons: Arc<dyn CouponStore>,
    pub announcements: Arc<dyn AnnouncementBoard>,
    pub reviews: Arc<dyn ReviewStore>,
    pub payments: Arc<dyn PaymentLedger>,
    pub health: Arc<dyn StoreHealth>,
}
