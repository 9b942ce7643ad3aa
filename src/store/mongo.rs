//! MongoDB-backed implementations of the store handles.
//!
//! Collection names match the historical database layout, so this binary
//! can run against a database populated by earlier deployments.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use model::entities::agreement::{Agreement, AgreementStatus};
use model::entities::announcement::Announcement;
use model::entities::apartment::{Apartment, ApartmentStatus};
use model::entities::coupon::Coupon;
use model::entities::payment::Payment;
use model::entities::review::Review;
use model::entities::user::{Role, User};
use mongodb::Database;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;

use super::{
    AgreementStore, AnnouncementBoard, ApartmentCatalog, CouponStore, PaymentLedger, ReviewStore,
    StoreError, StoreHandles, StoreHealth, UserDirectory,
};

const USERS: &str = "Users";
const APARTMENTS: &str = "Apartments";
const AGREEMENTS: &str = "Agreements";
const COUPONS: &str = "Coupons";
const ANNOUNCEMENTS: &str = "Announcements";
const REVIEWS: &str = "Reviews";
const PAYMENTS: &str = "Payments";

/// Open every collection handle against `db`.
pub fn store_handles(db: &Database) -> StoreHandles {
    StoreHandles {
        users: Arc::new(MongoUserDirectory::new(db)),
        apartments: Arc::new(MongoApartmentCatalog::new(db)),
        agreements: Arc::new(MongoAgreementStore::new(db)),
        coupons: Arc::new(MongoCouponStore::new(db)),
        announcements: Arc::new(MongoAnnouncementBoard::new(db)),
        reviews: Arc::new(MongoReviewStore::new(db)),
        payments: Arc::new(MongoPaymentLedger::new(db)),
        health: Arc::new(MongoStoreHealth::new(db)),
    }
}

pub struct MongoUserDirectory {
    collection: mongodb::Collection<User>,
}

impl MongoUserDirectory {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS),
        }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection.find_one(doc! { "email": email }, None).await?)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.collection.insert_one(user, None).await?;
        Ok(())
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<u64, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "role": role.as_str() } },
                None,
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "role": role.as_str() }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, StoreError> {
        Ok(self
            .collection
            .count_documents(doc! { "role": role.as_str() }, None)
            .await?)
    }
}

pub struct MongoApartmentCatalog {
    collection: mongodb::Collection<Apartment>,
}

impl MongoApartmentCatalog {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(APARTMENTS),
        }
    }
}

#[async_trait]
impl ApartmentCatalog for MongoApartmentCatalog {
    async fn list(&self) -> Result<Vec<Apartment>, StoreError> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn featured(&self, limit: i64) -> Result<Vec<Apartment>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "rent": -1 })
            .limit(limit)
            .build();
        let cursor = self.collection.find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn search_by_rent(
        &self,
        min_price: Option<i64>,
        max_price: Option<i64>,
    ) -> Result<Vec<Apartment>, StoreError> {
        let mut range = Document::new();
        if let Some(min) = min_price {
            range.insert("$gte", min);
        }
        if let Some(max) = max_price {
            range.insert("$lte", max);
        }
        let filter = if range.is_empty() {
            doc! {}
        } else {
            doc! { "rent": range }
        };
        let options = FindOptions::builder().sort(doc! { "rent": 1 }).build();
        let cursor = self.collection.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn set_status(&self, id: &str, status: ApartmentStatus) -> Result<u64, StoreError> {
        let oid = ObjectId::parse_str(id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "status": status.as_str() } },
                None,
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    async fn count_by_status(&self, status: ApartmentStatus) -> Result<u64, StoreError> {
        Ok(self
            .collection
            .count_documents(doc! { "status": status.as_str() }, None)
            .await?)
    }
}

pub struct MongoAgreementStore {
    collection: mongodb::Collection<Agreement>,
}

impl MongoAgreementStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(AGREEMENTS),
        }
    }
}

#[async_trait]
impl AgreementStore for MongoAgreementStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Agreement>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! { "userEmail": email }, None)
            .await?)
    }

    async fn insert(&self, agreement: &Agreement) -> Result<(), StoreError> {
        self.collection.insert_one(agreement, None).await?;
        Ok(())
    }

    async fn list_by_status(&self, status: AgreementStatus) -> Result<Vec<Agreement>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "status": status.as_str() }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn mark_checked(&self, id: &str, accept_date: &str) -> Result<u64, StoreError> {
        let oid = ObjectId::parse_str(id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "status": AgreementStatus::Checked.as_str(),
                    "acceptDate": accept_date,
                } },
                None,
            )
            .await?;
        Ok(result.modified_count)
    }
}

pub struct MongoCouponStore {
    collection: mongodb::Collection<Coupon>,
}

impl MongoCouponStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COUPONS),
        }
    }
}

#[async_trait]
impl CouponStore for MongoCouponStore {
    async fn insert(&self, coupon: &Coupon) -> Result<(), StoreError> {
        self.collection.insert_one(coupon, None).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Coupon>, StoreError> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let oid = ObjectId::parse_str(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }, None).await?;
        Ok(result.deleted_count)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
        Ok(self.collection.find_one(doc! { "code": code }, None).await?)
    }
}

pub struct MongoAnnouncementBoard {
    collection: mongodb::Collection<Announcement>,
}

impl MongoAnnouncementBoard {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(ANNOUNCEMENTS),
        }
    }
}

#[async_trait]
impl AnnouncementBoard for MongoAnnouncementBoard {
    async fn insert(&self, announcement: &Announcement) -> Result<(), StoreError> {
        self.collection.insert_one(announcement, None).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }
}

pub struct MongoReviewStore {
    collection: mongodb::Collection<Review>,
}

impl MongoReviewStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(REVIEWS),
        }
    }
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn insert(&self, review: &Review) -> Result<(), StoreError> {
        self.collection.insert_one(review, None).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }
}

pub struct MongoPaymentLedger {
    collection: mongodb::Collection<Payment>,
}

impl MongoPaymentLedger {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(PAYMENTS),
        }
    }
}

#[async_trait]
impl PaymentLedger for MongoPaymentLedger {
    async fn record(&self, payment: &Payment) -> Result<(), StoreError> {
        self.collection.insert_one(payment, None).await?;
        Ok(())
    }

    async fn history_for(&self, email: &str) -> Result<Vec<Payment>, StoreError> {
        let cursor = self.collection.find(doc! { "email": email }, None).await?;
        Ok(cursor.try_collect().await?)
    }
}

pub struct MongoStoreHealth {
    db: Database,
}

impl MongoStoreHealth {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl StoreHealth for MongoStoreHealth {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
