#[cfg(test)]
pub mod test_utils {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Router;
    use model::entities::agreement::{Agreement, AgreementStatus};
    use model::entities::announcement::Announcement;
    use model::entities::apartment::{Apartment, ApartmentStatus};
    use model::entities::coupon::Coupon;
    use model::entities::payment::Payment;
    use model::entities::review::Review;
    use model::entities::user::{Role, User};
    use mongodb::bson::oid::ObjectId;

    use crate::auth::TokenService;
    use crate::payments::{PaymentError, PaymentProvider};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::store::{
        AgreementStore, AnnouncementBoard, ApartmentCatalog, CouponStore, PaymentLedger,
        ReviewStore, StoreError, StoreHandles, StoreHealth, UserDirectory,
    };

    pub const TEST_TOKEN_SECRET: &str = "test-access-token-secret";
    pub const ADMIN_EMAIL: &str = "admin@stayease.test";
    pub const MEMBER_EMAIL: &str = "member@stayease.test";
    pub const USER_EMAIL: &str = "user@stayease.test";

    /// In-memory user directory backing the role guard in tests.
    #[derive(Default)]
    pub struct MemoryUserDirectory {
        pub items: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserDirectory for MemoryUserDirectory {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.email == email)
                .cloned())
        }

        async fn insert(&self, user: &User) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn set_role(&self, email: &str, role: Role) -> Result<u64, StoreError> {
            let mut modified = 0;
            for user in self.items.lock().unwrap().iter_mut() {
                if user.email == email && user.role != role {
                    user.role = role;
                    modified += 1;
                }
            }
            Ok(modified)
        }

        async fn list_by_role(&self, role: Role) -> Result<Vec<User>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|user| user.role == role)
                .cloned()
                .collect())
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Ok(self.items.lock().unwrap().len() as u64)
        }

        async fn count_by_role(&self, role: Role) -> Result<u64, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|user| user.role == role)
                .count() as u64)
        }
    }

    #[derive(Default)]
    pub struct MemoryApartmentCatalog {
        pub items: Mutex<Vec<Apartment>>,
    }

    impl MemoryApartmentCatalog {
        pub fn seed(&self, apartment: Apartment) {
            self.items.lock().unwrap().push(apartment);
        }
    }

    #[async_trait]
    impl ApartmentCatalog for MemoryApartmentCatalog {
        async fn list(&self) -> Result<Vec<Apartment>, StoreError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn featured(&self, limit: i64) -> Result<Vec<Apartment>, StoreError> {
            let mut apartments = self.items.lock().unwrap().clone();
            apartments.sort_by(|a, b| b.rent.cmp(&a.rent));
            apartments.truncate(limit as usize);
            Ok(apartments)
        }

        async fn search_by_rent(
            &self,
            min_price: Option<i64>,
            max_price: Option<i64>,
        ) -> Result<Vec<Apartment>, StoreError> {
            let mut apartments: Vec<Apartment> = self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|apartment| {
                    min_price.is_none_or(|min| apartment.rent >= min)
                        && max_price.is_none_or(|max| apartment.rent <= max)
                })
                .cloned()
                .collect();
            apartments.sort_by(|a, b| a.rent.cmp(&b.rent));
            Ok(apartments)
        }

        async fn set_status(
            &self,
            id: &str,
            status: ApartmentStatus,
        ) -> Result<u64, StoreError> {
            let mut modified = 0;
            for apartment in self.items.lock().unwrap().iter_mut() {
                let matches = apartment
                    .id
                    .map(|oid| oid.to_hex() == id)
                    .unwrap_or(false);
                if matches && apartment.status != status {
                    apartment.status = status;
                    modified += 1;
                }
            }
            Ok(modified)
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Ok(self.items.lock().unwrap().len() as u64)
        }

        async fn count_by_status(&self, status: ApartmentStatus) -> Result<u64, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|apartment| apartment.status == status)
                .count() as u64)
        }
    }

    #[derive(Default)]
    pub struct MemoryAgreementStore {
        pub items: Mutex<Vec<Agreement>>,
    }

    impl MemoryAgreementStore {
        pub fn seed(&self, agreement: Agreement) {
            self.items.lock().unwrap().push(agreement);
        }
    }

    #[async_trait]
    impl AgreementStore for MemoryAgreementStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<Agreement>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|agreement| agreement.user_email == email)
                .cloned())
        }

        async fn insert(&self, agreement: &Agreement) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(agreement.clone());
            Ok(())
        }

        async fn list_by_status(
            &self,
            status: AgreementStatus,
        ) -> Result<Vec<Agreement>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|agreement| agreement.status == status)
                .cloned()
                .collect())
        }

        async fn mark_checked(&self, id: &str, accept_date: &str) -> Result<u64, StoreError> {
            let mut modified = 0;
            for agreement in self.items.lock().unwrap().iter_mut() {
                let matches = agreement
                    .id
                    .map(|oid| oid.to_hex() == id)
                    .unwrap_or(false);
                if matches {
                    agreement.status = AgreementStatus::Checked;
                    agreement.accept_date = Some(accept_date.to_string());
                    modified += 1;
                }
            }
            Ok(modified)
        }
    }

    #[derive(Default)]
    pub struct MemoryCouponStore {
        pub items: Mutex<Vec<Coupon>>,
    }

    #[async_trait]
    impl CouponStore for MemoryCouponStore {
        async fn insert(&self, coupon: &Coupon) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(coupon.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Coupon>, StoreError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn delete(&self, id: &str) -> Result<u64, StoreError> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|coupon| coupon.id.map(|oid| oid.to_hex() != id).unwrap_or(true));
            Ok((before - items.len()) as u64)
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|coupon| coupon.code == code)
                .cloned())
        }
    }

    #[derive(Default)]
    pub struct MemoryAnnouncementBoard {
        pub items: Mutex<Vec<Announcement>>,
    }

    #[async_trait]
    impl AnnouncementBoard for MemoryAnnouncementBoard {
        async fn insert(&self, announcement: &Announcement) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(announcement.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Announcement>, StoreError> {
            Ok(self.items.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    pub struct MemoryReviewStore {
        pub items: Mutex<Vec<Review>>,
    }

    #[async_trait]
    impl ReviewStore for MemoryReviewStore {
        async fn insert(&self, review: &Review) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(review.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Review>, StoreError> {
            Ok(self.items.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    pub struct MemoryPaymentLedger {
        pub items: Mutex<Vec<Payment>>,
    }

    #[async_trait]
    impl PaymentLedger for MemoryPaymentLedger {
        async fn record(&self, payment: &Payment) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(payment.clone());
            Ok(())
        }

        async fn history_for(&self, email: &str) -> Result<Vec<Payment>, StoreError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|payment| payment.email == email)
                .cloned()
                .collect())
        }
    }

    pub struct MemoryStoreHealth;

    #[async_trait]
    impl StoreHealth for MemoryStoreHealth {
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Provider double that records every intent request.
    #[derive(Default)]
    pub struct RecordingPaymentProvider {
        pub requests: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl PaymentProvider for RecordingPaymentProvider {
        async fn create_intent(
            &self,
            amount_minor: i64,
            currency: &str,
        ) -> Result<String, PaymentError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push((amount_minor, currency.to_string()));
            Ok(format!("pi_test_{}_secret", requests.len()))
        }
    }

    /// Handles on the in-memory stores behind a test app, for seeding and
    /// post-call inspection.
    pub struct TestHarness {
        pub state: AppState,
        pub users: Arc<MemoryUserDirectory>,
        pub apartments: Arc<MemoryApartmentCatalog>,
        pub agreements: Arc<MemoryAgreementStore>,
        pub provider: Arc<RecordingPaymentProvider>,
    }

    impl TestHarness {
        /// Issue a valid token for an email with the test signing secret.
        pub fn token_for(&self, email: &str) -> String {
            self.state
                .tokens
                .issue(email, None)
                .expect("failed to issue test token")
        }

        /// Seed an apartment and return it (id populated).
        pub fn seed_apartment(&self, apartment_no: i32, rent: i64) -> Apartment {
            let apartment = Apartment {
                id: Some(ObjectId::new()),
                apartment_no,
                floor_no: apartment_no / 10,
                block_name: "A".to_string(),
                apartment_image: format!("https://img.stayease.test/{apartment_no}.jpg"),
                rent,
                status: ApartmentStatus::Available,
            };
            self.apartments.seed(apartment.clone());
            apartment
        }
    }

    fn seeded_user(name: &str, email: &str, role: Role) -> User {
        User {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    /// Create an axum app wired with in-memory stores, seeded with one
    /// admin, one member, and one plain user.
    pub fn setup_test_app() -> (Router, TestHarness) {
        let users = Arc::new(MemoryUserDirectory::default());
        {
            let mut items = users.items.lock().unwrap();
            items.push(seeded_user("Test Admin", ADMIN_EMAIL, Role::Admin));
            items.push(seeded_user("Test Member", MEMBER_EMAIL, Role::Member));
            items.push(seeded_user("Test User", USER_EMAIL, Role::User));
        }
        let apartments = Arc::new(MemoryApartmentCatalog::default());
        let agreements = Arc::new(MemoryAgreementStore::default());
        let provider = Arc::new(RecordingPaymentProvider::default());

        let handles = StoreHandles {
            users: users.clone(),
            apartments: apartments.clone(),
            agreements: agreements.clone(),
            coupons: Arc::new(MemoryCouponStore::default()),
            announcements: Arc::new(MemoryAnnouncementBoard::default()),
            reviews: Arc::new(MemoryReviewStore::default()),
            payments: Arc::new(MemoryPaymentLedger::default()),
            health: Arc::new(MemoryStoreHealth),
        };
        let state = AppState::new(
            handles,
            TokenService::new(TEST_TOKEN_SECRET),
            provider.clone(),
        );
        let harness = TestHarness {
            state: state.clone(),
            users,
            apartments,
            agreements,
            provider,
        };
        (create_router(state), harness)
    }
}
