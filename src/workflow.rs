//! The agreement state machine: `Pending -> Checked`, with `Checked`
//! terminal. Acceptance is the only path that mutates other collections
//! (apartment availability, owner role), and those two updates are not
//! transactional; a failure between them leaves a partial acceptance.

use std::sync::Arc;

use chrono::Utc;
use model::entities::agreement::{Agreement, AgreementStatus};
use model::entities::apartment::ApartmentStatus;
use model::entities::user::Role;
use mongodb::bson::oid::ObjectId;
use tracing::{debug, info};

use crate::store::{AgreementStore, ApartmentCatalog, StoreError, UserDirectory};

/// A submission as collected from the requesting user.
#[derive(Debug, Clone)]
pub struct NewAgreement {
    pub user_name: String,
    pub user_email: String,
    pub apartment_id: String,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub rent: i64,
}

/// Result of a submission attempt.
pub enum SubmitOutcome {
    Submitted(Agreement),
    /// An agreement already exists for this email. The check ignores
    /// status, so a resolved agreement blocks resubmission too.
    AlreadyRequested,
}

/// Result of an admin decision.
pub enum ResolveOutcome {
    /// Number of user records whose role was promoted.
    Accepted { role_updates: u64 },
    Rejected,
}

/// A pending agreement annotated with the creation instant extracted from
/// its identifier.
pub struct PendingAgreement {
    pub agreement: Agreement,
    pub request_date: String,
}

#[derive(Clone)]
pub struct AgreementWorkflow {
    agreements: Arc<dyn AgreementStore>,
    apartments: Arc<dyn ApartmentCatalog>,
    users: Arc<dyn UserDirectory>,
}

impl AgreementWorkflow {
    pub fn new(
        agreements: Arc<dyn AgreementStore>,
        apartments: Arc<dyn ApartmentCatalog>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            agreements,
            apartments,
            users,
        }
    }

    /// Submit a rental request. At most one agreement per email, enforced
    /// by an existence check before the insert; concurrent submissions can
    /// race past it (the store provides no uniqueness constraint here).
    pub async fn submit(&self, request: NewAgreement) -> Result<SubmitOutcome, StoreError> {
        // Not filtered to Pending: a Checked agreement still blocks a new
        // request.
        if self
            .agreements
            .find_by_email(&request.user_email)
            .await?
            .is_some()
        {
            debug!(email = %request.user_email, "submission blocked by existing agreement");
            return Ok(SubmitOutcome::AlreadyRequested);
        }

        let agreement = Agreement {
            id: Some(ObjectId::new()),
            user_name: request.user_name,
            user_email: request.user_email,
            apartment_id: request.apartment_id,
            apartment_no: request.apartment_no,
            floor_no: request.floor_no,
            block_name: request.block_name,
            rent: request.rent,
            status: AgreementStatus::Pending,
            accept_date: None,
        };
        self.agreements.insert(&agreement).await?;
        info!(email = %agreement.user_email, apartment = %agreement.apartment_id, "agreement submitted");
        Ok(SubmitOutcome::Submitted(agreement))
    }

    /// Resolve a pending request. The agreement is marked `Checked` and the
    /// accept date stamped regardless of the decision; only an accept goes
    /// on to flip the apartment and promote the owner.
    pub async fn resolve(
        &self,
        agreement_id: &str,
        action: &str,
        apartment_id: &str,
        user_email: &str,
    ) -> Result<ResolveOutcome, StoreError> {
        let accept_date = Utc::now().to_rfc3339();
        self.agreements
            .mark_checked(agreement_id, &accept_date)
            .await?;

        if action == "accept" {
            self.apartments
                .set_status(apartment_id, ApartmentStatus::Unavailable)
                .await?;
            let role_updates = self.users.set_role(user_email, Role::Member).await?;
            info!(email = %user_email, apartment = %apartment_id, "agreement accepted");
            Ok(ResolveOutcome::Accepted { role_updates })
        } else {
            info!(email = %user_email, "agreement rejected");
            Ok(ResolveOutcome::Rejected)
        }
    }

    /// Pending agreements, each annotated with a request date derived from
    /// the creation instant embedded in its ObjectId.
    pub async fn list_pending(&self) -> Result<Vec<PendingAgreement>, StoreError> {
        let pending = self
            .agreements
            .list_by_status(AgreementStatus::Pending)
            .await?;
        Ok(pending
            .into_iter()
            .map(|agreement| {
                let request_date = agreement
                    .id
                    .map(|oid| oid.timestamp().to_chrono().to_rfc3339())
                    .unwrap_or_default();
                PendingAgreement {
                    agreement,
                    request_date,
                }
            })
            .collect())
    }
}
