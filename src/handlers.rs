pub mod agreements;
pub mod announcements;
pub mod apartments;
pub mod coupons;
pub mod health;
pub mod payments;
pub mod reviews;
pub mod stats;
pub mod users;
