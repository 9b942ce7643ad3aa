pub mod agreement;
pub mod announcement;
pub mod apartment;
pub mod coupon;
pub mod payment;
pub mod review;
pub mod user;
