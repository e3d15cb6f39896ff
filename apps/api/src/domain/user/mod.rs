// User domain module
// Accounts, marketplace roles, and business profiles

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{BusinessProfile, User, DEFAULT_CREDIT_SCORE};
pub use value_objects::{Email, UserRole};
