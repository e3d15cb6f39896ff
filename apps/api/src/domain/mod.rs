// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod catalog;
pub mod errors;
pub mod group_order;
pub mod order;
pub mod price_alert;
pub mod repositories;
pub mod review;
pub mod stats;
pub mod user;
