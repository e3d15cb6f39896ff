pub mod auth;
pub mod categories;
pub mod group_orders;
pub mod orders;
pub mod price_alerts;
pub mod products;
pub mod reviews;
pub mod stats;
