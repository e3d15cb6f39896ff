// Repository ports
// Implemented by the infrastructure layer

pub mod catalog_repository;
pub mod group_order_repository;
pub mod order_repository;
pub mod price_alert_repository;
pub mod review_repository;
pub mod stats_repository;
pub mod user_repository;

pub use catalog_repository::{CategoryRepository, ProductRepository};
pub use group_order_repository::GroupOrderRepository;
pub use order_repository::OrderRepository;
pub use price_alert_repository::PriceAlertRepository;
pub use review_repository::ReviewRepository;
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;
