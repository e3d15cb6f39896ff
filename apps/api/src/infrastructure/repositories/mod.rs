// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_catalog_repository;
pub mod postgres_group_order_repository;
pub mod postgres_order_repository;
pub mod postgres_price_alert_repository;
pub mod postgres_review_repository;
pub mod postgres_stats_repository;
pub mod postgres_user_repository;

pub use postgres_catalog_repository::{PostgresCategoryRepository, PostgresProductRepository};
pub use postgres_group_order_repository::PostgresGroupOrderRepository;
pub use postgres_order_repository::PostgresOrderRepository;
pub use postgres_price_alert_repository::PostgresPriceAlertRepository;
pub use postgres_review_repository::PostgresReviewRepository;
pub use postgres_stats_repository::PostgresStatsRepository;
pub use postgres_user_repository::PostgresUserRepository;
