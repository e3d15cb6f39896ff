use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    auth, categories, group_orders, orders, price_alerts, products, reviews, stats,
};
use crate::state::AppState;

/// All routes bound to `state`, without transport middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Session
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route(
            "/api/auth/user",
            get(auth::current_user).put(auth::update_current_user),
        )
        // Catalog
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/status", patch(orders::update_order_status))
        // Group orders
        .route(
            "/api/group-orders",
            get(group_orders::list_group_orders).post(group_orders::create_group_order),
        )
        .route("/api/group-orders/:id", get(group_orders::get_group_order))
        .route(
            "/api/group-orders/:id/participants",
            get(group_orders::list_participants),
        )
        .route(
            "/api/group-orders/:id/join",
            post(group_orders::join_group_order),
        )
        .route(
            "/api/group-orders/:id/cancel",
            post(group_orders::cancel_group_order),
        )
        // Reviews
        .route(
            "/api/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/api/suppliers/:id/rating", get(reviews::supplier_rating))
        // Price alerts
        .route(
            "/api/price-alerts",
            get(price_alerts::list_price_alerts).post(price_alerts::create_price_alert),
        )
        .route(
            "/api/price-alerts/:id",
            delete(price_alerts::delete_price_alert),
        )
        // Stats
        .route("/api/stats/vendor", get(stats::vendor_stats))
        .route("/api/stats/supplier", get(stats::supplier_stats))
        // Shared state
        .with_state(state)
}

/// The full application: routes plus tracing and CORS layers
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
