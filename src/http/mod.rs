//! # HTTP Surface
//!
//! An `axum` router over the cart and order clients. The caller is identified by the
//! `x-user-id` header ([`auth::CallerId`]); failures map to status codes through
//! [`error::ApiError`].

pub mod auth;
mod cart_routes;
pub mod error;
mod order_routes;

use crate::clients::{CartClient, OrderClient};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use auth::{CallerId, USER_ID_HEADER};
pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub carts: CartClient,
    pub orders: OrderClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cart", get(cart_routes::get_cart))
        .route("/cart/summary", get(cart_routes::cart_summary))
        .route("/cart/add", post(cart_routes::add_to_cart))
        .route("/cart/update/{product_id}", put(cart_routes::update_quantity))
        .route("/cart/remove/{product_id}", delete(cart_routes::remove_from_cart))
        .route(
            "/cart/coupon",
            post(cart_routes::apply_coupon).delete(cart_routes::remove_coupon),
        )
        .route(
            "/order",
            post(order_routes::place_order).get(order_routes::list_orders),
        )
        .route("/order/stats", get(order_routes::order_stats))
        .route("/order/{id}", get(order_routes::get_order))
        .route("/order/{id}/cancel", put(order_routes::cancel_order))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

/// Serves until Ctrl-C.
pub async fn serve(address: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Starting storefront at {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
