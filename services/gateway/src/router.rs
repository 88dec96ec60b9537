use crate::handlers::{book, order};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(book::liveness))
        .route("/:side/:market/:price/:quantity", post(order::submit_order))
        .route(
            "/orders/:market/:side/:price/:order_id",
            delete(order::cancel_order),
        )
        .route("/book/:market", get(book::snapshot))
        .route("/quote/:market", get(book::quote))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
