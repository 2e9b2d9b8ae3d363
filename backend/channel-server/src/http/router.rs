use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // Paynow channel
        .route("/paynow", get(handlers::paynow::index))
        .route("/paynow/new-session", post(handlers::paynow::new_session))
        .route("/paynow/:id", get(handlers::paynow::mount))
        .route("/paynow/:id/pay", post(handlers::paynow::pay))
        .route("/paynow/:id/save", post(handlers::paynow::save))
        .route("/paynow/:id/check", post(handlers::paynow::check))
        .route("/paynow/:id/clear", post(handlers::paynow::clear))
        .route("/paynow/:id/live", post(handlers::paynow::live))
        .route(
            "/paynow/:id/dismiss-poll-url",
            post(handlers::paynow::dismiss_poll_url),
        )
        // Stripe channel
        .route("/stripe", get(handlers::stripe::index))
        .route("/stripe/new-session", post(handlers::stripe::new_session))
        .route("/stripe/:id", get(handlers::stripe::mount))
        .route("/stripe/:id/pay", post(handlers::stripe::pay))
        .route("/stripe/:id/save", post(handlers::stripe::save))
        .route("/stripe/:id/clear", post(handlers::stripe::clear))
        .with_state(state)
}
