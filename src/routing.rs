//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
};

use crate::{
    AppState,
    cors::add_cors_headers,
    endpoints,
    logging::logging_middleware,
    summary::get_summary_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The CORS headers wrap the logging middleware so that responses produced
/// by the middleware itself also carry them.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint)
                .post(create_transaction_endpoint)
                .delete(delete_transaction_endpoint)
                .options(preflight)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(endpoints::SUMMARY, any(get_summary_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware));

    add_cors_headers(router)
}

/// Respond to a cross-origin preflight request, the CORS headers are added by
/// [add_cors_headers].
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
