//! Router assembly for the data API.

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::{authenticate, TokenValidatorState};
use crate::generators::GeneratorFactory;
use crate::storage::SharedStore;

use super::handlers::{
    data_root_handler, delete_handler, get_handler, invalid_path_handler,
    method_not_allowed_handler, post_handler, put_handler,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub store: SharedStore,
    pub generators: GeneratorFactory,
}

/// Build the `/v1/data` router.
///
/// The token validator wraps only the data routes; path-shape rejections
/// from the fallback don't consult it. Unmatched methods on the name route
/// get a 405 with the standard JSON error body.
pub fn build_router(
    store: SharedStore,
    generators: GeneratorFactory,
    validator: TokenValidatorState,
) -> Router {
    let state = ApiState { store, generators };

    Router::new()
        .route("/v1/data", any(data_root_handler))
        .route(
            "/v1/data/{*name}",
            get(get_handler)
                .put(put_handler)
                .post(post_handler)
                .delete(delete_handler)
                .fallback(method_not_allowed_handler),
        )
        .route_layer(middleware::from_fn_with_state(validator, authenticate))
        .fallback(invalid_path_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
