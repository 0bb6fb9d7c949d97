//! All routes for the HTTP API.

use axum::{extract::State, response::Response, routing::post, Router};

use crate::{api, AppState};

pub mod v1 {
    //! The routes for version 1 of the HTTP API.

    pub mod submissions;
}

/// Builds the API router around the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/submissions",
            post(v1::submissions::post)
                .options(v1::submissions::options)
                .fallback(v1::submissions::method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(state)
}

/// Responds to requests for routes that don't exist.
async fn route_not_found(State(state): State<AppState>) -> Response {
    api::Error::RouteNotFound.into_response_with(&state.config)
}
