//! An HTTP resource representing the set of gated form submissions.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::{self, captcha, forward, validation::CaptchaToken},
    AppState,
};

/// A `POST` request body for this API route. Unrecognized top-level fields
/// are ignored rather than rejected.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    /// A token to verify this submission was made manually.
    pub token: Option<CaptchaToken>,

    /// The form fields to forward downstream, passed through verbatim. Only
    /// string values are accepted; anything else fails the body parse.
    #[serde(default)]
    pub form_data: BTreeMap<String, String>,
}

/// A `POST` response body for an accepted and forwarded submission.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// The downstream endpoint's JSON response.
    pub form_response: Value,

    /// The score threshold the submission was held to.
    pub threshold: f64,

    /// The verification service's complete response.
    pub details: Value,
}

/// A `POST` response body for a submission turned away by verification.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RejectedResponse {
    /// Why the submission was turned away.
    pub error: String,

    /// The score threshold the submission was held to.
    pub threshold: f64,

    /// The verification service's complete response.
    pub details: Value,
}

/// Verifies a submission's CAPTCHA token and, if the verification scores at or
/// above the configured threshold, forwards its form data downstream.
///
/// The body is taken as a raw string and parsed explicitly: axum's `Json`
/// rejections wouldn't carry the CORS headers, and every response from this
/// route must.
#[debug_handler(state = AppState)]
pub async fn post(State(state): State<AppState>, body: String) -> Response {
    match submit(&state, &body).await {
        Ok(response) => response,
        Err(error) => error.into_response_with(&state.config),
    }
}

/// The fallible part of [`post`].
async fn submit(state: &AppState, body: &str) -> Result<Response, api::Error> {
    let body: PostRequest = serde_json::from_str(body)?;

    let Some(token) = body.token else {
        return Err(api::Error::TokenMissing);
    };

    let verification = captcha::verify(state, &token).await?;
    let threshold = state.config.score_threshold;

    if !verification.accepts(threshold) {
        return Ok((
            StatusCode::BAD_REQUEST,
            api::cors_headers(&state.config),
            Json(RejectedResponse {
                error: "Low score or verification failed".into(),
                threshold,
                details: verification.details,
            }),
        )
            .into_response());
    }

    let form_response = forward::send(state, &body.form_data).await?;

    Ok((
        StatusCode::OK,
        api::cors_headers(&state.config),
        Json(PostResponse {
            form_response,
            threshold,
            details: verification.details,
        }),
    )
        .into_response())
}

/// Responds to a CORS preflight probe for this route.
#[debug_handler(state = AppState)]
pub async fn options(State(state): State<AppState>) -> Response {
    (StatusCode::NO_CONTENT, api::cors_headers(&state.config)).into_response()
}

/// Turns away requests with any method this route doesn't support.
#[debug_handler(state = AppState)]
pub async fn method_not_allowed(State(state): State<AppState>) -> Response {
    api::Error::MethodNotAllowed.into_response_with(&state.config)
}
