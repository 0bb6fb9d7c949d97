//! See [`send`].

use std::collections::BTreeMap;

use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{api, form_encoding, AppState};

/// Forwards accepted form data to the configured downstream endpoint and
/// returns the endpoint's JSON response verbatim.
///
/// # Errors
///
/// Returns an error if the downstream request fails or is answered with a
/// non-success status.
pub(crate) async fn send(
    state: &AppState,
    form_data: &BTreeMap<String, String>,
) -> Result<Value, api::Error> {
    let response = state
        .http
        .post(&state.config.forward_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_encoding::encode_pairs(form_data))
        .send()
        .await
        .map_err(api::Error::Forward)?;

    response
        .error_for_status()
        .map_err(api::Error::Forward)?
        .json()
        .await
        .map_err(api::Error::Forward)
}
