//! The HTTP API: one route gating form submissions behind CAPTCHA
//! verification.

pub(crate) mod captcha;
pub(crate) mod forward;
pub mod routes;
pub mod validation;

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
        },
        HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::Config;

/// The CORS headers carried by every response from the API. Error responses
/// carry them too so browser callers can always read the response body.
pub(crate) fn cors_headers(config: &Config) -> [(HeaderName, HeaderValue); 4] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, config.allowed_origin.clone()),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ),
        (ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400")),
    ]
}

/// An error from an API route.
#[derive(Error, Debug)]
pub(crate) enum Error {
    /// The request body wasn't valid JSON in the expected shape.
    #[error("invalid request body: {0}")]
    BadRequestBody(#[from] serde_json::Error),

    /// The downstream endpoint couldn't be reached or answered the forwarded
    /// form data with a failure status.
    #[error("error forwarding data: {0}")]
    Forward(reqwest::Error),

    /// The request used a method this API doesn't support.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The requested API route doesn't exist.
    #[error("Not Found")]
    RouteNotFound,

    /// The request body had no CAPTCHA token.
    #[error("Token is required")]
    TokenMissing,

    /// The verification service couldn't be reached or answered with a
    /// failure status.
    #[error("error in CAPTCHA verification: {0}")]
    Verify(reqwest::Error),
}

impl Error {
    /// The HTTP status the error is answered with.
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequestBody(_) | Self::TokenMissing => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Forward(_) | Self::Verify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into a response carrying the CORS headers.
    ///
    /// Client errors are answered with plain text. Internal errors are logged
    /// for operator visibility and answered with the JSON internal-error
    /// shape; only the error's message text is exposed to the caller.
    pub(crate) fn into_response_with(self, config: &Config) -> Response {
        let status = self.status();
        let headers = cors_headers(config);

        if status.is_server_error() {
            eprintln!("Server error: {self}");

            return (
                status,
                headers,
                Json(json!({
                    "error": "Internal Server Error",
                    "message": self.to_string(),
                })),
            )
                .into_response();
        }

        (status, headers, self.to_string()).into_response()
    }
}
