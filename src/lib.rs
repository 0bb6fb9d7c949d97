//! Form Gate's backend web server.
//!
//! One API route sits between a public web form and a downstream
//! data-collection endpoint. Each submission's CAPTCHA token is checked
//! against a verification service, and only submissions scoring at or above
//! the configured threshold are forwarded downstream.

pub mod api;
pub mod config;
mod form_encoding;

use std::time::Duration;

use crate::config::Config;

/// How long an outbound collaborator call may take before it's abandoned.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

/// The shared state passed into every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The process-wide configuration.
    pub config: Config,

    /// The HTTP client used for calls to the verification service and the
    /// downstream endpoint.
    pub http: reqwest::Client,
}

impl AppState {
    /// Constructs the state around a configuration, with an HTTP client whose
    /// outbound calls time out after a few seconds rather than suspending a
    /// request indefinitely.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client can't be initialized.
    pub fn new(config: Config) -> reqwest::Result<Self> {
        Ok(Self {
            config,
            http: reqwest::Client::builder().timeout(OUTBOUND_TIMEOUT).build()?,
        })
    }
}
