//! Common code for integration tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Error;
use axum::{
    http::{HeaderValue, StatusCode},
    routing::post,
    Json, Router,
};
use formgate::{config::Config, AppState};
use serde_json::Value;
use tokio::net::TcpListener;

/// A mock collaborator server that answers every `POST /` with a fixed
/// response and counts the calls it receives.
pub struct MockCollaborator {
    /// The base URL the mock is listening on.
    pub url: String,

    /// How many calls the mock has received.
    calls: Arc<AtomicUsize>,
}

impl MockCollaborator {
    /// Starts a mock collaborator on an ephemeral local port.
    pub async fn start(status: StatusCode, response: Value) -> Result<Self, Error> {
        let calls = Arc::new(AtomicUsize::new(0));

        let handler = {
            let calls = Arc::clone(&calls);
            move || {
                let calls = Arc::clone(&calls);
                let response = response.clone();

                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    (status, Json(response))
                }
            }
        };

        let app = Router::new().route("/", post(handler));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock collaborator should keep serving");
        });

        Ok(Self { url, calls })
    }

    /// How many calls the mock has received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A test configuration pointing at the given collaborator URLs.
pub fn config(verify_url: &str, forward_url: &str) -> Config {
    Config {
        allowed_origin: HeaderValue::from_static("https://forms.example.com"),
        score_threshold: 0.5,
        captcha_secret: "test-secret".into(),
        verify_url: verify_url.into(),
        forward_url: forward_url.into(),
    }
}

/// Builds the API router around a test configuration.
///
/// # Errors
///
/// Fails if the HTTP client can't be initialized.
pub fn app(config: Config) -> Result<Router, Error> {
    Ok(formgate::api::routes::router(AppState::new(config)?))
}
