//! See [`Config`].

use anyhow::Context;
use axum::http::HeaderValue;

/// The URL tokens are verified against when `VERIFY_URL` is unset.
const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// The minimum verification score a submission needs when `SCORE_THRESHOLD` is
/// unset.
const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

/// The process-wide configuration, read once at startup and passed into the
/// request handlers. Handlers never read the environment themselves.
#[derive(Clone, Debug)]
pub struct Config {
    /// The origin allowed by the API's CORS headers.
    pub allowed_origin: HeaderValue,

    /// The minimum verification score for a submission to be forwarded.
    pub score_threshold: f64,

    /// The secret key for the CAPTCHA verification service.
    pub captcha_secret: String,

    /// The URL tokens are verified against.
    pub verify_url: String,

    /// The URL accepted form data is forwarded to.
    pub forward_url: String,
}

impl Config {
    /// Reads the configuration from environment variables (and any `.env`
    /// file), applying defaults for the allowed origin and score threshold.
    ///
    /// # Errors
    ///
    /// Fails if a required variable is unset or a value can't be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let allowed_origin = match dotenvy::var("ALLOWED_ORIGIN") {
            Ok(origin) => origin
                .parse()
                .context("environment variable `ALLOWED_ORIGIN` should be a valid header value")?,
            Err(_) => HeaderValue::from_static("*"),
        };

        let score_threshold = match dotenvy::var("SCORE_THRESHOLD") {
            Ok(threshold) => threshold
                .parse()
                .context("environment variable `SCORE_THRESHOLD` should be a valid number")?,
            Err(_) => DEFAULT_SCORE_THRESHOLD,
        };

        Ok(Self {
            allowed_origin,
            score_threshold,
            captcha_secret: dotenvy::var("CAPTCHA_SECRET_KEY")
                .context("environment variable `CAPTCHA_SECRET_KEY` should be set")?,
            verify_url: dotenvy::var("VERIFY_URL").unwrap_or_else(|_| DEFAULT_VERIFY_URL.into()),
            forward_url: dotenvy::var("FORWARD_URL")
                .context("environment variable `FORWARD_URL` should be set")?,
        })
    }
}
