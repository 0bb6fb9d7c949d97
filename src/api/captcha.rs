//! See [`verify`].

use serde_json::Value;

use crate::{api, AppState};

/// The verification service's answer for one CAPTCHA token.
#[derive(Debug)]
pub(crate) struct Verification {
    /// Whether the service verified the token.
    pub(crate) success: bool,

    /// The token's likely-human confidence score, from 0 (certainly a bot) to
    /// 1 (certainly a human). Services that don't score tokens count as 0.
    pub(crate) score: f64,

    /// The service's complete response, echoed back to API callers verbatim.
    pub(crate) details: Value,
}

impl Verification {
    /// Reads a verification out of the service's raw JSON response. Absent or
    /// mistyped `success` and `score` fields are treated as failing values
    /// rather than errors.
    fn from_details(details: Value) -> Self {
        Self {
            success: details["success"].as_bool().unwrap_or(false),
            score: details["score"].as_f64().unwrap_or(0.0),
            details,
        }
    }

    /// Whether the verification lets a submission through at the given score
    /// threshold.
    pub(crate) fn accepts(&self, threshold: f64) -> bool {
        self.success && self.score >= threshold
    }
}

/// Checks a CAPTCHA token against the verification service.
///
/// # Errors
///
/// Returns an error if the verification request fails or is answered with a
/// non-success status.
pub(crate) async fn verify(state: &AppState, token: &str) -> Result<Verification, api::Error> {
    let response = state
        .http
        .post(&state.config.verify_url)
        .form(&[
            ("secret", state.config.captcha_secret.as_str()),
            ("response", token),
        ])
        .send()
        .await
        .map_err(api::Error::Verify)?;

    let details: Value = response
        .error_for_status()
        .map_err(api::Error::Verify)?
        .json()
        .await
        .map_err(api::Error::Verify)?;

    Ok(Verification::from_details(details))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn verification_reads_success_and_score() {
        let verification = Verification::from_details(json!({
            "success": true,
            "score": 0.9,
            "hostname": "example.com",
        }));

        assert!(verification.success, "success should be read from the response");
        assert!(verification.accepts(0.5), "a 0.9 score should pass a 0.5 threshold");
        assert_eq!(
            verification.details["hostname"], "example.com",
            "unrecognized fields should be kept for the echoed details"
        );
    }

    #[test]
    fn absent_fields_fail_verification() {
        let verification = Verification::from_details(json!({}));

        assert!(!verification.success, "an absent `success` should read as false");
        assert!(
            !verification.accepts(0.0),
            "an unsuccessful verification should be rejected at any threshold"
        );
    }

    #[test]
    fn scoreless_success_is_rejected_above_zero_threshold() {
        let verification = Verification::from_details(json!({ "success": true }));

        assert!(
            !verification.accepts(0.5),
            "a scoreless response should count as a 0 score"
        );
        assert!(
            verification.accepts(0.0),
            "a scoreless success should pass a 0 threshold"
        );
    }

    #[test]
    fn low_scores_are_rejected() {
        let verification = Verification::from_details(json!({
            "success": true,
            "score": 0.1,
        }));

        assert!(!verification.accepts(0.5), "a 0.1 score should fail a 0.5 threshold");
    }
}
