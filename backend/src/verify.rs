//! Remote instance verification.
//!
//! Publishes the instance descriptor (collection name plus constructor
//! arguments) to a verifier endpoint after startup. "Already verified" counts
//! as success; every other failure is logged and ignored — verification is
//! never allowed to take the service down.

use serde_json::json;
use tracing::{info, warn};

/// Attempt remote verification of a deployed instance. Non-fatal.
pub async fn verify_instance(api_url: &str, instance: &str, constructor_args: serde_json::Value) {
    info!(instance, "verifying instance");

    let client = reqwest::Client::new();
    let body = json!({
        "instance": instance,
        "constructor_args": constructor_args,
    });

    let response = match client.post(api_url).json(&body).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!(instance, error = %e, "verification request failed");
            return;
        }
    };

    if response.status().is_success() {
        info!(instance, "instance verified");
        return;
    }

    let detail = response.text().await.unwrap_or_default();
    if detail.to_lowercase().contains("already verified") {
        info!(instance, "already verified");
    } else {
        warn!(instance, %detail, "verification rejected");
    }
}
