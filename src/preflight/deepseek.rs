//! DeepSeek API preflight check.

use super::CheckResult;
use crate::models::config::ClassifierConfig;
use crate::services::deepseek::DeepSeekClient;

/// Check that the classifier API is configured and reachable.
pub async fn check(config: &ClassifierConfig) -> CheckResult {
    match DeepSeekClient::with_config(config.clone()) {
        Ok(client) => match client.health_check().await {
            Ok(true) => CheckResult::ok(
                "DeepSeek API",
                &format!("connected ({})", config.model),
            ),
            Ok(false) | Err(_) => CheckResult::fail(
                "DeepSeek API",
                &format!("cannot reach {}", config.base_url),
                "Check your network connection and DEEPSEEK_API_KEY",
            ),
        },
        Err(_) => CheckResult::fail(
            "DeepSeek API",
            "API key not configured",
            "Set DEEPSEEK_API_KEY environment variable",
        ),
    }
}
