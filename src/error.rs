/*
 * Copyright (C) 2026 Memori Labs <engineering@memorilabs.ai>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use serde_json::Value;
use thiserror::Error;

use crate::config::DEFAULT_API_KEY_VAR;

pub use crate::provider::UnsupportedProviderError;

/// Signup page referenced by quota and credential failures.
pub const SIGNUP_URL: &str = "https://app.memorilabs.ai/signup";

/// Status the cloud API uses for validation failures.
pub const STATUS_VALIDATION: u16 = 422;

/// Status the cloud API uses when it explicitly rejects a request.
/// Service-specific, not a standard HTTP code.
pub const STATUS_REQUEST_REJECTED: u16 = 433;

/// Status the cloud API uses when an IP or account is over quota.
pub const STATUS_QUOTA_EXCEEDED: u16 = 429;

/// Every failure the Memori SDK can raise.
///
/// A single enum rather than an error hierarchy: callers match on the
/// variant (or on [`ErrorKind`]) to decide recovery, and the compiler
/// checks the handling is exhaustive.
#[derive(Error, Debug)]
pub enum MemoriError {
    /// The caller's IP address or account is over its usage quota.
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// The cloud API returned an unsuccessful status with no more
    /// specific meaning.
    #[error("{message}")]
    ApiClient {
        status_code: u16,
        message: String,
        details: Option<Value>,
    },

    /// The cloud API rejected the request shape or content (422).
    #[error("{message}")]
    ApiValidation {
        status_code: u16,
        message: String,
        details: Option<Value>,
    },

    /// The cloud API explicitly vetoed the action (433).
    #[error("{message}")]
    ApiRequestRejected {
        status_code: u16,
        message: String,
        details: Option<Value>,
    },

    /// No API key was found in the config or the environment.
    #[error("A {env_var} is required to use the Memori cloud API. Sign up at {url}", url = SIGNUP_URL)]
    MissingApiKey { env_var: String },

    /// A request exceeded its deadline.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// An unsupported LLM provider was selected.
    #[error(transparent)]
    UnsupportedProvider(#[from] UnsupportedProviderError),

    /// Transport-level failure from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Stable discriminator for every [`MemoriError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    QuotaExceeded,
    ApiClient,
    ApiValidation,
    ApiRequestRejected,
    MissingApiKey,
    Timeout,
    UnsupportedProvider,
    Network,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::ApiClient => "api_client",
            ErrorKind::ApiValidation => "api_validation",
            ErrorKind::ApiRequestRejected => "api_request_rejected",
            ErrorKind::MissingApiKey => "missing_api_key",
            ErrorKind::Timeout => "timeout",
            ErrorKind::UnsupportedProvider => "unsupported_provider",
            ErrorKind::Network => "network",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MemoriError {
    /// Quota failure with the default signup message.
    pub fn quota_exceeded() -> Self {
        MemoriError::QuotaExceeded {
            message: format!(
                "Your IP address is over quota; register for an API key now: {SIGNUP_URL}"
            ),
        }
    }

    /// Quota failure with a caller-supplied message.
    pub fn quota_exceeded_with(message: impl Into<String>) -> Self {
        MemoriError::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Generic API failure with a message synthesized from the status.
    pub fn api_client(status_code: u16) -> Self {
        MemoriError::ApiClient {
            status_code,
            message: default_status_message(status_code),
            details: None,
        }
    }

    /// Generic API failure with a caller-supplied message and the parsed
    /// error body, if any.
    pub fn api_client_with(
        status_code: u16,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        MemoriError::ApiClient {
            status_code,
            message: message.into(),
            details,
        }
    }

    /// Validation failure (422). The message is required since validation
    /// bodies are descriptive.
    pub fn api_validation(
        status_code: u16,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        MemoriError::ApiValidation {
            status_code,
            message: message.into(),
            details,
        }
    }

    /// Explicit rejection (433). Same shape as a validation failure.
    pub fn api_request_rejected(
        status_code: u16,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        MemoriError::ApiRequestRejected {
            status_code,
            message: message.into(),
            details,
        }
    }

    /// Missing credential for the default `MEMORI_API_KEY` variable.
    pub fn missing_api_key() -> Self {
        Self::missing_api_key_for(DEFAULT_API_KEY_VAR)
    }

    /// Missing credential for a non-default environment variable.
    pub fn missing_api_key_for(env_var: impl Into<String>) -> Self {
        MemoriError::MissingApiKey {
            env_var: env_var.into(),
        }
    }

    /// Deadline failure, reporting the configured timeout.
    pub fn timeout(timeout_ms: u64) -> Self {
        MemoriError::Timeout { timeout_ms }
    }

    /// Classify an unsuccessful response status into the matching kind.
    ///
    /// 422 and 433 map to their specialized kinds, 429 to the quota kind
    /// (which carries no status or details), and everything else to the
    /// generic [`MemoriError::ApiClient`]. When the response body carried
    /// no message, the generic status text is used.
    pub fn from_status(status_code: u16, message: Option<String>, details: Option<Value>) -> Self {
        if status_code == STATUS_QUOTA_EXCEEDED {
            return match message {
                Some(message) => MemoriError::quota_exceeded_with(message),
                None => MemoriError::quota_exceeded(),
            };
        }

        let message = message.unwrap_or_else(|| default_status_message(status_code));
        match status_code {
            STATUS_VALIDATION => MemoriError::ApiValidation {
                status_code,
                message,
                details,
            },
            STATUS_REQUEST_REJECTED => MemoriError::ApiRequestRejected {
                status_code,
                message,
                details,
            },
            _ => MemoriError::ApiClient {
                status_code,
                message,
                details,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MemoriError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            MemoriError::ApiClient { .. } => ErrorKind::ApiClient,
            MemoriError::ApiValidation { .. } => ErrorKind::ApiValidation,
            MemoriError::ApiRequestRejected { .. } => ErrorKind::ApiRequestRejected,
            MemoriError::MissingApiKey { .. } => ErrorKind::MissingApiKey,
            MemoriError::Timeout { .. } => ErrorKind::Timeout,
            MemoriError::UnsupportedProvider(_) => ErrorKind::UnsupportedProvider,
            MemoriError::Network(_) => ErrorKind::Network,
        }
    }

    /// Status code of the failed request, for the API failure family.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MemoriError::ApiClient { status_code, .. }
            | MemoriError::ApiValidation { status_code, .. }
            | MemoriError::ApiRequestRejected { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Parsed error body returned by the service, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            MemoriError::ApiClient { details, .. }
            | MemoriError::ApiValidation { details, .. }
            | MemoriError::ApiRequestRejected { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Whether the failure is transient enough that the caller's own
    /// policy may retry it. Quota, validation, rejection and credential
    /// failures need caller intervention, not retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MemoriError::Timeout { .. } | MemoriError::Network(_))
    }
}

fn default_status_message(status_code: u16) -> String {
    format!("request failed with status {status_code}")
}

pub type Result<T> = std::result::Result<T, MemoriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_default_message_points_at_signup() {
        let err = MemoriError::quota_exceeded();
        assert!(err.to_string().contains("https://app.memorilabs.ai/signup"));
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
    }

    #[test]
    fn quota_custom_message_is_used_verbatim() {
        let err = MemoriError::quota_exceeded_with("slow down");
        assert_eq!(err.to_string(), "slow down");
    }

    #[test]
    fn api_client_synthesizes_status_message() {
        let err = MemoriError::api_client(404);
        assert_eq!(err.to_string(), "request failed with status 404");
        assert_eq!(err.status_code(), Some(404));
        assert!(err.details().is_none());
    }

    #[test]
    fn api_client_keeps_custom_message_and_details() {
        let details = serde_json::json!({"error": "upstream exploded"});
        let err = MemoriError::api_client_with(500, "server fell over", Some(details.clone()));
        assert_eq!(err.to_string(), "server fell over");
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.details(), Some(&details));
    }

    #[test]
    fn validation_is_distinguishable_from_generic_client_failure() {
        let err = MemoriError::api_validation(422, "field X is required", None);
        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.to_string(), "field X is required");
        assert_ne!(err.kind(), MemoriError::api_client(422).kind());
    }

    #[test]
    fn missing_api_key_names_the_env_var() {
        let err = MemoriError::missing_api_key();
        assert!(err.to_string().contains("MEMORI_API_KEY"));

        let err = MemoriError::missing_api_key_for("OTHER_ENV");
        assert!(err.to_string().contains("OTHER_ENV"));
        assert!(!err.to_string().contains("MEMORI_API_KEY"));
    }

    #[test]
    fn timeout_reports_the_deadline() {
        let err = MemoriError::timeout(5000);
        assert!(err.to_string().contains("5000"));
    }

    #[test]
    fn from_status_picks_the_specialized_kind() {
        let err = MemoriError::from_status(422, Some("bad field".to_string()), None);
        assert_eq!(err.kind(), ErrorKind::ApiValidation);

        let err = MemoriError::from_status(433, Some("rejected".to_string()), None);
        assert_eq!(err.kind(), ErrorKind::ApiRequestRejected);

        assert_eq!(
            MemoriError::from_status(429, None, None).kind(),
            ErrorKind::QuotaExceeded
        );
        assert_eq!(
            MemoriError::from_status(500, None, None).kind(),
            ErrorKind::ApiClient
        );
    }

    #[test]
    fn from_status_falls_back_to_the_generic_message() {
        let err = MemoriError::from_status(422, None, None);
        assert_eq!(err.kind(), ErrorKind::ApiValidation);
        assert_eq!(err.to_string(), "request failed with status 422");
    }

    #[test]
    fn from_status_keeps_the_parsed_body() {
        let details = serde_json::json!({"errors": [{"field": "x"}]});
        let err = MemoriError::from_status(433, Some("vetoed".to_string()), Some(details.clone()));
        assert_eq!(err.status_code(), Some(433));
        assert_eq!(err.details(), Some(&details));
    }

    #[test]
    fn every_kind_has_a_message_and_a_distinct_tag() {
        let errors = vec![
            MemoriError::quota_exceeded(),
            MemoriError::api_client(500),
            MemoriError::api_validation(422, "invalid", None),
            MemoriError::api_request_rejected(433, "rejected", None),
            MemoriError::missing_api_key(),
            MemoriError::timeout(250),
            MemoriError::from(UnsupportedProviderError::new("cohere")),
        ];

        for err in &errors {
            assert!(!err.to_string().is_empty());
        }

        let mut tags: Vec<&'static str> = errors.iter().map(|e| e.kind().as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), errors.len());
    }

    #[test]
    fn retry_eligibility_follows_the_taxonomy() {
        assert!(MemoriError::timeout(100).is_retryable());
        assert!(!MemoriError::quota_exceeded().is_retryable());
        assert!(!MemoriError::api_validation(422, "invalid", None).is_retryable());
        assert!(!MemoriError::api_request_rejected(433, "vetoed", None).is_retryable());
        assert!(!MemoriError::missing_api_key().is_retryable());
    }

    #[test]
    fn wrapped_provider_failure_keeps_its_own_message() {
        let err: MemoriError = UnsupportedProviderError::new("cohere").into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert!(err.to_string().contains("cohere"));
    }
}
