use std::env;

use crate::error::{MemoriError, Result};
use crate::provider::Provider;

/// Environment variable the cloud client reads its API key from.
pub const DEFAULT_API_KEY_VAR: &str = "MEMORI_API_KEY";

const EMBEDDINGS_MODEL_VAR: &str = "MEMORI_EMBEDDINGS_MODEL";
const RECALL_EMBEDDINGS_LIMIT_VAR: &str = "MEMORI_RECALL_EMBEDDINGS_LIMIT";
const TEST_MODE_VAR: &str = "MEMORI_TEST_MODE";

/// Client-side settings for the Memori SDK.
///
/// Plain data: nothing here performs a network call. The cloud client
/// reads these knobs when it builds requests, and [`Config::resolve_api_key`]
/// is the one place a missing credential is detected.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit API key, taking precedence over the environment.
    pub api_key: Option<String>,
    /// Whether the SDK talks to Memori Cloud (unset until attach).
    pub cloud: Option<bool>,
    /// LLM provider the SDK is attached to.
    pub provider: Option<Provider>,
    pub embeddings_model: String,
    pub recall_embeddings_limit: u32,
    pub recall_facts_limit: u32,
    pub recall_relevance_threshold: f64,
    pub request_timeout_ms: u64,
    pub request_num_backoff: u32,
    pub request_backoff_factor: f64,
    pub session_timeout_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            cloud: None,
            provider: None,
            embeddings_model: "all-MiniLM-L6-v2".to_string(),
            recall_embeddings_limit: 1000,
            recall_facts_limit: 5,
            recall_relevance_threshold: 0.1,
            request_timeout_ms: 5_000,
            request_num_backoff: 5,
            request_backoff_factor: 1.0,
            session_timeout_minutes: 30,
        }
    }
}

impl Config {
    /// Defaults overridden by `MEMORI_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.api_key = env_str(DEFAULT_API_KEY_VAR);
        if let Some(model) = env_str(EMBEDDINGS_MODEL_VAR) {
            config.embeddings_model = model;
        }
        config.recall_embeddings_limit =
            env_u32(RECALL_EMBEDDINGS_LIMIT_VAR, config.recall_embeddings_limit);
        config
    }

    /// The API key to authenticate cloud requests with.
    ///
    /// Prefers an explicitly configured key, then `MEMORI_API_KEY` from
    /// the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match env_str(DEFAULT_API_KEY_VAR) {
            Some(key) => {
                tracing::debug!("resolved API key from {DEFAULT_API_KEY_VAR}");
                Ok(key)
            }
            None => Err(MemoriError::missing_api_key()),
        }
    }

    /// Presence of `MEMORI_TEST_MODE`, regardless of its value.
    pub fn is_test_mode(&self) -> bool {
        env::var_os(TEST_MODE_VAR).is_some()
    }
}

fn env_str(name: &str) -> Option<String> {
    let raw = env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    env_str(name)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
