use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Documentation page listing the providers the SDK supports.
pub const PROVIDER_DOCS_URL: &str = "https://memorilabs.ai/docs/features/llm";

/// LLM providers the Memori SDK can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Gemini,
    Bedrock,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Gemini,
        Provider::Bedrock,
    ];

    /// Wire name of the provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Bedrock => "bedrock",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = UnsupportedProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "gemini" => Ok(Provider::Gemini),
            "bedrock" => Ok(Provider::Bedrock),
            _ => Err(UnsupportedProviderError::new(s)),
        }
    }
}

/// Raised when an unsupported LLM provider is selected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported LLM provider: {provider}. Please see the documentation for supported providers: {url}", url = PROVIDER_DOCS_URL)]
pub struct UnsupportedProviderError {
    pub provider: String,
}

impl UnsupportedProviderError {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_provider_names() {
        for provider in Provider::ALL {
            assert_eq!(provider.name().parse::<Provider>(), Ok(provider));
        }
        // Lookups are case-insensitive
        assert_eq!("Anthropic".parse::<Provider>(), Ok(Provider::Anthropic));
        assert_eq!(" openai ".parse::<Provider>(), Ok(Provider::OpenAi));
    }

    #[test]
    fn unknown_provider_reports_name_and_docs() {
        let err = "cohere".parse::<Provider>().unwrap_err();
        assert_eq!(err.provider, "cohere");
        assert!(err.to_string().contains("cohere"));
        assert!(err
            .to_string()
            .contains("https://memorilabs.ai/docs/features/llm"));
    }

    #[test]
    fn serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&Provider::OpenAi).unwrap(),
            "\"openai\""
        );
        let parsed: Provider = serde_json::from_str("\"bedrock\"").unwrap();
        assert_eq!(parsed, Provider::Bedrock);
    }
}
