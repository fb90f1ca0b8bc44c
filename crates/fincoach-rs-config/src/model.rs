//! Configuration schema for the completion endpoint.

use serde::{Deserialize, Serialize};

/// Connection settings for an OpenAI-compatible chat-completion endpoint.
///
/// Wire names stay camelCase so stored config files remain readable by the
/// existing web front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Base URL of the endpoint, without the `/chat/completions` suffix.
    #[serde(default)]
    pub api_url: String,
    /// Bearer credential sent with each request.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier passed in the request body.
    #[serde(default)]
    pub model_name: String,
}

impl ModelConfig {
    /// Construct a config from its three parts.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Whether all three fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_url.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.model_name.trim().is_empty()
    }
}
