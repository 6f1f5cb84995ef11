//! Application configuration types for Halcyon.
//!
//! `AppConfig` represents the top-level `config.toml` that controls the
//! HTTP server, database location, token verification, and the
//! completion engine. All fields have sensible defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Halcyon server.
///
/// Loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Bearer-token verification settings.
///
/// `public_key_path` points at a PEM-encoded RSA public key; when unset,
/// the server falls back to the shared secret in `HALCYON_AUTH_SECRET`
/// (HS256, development only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub public_key_path: Option<String>,
}

/// Completion engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the provider base URL (OpenAI-compatible endpoints).
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
        }
    }
}

/// Chat concierge settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Path to a file overriding the built-in system persona.
    #[serde(default)]
    pub persona_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8787");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.auth.issuer.is_none());
        assert!(config.chat.persona_path.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8787");
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[server]
bind_addr = "0.0.0.0:9000"

[auth]
issuer = "https://auth.example.com"
audience = "halcyon"

[llm]
model = "gpt-4o"
base_url = "https://llm.internal/v1"

[chat]
persona_path = "/etc/halcyon/persona.txt"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.auth.issuer.as_deref(), Some("https://auth.example.com"));
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.base_url.as_deref(), Some("https://llm.internal/v1"));
        assert_eq!(
            config.chat.persona_path.as_deref(),
            Some("/etc/halcyon/persona.txt")
        );
    }
}
