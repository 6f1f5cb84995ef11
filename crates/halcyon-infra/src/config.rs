//! Configuration loader for Halcyon.
//!
//! Reads `config.toml` from the data directory (`~/.halcyon/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::Path;

use halcyon_core::persona::DEFAULT_PERSONA;
use halcyon_types::config::AppConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the system persona: the configured persona file when set and
/// readable, the built-in default otherwise.
pub async fn load_persona(config: &AppConfig) -> String {
    let Some(path) = config.chat.persona_path.as_deref() else {
        return DEFAULT_PERSONA.to_string();
    };

    match tokio::fs::read_to_string(path).await {
        Ok(content) if !content.trim().is_empty() => content,
        Ok(_) => {
            tracing::warn!("Persona file {path} is empty, using built-in persona");
            DEFAULT_PERSONA.to_string()
        }
        Err(err) => {
            tracing::warn!("Failed to read persona file {path}: {err}, using built-in persona");
            DEFAULT_PERSONA.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.bind_addr, "127.0.0.1:8787");
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
bind_addr = "0.0.0.0:9000"

[llm]
model = "gpt-4o"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn load_persona_prefers_configured_file() {
        let tmp = TempDir::new().unwrap();
        let persona_path = tmp.path().join("persona.txt");
        tokio::fs::write(&persona_path, "You are a test persona.")
            .await
            .unwrap();

        let mut config = AppConfig::default();
        config.chat.persona_path = Some(persona_path.display().to_string());

        let persona = load_persona(&config).await;
        assert_eq!(persona, "You are a test persona.");
    }

    #[tokio::test]
    async fn load_persona_falls_back_to_builtin() {
        let mut config = AppConfig::default();
        config.chat.persona_path = Some("/nonexistent/persona.txt".to_string());

        let persona = load_persona(&config).await;
        assert_eq!(persona, DEFAULT_PERSONA);
    }
}
