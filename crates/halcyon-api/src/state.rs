//! Application state wiring all services together.
//!
//! Services are generic over store/verifier/engine traits, but AppState
//! pins them to the concrete infra implementations used by the server.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;

use halcyon_core::chat::service::ChatService;
use halcyon_core::comment::service::CommentService;
use halcyon_infra::auth::JwtVerifier;
use halcyon_infra::config::load_persona;
use halcyon_infra::llm::OpenAiCompatEngine;
use halcyon_infra::sqlite::{
    DatabasePool, SqliteCommentStore, SqliteConversationStore, SqliteProfileStore,
};
use halcyon_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService =
    ChatService<SqliteConversationStore, SqliteProfileStore, OpenAiCompatEngine>;

pub type ConcreteCommentService = CommentService<SqliteCommentStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<JwtVerifier>,
    pub chat_service: Arc<ConcreteChatService>,
    pub comment_service: Arc<ConcreteCommentService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, build
    /// the token verifier and completion engine, wire services.
    pub async fn init(config: &AppConfig, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("halcyon.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let verifier = build_verifier(config).await?;

        let api_key = std::env::var("OPENAI_API_KEY")
            .map(SecretString::from)
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;
        let engine = match config.llm.base_url.as_deref() {
            Some(base_url) => OpenAiCompatEngine::new(api_key, base_url, "openai-compat"),
            None => OpenAiCompatEngine::openai(api_key),
        };

        let persona = load_persona(config).await;

        let chat_service = ChatService::new(
            SqliteConversationStore::new(db_pool.clone()),
            SqliteProfileStore::new(db_pool.clone()),
            engine,
            persona,
            config.llm.model.clone(),
        );

        let comment_service = CommentService::new(SqliteCommentStore::new(db_pool.clone()));

        Ok(Self {
            verifier: Arc::new(verifier),
            chat_service: Arc::new(chat_service),
            comment_service: Arc::new(comment_service),
            db_pool,
        })
    }
}

/// Build the token verifier from config.
///
/// An RS256 public key file takes priority; otherwise an HS256 shared
/// secret is read from `HALCYON_AUTH_SECRET` (development mode).
async fn build_verifier(config: &AppConfig) -> anyhow::Result<JwtVerifier> {
    if let Some(path) = config.auth.public_key_path.as_deref() {
        let pem = tokio::fs::read(path).await?;
        let verifier = JwtVerifier::rs256_from_pem(
            &pem,
            config.auth.issuer.as_deref(),
            config.auth.audience.as_deref(),
        )
        .map_err(|e| anyhow::anyhow!("invalid auth public key: {e}"))?;
        return Ok(verifier);
    }

    let secret = std::env::var("HALCYON_AUTH_SECRET")
        .map_err(|_| anyhow::anyhow!("no auth.public_key_path configured and HALCYON_AUTH_SECRET not set"))?;
    tracing::warn!("Using HS256 shared-secret token verification (development mode)");
    Ok(JwtVerifier::hs256(
        secret.as_bytes(),
        config.auth.issuer.as_deref(),
        config.auth.audience.as_deref(),
    ))
}
