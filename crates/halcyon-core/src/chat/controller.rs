//! Client-side chat session controller.
//!
//! Drives one user's view of the conversation: reacts to sign-in state,
//! submits messages optimistically, and gates destructive clears behind
//! confirmation. The controller owns the local history the backend
//! expects echoed back with each send; the view and transport are trait
//! parameters so the terminal client and tests share one state machine.

use chrono::{DateTime, Utc};
use tracing::warn;

use halcyon_types::message::{StoredMessage, Turn};

/// Static reply rendered when a send fails. Never entered into history.
pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble connecting right now. \
Please try again in a moment, or reach the studio directly at hello@halcyon.studio.";

/// Greeting shown when a signed-in user has no stored conversation.
pub const GREETING: &str =
    "Hi! I'm Iris, Halcyon Studio's concierge. Ask me about portraits, events, or booking a session.";

/// Errors surfaced by a [`ChatBackend`] transport.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("not authorized")]
    Unauthorized,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Successful send: the assistant reply and its server timestamp.
#[derive(Debug, Clone)]
pub struct SendReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Transport to the chat service. The HTTP implementation lives in
/// halcyon-infra.
pub trait ChatBackend: Send + Sync {
    /// Send a message with the locally-held history echoed alongside.
    fn send_message(
        &self,
        token: &str,
        text: &str,
        history: &[Turn],
    ) -> impl std::future::Future<Output = Result<SendReply, BackendError>> + Send;

    /// Fetch the stored conversation, oldest first.
    fn fetch_history(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, BackendError>> + Send;

    /// Erase the stored conversation.
    fn clear_history(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;
}

/// Presentation surface the controller drives.
pub trait ChatView: Send + Sync {
    /// Render one conversation turn.
    fn render_turn(&self, turn: &Turn);

    /// Show the typing indicator while a reply is pending.
    fn show_typing(&self);

    /// Hide the typing indicator.
    fn hide_typing(&self);

    /// Show the empty-conversation greeting.
    fn show_greeting(&self);

    /// Show a transient notice (e.g. a failed clear).
    fn show_notice(&self, message: &str);

    /// Ask the user to confirm erasing the conversation.
    fn confirm_clear(&self) -> bool;

    /// Prompt the signed-out user to sign in.
    fn prompt_sign_in(&self);

    /// Clear the rendered transcript.
    fn reset(&self);
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential; all chat actions are inert.
    Unauthenticated,
    /// Signed in and ready to send.
    Idle,
    /// A send is in flight; further submissions are dropped.
    Sending,
}

/// Chat session state machine.
pub struct SessionController<B, V>
where
    B: ChatBackend,
    V: ChatView,
{
    backend: B,
    view: V,
    state: SessionState,
    token: Option<String>,
    history: Vec<Turn>,
}

impl<B, V> SessionController<B, V>
where
    B: ChatBackend,
    V: ChatView,
{
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            state: SessionState::Unauthenticated,
            token: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Locally-held conversation history, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// React to a sign-in state change.
    ///
    /// Signing in loads the stored conversation into the transcript
    /// (greeting if empty); signing out wipes the transcript and local
    /// history and prompts for sign-in.
    pub async fn handle_auth_change(&mut self, token: Option<String>) {
        match token {
            Some(token) => {
                self.view.reset();
                match self.backend.fetch_history(&token).await {
                    Ok(messages) => {
                        self.history = messages
                            .iter()
                            .map(|m| Turn {
                                role: m.role,
                                content: m.content.clone(),
                            })
                            .collect();
                        if self.history.is_empty() {
                            self.view.show_greeting();
                        } else {
                            for turn in &self.history {
                                self.view.render_turn(turn);
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "history load failed");
                        self.history.clear();
                        self.view.show_greeting();
                    }
                }
                self.token = Some(token);
                self.state = SessionState::Idle;
            }
            None => {
                self.token = None;
                self.history.clear();
                self.view.reset();
                self.view.prompt_sign_in();
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Submit a message. Returns whether a send was actually attempted.
    ///
    /// The user turn renders immediately, before the network round
    /// trip. On success both turns enter local history; on failure a
    /// static fallback renders and history is left untouched, so the
    /// failed exchange is never echoed back to the server.
    pub async fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.state != SessionState::Idle {
            return false;
        }
        let Some(token) = self.token.clone() else {
            return false;
        };

        let user_turn = Turn::user(text);
        self.view.render_turn(&user_turn);
        self.state = SessionState::Sending;
        self.view.show_typing();

        let result = self.backend.send_message(&token, text, &self.history).await;
        self.view.hide_typing();
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => {
                let assistant_turn = Turn::assistant(&reply.response);
                self.view.render_turn(&assistant_turn);
                self.history.push(user_turn);
                self.history.push(assistant_turn);
            }
            Err(e) => {
                warn!(error = %e, "send failed");
                self.view.render_turn(&Turn::assistant(FALLBACK_REPLY));
            }
        }
        true
    }

    /// Ask to erase the conversation, gated behind view confirmation.
    pub async fn request_clear(&mut self) {
        if self.state == SessionState::Unauthenticated {
            return;
        }
        let Some(token) = self.token.clone() else {
            return;
        };
        if !self.view.confirm_clear() {
            return;
        }

        match self.backend.clear_history(&token).await {
            Ok(()) => {
                self.history.clear();
                self.view.reset();
                self.view.show_greeting();
            }
            Err(e) => {
                warn!(error = %e, "clear failed");
                self.view.show_notice("Could not clear the conversation. Please try again.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    use halcyon_types::message::MessageRole;

    type Log = Arc<Mutex<Vec<String>>>;

    struct MockBackend {
        log: Log,
        reply: Result<String, ()>,
        stored: Vec<StoredMessage>,
        fail_clear: bool,
    }

    impl MockBackend {
        fn new(log: Log) -> Self {
            Self {
                log,
                reply: Ok("Hi there!".to_string()),
                stored: Vec::new(),
                fail_clear: false,
            }
        }
    }

    impl ChatBackend for MockBackend {
        async fn send_message(
            &self,
            _token: &str,
            text: &str,
            history: &[Turn],
        ) -> Result<SendReply, BackendError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("send({text}, history={})", history.len()));
            match &self.reply {
                Ok(response) => Ok(SendReply {
                    response: response.clone(),
                    timestamp: Utc::now(),
                }),
                Err(()) => Err(BackendError::Server("boom".to_string())),
            }
        }

        async fn fetch_history(&self, _token: &str) -> Result<Vec<StoredMessage>, BackendError> {
            self.log.lock().unwrap().push("fetch".to_string());
            Ok(self.stored.clone())
        }

        async fn clear_history(&self, _token: &str) -> Result<(), BackendError> {
            self.log.lock().unwrap().push("clear".to_string());
            if self.fail_clear {
                Err(BackendError::Server("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct MockView {
        log: Log,
        confirm: bool,
    }

    impl ChatView for MockView {
        fn render_turn(&self, turn: &Turn) {
            self.log
                .lock()
                .unwrap()
                .push(format!("render({}: {})", turn.role, turn.content));
        }
        fn show_typing(&self) {
            self.log.lock().unwrap().push("typing on".to_string());
        }
        fn hide_typing(&self) {
            self.log.lock().unwrap().push("typing off".to_string());
        }
        fn show_greeting(&self) {
            self.log.lock().unwrap().push("greeting".to_string());
        }
        fn show_notice(&self, message: &str) {
            self.log.lock().unwrap().push(format!("notice({message})"));
        }
        fn confirm_clear(&self) -> bool {
            self.log.lock().unwrap().push("confirm".to_string());
            self.confirm
        }
        fn prompt_sign_in(&self) {
            self.log.lock().unwrap().push("sign-in prompt".to_string());
        }
        fn reset(&self) {
            self.log.lock().unwrap().push("reset".to_string());
        }
    }

    fn controller(
        backend: MockBackend,
        confirm: bool,
        log: Log,
    ) -> SessionController<MockBackend, MockView> {
        SessionController::new(backend, MockView { log, confirm })
    }

    fn stored(role: MessageRole, content: &str) -> StoredMessage {
        StoredMessage {
            id: Uuid::now_v7(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_with_empty_history_shows_greeting() {
        let log: Log = Log::default();
        let mut ctl = controller(MockBackend::new(log.clone()), true, log.clone());

        ctl.handle_auth_change(Some("tok".to_string())).await;

        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &["reset", "fetch", "greeting"]
        );
    }

    #[tokio::test]
    async fn test_sign_in_renders_stored_history() {
        let log: Log = Log::default();
        let mut backend = MockBackend::new(log.clone());
        backend.stored = vec![
            stored(MessageRole::User, "Hello"),
            stored(MessageRole::Assistant, "Hi there!"),
        ];
        let mut ctl = controller(backend, true, log.clone());

        ctl.handle_auth_change(Some("tok".to_string())).await;

        assert_eq!(ctl.history().len(), 2);
        let entries = log.lock().unwrap();
        assert!(entries.contains(&"render(user: Hello)".to_string()));
        assert!(entries.contains(&"render(assistant: Hi there!)".to_string()));
    }

    #[tokio::test]
    async fn test_sign_out_prompts_and_wipes_history() {
        let log: Log = Log::default();
        let mut backend = MockBackend::new(log.clone());
        backend.stored = vec![stored(MessageRole::User, "Hello")];
        let mut ctl = controller(backend, true, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;

        ctl.handle_auth_change(None).await;

        assert_eq!(ctl.state(), SessionState::Unauthenticated);
        assert!(ctl.history().is_empty());
        assert!(log.lock().unwrap().contains(&"sign-in prompt".to_string()));
    }

    #[tokio::test]
    async fn test_submit_renders_optimistically_then_reply() {
        let log: Log = Log::default();
        let mut ctl = controller(MockBackend::new(log.clone()), true, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;
        log.lock().unwrap().clear();

        assert!(ctl.submit("Hello").await);

        assert_eq!(
            log.lock().unwrap().as_slice(),
            &[
                "render(user: Hello)",
                "typing on",
                "send(Hello, history=0)",
                "typing off",
                "render(assistant: Hi there!)",
            ]
        );
        assert_eq!(ctl.history().len(), 2);
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_failed_send_shows_fallback_without_history_mutation() {
        let log: Log = Log::default();
        let mut backend = MockBackend::new(log.clone());
        backend.reply = Err(());
        let mut ctl = controller(backend, true, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;

        assert!(ctl.submit("Hello").await);

        assert!(ctl.history().is_empty());
        assert!(
            log.lock()
                .unwrap()
                .iter()
                .any(|e| e.contains(FALLBACK_REPLY))
        );
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_blank_or_signed_out_submit_is_inert() {
        let log: Log = Log::default();
        let mut ctl = controller(MockBackend::new(log.clone()), true, log.clone());

        assert!(!ctl.submit("Hello").await);

        ctl.handle_auth_change(Some("tok".to_string())).await;
        assert!(!ctl.submit("   ").await);
        assert!(
            !log.lock()
                .unwrap()
                .iter()
                .any(|e| e.starts_with("send("))
        );
    }

    #[tokio::test]
    async fn test_clear_declined_never_reaches_backend() {
        let log: Log = Log::default();
        let mut ctl = controller(MockBackend::new(log.clone()), false, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;

        ctl.request_clear().await;

        let entries = log.lock().unwrap();
        assert!(entries.contains(&"confirm".to_string()));
        assert!(!entries.contains(&"clear".to_string()));
    }

    #[tokio::test]
    async fn test_clear_success_resets_to_greeting() {
        let log: Log = Log::default();
        let mut backend = MockBackend::new(log.clone());
        backend.stored = vec![stored(MessageRole::User, "Hello")];
        let mut ctl = controller(backend, true, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;
        log.lock().unwrap().clear();

        ctl.request_clear().await;

        assert!(ctl.history().is_empty());
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &["confirm", "clear", "reset", "greeting"]
        );
    }

    #[tokio::test]
    async fn test_clear_failure_keeps_history_and_notifies() {
        let log: Log = Log::default();
        let mut backend = MockBackend::new(log.clone());
        backend.stored = vec![stored(MessageRole::User, "Hello")];
        backend.fail_clear = true;
        let mut ctl = controller(backend, true, log.clone());
        ctl.handle_auth_change(Some("tok".to_string())).await;

        ctl.request_clear().await;

        assert_eq!(ctl.history().len(), 1);
        assert!(
            log.lock()
                .unwrap()
                .iter()
                .any(|e| e.starts_with("notice("))
        );
    }
}
