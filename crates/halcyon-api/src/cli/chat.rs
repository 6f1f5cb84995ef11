//! Interactive terminal chat client.
//!
//! Drives a `SessionController` with a terminal view: styled transcript
//! rendering, a spinner while a reply is pending, and a confirmation
//! prompt before clearing history. Slash commands: `/clear`, `/quit`.

use std::sync::Mutex;
use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use halcyon_core::chat::controller::{ChatView, SessionController, SessionState};
use halcyon_infra::http_backend::HttpChatBackend;
use halcyon_types::message::{MessageRole, Turn};

/// Terminal implementation of `ChatView`.
struct TerminalChatView {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalChatView {
    fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }
}

impl ChatView for TerminalChatView {
    fn render_turn(&self, turn: &Turn) {
        match turn.role {
            MessageRole::User => {
                println!("  {} {}", style("you").cyan().bold(), turn.content);
            }
            MessageRole::Assistant => {
                println!("  {} {}", style("iris").magenta().bold(), turn.content);
            }
            MessageRole::System => {}
        }
    }

    fn show_typing(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.magenta} {msg}")
        {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("iris is typing...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.lock().unwrap() = Some(spinner);
    }

    fn hide_typing(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }

    fn show_greeting(&self) {
        println!(
            "  {} {}",
            style("iris").magenta().bold(),
            halcyon_core::chat::controller::GREETING
        );
    }

    fn show_notice(&self, message: &str) {
        eprintln!("  {} {message}", style("!").yellow().bold());
    }

    fn confirm_clear(&self) -> bool {
        Confirm::new()
            .with_prompt("Clear your entire conversation?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn prompt_sign_in(&self) {
        println!(
            "  {} Sign in required: pass --token or set HALCYON_TOKEN",
            style("!").yellow().bold()
        );
    }

    fn reset(&self) {
        println!();
    }
}

/// Run the interactive chat loop against a server.
pub async fn run_chat(server: &str, token: String) -> anyhow::Result<()> {
    println!();
    println!(
        "  {} Halcyon Studio concierge  {}",
        style("✦").magenta().bold(),
        style(format!("({server})")).dim()
    );
    println!("  {}", style("/clear erases history, /quit exits").dim());
    println!();

    let backend = HttpChatBackend::new(server);
    let mut controller = SessionController::new(backend, TerminalChatView::new());
    controller.handle_auth_change(Some(token)).await;

    if controller.state() == SessionState::Unauthenticated {
        anyhow::bail!("could not start a chat session");
    }

    loop {
        let line: String = Input::new().with_prompt("you").allow_empty(true).interact_text()?;
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => controller.request_clear().await,
            _ => {
                controller.submit(line).await;
            }
        }
    }

    println!("  {}", style("goodbye").dim());
    Ok(())
}
