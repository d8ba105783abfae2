// src/cli/menu.rs
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use console::style;
use inquire::validator::Validation;
use inquire::{Select, Text};

use crate::cli::handlers::{hold_clipboard, initial_values, render_result};
use crate::controller::{FormController, FormState, FormValues, SubmitError};
use crate::core::config::Config;
use crate::models::{Complexity, INTERACTIVE_MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::presentation::{
    copy, hold_deadline, ConsoleNotifier, CopyAcknowledgment, Notifier, SystemClipboard,
};
use crate::suggest::SuggestionService;

const COPY: &str = "📋  Copy to clipboard";
const REGENERATE: &str = "🔁  Generate again";
const SETTINGS: &str = "⚙️  Change settings";
const EXIT: &str = "❌  Exit";

pub async fn run_cli_menu(service: &SuggestionService, config: &Config) -> Result<()> {
    println!("╔══════════════════════════════════════╗");
    println!("║            🛡️  AEGIS PASS             ║");
    println!("╚══════════════════════════════════════╝");
    println!("Generate secure and memorable passwords with AI.\n");

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let mut form = FormController::new(initial_values(config), notifier.clone());
    let mut clipboard = SystemClipboard::new();
    let mut ack = CopyAcknowledgment::new();
    let mut last_copy = None;

    edit_form(form.values_mut())?;

    loop {
        println!("\n⏳ Generating password... (Ctrl+C to cancel)");
        let cancelled = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Could not listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        let submitted = form.submit_until(service, cancelled).await.map(|_| ());
        if let Err(e) = submitted {
            match e {
                SubmitError::Invalid(e) => println!("❌ {}: {}", e.field(), e),
                busy @ SubmitError::Busy => println!("⏳ {}", busy),
            }
            edit_form(form.values_mut())?;
            continue;
        }
        ack.sync_password(form.result().map(|r| r.password.as_str()));

        // Result screen, until the user asks for a new suggestion
        loop {
            let mut options = Vec::new();
            if let Some(result) = form.result() {
                let copied = ack.is_copied(Some(&result.password), Instant::now());
                println!("\n{}\n", render_result(result, copied));
                options.push(COPY);
            } else if let Some(message) = form.error() {
                println!("\n⚠️  {}\n", style(message).red());
            } else if form.state() == &FormState::Idle {
                println!("\n🚫 Generation cancelled.\n");
            }
            options.extend([REGENERATE, SETTINGS, EXIT]);

            match Select::new("What next?", options).prompt()? {
                COPY => {
                    if let Some(result) = form.result() {
                        let outcome = copy(&mut clipboard, &result.password, notifier.as_ref());
                        ack.record(outcome, &result.password, Instant::now());
                        last_copy = Some(outcome);
                    }
                }
                REGENERATE => break,
                SETTINGS => {
                    edit_form(form.values_mut())?;
                    break;
                }
                _ => {
                    if let Some(deadline) =
                        last_copy.and_then(|outcome| hold_deadline(&clipboard, outcome, Instant::now()))
                    {
                        hold_clipboard(deadline).await;
                    }
                    println!("👋 Goodbye!");
                    return Ok(());
                }
            }
        }
    }
}

fn edit_form(values: &mut FormValues) -> Result<()> {
    let length = Text::new(&format!(
        "Password length ({}-{}):",
        MIN_PASSWORD_LENGTH, INTERACTIVE_MAX_PASSWORD_LENGTH
    ))
    .with_default(&values.length.to_string())
    .with_validator(|input: &str| match input.trim().parse::<u16>() {
        Ok(n) if (MIN_PASSWORD_LENGTH..=INTERACTIVE_MAX_PASSWORD_LENGTH).contains(&n) => Ok(Validation::Valid),
        _ => Ok(Validation::Invalid(
            format!(
                "Enter a number from {} to {}",
                MIN_PASSWORD_LENGTH, INTERACTIVE_MAX_PASSWORD_LENGTH
            )
            .into(),
        )),
    })
    .prompt()?;
    values.length = length.trim().parse()?;

    let levels: Vec<&str> = Complexity::ALL.iter().map(|c| c.as_str()).collect();
    let cursor = levels
        .iter()
        .position(|level| *level == values.complexity)
        .unwrap_or(1);
    values.complexity = Select::new("Complexity:", levels)
        .with_starting_cursor(cursor)
        .prompt()?
        .to_string();

    values.keywords = Text::new("Optional keywords:")
        .with_default(&values.keywords)
        .with_help_message("Include keywords to make the password more memorable (AI will incorporate them).")
        .prompt()?;

    Ok(())
}
