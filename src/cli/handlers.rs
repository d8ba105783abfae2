// src/cli/handlers.rs
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use console::style;

use crate::controller::{FormController, FormState, FormValues, SubmitError};
use crate::core::config::Config;
use crate::models::SuggestionResult;
use crate::presentation::{
    copy, hold_deadline, ConsoleNotifier, CopyAcknowledgment, LogNotifier, Notifier,
    StrengthLevel, SystemClipboard, CLIPBOARD_HOLD,
};
use crate::suggest::SuggestionService;

pub struct SuggestOptions {
    pub length: Option<i64>,
    pub complexity: Option<String>,
    pub keywords: Option<String>,
    pub copy: bool,
    pub json: bool,
}

/// Form values seeded from configuration.
pub fn initial_values(config: &Config) -> FormValues {
    FormValues {
        length: i64::from(config.default_password_length),
        complexity: config.default_complexity.to_string(),
        ..FormValues::default()
    }
}

/// Terminal rendering of a suggestion.
pub fn render_result(result: &SuggestionResult, copied: bool) -> String {
    let mut lines = vec![
        format!("Generated Password: {}", style(&result.password).bold().cyan()),
        StrengthLevel::from_label(&result.strength).render_bar(),
    ];
    if let Some(reason) = &result.reason {
        lines.push(format!("Reason: {}", style(reason).italic()));
    }
    if copied {
        lines.push(format!("{}", style("Copied!").green()));
    }
    lines.join("\n")
}

/// Keep the clipboard owner alive until `deadline` so a paste still works.
pub async fn hold_clipboard(deadline: Instant) {
    eprintln!(
        "{}",
        style(format!(
            "📋 Keeping the password on the clipboard for {}s (Ctrl+C to stop)...",
            CLIPBOARD_HOLD.as_secs()
        ))
        .dim()
    );
    log::debug!("Holding clipboard ownership before exit");
    tokio::select! {
        _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {}
        _ = tokio::signal::ctrl_c() => log::debug!("Clipboard hold interrupted"),
    }
}

pub async fn handle_suggest(service: &SuggestionService, config: &Config, options: SuggestOptions) -> Result<()> {
    let notifier: Arc<dyn Notifier> = if options.json {
        Arc::new(LogNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    };

    let mut values = initial_values(config);
    if let Some(length) = options.length {
        values.length = length;
    }
    if let Some(complexity) = options.complexity {
        values.complexity = complexity;
    }
    if let Some(keywords) = options.keywords {
        values.keywords = keywords;
    }

    let mut form = FormController::new(values, notifier.clone());
    match form.submit(service).await {
        Ok(_) => {}
        Err(SubmitError::Invalid(e)) => return Err(anyhow!("Invalid {}: {}", e.field(), e)),
        Err(e) => return Err(e.into()),
    }

    let result = match form.state() {
        FormState::Success(result) => result,
        FormState::Failed(message) => return Err(anyhow!("{}", message)),
        state => return Err(anyhow!("Unexpected form state: {:?}", state)),
    };

    let mut ack = CopyAcknowledgment::new();
    let mut clipboard = SystemClipboard::new();
    let mut hold = None;
    if options.copy {
        let outcome = copy(&mut clipboard, &result.password, notifier.as_ref());
        let now = Instant::now();
        ack.record(outcome, &result.password, now);
        hold = hold_deadline(&clipboard, outcome, now);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", render_result(result, ack.is_copied(Some(&result.password), Instant::now())));
    }

    if let Some(deadline) = hold {
        hold_clipboard(deadline).await;
    }
    drop(clipboard);

    Ok(())
}
