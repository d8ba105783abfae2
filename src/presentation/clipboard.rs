// src/presentation/clipboard.rs
use std::time::{Duration, Instant};

use thiserror::Error;

use super::notify::{Notification, Notifier};

/// How long the "copied" acknowledgment stays up.
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(2500);

/// How long a clipboard that dies with its owner is kept alive before exit.
pub const CLIPBOARD_HOLD: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Whether written text survives this handle being dropped.
    fn persists_after_drop(&self) -> bool {
        true
    }
}

/// The desktop clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
            None => Err(ClipboardError::Unavailable("not initialized".into())),
        }
    }

    // X11 and Wayland serve the selection from the owning process
    fn persists_after_drop(&self) -> bool {
        !cfg!(all(
            unix,
            not(any(target_os = "macos", target_os = "ios", target_os = "android"))
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Copy a password and tell the user how it went. Failure is cosmetic.
pub fn copy(clipboard: &mut dyn Clipboard, password: &str, notifier: &dyn Notifier) -> CopyOutcome {
    match clipboard.write_text(password) {
        Ok(()) => {
            notifier.notify(Notification::success(
                "Password Copied!",
                "The generated password has been copied to your clipboard.",
            ));
            CopyOutcome::Copied
        }
        Err(e) => {
            log::warn!("Copy to clipboard failed: {}", e);
            notifier.notify(Notification::error(
                "Copy Failed",
                "Could not copy password to clipboard.",
            ));
            CopyOutcome::Failed
        }
    }
}

/// Deadline until which the clipboard handle must stay alive before the
/// process exits, or `None` when nothing needs holding.
pub fn hold_deadline(clipboard: &dyn Clipboard, outcome: CopyOutcome, now: Instant) -> Option<Instant> {
    if outcome == CopyOutcome::Copied && !clipboard.persists_after_drop() {
        Some(now + CLIPBOARD_HOLD)
    } else {
        None
    }
}

/// Transient "copied" flag tied to the password that was copied.
#[derive(Debug, Default)]
pub struct CopyAcknowledgment {
    copied: Option<(String, Instant)>,
}

impl CopyAcknowledgment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: CopyOutcome, password: &str, now: Instant) {
        if outcome == CopyOutcome::Copied {
            self.copied = Some((password.to_string(), now));
        }
    }

    /// Drops the flag as soon as the displayed password changes.
    pub fn sync_password(&mut self, current: Option<&str>) {
        if let Some((copied, _)) = &self.copied {
            if current != Some(copied.as_str()) {
                self.copied = None;
            }
        }
    }

    pub fn is_copied(&self, current: Option<&str>, now: Instant) -> bool {
        match &self.copied {
            Some((copied, at)) => {
                current == Some(copied.as_str()) && now.duration_since(*at) < COPY_ACK_DURATION
            }
            None => false,
        }
    }
}
