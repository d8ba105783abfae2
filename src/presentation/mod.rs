// src/presentation/mod.rs
//! Display-only pieces: strength bar, copy action, notifications.

pub mod clipboard;
pub mod notify;
pub mod strength;

pub use clipboard::{copy, hold_deadline, CopyAcknowledgment, SystemClipboard, CLIPBOARD_HOLD};
pub use notify::{ConsoleNotifier, LogNotifier, Notification, Notifier};
pub use strength::{StrengthIndicator, StrengthLevel};
