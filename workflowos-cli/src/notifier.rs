//! Terminal toast printer.
//!
//! Notifications are written to stderr so they never interleave with JSON on stdout.
//! The most recent actionable notification is remembered so the shell can follow it.

use std::io::Write;
use std::sync::Mutex;

use colored::Colorize;

use workflowos_core::notify::{Notification, NotificationAction, NotificationKind, Notifier};
use workflowos_dashboard::Tone;

use crate::cli::OutputFormat;
use crate::views::paint;

pub struct TerminalNotifier {
    format: OutputFormat,
    last_action: Mutex<Option<NotificationAction>>,
}

impl TerminalNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            last_action: Mutex::new(None),
        }
    }

    /// Take the action of the most recent notification that carried one.
    pub fn take_last_action(&self) -> Option<NotificationAction> {
        self.last_action
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    fn remember(&self, action: Option<&NotificationAction>) {
        if let Some(action) = action {
            *self
                .last_action
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(action.clone());
        }
    }
}

fn kind_tone(kind: NotificationKind) -> (&'static str, Tone) {
    match kind {
        NotificationKind::Info => ("ℹ", Tone::Primary),
        NotificationKind::Success => ("✔", Tone::Success),
        NotificationKind::Warning => ("▲", Tone::Warning),
        NotificationKind::Error => ("✖", Tone::Destructive),
    }
}

/// Format a notification as a single toast block.
pub fn format_toast(notification: &Notification) -> String {
    let (glyph, tone) = kind_tone(notification.kind);
    let mut toast = format!(
        "{} {}",
        paint(glyph, tone),
        notification.title.bold()
    );
    if let Some(description) = &notification.description {
        toast.push_str(&format!("\n  {}", description.dimmed()));
    }
    if let Some(action) = &notification.action {
        toast.push_str(&format!(
            "\n  {} {}",
            "▸".dimmed(),
            format!("[{}]", action.label).cyan()
        ));
    }
    toast
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        self.remember(notification.action.as_ref());

        let line = match self.format {
            OutputFormat::Text => format_toast(&notification),
            OutputFormat::Json => match serde_json::to_string(&notification) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize notification");
                    return;
                }
            },
        };

        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        if let Err(e) = writeln!(handle, "{line}") {
            tracing::debug!(error = %e, "failed to write notification");
        }
    }
}
