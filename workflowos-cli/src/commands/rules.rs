//! `workflowos rules` command handler

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use workflowos_core::notify::{Notification, Notifier};
use workflowos_dashboard::page::RulesSection;
use workflowos_dashboard::{ConfigRulesWidget, RuleRow, parse_status};

use crate::cli::{RulesAction, RulesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::views;

/// Execute the `rules` command.
pub fn execute(
    args: RulesArgs,
    writer: &OutputWriter,
    notifier: Arc<dyn Notifier>,
) -> Result<(), CliError> {
    let widget = ConfigRulesWidget::from_fixtures(notifier);
    match args.action {
        RulesAction::List { status } => execute_list(&widget, status.as_deref(), writer),
        RulesAction::Inspect { id } => execute_inspect(&widget, &id, writer),
        RulesAction::ViewAll => {
            widget.view_all();
            execute_list(&widget, None, writer)
        }
    }
}

pub fn execute_list(
    widget: &ConfigRulesWidget,
    status_filter: Option<&str>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let status = status_filter.map(parse_status).transpose()?;
    info!(status = ?status, "listing config rules");

    let report = RulesSection {
        summary: widget.summary(),
        rules: widget.rows(status),
    };
    writer.render(&report)
}

pub fn execute_inspect(
    widget: &ConfigRulesWidget,
    id: &str,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let notification = widget.click(id)?;
    let rule = widget
        .rows(None)
        .into_iter()
        .find(|row| row.rule.id == id)
        .ok_or_else(|| CliError::Command(format!("config rule not found: {id}")))?;

    writer.render(&RuleDetailReport { rule, notification })
}

impl Render for RulesSection<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        views::write_rules(w, self)
    }
}

/// A single rule together with the notification its click produced.
#[derive(Serialize)]
pub struct RuleDetailReport<'a> {
    pub rule: RuleRow<'a>,
    pub notification: Notification,
}

impl Render for RuleDetailReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let rule = self.rule.rule;
        let p = &self.rule.presentation;
        writeln!(
            w,
            "{} {} {}",
            views::paint(p.glyph, p.tone),
            rule.name.bold(),
            format!("[{}]", rule.category).dimmed()
        )?;
        writeln!(w, "  status:         {}", views::paint(p.label, p.tone))?;
        writeln!(w, "  description:    {}", rule.description)?;
        writeln!(w, "  last validated: {}", rule.last_validated)?;
        if let Some(action) = &self.notification.action {
            writeln!(w, "  action:         {}", action.label.cyan())?;
        }
        Ok(())
    }
}
