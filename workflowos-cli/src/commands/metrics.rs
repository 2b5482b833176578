//! `workflowos metrics` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use workflowos_dashboard::{Dashboard, MetricCardView, StatusPill};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::views;

/// Execute the `metrics` command.
pub fn execute(dashboard: &Dashboard, writer: &OutputWriter) -> Result<(), CliError> {
    info!(count = dashboard.metrics.len(), "rendering metric cards");
    writer.render(&MetricsReport {
        cards: dashboard.metrics.iter().map(MetricCardView::new).collect(),
        quick_status: dashboard.quick_status(),
    })
}

#[derive(Serialize)]
pub struct MetricsReport<'a> {
    pub cards: Vec<MetricCardView<'a>>,
    pub quick_status: Vec<StatusPill>,
}

impl Render for MetricsReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        views::write_metrics(w, &self.cards)?;
        writeln!(w)?;
        views::write_quick_status(w, &self.quick_status)
    }
}
