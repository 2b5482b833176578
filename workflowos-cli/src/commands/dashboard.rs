//! `workflowos dashboard` command handler

use std::io::Write;
use std::sync::Arc;

use tracing::info;

use workflowos_core::fixtures;
use workflowos_core::notify::Notifier;
use workflowos_dashboard::{Dashboard, DashboardPage};
use workflowos_test_runner::TestSuite;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::views;

/// Execute the `dashboard` command.
pub async fn execute(writer: &OutputWriter, notifier: Arc<dyn Notifier>) -> Result<(), CliError> {
    info!("rendering dashboard page");

    let dashboard = Dashboard::from_fixtures(notifier);
    let suite = TestSuite::new(fixtures::test_cases());
    writer.render(&dashboard.page(&suite, false))
}

impl Render for DashboardPage<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        views::write_page(w, self)
    }
}
