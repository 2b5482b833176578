//! `workflowos events` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use workflowos_dashboard::{ActivityRow, RecentActivity};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::views;

/// Execute the `events` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let feed = RecentActivity::from_fixtures();
    info!(count = feed.events().len(), "rendering recent activity");
    render(&feed, writer)
}

pub fn render(feed: &RecentActivity, writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&ActivityReport {
        events: feed.rows(),
    })
}

#[derive(Serialize)]
pub struct ActivityReport<'a> {
    pub events: Vec<ActivityRow<'a>>,
}

impl Render for ActivityReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        views::write_activity(w, &self.events)
    }
}
