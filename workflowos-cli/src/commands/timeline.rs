//! `workflowos timeline` command handler

use std::io::Write;

use tracing::info;

use workflowos_dashboard::OnboardingTimeline;
use workflowos_dashboard::page::TimelineSection;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::views;

/// Execute the `timeline` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let timeline = OnboardingTimeline::from_fixtures();
    info!(employee = timeline.employee(), "rendering onboarding timeline");
    render(&timeline, writer)
}

pub fn render(timeline: &OnboardingTimeline, writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&TimelineSection {
        employee: timeline.employee(),
        steps: timeline.rows(),
    })
}

impl Render for TimelineSection<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        views::write_timeline(w, self)
    }
}
