//! 최근 활동 피드 위젯 (표시 전용)

use serde::Serialize;

use workflowos_core::fixtures;
use workflowos_core::types::ActivityEvent;

use crate::presentation::{Present, Presentation};

pub const TITLE: &str = "Recent Activity";
pub const SUBTITLE: &str = "Latest system events and actions";

/// 표시용 활동 행
#[derive(Debug, Clone, Serialize)]
pub struct ActivityRow<'a> {
    #[serde(flatten)]
    pub event: &'a ActivityEvent,
    pub presentation: Presentation,
}

impl ActivityRow<'_> {
    /// "by <user>" 표기. 사용자가 없으면 `None`.
    pub fn attribution(&self) -> Option<String> {
        self.event.user.as_ref().map(|u| format!("by {u}"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    events: Vec<ActivityEvent>,
}

impl RecentActivity {
    pub fn new(events: Vec<ActivityEvent>) -> Self {
        Self { events }
    }

    pub fn from_fixtures() -> Self {
        Self::new(fixtures::recent_activity())
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn rows(&self) -> Vec<ActivityRow<'_>> {
        self.events
            .iter()
            .map(|event| ActivityRow {
                event,
                presentation: event.kind.presentation(),
            })
            .collect()
    }
}
