//! 온보딩 타임라인 위젯 (표시 전용)

use serde::Serialize;

use workflowos_core::fixtures;
use workflowos_core::types::{TimelineEvent, TimelineStatus};

use crate::presentation::{Present, Presentation};

pub const TITLE: &str = "Onboarding Lifecycle";
pub const SUBTITLE: &str = "Track employee onboarding progress";

/// 표시용 타임라인 행
#[derive(Debug, Clone, Serialize)]
pub struct TimelineRow<'a> {
    #[serde(flatten)]
    pub event: &'a TimelineEvent,
    pub presentation: Presentation,
    /// 마지막 단계 여부 (연결선 생략)
    pub is_last: bool,
}

/// 한 직원의 온보딩 단계 목록
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingTimeline {
    employee: String,
    steps: Vec<TimelineEvent>,
}

impl OnboardingTimeline {
    pub fn new(employee: impl Into<String>, steps: Vec<TimelineEvent>) -> Self {
        Self {
            employee: employee.into(),
            steps,
        }
    }

    pub fn from_fixtures() -> Self {
        Self::new(fixtures::TRACKED_EMPLOYEE, fixtures::timeline())
    }

    /// 헤더 배지에 표시되는 직원 이름
    pub fn employee(&self) -> &str {
        &self.employee
    }

    pub fn steps(&self) -> &[TimelineEvent] {
        &self.steps
    }

    pub fn rows(&self) -> Vec<TimelineRow<'_>> {
        let last = self.steps.len().saturating_sub(1);
        self.steps
            .iter()
            .enumerate()
            .map(|(i, event)| TimelineRow {
                event,
                presentation: event.status.presentation(),
                is_last: i == last,
            })
            .collect()
    }

    /// 현재 진행 중인 단계
    pub fn current_step(&self) -> Option<&TimelineEvent> {
        self.steps
            .iter()
            .find(|s| s.status == TimelineStatus::InProgress)
    }

    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == TimelineStatus::Completed)
            .count()
    }
}
