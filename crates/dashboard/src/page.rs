//! 대시보드 페이지 — 모든 위젯을 하나로 묶은 읽기 전용 뷰
//!
//! [`Dashboard`]는 정적 위젯 데이터를 소유하고, [`Dashboard::page`]는
//! 러너 스냅샷과 합쳐 렌더링 가능한 [`DashboardPage`]를 만듭니다.

use std::sync::Arc;

use serde::Serialize;

use workflowos_core::fixtures;
use workflowos_core::notify::Notifier;
use workflowos_core::types::{MetricCard, RuleStatus};
use workflowos_test_runner::TestSuite;

use crate::activity::{ActivityRow, RecentActivity};
use crate::config_rules::{ConfigRulesWidget, RuleRow};
use crate::header::Header;
use crate::metric_card::MetricCardView;
use crate::presentation::Tone;
use crate::testing::TestingProgress;
use crate::timeline::{OnboardingTimeline, TimelineRow};

pub const PAGE_TITLE: &str = "Workflow Dashboard";
pub const PAGE_SUBTITLE: &str =
    "Monitor onboarding workflows, validate configurations, and track testing cycles";

/// 빠른 상태 표시 알약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPill {
    pub tone: Tone,
    pub glyph: &'static str,
    pub text: String,
}

/// 대시보드 위젯 묶음
pub struct Dashboard {
    pub header: Header,
    pub metrics: Vec<MetricCard>,
    pub timeline: OnboardingTimeline,
    pub rules: ConfigRulesWidget,
    pub activity: RecentActivity,
}

impl Dashboard {
    /// 기본 목업 데이터로 모든 위젯을 구성합니다.
    pub fn from_fixtures(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            header: Header::default(),
            metrics: fixtures::metric_cards(),
            timeline: OnboardingTimeline::from_fixtures(),
            rules: ConfigRulesWidget::from_fixtures(notifier),
            activity: RecentActivity::from_fixtures(),
        }
    }

    /// 규칙 상태로부터 빠른 상태 표시를 만듭니다.
    pub fn quick_status(&self) -> Vec<StatusPill> {
        let mut pills = vec![StatusPill {
            tone: Tone::Success,
            glyph: "✔",
            text: "All systems operational".to_owned(),
        }];

        let invalid = self
            .rules
            .rules()
            .iter()
            .filter(|r| r.status == RuleStatus::Invalid)
            .count();
        if invalid > 0 {
            let text = if invalid == 1 {
                "1 integration needs attention".to_owned()
            } else {
                format!("{invalid} integrations need attention")
            };
            pills.push(StatusPill {
                tone: Tone::Warning,
                glyph: "▲",
                text,
            });
        }
        pills
    }

    pub fn page<'a>(&'a self, suite: &'a TestSuite, running: bool) -> DashboardPage<'a> {
        DashboardPage {
            header: &self.header,
            title: PAGE_TITLE,
            subtitle: PAGE_SUBTITLE,
            metrics: self.metrics.iter().map(MetricCardView::new).collect(),
            quick_status: self.quick_status(),
            timeline: TimelineSection {
                employee: self.timeline.employee(),
                steps: self.timeline.rows(),
            },
            rules: RulesSection {
                summary: self.rules.summary(),
                rules: self.rules.rows(None),
            },
            activity: self.activity.rows(),
            testing: TestingProgress::new(suite, running),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineSection<'a> {
    pub employee: &'a str,
    pub steps: Vec<TimelineRow<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesSection<'a> {
    pub summary: String,
    pub rules: Vec<RuleRow<'a>>,
}

/// 렌더링 가능한 전체 페이지
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage<'a> {
    pub header: &'a Header,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub metrics: Vec<MetricCardView<'a>>,
    pub quick_status: Vec<StatusPill>,
    pub timeline: TimelineSection<'a>,
    pub rules: RulesSection<'a>,
    pub activity: Vec<ActivityRow<'a>>,
    pub testing: TestingProgress<'a>,
}
