//! 기본 목업 데이터 — 대시보드에 표시되는 정적 레코드
//!
//! 모든 목록은 고유한 `id`를 가지며, 프로세스 시작 시 한 번 생성된 뒤
//! (테스트 케이스를 제외하면) 변경되지 않습니다.

use crate::types::{
    ActivityEvent, ActivityKind, ConfigRule, Elapsed, MetricCard, MetricValue, RuleStatus,
    TestCase, TimelineEvent, TimelineStatus, Trend,
};

/// 타임라인에서 추적 중인 신규 입사자
pub const TRACKED_EMPLOYEE: &str = "Sarah Chen";

/// 워크플로 검증 테스트 케이스 8개
///
/// 초기 상태: `[passed, passed, passed, running, pending, pending, pending, pending]`
pub fn test_cases() -> Vec<TestCase> {
    vec![
        TestCase::passed("1", "Pre-boarding email trigger", Elapsed::from_tenths(12)),
        TestCase::passed("2", "Document upload validation", Elapsed::from_tenths(8)),
        TestCase::passed("3", "Approval workflow routing", Elapsed::from_tenths(21)),
        TestCase::running("4", "IT provisioning automation"),
        TestCase::pending("5", "Access permission assignment"),
        TestCase::pending("6", "Compliance training assignment"),
        TestCase::pending("7", "Manager notification delivery"),
        TestCase::pending("8", "Day-1 checklist generation"),
    ]
}

fn rule(
    id: &str,
    name: &str,
    category: &str,
    status: RuleStatus,
    last_validated: &str,
    description: &str,
) -> ConfigRule {
    ConfigRule {
        id: id.to_owned(),
        name: name.to_owned(),
        category: category.to_owned(),
        status,
        last_validated: last_validated.to_owned(),
        description: description.to_owned(),
    }
}

/// 온보딩 설정 규칙 6개
pub fn config_rules() -> Vec<ConfigRule> {
    vec![
        rule(
            "1",
            "Email Template Configuration",
            "Communications",
            RuleStatus::Valid,
            "2 hours ago",
            "Welcome and notification templates configured",
        ),
        rule(
            "2",
            "Approval Workflow Chain",
            "Workflows",
            RuleStatus::Valid,
            "4 hours ago",
            "Multi-level approval routing for new hires",
        ),
        rule(
            "3",
            "Role-Based Access Rules",
            "Security",
            RuleStatus::Warning,
            "1 day ago",
            "3 roles pending access review",
        ),
        rule(
            "4",
            "Data Retention Policy",
            "Compliance",
            RuleStatus::Valid,
            "5 hours ago",
            "90-day retention for temporary data",
        ),
        rule(
            "5",
            "Integration Endpoints",
            "Integrations",
            RuleStatus::Invalid,
            "30 minutes ago",
            "HRIS sync endpoint unreachable",
        ),
        rule(
            "6",
            "Document Templates",
            "Documents",
            RuleStatus::Valid,
            "3 hours ago",
            "Offer letters, contracts, NDA templates",
        ),
    ]
}

fn step(
    id: &str,
    title: &str,
    description: &str,
    status: TimelineStatus,
    timestamp: &str,
) -> TimelineEvent {
    TimelineEvent {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        status,
        timestamp: timestamp.to_owned(),
        employee: Some(TRACKED_EMPLOYEE.to_owned()),
    }
}

/// 온보딩 타임라인 5단계
pub fn timeline() -> Vec<TimelineEvent> {
    vec![
        step(
            "1",
            "Pre-boarding Initiated",
            "Welcome email sent, documents requested",
            TimelineStatus::Completed,
            "Dec 20, 2024 • 9:00 AM",
        ),
        step(
            "2",
            "Document Collection",
            "ID verification, tax forms, background check consent",
            TimelineStatus::Completed,
            "Dec 21, 2024 • 2:30 PM",
        ),
        step(
            "3",
            "IT Provisioning",
            "Equipment ordered, accounts created, access configured",
            TimelineStatus::InProgress,
            "Dec 23, 2024 • 10:15 AM",
        ),
        step(
            "4",
            "Compliance Training",
            "Security awareness, policy acknowledgment",
            TimelineStatus::Pending,
            "Scheduled: Dec 26, 2024",
        ),
        step(
            "5",
            "Manager Introduction",
            "Team meeting, role overview, 30-60-90 plan",
            TimelineStatus::Pending,
            "Scheduled: Dec 27, 2024",
        ),
    ]
}

fn activity(
    id: &str,
    kind: ActivityKind,
    title: &str,
    description: &str,
    timestamp: &str,
    user: &str,
) -> ActivityEvent {
    ActivityEvent {
        id: id.to_owned(),
        kind,
        title: title.to_owned(),
        description: description.to_owned(),
        timestamp: timestamp.to_owned(),
        user: Some(user.to_owned()),
    }
}

/// 최근 활동 5건
pub fn recent_activity() -> Vec<ActivityEvent> {
    vec![
        activity(
            "1",
            ActivityKind::Onboarding,
            "New hire onboarding started",
            "Sarah Chen added to Engineering team",
            "5 min ago",
            "System",
        ),
        activity(
            "2",
            ActivityKind::Document,
            "Documents approved",
            "Background check completed for Michael Torres",
            "23 min ago",
            "HR Admin",
        ),
        activity(
            "3",
            ActivityKind::Config,
            "Workflow updated",
            "IT provisioning checklist modified",
            "1 hour ago",
            "Admin",
        ),
        activity(
            "4",
            ActivityKind::Security,
            "Access granted",
            "Marketing portal access for new team members",
            "2 hours ago",
            "IT Security",
        ),
        activity(
            "5",
            ActivityKind::Notification,
            "Reminder sent",
            "Pending document completion notification",
            "3 hours ago",
            "System",
        ),
    ]
}

/// 상단 메트릭 카드 4개
pub fn metric_cards() -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Active Onboardings".to_owned(),
            value: MetricValue::Count(12),
            subtitle: Some("3 starting this week".to_owned()),
            trend: Some(Trend {
                value: 15,
                positive: true,
            }),
        },
        MetricCard {
            title: "Documents Pending".to_owned(),
            value: MetricValue::Count(8),
            subtitle: Some("2 require attention".to_owned()),
            trend: None,
        },
        MetricCard {
            title: "Config Rules".to_owned(),
            value: MetricValue::Text("24/26".to_owned()),
            subtitle: Some("2 validation warnings".to_owned()),
            trend: Some(Trend {
                value: 4,
                positive: false,
            }),
        },
        MetricCard {
            title: "Avg. Onboarding Time".to_owned(),
            value: MetricValue::Text("4.2 days".to_owned()),
            subtitle: Some("Target: 5 days".to_owned()),
            trend: Some(Trend {
                value: 12,
                positive: true,
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::TestStatus;

    fn assert_unique<'a>(ids: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for id in ids {
            assert!(seen.insert(id), "duplicate id: {id}");
        }
    }

    #[test]
    fn test_cases_match_initial_statuses() {
        let statuses: Vec<_> = test_cases().iter().map(|t| t.status()).collect();
        assert_eq!(
            statuses,
            vec![
                TestStatus::Passed,
                TestStatus::Passed,
                TestStatus::Passed,
                TestStatus::Running,
                TestStatus::Pending,
                TestStatus::Pending,
                TestStatus::Pending,
                TestStatus::Pending,
            ]
        );
    }

    #[test]
    fn only_finished_fixtures_have_durations() {
        for case in test_cases() {
            assert_eq!(
                case.duration().is_some(),
                case.status().is_finished(),
                "duration invariant broken for {}",
                case.id()
            );
        }
    }

    #[test]
    fn all_lists_have_unique_ids() {
        assert_unique(test_cases().iter().map(|t| t.id()));
        assert_unique(config_rules().iter().map(|r| r.id.as_str()));
        assert_unique(timeline().iter().map(|e| e.id.as_str()));
        assert_unique(recent_activity().iter().map(|e| e.id.as_str()));
    }

    #[test]
    fn fixture_sizes() {
        assert_eq!(test_cases().len(), 8);
        assert_eq!(config_rules().len(), 6);
        assert_eq!(timeline().len(), 5);
        assert_eq!(recent_activity().len(), 5);
        assert_eq!(metric_cards().len(), 4);
    }
}
