//! 통합 테스트 -- 위젯 상호작용 → 알림 전달 플로우 검증

use std::sync::Arc;

use workflowos_core::notify::{ActionEffect, ChannelNotifier, NotificationKind};
use workflowos_core::types::RuleStatus;
use workflowos_dashboard::{Dashboard, DashboardError, Present, parse_status};
use workflowos_test_runner::TestSuite;

#[test]
fn rule_interactions_reach_channel_in_order() {
    let (notifier, mut rx) = ChannelNotifier::new();
    let dashboard = Dashboard::from_fixtures(Arc::new(notifier));

    dashboard.rules.view_all();
    dashboard.rules.click("5").unwrap();
    dashboard.rules.click("2").unwrap();

    let first = rx.try_recv().unwrap();
    assert_eq!(first.title, "Configuration Rules");

    let second = rx.try_recv().unwrap();
    assert_eq!(second.kind, NotificationKind::Error);
    // following the action yields the follow-up toast
    let follow_up = match second.action.map(|a| a.effect) {
        Some(ActionEffect::Notify { notification }) => *notification,
        other => panic!("expected follow-up notification, got {other:?}"),
    };
    assert_eq!(follow_up.kind, NotificationKind::Success);

    let third = rx.try_recv().unwrap();
    assert_eq!(third.title, "Approval Workflow Chain");
    assert_eq!(third.description.as_deref(), Some("Last validated: 4 hours ago"));

    assert!(rx.try_recv().is_err());
}

#[test]
fn status_filter_rejects_unknown_values() {
    let err = parse_status("passing").unwrap_err();
    assert!(matches!(err, DashboardError::UnknownStatus(ref v) if v == "passing"));
    assert_eq!(parse_status("WARNING").unwrap(), RuleStatus::Warning);
}

#[test]
fn page_reflects_runner_snapshot() {
    let (notifier, _rx) = ChannelNotifier::new();
    let dashboard = Dashboard::from_fixtures(Arc::new(notifier));

    let suite = TestSuite::new(workflowos_core::fixtures::test_cases());
    let page = dashboard.page(&suite, true);

    assert!(page.testing.running);
    assert_eq!(page.testing.run_label(), "Running...");
    for (row, case) in page.testing.tests.iter().zip(suite.cases()) {
        assert_eq!(row.case.id(), case.id());
        assert_eq!(row.presentation, case.status().presentation());
    }
}
