//! WorkflowOS 대시보드 위젯
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 (`DashboardError`)
//! - [`presentation`]: 상태 → 글리프/톤/라벨 매핑 (`Present`, `Presentation`, `Tone`)
//! - [`config_rules`]: 설정 규칙 위젯과 클릭 상호작용 (`ConfigRulesWidget`)
//! - [`timeline`]: 온보딩 타임라인 (`OnboardingTimeline`)
//! - [`activity`]: 최근 활동 피드 (`RecentActivity`)
//! - [`metric_card`]: 메트릭 카드 추세 표시 (`MetricCardView`)
//! - [`header`]: 상단 헤더 (`Header`)
//! - [`testing`]: 테스트 진행 표시 (`TestingProgress`)
//! - [`page`]: 전체 페이지 (`Dashboard`, `DashboardPage`)
//!
//! 테스트 러너를 제외한 위젯은 정적 데이터만 다루며, 상호작용은
//! [`Notifier`](workflowos_core::notify::Notifier)로 알림을 보내는 것이 전부입니다.

pub mod activity;
pub mod config_rules;
pub mod error;
pub mod header;
pub mod metric_card;
pub mod page;
pub mod presentation;
pub mod testing;
pub mod timeline;

// --- Public API Re-exports ---

pub use error::DashboardError;

pub use presentation::{Present, Presentation, Tone};

pub use activity::{ActivityRow, RecentActivity};
pub use config_rules::{ConfigRulesWidget, RuleRow, parse_status};
pub use header::{Header, NavItem};
pub use metric_card::MetricCardView;
pub use page::{Dashboard, DashboardPage, StatusPill};
pub use testing::{TestRow, TestingProgress};
pub use timeline::{OnboardingTimeline, TimelineRow};
