//! WorkflowOS 공통 크레이트
//!
//! 대시보드의 모든 위젯과 테스트 러너가 공유하는 도메인 타입,
//! 알림(notification) 인터페이스, 에러, 설정, 메트릭 이름, 기본 목업 데이터를 제공합니다.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod metrics;
pub mod notify;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, RunnerError, WorkflowError};

// 설정
pub use config::WorkflowConfig;

// 알림
pub use notify::{
    ActionEffect, ChannelNotifier, MemoryNotifier, Notification, NotificationAction,
    NotificationKind, Notifier,
};

// 도메인 타입
pub use types::{
    ActivityEvent, ActivityKind, ConfigRule, Elapsed, MetricCard, MetricValue, RuleStatus,
    TestCase, TestStatus, TimelineEvent, TimelineStatus, Trend,
};
