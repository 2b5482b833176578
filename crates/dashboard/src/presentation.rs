//! 상태 → 표시 매핑
//!
//! 각 위젯의 상태 열거형을 아이콘 글리프, 색상 톤, 라벨로 변환합니다.
//! 모든 매핑은 순수 함수이며 렌더러(CLI 등)는 [`Tone`]을 실제 색상으로 바꿉니다.

use serde::Serialize;

use workflowos_core::types::{ActivityKind, RuleStatus, TestStatus, TimelineStatus};

/// 의미 기반 색상 톤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Destructive,
    Warning,
    Primary,
    Accent,
    Muted,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Destructive => "destructive",
            Self::Warning => "warning",
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::Muted => "muted",
        };
        f.write_str(name)
    }
}

/// 하나의 상태 값에 대한 표시 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// 터미널 아이콘 글리프
    pub glyph: &'static str,
    pub tone: Tone,
    /// 사람이 읽는 라벨
    pub label: &'static str,
}

impl Presentation {
    const fn new(glyph: &'static str, tone: Tone, label: &'static str) -> Self {
        Self { glyph, tone, label }
    }
}

/// 상태 열거형의 표시 매핑
pub trait Present {
    fn presentation(&self) -> Presentation;
}

impl Present for RuleStatus {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Valid => Presentation::new("✔", Tone::Success, "Valid"),
            Self::Invalid => Presentation::new("✖", Tone::Destructive, "Invalid"),
            Self::Warning => Presentation::new("▲", Tone::Warning, "Warning"),
        }
    }
}

impl Present for TimelineStatus {
    fn presentation(&self) -> Presentation {
        // 라벨은 하이픈 대신 공백 ("in progress")
        match self {
            Self::Completed => Presentation::new("✔", Tone::Success, self.label()),
            Self::InProgress => Presentation::new("◷", Tone::Primary, self.label()),
            Self::Pending => Presentation::new("◷", Tone::Muted, self.label()),
            Self::Error => Presentation::new("!", Tone::Destructive, self.label()),
        }
    }
}

impl Present for ActivityKind {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Onboarding => Presentation::new("+", Tone::Primary, "onboarding"),
            Self::Document => Presentation::new("✔", Tone::Success, "document"),
            Self::Config => Presentation::new("⚙", Tone::Warning, "config"),
            Self::Security => Presentation::new("◆", Tone::Accent, "security"),
            Self::Notification => Presentation::new("✉", Tone::Muted, "notification"),
        }
    }
}

impl Present for TestStatus {
    fn presentation(&self) -> Presentation {
        // pending은 아이콘 없이 빈 원
        match self {
            Self::Passed => Presentation::new("✔", Tone::Success, "passed"),
            Self::Failed => Presentation::new("✖", Tone::Destructive, "failed"),
            Self::Running => Presentation::new("⟳", Tone::Primary, "running"),
            Self::Pending => Presentation::new("○", Tone::Muted, "pending"),
        }
    }
}
