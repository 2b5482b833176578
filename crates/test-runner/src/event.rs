//! 실행 진행 이벤트
//!
//! 러너는 상태 전이마다 [`RunEvent`]를 broadcast 채널로 내보냅니다.
//! 구독자가 없으면 이벤트는 버려지며, 실행에는 영향을 주지 않습니다.

use serde::Serialize;

use workflowos_core::types::{Elapsed, TestStatus};

/// 한 번의 실행 결과 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// 러너 내 실행 일련번호 (1부터)
    pub run_id: u64,
    /// 이번 실행에서 처리한 테스트 케이스 수
    pub processed: usize,
    /// 실행 종료 시점의 `passed` 수 (이전 실행에서 통과한 항목 포함)
    pub passed: usize,
    /// 실행 종료 시점의 `failed` 수
    pub failed: usize,
    /// 전체 테스트 케이스 수
    pub total: usize,
    /// 취소로 종료되었는지 여부
    pub cancelled: bool,
}

impl RunSummary {
    /// 모든 테스트 케이스가 통과했는지 확인합니다.
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

/// 실행 진행 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// 실행 수락됨
    RunStarted {
        run_id: u64,
        start_index: usize,
        total: usize,
    },
    /// 테스트 케이스가 `running`으로 전이됨
    CaseStarted {
        run_id: u64,
        index: usize,
        id: String,
    },
    /// 테스트 케이스 결과 기록됨
    CaseFinished {
        run_id: u64,
        index: usize,
        id: String,
        status: TestStatus,
        duration: Elapsed,
    },
    /// 실행 종료 (완료 또는 취소)
    RunFinished(RunSummary),
}

impl RunEvent {
    /// 이벤트가 속한 실행 일련번호
    pub fn run_id(&self) -> u64 {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::CaseStarted { run_id, .. }
            | Self::CaseFinished { run_id, .. } => *run_id,
            Self::RunFinished(summary) => summary.run_id,
        }
    }
}
