//! 테스트 러너 에러 타입
//!
//! [`TestRunnerError`]는 러너 구성과 실행 태스크 관리에서 발생하는 에러를 표현합니다.
//! 시뮬레이션된 테스트 실패는 에러가 아닙니다.
//! `From<TestRunnerError> for WorkflowError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use workflowos_core::error::{RunnerError, WorkflowError};

/// 테스트 러너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum TestRunnerError {
    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 실행 태스크가 결과를 반환하지 못함
    #[error("run task failed: {0}")]
    TaskFailed(String),
}

impl From<TestRunnerError> for WorkflowError {
    fn from(err: TestRunnerError) -> Self {
        match err {
            TestRunnerError::Config { field, reason } => {
                WorkflowError::Runner(RunnerError::InvalidConfig(format!("{field}: {reason}")))
            }
            TestRunnerError::TaskFailed(msg) => WorkflowError::Runner(RunnerError::TaskFailed(msg)),
        }
    }
}
