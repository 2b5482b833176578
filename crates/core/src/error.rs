//! 에러 타입 — 도메인별 에러 정의
//!
//! 시뮬레이션된 테스트 실패(`failed`)는 에러가 아니라 정상적인 결과 데이터입니다.
//! 여기의 에러는 설정 로딩, 러너 태스크 관리, I/O 같은 주변 계층에서만 발생합니다.

/// WorkflowOS 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 테스트 러너 에러
    #[error("runner error: {0}")]
    Runner(#[from] RunnerError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 테스트 러너 에러
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// 실행 태스크가 비정상 종료됨 (panic 또는 abort)
    #[error("run task failed: {0}")]
    TaskFailed(String),

    /// 러너 설정 오류
    #[error("invalid runner config: {0}")]
    InvalidConfig(String),
}
