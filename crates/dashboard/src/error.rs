//! 대시보드 에러 타입
//!
//! 위젯 데이터는 정적이므로 에러는 사용자가 지정한 id나 필터 값이
//! 존재하지 않을 때만 발생합니다.

/// 대시보드 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// 알 수 없는 설정 규칙 id
    #[error("config rule not found: {0}")]
    RuleNotFound(String),

    /// 알 수 없는 상태 필터 값
    #[error("unknown rule status '{0}' (expected valid, invalid or warning)")]
    UnknownStatus(String),
}
