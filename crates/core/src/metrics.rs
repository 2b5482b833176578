//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않으면 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `workflowos_`
//! - 구성 요소명: `test_runner_`, `dashboard_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (passed, failed)
pub const LABEL_RESULT: &str = "result";

/// 위젯 레이블 키 (config_rules, timeline, activity, tests)
pub const LABEL_WIDGET: &str = "widget";

// ─── Test Runner 메트릭 ────────────────────────────────────────────

/// Test Runner: 시작된 실행 수 (counter)
pub const TEST_RUNNER_RUNS_STARTED_TOTAL: &str = "workflowos_test_runner_runs_started_total";

/// Test Runner: 이미 실행 중이라 무시된 실행 요청 수 (counter)
pub const TEST_RUNNER_RUNS_REJECTED_TOTAL: &str = "workflowos_test_runner_runs_rejected_total";

/// Test Runner: 취소된 실행 수 (counter)
pub const TEST_RUNNER_RUNS_CANCELLED_TOTAL: &str = "workflowos_test_runner_runs_cancelled_total";

/// Test Runner: 완료된 테스트 케이스 수 (counter, label: result)
pub const TEST_RUNNER_CASES_TOTAL: &str = "workflowos_test_runner_cases_total";

/// Test Runner: 테스트 케이스 시뮬레이션 소요 시간 (histogram, 초)
pub const TEST_RUNNER_CASE_DURATION_SECONDS: &str = "workflowos_test_runner_case_duration_seconds";

/// Test Runner: 수락된 재시도 요청 수 (counter)
pub const TEST_RUNNER_RETRIES_TOTAL: &str = "workflowos_test_runner_retries_total";

// ─── Dashboard 메트릭 ──────────────────────────────────────────────

/// Dashboard: 위젯 상호작용 수 (counter, label: widget)
pub const DASHBOARD_INTERACTIONS_TOTAL: &str = "workflowos_dashboard_interactions_total";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 테스트 케이스 소요 시간 히스토그램 버킷 (초)
///
/// 기본 샘플링 범위 0.5s ~ 2.5s를 덮습니다.
pub const CASE_DURATION_BUCKETS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 5.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        TEST_RUNNER_RUNS_STARTED_TOTAL,
        "Total number of test runs accepted by the runner"
    );
    describe_counter!(
        TEST_RUNNER_RUNS_REJECTED_TOTAL,
        "Total number of run requests ignored because a run was in progress"
    );
    describe_counter!(
        TEST_RUNNER_RUNS_CANCELLED_TOTAL,
        "Total number of test runs cancelled before completion"
    );
    describe_counter!(
        TEST_RUNNER_CASES_TOTAL,
        "Total number of simulated test cases finished, by result"
    );
    describe_histogram!(
        TEST_RUNNER_CASE_DURATION_SECONDS,
        "Simulated duration of a single test case in seconds"
    );
    describe_counter!(
        TEST_RUNNER_RETRIES_TOTAL,
        "Total number of failed test cases reset for retry"
    );
    describe_counter!(
        DASHBOARD_INTERACTIONS_TOTAL,
        "Total number of dashboard widget interactions, by widget"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        TEST_RUNNER_RUNS_STARTED_TOTAL,
        TEST_RUNNER_RUNS_REJECTED_TOTAL,
        TEST_RUNNER_RUNS_CANCELLED_TOTAL,
        TEST_RUNNER_CASES_TOTAL,
        TEST_RUNNER_CASE_DURATION_SECONDS,
        TEST_RUNNER_RETRIES_TOTAL,
        DASHBOARD_INTERACTIONS_TOTAL,
    ];

    #[test]
    fn all_metrics_start_with_workflowos_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("workflowos_"),
                "Metric '{}' does not start with 'workflowos_' prefix",
                name
            );
        }
    }

    #[test]
    fn describe_all_does_not_panic() {
        // 레코더 없이도 panic 없이 동작해야 함
        describe_all();
    }

    #[test]
    fn label_keys_are_lowercase() {
        for label in [LABEL_RESULT, LABEL_WIDGET] {
            assert_eq!(label.to_lowercase(), label);
        }
    }

    #[test]
    fn case_duration_buckets_are_sorted() {
        let buckets = CASE_DURATION_BUCKETS;
        for i in 1..buckets.len() {
            assert!(buckets[i] > buckets[i - 1], "Bucket values must be ascending");
        }
    }
}
