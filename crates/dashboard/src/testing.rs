//! 테스트 진행 위젯 — 러너 스냅샷의 표시 형태
//!
//! 상태 변경은 러너가 담당하며, 이 모듈은 [`TestSuite`] 스냅샷을 읽기만 합니다.

use serde::Serialize;

use workflowos_core::types::TestCase;
use workflowos_test_runner::TestSuite;

use crate::presentation::{Present, Presentation};

pub const TITLE: &str = "Testing Cycle";
pub const SUBTITLE: &str = "Workflow validation tests";

#[derive(Debug, Clone, Serialize)]
pub struct TestRow<'a> {
    #[serde(flatten)]
    pub case: &'a TestCase,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestingProgress<'a> {
    pub passed: usize,
    pub total: usize,
    pub percentage: u32,
    /// 실행 중이면 "Run All" 버튼 비활성
    pub running: bool,
    pub tests: Vec<TestRow<'a>>,
}

impl<'a> TestingProgress<'a> {
    pub fn new(suite: &'a TestSuite, running: bool) -> Self {
        Self {
            passed: suite.passed_count(),
            total: suite.len(),
            percentage: suite.completion_percentage(),
            running,
            tests: suite
                .cases()
                .iter()
                .map(|case| TestRow {
                    case,
                    presentation: case.status().presentation(),
                })
                .collect(),
        }
    }

    /// "P/T tests passed"
    pub fn summary(&self) -> String {
        format!("{}/{} tests passed", self.passed, self.total)
    }

    /// 실행 버튼 라벨
    pub fn run_label(&self) -> &'static str {
        if self.running { "Running..." } else { "Run All" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workflowos_core::fixtures;

    #[test]
    fn fixture_progress() {
        let suite = TestSuite::new(fixtures::test_cases());
        let progress = TestingProgress::new(&suite, false);
        assert_eq!(progress.summary(), "3/8 tests passed");
        assert_eq!(progress.percentage, 38);
        assert_eq!(progress.run_label(), "Run All");
        assert_eq!(progress.tests[3].presentation.label, "running");
    }

    #[test]
    fn serializes_durations_as_text() {
        let suite = TestSuite::new(fixtures::test_cases());
        let json = serde_json::to_value(TestingProgress::new(&suite, true)).unwrap();
        assert_eq!(json["tests"][0]["duration"], "1.2s");
        assert!(json["tests"][4].get("duration").is_none());
        assert_eq!(json["running"], true);
    }
}
