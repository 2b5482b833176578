//! 테스트 스위트 — 순서가 고정된 테스트 케이스 목록과 파생 값
//!
//! 파생 값(통과 수, 완료율)은 캐시하지 않고 조회할 때마다 현재 목록에서 다시 계산합니다.

use serde::Serialize;

use workflowos_core::types::{TestCase, TestStatus};

/// 완료율을 계산합니다: `round(100 * passed / total)`.
///
/// `total`이 0이면 0을 반환합니다. 0.5는 올림합니다.
pub fn completion_percentage(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (200 * passed + total) / (2 * total);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// 순서가 고정된 테스트 케이스 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestCase> {
        self.cases.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut TestCase> {
        self.cases.get_mut(index)
    }

    /// id로 테스트 케이스를 찾습니다.
    pub fn find(&self, id: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.id() == id)
    }

    /// id가 일치하는 항목만 `f`로 갱신합니다. 순서와 다른 항목은 그대로입니다.
    ///
    /// 일치하는 항목이 없으면 `false`를 반환합니다.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut TestCase)) -> bool {
        match self.cases.iter_mut().find(|c| c.id() == id) {
            Some(case) => {
                f(case);
                true
            }
            None => false,
        }
    }

    /// 실행 전 초기화: `pending`/`failed`/`running` 항목을 `pending`으로 되돌립니다.
    ///
    /// `passed` 항목은 건드리지 않습니다. `running`은 실행 중이 아닐 때만
    /// 남아 있을 수 있으므로(초기 데이터) 함께 초기화합니다.
    pub(crate) fn reset_for_run(&mut self) {
        for case in &mut self.cases {
            if case.status() != TestStatus::Passed {
                case.reset();
            }
        }
    }

    /// 실행 시작 인덱스: 첫 `pending` 또는 `running` 항목, 없으면 0.
    pub fn start_index(&self) -> usize {
        self.cases
            .iter()
            .position(|c| matches!(c.status(), TestStatus::Pending | TestStatus::Running))
            .unwrap_or(0)
    }

    fn count(&self, status: TestStatus) -> usize {
        self.cases.iter().filter(|c| c.status() == status).count()
    }

    pub fn passed_count(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    pub fn pending_count(&self) -> usize {
        self.count(TestStatus::Pending)
    }

    pub fn running_count(&self) -> usize {
        self.count(TestStatus::Running)
    }

    /// 현재 완료율 (퍼센트)
    pub fn completion_percentage(&self) -> u32 {
        completion_percentage(self.passed_count(), self.len())
    }

    /// id 중복과 `running` 개수 불변식을 검사합니다.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.id()) {
                return Err(format!("duplicate test case id '{}'", case.id()));
            }
        }
        if self.running_count() > 1 {
            return Err("at most one test case may be running".to_owned());
        }
        Ok(())
    }
}
