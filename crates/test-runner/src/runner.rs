//! 순차 테스트 러너 — 실행 수락/순차 처리/결과 요약 전체 흐름 관리
//!
//! # 내부 아키텍처
//! ```text
//! run_all() ──(lock: 재진입 검사 + 초기화 + 시작 인덱스)──> spawn(run task)
//!                                                          |
//!                             for index in start..total:   |
//!                               lock: mark running         |
//!                               sleep(sampled) / cancel    |
//!                               lock: record outcome       |
//!                                                          |
//!                             lock: running = false ──> RunSummary
//! ```
//!
//! `tests`와 `running` 플래그는 하나의 `tokio::sync::Mutex` 뒤에 있으며,
//! 모든 변경(`run_all`, `retry`, 실행 태스크)은 이 락을 거칩니다.
//! 락은 대기(sleep) 구간에서 절대 유지되지 않으므로 대기 중에도
//! 다른 호출(`retry`, `snapshot` 등)은 즉시 처리됩니다.

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, histogram};
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use workflowos_core::metrics as m;
use workflowos_core::notify::{Notification, Notifier};
use workflowos_core::types::{Elapsed, TestCase, TestStatus};

use crate::config::TestRunnerConfig;
use crate::error::TestRunnerError;
use crate::event::{RunEvent, RunSummary};
use crate::outcome::{OutcomeSource, RandomOutcomes};
use crate::suite::TestSuite;

/// `run_all` 호출 결과
#[derive(Debug)]
pub enum RunStart {
    /// 새 실행이 시작됨
    Started(RunHandle),
    /// 이미 실행 중이라 요청이 무시됨 (대기열에 넣지 않음)
    AlreadyRunning,
}

impl RunStart {
    /// 시작된 실행의 핸들을 꺼냅니다.
    pub fn into_handle(self) -> Option<RunHandle> {
        match self {
            Self::Started(handle) => Some(handle),
            Self::AlreadyRunning => None,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// `retry` 호출 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// `failed` 항목을 `pending`으로 되돌림
    Reset,
    /// 대상이 `failed` 상태가 아니라 아무 것도 하지 않음
    NotFailed(TestStatus),
    /// 해당 id가 없음
    NotFound,
}

/// 실행 중인 run에 대한 핸들
///
/// 핸들을 버려도 실행은 끝까지 진행됩니다.
#[derive(Debug)]
pub struct RunHandle {
    run_id: u64,
    task: JoinHandle<RunSummary>,
    cancel: CancellationToken,
}

impl RunHandle {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// 실행 취소를 요청합니다. 진행 중인 테스트 케이스는 `pending`으로 돌아갑니다.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 실행이 끝날 때까지 기다리고 요약을 반환합니다.
    pub async fn wait(self) -> Result<RunSummary, TestRunnerError> {
        self.task
            .await
            .map_err(|e| TestRunnerError::TaskFailed(e.to_string()))
    }
}

/// 러너 내부 상태 — 항상 락을 잡고 접근합니다.
struct RunnerState {
    suite: TestSuite,
    running: bool,
    outcomes: Box<dyn OutcomeSource>,
    run_seq: u64,
    active_cancel: Option<CancellationToken>,
}

/// 시뮬레이션 순차 테스트 러너
///
/// 복제 비용이 낮으며(`Arc` 공유), 복제본은 같은 상태를 바라봅니다.
///
/// # 사용 예시
/// ```ignore
/// use std::sync::Arc;
/// use workflowos_core::notify::MemoryNotifier;
/// use workflowos_test_runner::TestRunnerBuilder;
///
/// let runner = TestRunnerBuilder::new()
///     .notifier(Arc::new(MemoryNotifier::new()))
///     .build()?;
///
/// if let Some(handle) = runner.run_all().await.into_handle() {
///     let summary = handle.wait().await?;
///     println!("{}/{} passed", summary.passed, summary.total);
/// }
/// ```
#[derive(Clone)]
pub struct TestRunner {
    config: Arc<TestRunnerConfig>,
    state: Arc<Mutex<RunnerState>>,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<RunEvent>,
}

impl TestRunner {
    /// 진행 이벤트를 구독합니다.
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &TestRunnerConfig {
        &self.config
    }

    /// 현재 테스트 케이스 목록의 복사본
    pub async fn snapshot(&self) -> TestSuite {
        self.state.lock().await.suite.clone()
    }

    /// 실행 중인지 확인합니다.
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running
    }

    /// 현재 `passed` 수 (매번 다시 계산)
    pub async fn passed_count(&self) -> usize {
        self.state.lock().await.suite.passed_count()
    }

    /// 현재 완료율 (매번 다시 계산)
    pub async fn completion_percentage(&self) -> u32 {
        self.state.lock().await.suite.completion_percentage()
    }

    /// 모든 대상 테스트 케이스를 순서대로 실행합니다.
    ///
    /// 이미 실행 중이면 아무 것도 하지 않고 [`RunStart::AlreadyRunning`]을 반환합니다.
    /// 그렇지 않으면 초기화와 시작 인덱스 결정을 원자적으로 수행한 뒤
    /// 실행 태스크를 스폰하고 즉시 반환합니다.
    pub async fn run_all(&self) -> RunStart {
        let mut state = self.state.lock().await;
        if state.running {
            debug!(run_id = state.run_seq, "run already in progress, ignoring run_all");
            counter!(m::TEST_RUNNER_RUNS_REJECTED_TOTAL).increment(1);
            return RunStart::AlreadyRunning;
        }

        state.running = true;
        state.suite.reset_for_run();
        let start_index = state.suite.start_index();
        let total = state.suite.len();
        state.run_seq += 1;
        let run_id = state.run_seq;
        let cancel = CancellationToken::new();
        state.active_cancel = Some(cancel.clone());
        drop(state);

        info!(run_id, start_index, total, "test run started");
        counter!(m::TEST_RUNNER_RUNS_STARTED_TOTAL).increment(1);

        self.notifier.notify(
            Notification::info("Running tests").with_description(format!(
                "Executing {} of {} test cases",
                total - start_index,
                total
            )),
        );
        self.emit(RunEvent::RunStarted {
            run_id,
            start_index,
            total,
        });

        let runner = self.clone();
        let token = cancel.clone();
        let task =
            tokio::spawn(async move { runner.execute_run(run_id, start_index, token).await });

        RunStart::Started(RunHandle {
            run_id,
            task,
            cancel,
        })
    }

    /// 실행을 시작하고 끝날 때까지 기다립니다.
    ///
    /// 이미 실행 중이면 `Ok(None)`을 반환합니다.
    pub async fn run_to_completion(&self) -> Result<Option<RunSummary>, TestRunnerError> {
        match self.run_all().await {
            RunStart::Started(handle) => handle.wait().await.map(Some),
            RunStart::AlreadyRunning => Ok(None),
        }
    }

    /// 진행 중인 실행에 취소를 요청합니다. 실행 중이 아니면 `false`.
    pub async fn cancel(&self) -> bool {
        let state = self.state.lock().await;
        match (&state.active_cancel, state.running) {
            (Some(token), true) => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// `failed` 상태의 테스트 케이스 하나를 `pending`으로 되돌립니다.
    ///
    /// 실행을 시작하지는 않습니다. 다음 `run_all`이 이 항목을 처리합니다.
    pub async fn retry(&self, test_id: &str) -> RetryOutcome {
        let mut state = self.state.lock().await;
        let status = match state.suite.find(test_id) {
            Some(case) => case.status(),
            None => {
                debug!(test_id, "retry requested for unknown test case");
                return RetryOutcome::NotFound;
            }
        };
        if status != TestStatus::Failed {
            debug!(test_id, %status, "retry ignored, test case is not failed");
            return RetryOutcome::NotFailed(status);
        }

        let mut name = String::new();
        state.suite.update(test_id, |case| {
            name = case.name().to_owned();
            case.reset();
        });
        drop(state);

        info!(test_id, name = %name, "test case reset for retry");
        counter!(m::TEST_RUNNER_RETRIES_TOTAL).increment(1);
        self.notifier.notify(
            Notification::info("Test reset")
                .with_description(format!("{name} will run on the next run")),
        );
        RetryOutcome::Reset
    }

    fn emit(&self, event: RunEvent) {
        // 구독자가 없으면 send가 실패하지만 실행에는 영향 없음
        let _ = self.events.send(event);
    }

    async fn execute_run(
        &self,
        run_id: u64,
        start_index: usize,
        cancel: CancellationToken,
    ) -> RunSummary {
        let total = self.state.lock().await.suite.len();
        let mut processed = 0;

        for index in start_index..total {
            let Some((id, duration)) = self.begin_case(index).await else {
                break;
            };
            self.emit(RunEvent::CaseStarted {
                run_id,
                index,
                id: id.clone(),
            });
            debug!(run_id, index, test_id = %id, ?duration, "test case running");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return self.finish_cancelled(run_id, index, processed).await;
                }
                _ = tokio::time::sleep(duration) => {}
            }

            let Some(case) = self.complete_case(index, duration).await else {
                break;
            };
            processed += 1;
            let elapsed = case.duration().unwrap_or_else(|| Elapsed::from_duration(duration));

            counter!(m::TEST_RUNNER_CASES_TOTAL, m::LABEL_RESULT => case.status().to_string())
                .increment(1);
            histogram!(m::TEST_RUNNER_CASE_DURATION_SECONDS).record(duration.as_secs_f64());

            if case.status() == TestStatus::Failed {
                warn!(run_id, test_id = %case.id(), %elapsed, "test case failed");
                self.notifier.notify(
                    Notification::error(format!("{} failed", case.name()))
                        .with_description(format!("Failed after {elapsed}"))
                        .with_retry("Retry", case.id()),
                );
            } else {
                debug!(run_id, test_id = %case.id(), %elapsed, "test case passed");
            }

            self.emit(RunEvent::CaseFinished {
                run_id,
                index,
                id,
                status: case.status(),
                duration: elapsed,
            });
        }

        self.finish_run(run_id, processed).await
    }

    /// 테스트 케이스를 `running`으로 전이하고 대기 시간을 샘플링합니다.
    async fn begin_case(&self, index: usize) -> Option<(String, Duration)> {
        let mut state = self.state.lock().await;
        let duration = state
            .outcomes
            .sample_duration(self.config.min_duration(), self.config.max_duration());
        let case = state.suite.get_mut(index)?;
        case.start();
        Some((case.id().to_owned(), duration))
    }

    /// 통과/실패를 추첨하고 결과를 기록합니다.
    async fn complete_case(&self, index: usize, duration: Duration) -> Option<TestCase> {
        let mut state = self.state.lock().await;
        let passed = state.outcomes.draw_pass(self.config.pass_probability);
        let case = state.suite.get_mut(index)?;
        case.finish(passed, Elapsed::from_duration(duration));
        Some(case.clone())
    }

    async fn finish_run(&self, run_id: u64, processed: usize) -> RunSummary {
        let summary = {
            let mut state = self.state.lock().await;
            state.running = false;
            state.active_cancel = None;
            RunSummary {
                run_id,
                processed,
                passed: state.suite.passed_count(),
                failed: state.suite.failed_count(),
                total: state.suite.len(),
                cancelled: false,
            }
        };

        info!(
            run_id,
            passed = summary.passed,
            failed = summary.failed,
            total = summary.total,
            "test run completed"
        );

        let notification = if summary.all_passed() {
            Notification::success("All tests passed")
        } else {
            Notification::warning("Test run complete")
        };
        self.notifier.notify(
            notification
                .with_description(format!("{}/{} tests passed", summary.passed, summary.total)),
        );
        self.emit(RunEvent::RunFinished(summary.clone()));
        summary
    }

    async fn finish_cancelled(&self, run_id: u64, index: usize, processed: usize) -> RunSummary {
        let summary = {
            let mut state = self.state.lock().await;
            if let Some(case) = state.suite.get_mut(index) {
                case.reset();
            }
            state.running = false;
            state.active_cancel = None;
            RunSummary {
                run_id,
                processed,
                passed: state.suite.passed_count(),
                failed: state.suite.failed_count(),
                total: state.suite.len(),
                cancelled: true,
            }
        };

        info!(run_id, index, processed, "test run cancelled");
        counter!(m::TEST_RUNNER_RUNS_CANCELLED_TOTAL).increment(1);
        self.notifier.notify(
            Notification::warning("Test run cancelled").with_description(format!(
                "Stopped after {processed} test cases; {}/{} tests passed",
                summary.passed, summary.total
            )),
        );
        self.emit(RunEvent::RunFinished(summary.clone()));
        summary
    }
}

/// 테스트 러너 빌더
///
/// notifier는 필수이며, 나머지는 기본값이 있습니다:
/// - config: `TestRunnerConfig::default()`
/// - cases: 기본 목업 테스트 케이스 8개
/// - outcomes: config의 seed로 만든 `RandomOutcomes`
#[derive(Default)]
pub struct TestRunnerBuilder {
    config: Option<TestRunnerConfig>,
    cases: Option<Vec<TestCase>>,
    notifier: Option<Arc<dyn Notifier>>,
    outcomes: Option<Box<dyn OutcomeSource>>,
}

impl TestRunnerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 러너 설정을 지정합니다.
    pub fn config(mut self, config: TestRunnerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 초기 테스트 케이스 목록을 지정합니다.
    pub fn cases(mut self, cases: Vec<TestCase>) -> Self {
        self.cases = Some(cases);
        self
    }

    /// 알림 전달 대상을 지정합니다.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// 결과 소스를 주입합니다 (결정적 테스트용).
    pub fn outcomes(mut self, outcomes: Box<dyn OutcomeSource>) -> Self {
        self.outcomes = Some(outcomes);
        self
    }

    /// 설정과 초기 목록을 검증하고 러너를 생성합니다.
    pub fn build(self) -> Result<TestRunner, TestRunnerError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let notifier = self.notifier.ok_or_else(|| TestRunnerError::Config {
            field: "notifier".to_owned(),
            reason: "a notifier is required".to_owned(),
        })?;

        let suite = TestSuite::new(
            self.cases
                .unwrap_or_else(workflowos_core::fixtures::test_cases),
        );
        suite
            .check_invariants()
            .map_err(|reason| TestRunnerError::Config {
                field: "cases".to_owned(),
                reason,
            })?;

        let outcomes = self
            .outcomes
            .unwrap_or_else(|| Box::new(RandomOutcomes::new(config.seed)));

        let (events, _) = broadcast::channel(config.event_capacity);

        debug!(
            cases = suite.len(),
            seed = ?config.seed,
            "test runner built"
        );

        Ok(TestRunner {
            config: Arc::new(config),
            state: Arc::new(Mutex::new(RunnerState {
                suite,
                running: false,
                outcomes,
                run_seq: 0,
                active_cancel: None,
            })),
            notifier,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workflowos_core::fixtures;
    use workflowos_core::notify::{ActionEffect, MemoryNotifier, NotificationKind};

    /// 미리 정한 결과를 순서대로 돌려주는 결과 소스
    struct Scripted {
        passes: std::collections::VecDeque<bool>,
        duration: Duration,
    }

    impl Scripted {
        fn new(passes: &[bool], duration_ms: u64) -> Box<Self> {
            Box::new(Self {
                passes: passes.iter().copied().collect(),
                duration: Duration::from_millis(duration_ms),
            })
        }
    }

    impl OutcomeSource for Scripted {
        fn sample_duration(&mut self, _min: Duration, _max: Duration) -> Duration {
            self.duration
        }

        fn draw_pass(&mut self, _probability: f64) -> bool {
            self.passes.pop_front().unwrap_or(true)
        }
    }

    fn runner_with(passes: &[bool]) -> (TestRunner, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let runner = TestRunnerBuilder::new()
            .notifier(notifier.clone())
            .outcomes(Scripted::new(passes, 1000))
            .build()
            .expect("runner should build");
        (runner, notifier)
    }

    #[test]
    fn build_requires_notifier() {
        let err = TestRunnerBuilder::new().build().err().expect("should fail");
        assert!(err.to_string().contains("notifier"));
    }

    #[test]
    fn build_rejects_duplicate_ids() {
        let err = TestRunnerBuilder::new()
            .notifier(Arc::new(MemoryNotifier::new()))
            .cases(vec![TestCase::pending("1", "a"), TestCase::pending("1", "b")])
            .build()
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("duplicate"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_all_processes_from_first_unfinished_case() {
        let (runner, _notifier) = runner_with(&[true, false, true, true, true]);

        let summary = runner
            .run_to_completion()
            .await
            .unwrap()
            .expect("run should start");

        assert_eq!(summary.processed, 5);
        assert_eq!(summary.passed, 7);
        assert_eq!(summary.failed, 1);
        assert!(!summary.cancelled);

        let suite = runner.snapshot().await;
        assert_eq!(suite.cases()[4].status(), TestStatus::Failed);
        assert_eq!(suite.cases()[4].duration(), Some(Elapsed::from_tenths(10)));
        assert!(!runner.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn notifications_follow_run_transitions() {
        let (runner, notifier) = runner_with(&[true, false, true, true, true]);
        runner.run_to_completion().await.unwrap();

        let received = notifier.take();
        assert_eq!(received.len(), 3, "start + one failure + summary");

        assert_eq!(received[0].kind, NotificationKind::Info);
        assert_eq!(received[0].title, "Running tests");
        assert_eq!(
            received[0].description.as_deref(),
            Some("Executing 5 of 8 test cases")
        );

        assert_eq!(received[1].kind, NotificationKind::Error);
        assert_eq!(received[1].title, "Access permission assignment failed");
        let action = received[1].action.as_ref().expect("retry action");
        assert_eq!(action.label, "Retry");
        assert_eq!(
            action.effect,
            ActionEffect::RetryTest {
                test_id: "5".to_owned()
            }
        );

        assert_eq!(received[2].kind, NotificationKind::Warning);
        assert_eq!(received[2].description.as_deref(), Some("7/8 tests passed"));
    }

    #[tokio::test(start_paused = true)]
    async fn all_passed_emits_success_summary() {
        let (runner, notifier) = runner_with(&[true; 5]);
        let summary = runner.run_to_completion().await.unwrap().unwrap();
        assert!(summary.all_passed());

        let last = notifier.snapshot().pop().expect("summary notification");
        assert_eq!(last.kind, NotificationKind::Success);
        assert_eq!(last.title, "All tests passed");
        assert_eq!(last.description.as_deref(), Some("8/8 tests passed"));
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_run_all_is_ignored() {
        let (runner, notifier) = runner_with(&[true; 5]);

        let handle = runner.run_all().await.into_handle().expect("first run starts");
        for _ in 0..5 {
            assert!(!runner.run_all().await.is_started());
            assert!(runner.is_running().await);
        }

        let summary = handle.wait().await.unwrap();
        assert_eq!(summary.processed, 5);
        assert_eq!(summary.run_id, 1);
        // only one "Running tests" notification
        let starts = notifier
            .snapshot()
            .iter()
            .filter(|n| n.title == "Running tests")
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_only_resets_failed_cases() {
        let (runner, notifier) = runner_with(&[true, false, true, true, true]);
        runner.run_to_completion().await.unwrap();
        notifier.take();

        assert_eq!(
            runner.retry("1").await,
            RetryOutcome::NotFailed(TestStatus::Passed)
        );
        assert_eq!(runner.retry("nope").await, RetryOutcome::NotFound);
        assert!(notifier.is_empty(), "no-op retries must not notify");

        assert_eq!(runner.retry("5").await, RetryOutcome::Reset);
        let suite = runner.snapshot().await;
        assert_eq!(suite.cases()[4].status(), TestStatus::Pending);
        assert!(suite.cases()[4].duration().is_none());
        assert!(!runner.is_running().await, "retry must not start a run");

        let received = notifier.take();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].title, "Test reset");
        assert_eq!(
            received[0].description.as_deref(),
            Some("Access permission assignment will run on the next run")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_resets_in_flight_case() {
        let (runner, notifier) = runner_with(&[true; 5]);
        let handle = runner.run_all().await.into_handle().unwrap();

        // first case finishes at 1s, second is in flight at 1.5s
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(runner.cancel().await);

        let summary = handle.wait().await.unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.processed, 1);

        let suite = runner.snapshot().await;
        assert_eq!(suite.running_count(), 0);
        assert_eq!(suite.cases()[3].status(), TestStatus::Passed);
        assert_eq!(suite.cases()[4].status(), TestStatus::Pending);
        assert!(!runner.is_running().await);
        assert!(!runner.cancel().await, "nothing left to cancel");

        let last = notifier.snapshot().pop().unwrap();
        assert_eq!(last.title, "Test run cancelled");
    }

    #[tokio::test(start_paused = true)]
    async fn derived_values_track_state() {
        let (runner, _notifier) = runner_with(&[true; 5]);
        assert_eq!(runner.passed_count().await, 3);
        assert_eq!(runner.completion_percentage().await, 38);

        runner.run_to_completion().await.unwrap();
        assert_eq!(runner.passed_count().await, 8);
        assert_eq!(runner.completion_percentage().await, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn rerun_after_full_pass_starts_at_zero() {
        let notifier = Arc::new(MemoryNotifier::new());
        let runner = TestRunnerBuilder::new()
            .notifier(notifier)
            .cases(vec![
                TestCase::passed("1", "a", Elapsed::from_tenths(10)),
                TestCase::passed("2", "b", Elapsed::from_tenths(10)),
            ])
            .outcomes(Scripted::new(&[false, true], 700))
            .build()
            .unwrap();

        let mut events = runner.subscribe();
        let summary = runner.run_to_completion().await.unwrap().unwrap();
        assert_eq!(summary.processed, 2);

        match events.recv().await.unwrap() {
            RunEvent::RunStarted { start_index, .. } => assert_eq!(start_index, 0),
            other => panic!("unexpected first event: {other:?}"),
        }
        let suite = runner.snapshot().await;
        assert_eq!(suite.cases()[0].status(), TestStatus::Failed);
        assert_eq!(suite.cases()[0].duration(), Some(Elapsed::from_tenths(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_suite_completes_immediately() {
        let runner = TestRunnerBuilder::new()
            .notifier(Arc::new(MemoryNotifier::new()))
            .cases(Vec::new())
            .build()
            .unwrap();
        let summary = runner.run_to_completion().await.unwrap().unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.total, 0);
        assert!(!runner.is_running().await);
    }

    #[test]
    fn fixtures_build_with_default_config() {
        let runner = TestRunnerBuilder::new()
            .notifier(Arc::new(MemoryNotifier::new()))
            .cases(fixtures::test_cases())
            .build();
        assert!(runner.is_ok());
    }
}
