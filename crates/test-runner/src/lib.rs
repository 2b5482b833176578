//! WorkflowOS 시뮬레이션 순차 테스트 러너
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 (`TestRunnerError`)
//! - [`config`]: 러너 설정 (`TestRunnerConfig`, 빌더)
//! - [`outcome`]: 실행 시간/통과 여부 결정 (`OutcomeSource`, `RandomOutcomes`)
//! - [`suite`]: 테스트 케이스 목록과 파생 값 (`TestSuite`)
//! - [`event`]: 진행 이벤트 (`RunEvent`, `RunSummary`)
//! - [`runner`]: 메인 러너 (`TestRunner`, `TestRunnerBuilder`)
//!
//! # Architecture
//!
//! ```text
//! run_all() --> TestRunner (Mutex<RunnerState>)
//!                   |
//!              run task: case[start..] 순차 처리
//!                   |            |
//!            Notifier.notify()   RunEvent --broadcast--> subscribers
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod outcome;
pub mod runner;
pub mod suite;

// --- Public API Re-exports ---

// Runner
pub use runner::{RetryOutcome, RunHandle, RunStart, TestRunner, TestRunnerBuilder};

// Configuration
pub use config::{TestRunnerConfig, TestRunnerConfigBuilder};

// Error
pub use error::TestRunnerError;

// Events
pub use event::{RunEvent, RunSummary};

// Outcomes
pub use outcome::{OutcomeSource, RandomOutcomes};

// Suite
pub use suite::{TestSuite, completion_percentage};
