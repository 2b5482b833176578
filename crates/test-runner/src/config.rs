//! 테스트 러너 설정
//!
//! [`TestRunnerConfig`]는 core의 [`RunnerConfig`](workflowos_core::config::RunnerConfig)를
//! 기반으로 러너 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use workflowos_core::config::WorkflowConfig;
//! use workflowos_test_runner::config::TestRunnerConfig;
//!
//! let core_config = WorkflowConfig::default();
//! let config = TestRunnerConfig::from_core(&core_config.runner);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TestRunnerError;

/// 테스트 러너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunnerConfig {
    /// 테스트 케이스당 최소 실행 시간 (밀리초, 포함)
    pub min_duration_ms: u64,
    /// 테스트 케이스당 최대 실행 시간 (밀리초, 미포함)
    pub max_duration_ms: u64,
    /// 통과 확률 (0.0 ~ 1.0)
    pub pass_probability: f64,
    /// 난수 시드 (None이면 OS 엔트로피 사용)
    pub seed: Option<u64>,

    // --- 확장 설정 (core에 없는 추가 필드) ---
    /// 진행 이벤트 broadcast 채널 용량
    pub event_capacity: usize,
}

impl Default for TestRunnerConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 500,
            max_duration_ms: 2500,
            pass_probability: 0.85,
            seed: None,
            event_capacity: 64,
        }
    }
}

/// 설정 상한값 상수
const MAX_DURATION_MS: u64 = 60_000;
const MAX_EVENT_CAPACITY: usize = 4096;

impl TestRunnerConfig {
    /// core의 `RunnerConfig`에서 러너 설정을 생성합니다.
    ///
    /// core 설정에 없는 확장 필드는 기본값이 적용됩니다.
    pub fn from_core(core: &workflowos_core::config::RunnerConfig) -> Self {
        Self {
            min_duration_ms: core.min_duration_ms,
            max_duration_ms: core.max_duration_ms,
            pass_probability: core.pass_probability,
            seed: core.seed,
            ..Self::default()
        }
    }

    /// 최소 실행 시간
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    /// 최대 실행 시간 (미포함)
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), TestRunnerError> {
        if self.min_duration_ms >= self.max_duration_ms {
            return Err(TestRunnerError::Config {
                field: "min_duration_ms".to_owned(),
                reason: format!(
                    "must be less than max_duration_ms ({})",
                    self.max_duration_ms
                ),
            });
        }

        if self.max_duration_ms > MAX_DURATION_MS {
            return Err(TestRunnerError::Config {
                field: "max_duration_ms".to_owned(),
                reason: format!("must be at most {MAX_DURATION_MS}"),
            });
        }

        if !(0.0..=1.0).contains(&self.pass_probability) {
            return Err(TestRunnerError::Config {
                field: "pass_probability".to_owned(),
                reason: "must be 0.0-1.0".to_owned(),
            });
        }

        if self.event_capacity == 0 || self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(TestRunnerError::Config {
                field: "event_capacity".to_owned(),
                reason: format!("must be 1-{MAX_EVENT_CAPACITY}"),
            });
        }

        Ok(())
    }
}

/// 테스트 러너 설정 빌더
#[derive(Default)]
pub struct TestRunnerConfigBuilder {
    config: TestRunnerConfig,
}

impl TestRunnerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 실행 시간 샘플링 범위(밀리초)를 설정합니다. `max_ms`는 포함되지 않습니다.
    pub fn duration_range_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.config.min_duration_ms = min_ms;
        self.config.max_duration_ms = max_ms;
        self
    }

    /// 통과 확률을 설정합니다.
    pub fn pass_probability(mut self, probability: f64) -> Self {
        self.config.pass_probability = probability;
        self
    }

    /// 난수 시드를 설정합니다.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// 진행 이벤트 채널 용량을 설정합니다.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    /// 설정을 검증하고 `TestRunnerConfig`를 생성합니다.
    pub fn build(self) -> Result<TestRunnerConfig, TestRunnerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
