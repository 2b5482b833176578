//! 결과 소스 — 실행 시간 샘플링과 통과/실패 추첨
//!
//! 러너는 전역 난수 함수 대신 주입 가능한 [`OutcomeSource`]를 사용합니다.
//! 시드를 고정한 [`RandomOutcomes`]나 테스트용 스크립트 구현을 넣으면
//! 실행 결과를 정확히 재현할 수 있습니다.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 시뮬레이션 결과를 결정하는 소스
pub trait OutcomeSource: Send {
    /// `[min, max)` 구간에서 실행 시간을 샘플링합니다.
    fn sample_duration(&mut self, min: Duration, max: Duration) -> Duration;

    /// `probability` 확률로 `true`(통과)를 반환합니다.
    fn draw_pass(&mut self, probability: f64) -> bool;
}

/// `StdRng` 기반 균등 분포 결과 소스
#[derive(Debug, Clone)]
pub struct RandomOutcomes {
    rng: StdRng,
}

impl RandomOutcomes {
    /// 고정 시드로 생성합니다. 같은 시드는 같은 결과 순서를 만듭니다.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// OS 엔트로피로 생성합니다.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// 시드가 있으면 고정 시드로, 없으면 OS 엔트로피로 생성합니다.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl OutcomeSource for RandomOutcomes {
    fn sample_duration(&mut self, min: Duration, max: Duration) -> Duration {
        let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if min_ms >= max_ms {
            return min;
        }
        Duration::from_millis(self.rng.random_range(min_ms..max_ms))
    }

    fn draw_pass(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}
