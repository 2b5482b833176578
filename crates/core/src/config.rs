//! 설정 관리 — workflowos.toml 파싱 및 런타임 설정
//!
//! [`WorkflowConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`WORKFLOWOS_RUNNER_SEED=42` 형식)
//! 3. 설정 파일 (`workflowos.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), workflowos_core::error::WorkflowError> {
//! use workflowos_core::config::WorkflowConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = WorkflowConfig::load("workflowos.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = WorkflowConfig::parse("[runner]\npass_probability = 0.5")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, WorkflowError};

/// WorkflowOS 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 테스트 러너 설정
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl WorkflowConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에서 시작합니다.
    ///
    /// 파일이 존재하지만 파싱/검증에 실패하면 에러를 반환합니다.
    /// 파일 누락 경고는 호출자가 로깅 초기화 후 출력합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(WorkflowError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WorkflowError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                WorkflowError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, WorkflowError> {
        toml::from_str(toml_str).map_err(|e| {
            WorkflowError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `WORKFLOWOS_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "WORKFLOWOS_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "WORKFLOWOS_GENERAL_LOG_FORMAT");

        // Runner
        override_u64(
            &mut self.runner.min_duration_ms,
            "WORKFLOWOS_RUNNER_MIN_DURATION_MS",
        );
        override_u64(
            &mut self.runner.max_duration_ms,
            "WORKFLOWOS_RUNNER_MAX_DURATION_MS",
        );
        override_f64(
            &mut self.runner.pass_probability,
            "WORKFLOWOS_RUNNER_PASS_PROBABILITY",
        );
        override_opt_u64(&mut self.runner.seed, "WORKFLOWOS_RUNNER_SEED");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.runner.min_duration_ms >= self.runner.max_duration_ms {
            return Err(ConfigError::InvalidValue {
                field: "runner.min_duration_ms".to_owned(),
                reason: format!(
                    "must be less than runner.max_duration_ms ({})",
                    self.runner.max_duration_ms
                ),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.runner.pass_probability) {
            return Err(ConfigError::InvalidValue {
                field: "runner.pass_probability".to_owned(),
                reason: "must be between 0.0 and 1.0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 테스트 러너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 테스트 케이스당 최소 실행 시간 (밀리초, 포함)
    pub min_duration_ms: u64,
    /// 테스트 케이스당 최대 실행 시간 (밀리초, 미포함)
    pub max_duration_ms: u64,
    /// 통과 확률 (0.0 ~ 1.0)
    pub pass_probability: f64,
    /// 난수 시드 — 지정하면 실행 결과를 재현할 수 있음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 500,
            max_duration_ms: 2500,
            pass_probability: 0.85,
            seed: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = WorkflowConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.runner.min_duration_ms, 500);
        assert_eq!(config.runner.max_duration_ms, 2500);
        assert!((config.runner.pass_probability - 0.85).abs() < f64::EPSILON);
        assert!(config.runner.seed.is_none());
    }

    #[test]
    fn default_config_passes_validation() {
        WorkflowConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = WorkflowConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.runner.max_duration_ms, 2500);
    }

    #[test]
    fn parse_partial_toml_merges_with_defaults() {
        let toml = r#"
[runner]
pass_probability = 0.5
seed = 7
"#;
        let config = WorkflowConfig::parse(toml).unwrap();
        assert!((config.runner.pass_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.runner.seed, Some(7));
        // 나머지는 기본값 유지
        assert_eq!(config.runner.min_duration_ms, 500);
        assert_eq!(config.general.log_format, "pretty");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let err = WorkflowConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = WorkflowConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = WorkflowConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_inverted_duration_range() {
        let mut config = WorkflowConfig::default();
        config.runner.min_duration_ms = 3000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_duration_ms"));
    }

    #[test]
    fn validate_rejects_empty_duration_range() {
        let mut config = WorkflowConfig::default();
        config.runner.min_duration_ms = 1000;
        config.runner.max_duration_ms = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_probability() {
        let mut config = WorkflowConfig::default();
        config.runner.pass_probability = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pass_probability"));

        config.runner.pass_probability = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn env_override_runner_seed() {
        let mut config = WorkflowConfig::default();
        // SAFETY: serial_test로 환경변수 조작 테스트를 직렬화합니다.
        unsafe { std::env::set_var("WORKFLOWOS_RUNNER_SEED", "1234") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("WORKFLOWOS_RUNNER_SEED") };
        assert_eq!(config.runner.seed, Some(1234));
    }

    #[test]
    #[serial]
    fn env_override_invalid_number_keeps_original() {
        let mut val = 500;
        // SAFETY: serial_test로 환경변수 조작 테스트를 직렬화합니다.
        unsafe { std::env::set_var("TEST_WORKFLOWOS_U64_BAD", "soon") };
        override_u64(&mut val, "TEST_WORKFLOWOS_U64_BAD");
        unsafe { std::env::remove_var("TEST_WORKFLOWOS_U64_BAD") };
        assert_eq!(val, 500);
    }

    #[test]
    #[serial]
    fn env_override_probability() {
        let mut val = 0.85;
        // SAFETY: serial_test로 환경변수 조작 테스트를 직렬화합니다.
        unsafe { std::env::set_var("TEST_WORKFLOWOS_F64", "0.25") };
        override_f64(&mut val, "TEST_WORKFLOWOS_F64");
        unsafe { std::env::remove_var("TEST_WORKFLOWOS_F64") };
        assert!((val - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_WORKFLOWOS_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let mut config = WorkflowConfig::default();
        config.runner.seed = Some(99);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = WorkflowConfig::parse(&toml_str).unwrap();
        assert_eq!(parsed.runner.seed, Some(99));
        assert_eq!(parsed.general.log_level, config.general.log_level);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = WorkflowConfig::from_file("/nonexistent/path/workflowos.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn load_or_default_falls_back_when_missing() {
        let config = WorkflowConfig::load_or_default("/nonexistent/path/workflowos.toml")
            .await
            .unwrap();
        assert_eq!(config.runner.max_duration_ms, 2500);
    }
}
