//! 도메인 타입 — 대시보드 전역에서 사용되는 공통 타입
//!
//! 테스트 케이스는 상태 전이 메서드를 통해서만 변경되며,
//! 나머지 레코드(설정 규칙, 타임라인, 활동 피드, 메트릭 카드)는
//! 정적으로 초기화된 뒤 변경되지 않는 표시용 레코드입니다.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── 테스트 케이스 ────────────────────────────────────────────────

/// 테스트 케이스 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// 실행 대기
    #[default]
    Pending,
    /// 실행 중 (한 시점에 최대 1개)
    Running,
    /// 통과
    Passed,
    /// 실패
    Failed,
}

impl TestStatus {
    /// 문자열에서 상태를 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "passed" | "pass" => Some(Self::Passed),
            "failed" | "fail" => Some(Self::Failed),
            _ => None,
        }
    }

    /// 완료 상태(`passed` 또는 `failed`)인지 확인합니다.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// 소수점 한 자리 초 단위로 기록되는 경과 시간 (예: `1.2s`)
///
/// 내부적으로 0.1초 단위 정수로 저장합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed {
    tenths: u32,
}

impl Elapsed {
    /// 0.1초 단위 값으로 생성합니다.
    pub const fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    /// `Duration`을 가장 가까운 0.1초로 반올림하여 생성합니다.
    pub fn from_duration(duration: Duration) -> Self {
        let millis = duration.as_millis();
        let tenths = (millis + 50) / 100;
        Self {
            tenths: u32::try_from(tenths).unwrap_or(u32::MAX),
        }
    }

    /// 0.1초 단위 값
    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    /// `Duration`으로 변환합니다.
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.tenths) * 100)
    }

    /// 초 단위 부동소수 값
    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}s", self.tenths / 10, self.tenths % 10)
    }
}

impl FromStr for Elapsed {
    type Err = String;

    /// `"1.2s"`, `"1.2"`, `"3s"` 형식을 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('s').unwrap_or(trimmed);
        let (whole, frac) = match number.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (number, "0"),
        };
        if frac.len() != 1 {
            return Err(format!("expected one decimal place: '{s}'"));
        }
        let whole: u32 = whole
            .parse()
            .map_err(|_| format!("invalid elapsed time: '{s}'"))?;
        let frac: u32 = frac
            .parse()
            .map_err(|_| format!("invalid elapsed time: '{s}'"))?;
        whole
            .checked_mul(10)
            .and_then(|t| t.checked_add(frac))
            .map(Self::from_tenths)
            .ok_or_else(|| format!("elapsed time out of range: '{s}'"))
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Elapsed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 시뮬레이션 테스트 케이스
///
/// 필드는 외부에서 직접 변경할 수 없습니다. 상태 전이는
/// [`start`](Self::start), [`finish`](Self::finish), [`reset`](Self::reset)으로만 수행되며,
/// 이를 통해 `duration`은 `passed`/`failed` 상태에서만 존재한다는 불변식을 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    id: String,
    name: String,
    status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<Elapsed>,
}

impl TestCase {
    /// `pending` 상태의 테스트 케이스를 생성합니다.
    pub fn pending(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: TestStatus::Pending,
            duration: None,
        }
    }

    /// `running` 상태의 테스트 케이스를 생성합니다.
    pub fn running(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut case = Self::pending(id, name);
        case.start();
        case
    }

    /// `passed` 상태의 테스트 케이스를 생성합니다.
    pub fn passed(id: impl Into<String>, name: impl Into<String>, duration: Elapsed) -> Self {
        let mut case = Self::pending(id, name);
        case.finish(true, duration);
        case
    }

    /// `failed` 상태의 테스트 케이스를 생성합니다.
    pub fn failed(id: impl Into<String>, name: impl Into<String>, duration: Elapsed) -> Self {
        let mut case = Self::pending(id, name);
        case.finish(false, duration);
        case
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn duration(&self) -> Option<Elapsed> {
        self.duration
    }

    /// `running`으로 전이합니다. 이전 기록 시간은 지워집니다.
    pub fn start(&mut self) {
        self.status = TestStatus::Running;
        self.duration = None;
    }

    /// 결과를 기록합니다.
    pub fn finish(&mut self, passed: bool, duration: Elapsed) {
        self.status = if passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
        self.duration = Some(duration);
    }

    /// `pending`으로 되돌리고 기록 시간을 지웁니다.
    pub fn reset(&mut self) {
        self.status = TestStatus::Pending;
        self.duration = None;
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration {
            Some(d) => write!(f, "[{}] {} ({})", self.status, self.name, d),
            None => write!(f, "[{}] {}", self.status, self.name),
        }
    }
}

// ─── 설정 규칙 ────────────────────────────────────────────────────

/// 설정 규칙 검증 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Valid,
    Invalid,
    Warning,
}

impl RuleStatus {
    /// 문자열에서 규칙 상태를 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "valid" => Some(Self::Valid),
            "invalid" => Some(Self::Invalid),
            "warning" | "warn" => Some(Self::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// 온보딩 워크플로 설정 규칙
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRule {
    pub id: String,
    pub name: String,
    /// 분류 (Communications, Workflows, Security 등)
    pub category: String,
    pub status: RuleStatus,
    /// 마지막 검증 시점 (사람이 읽는 상대 시간, 예: "2 hours ago")
    pub last_validated: String,
    pub description: String,
}

// ─── 온보딩 타임라인 ──────────────────────────────────────────────

/// 타임라인 단계 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineStatus {
    Completed,
    InProgress,
    Pending,
    Error,
}

impl TimelineStatus {
    /// 화면 표시용 라벨 (하이픈 대신 공백)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in progress",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TimelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Pending => write!(f, "pending"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 온보딩 타임라인 단계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TimelineStatus,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
}

// ─── 최근 활동 ────────────────────────────────────────────────────

/// 활동 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Onboarding,
    Document,
    Config,
    Security,
    Notification,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onboarding => write!(f, "onboarding"),
            Self::Document => write!(f, "document"),
            Self::Config => write!(f, "config"),
            Self::Security => write!(f, "security"),
            Self::Notification => write!(f, "notification"),
        }
    }
}

/// 최근 활동 피드 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

// ─── 메트릭 카드 ──────────────────────────────────────────────────

/// 메트릭 카드 값 — 정수 또는 서식이 적용된 텍스트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// 주간 추세 (퍼센트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub value: u32,
    pub positive: bool,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 하락은 부호 없이 색상으로만 표시
        let sign = if self.positive { "+" } else { "" };
        write!(f, "{sign}{}%", self.value)
    }
}

/// 대시보드 상단 메트릭 카드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_display_has_one_decimal() {
        assert_eq!(Elapsed::from_tenths(12).to_string(), "1.2s");
        assert_eq!(Elapsed::from_tenths(5).to_string(), "0.5s");
        assert_eq!(Elapsed::from_tenths(20).to_string(), "2.0s");
    }

    #[test]
    fn elapsed_from_duration_rounds_to_nearest_tenth() {
        assert_eq!(Elapsed::from_duration(Duration::from_millis(1234)).tenths(), 12);
        assert_eq!(Elapsed::from_duration(Duration::from_millis(1250)).tenths(), 13);
        assert_eq!(Elapsed::from_duration(Duration::from_millis(2499)).tenths(), 25);
        assert_eq!(Elapsed::from_duration(Duration::from_millis(500)).tenths(), 5);
    }

    #[test]
    fn elapsed_parses_display_format() {
        assert_eq!("1.2s".parse::<Elapsed>().unwrap(), Elapsed::from_tenths(12));
        assert_eq!("0.8".parse::<Elapsed>().unwrap(), Elapsed::from_tenths(8));
        assert_eq!("3s".parse::<Elapsed>().unwrap(), Elapsed::from_tenths(30));
        assert!("1.25s".parse::<Elapsed>().is_err());
        assert!("fast".parse::<Elapsed>().is_err());
    }

    #[test]
    fn elapsed_serializes_as_string() {
        let json = serde_json::to_string(&Elapsed::from_tenths(21)).unwrap();
        assert_eq!(json, "\"2.1s\"");
    }

    #[test]
    fn test_case_transitions_keep_duration_invariant() {
        let mut case = TestCase::pending("1", "Pre-boarding email trigger");
        assert_eq!(case.status(), TestStatus::Pending);
        assert!(case.duration().is_none());

        case.start();
        assert_eq!(case.status(), TestStatus::Running);
        assert!(case.duration().is_none());

        case.finish(false, Elapsed::from_tenths(9));
        assert_eq!(case.status(), TestStatus::Failed);
        assert_eq!(case.duration(), Some(Elapsed::from_tenths(9)));

        case.reset();
        assert_eq!(case.status(), TestStatus::Pending);
        assert!(case.duration().is_none());
    }

    #[test]
    fn test_case_start_clears_previous_duration() {
        let mut case = TestCase::passed("1", "a", Elapsed::from_tenths(10));
        case.start();
        assert!(case.duration().is_none());
    }

    #[test]
    fn test_case_json_omits_missing_duration() {
        let json = serde_json::to_value(TestCase::pending("5", "Access")).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("duration").is_none());

        let json = serde_json::to_value(TestCase::passed("1", "a", Elapsed::from_tenths(12))).unwrap();
        assert_eq!(json["duration"], "1.2s");
    }

    #[test]
    fn test_status_from_str_loose() {
        assert_eq!(TestStatus::from_str_loose("PASSED"), Some(TestStatus::Passed));
        assert_eq!(TestStatus::from_str_loose("fail"), Some(TestStatus::Failed));
        assert_eq!(TestStatus::from_str_loose("skipped"), None);
    }

    #[test]
    fn timeline_status_label_replaces_hyphen() {
        assert_eq!(TimelineStatus::InProgress.label(), "in progress");
        assert_eq!(TimelineStatus::InProgress.to_string(), "in-progress");
        let json = serde_json::to_string(&TimelineStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn trend_display_signs_only_increases() {
        let up = Trend { value: 15, positive: true };
        let down = Trend { value: 4, positive: false };
        assert_eq!(up.to_string(), "+15%");
        assert_eq!(down.to_string(), "4%");
    }

    #[test]
    fn metric_value_is_untagged_in_json() {
        assert_eq!(serde_json::to_string(&MetricValue::Count(12)).unwrap(), "12");
        assert_eq!(
            serde_json::to_string(&MetricValue::Text("24/26".to_owned())).unwrap(),
            "\"24/26\""
        );
    }
}
