//! 설정 규칙 위젯
//!
//! 정적인 규칙 목록, 검증 요약, 그리고 규칙 클릭/"View all" 상호작용을 제공합니다.
//! 상호작용은 [`Notifier`]로 알림을 보내고, 보낸 알림을 그대로 반환합니다.

use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use tracing::debug;

use workflowos_core::fixtures;
use workflowos_core::metrics as m;
use workflowos_core::notify::{Notification, Notifier};
use workflowos_core::types::{ConfigRule, RuleStatus};

use crate::error::DashboardError;
use crate::presentation::{Present, Presentation};

const WIDGET: &str = "config_rules";

/// 표시용 규칙 행
#[derive(Debug, Clone, Serialize)]
pub struct RuleRow<'a> {
    #[serde(flatten)]
    pub rule: &'a ConfigRule,
    pub presentation: Presentation,
}

/// 설정 규칙 위젯
pub struct ConfigRulesWidget {
    rules: Vec<ConfigRule>,
    notifier: Arc<dyn Notifier>,
}

impl ConfigRulesWidget {
    pub fn new(rules: Vec<ConfigRule>, notifier: Arc<dyn Notifier>) -> Self {
        Self { rules, notifier }
    }

    /// 기본 목업 규칙 6개로 위젯을 생성합니다.
    pub fn from_fixtures(notifier: Arc<dyn Notifier>) -> Self {
        Self::new(fixtures::config_rules(), notifier)
    }

    pub fn rules(&self) -> &[ConfigRule] {
        &self.rules
    }

    /// 표시 정보가 붙은 행 목록. `status`가 주어지면 해당 상태만 남깁니다.
    pub fn rows(&self, status: Option<RuleStatus>) -> Vec<RuleRow<'_>> {
        self.rules
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .map(|rule| RuleRow {
                rule,
                presentation: rule.status.presentation(),
            })
            .collect()
    }

    pub fn find(&self, id: &str) -> Result<&ConfigRule, DashboardError> {
        self.rules
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DashboardError::RuleNotFound(id.to_owned()))
    }

    /// `valid` 상태 규칙 수
    pub fn valid_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|r| r.status == RuleStatus::Valid)
            .count()
    }

    /// "P/T rules passing validation"
    pub fn summary(&self) -> String {
        format!(
            "{}/{} rules passing validation",
            self.valid_count(),
            self.rules.len()
        )
    }

    /// 규칙 클릭: 상태에 따라 알림 종류와 후속 액션이 달라집니다.
    pub fn click(&self, id: &str) -> Result<Notification, DashboardError> {
        let rule = self.find(id)?;
        let notification = rule_notification(rule);

        debug!(rule_id = %rule.id, status = %rule.status, "config rule clicked");
        counter!(m::DASHBOARD_INTERACTIONS_TOTAL, m::LABEL_WIDGET => WIDGET).increment(1);
        self.notifier.notify(notification.clone());
        Ok(notification)
    }

    /// "View all" 버튼
    pub fn view_all(&self) -> Notification {
        let notification = Notification::info("Configuration Rules").with_description(format!(
            "Viewing all {} configuration rules",
            self.rules.len()
        ));

        debug!(count = self.rules.len(), "viewing all config rules");
        counter!(m::DASHBOARD_INTERACTIONS_TOTAL, m::LABEL_WIDGET => WIDGET).increment(1);
        self.notifier.notify(notification.clone());
        notification
    }
}

fn rule_notification(rule: &ConfigRule) -> Notification {
    match rule.status {
        RuleStatus::Invalid => Notification::error(&rule.name)
            .with_description(&rule.description)
            .with_follow_up("Fix Now", Notification::success("Opening fix wizard...")),
        RuleStatus::Warning => Notification::warning(&rule.name)
            .with_description(&rule.description)
            .with_follow_up("Review", Notification::info("Opening review panel...")),
        RuleStatus::Valid => Notification::success(&rule.name)
            .with_description(format!("Last validated: {}", rule.last_validated)),
    }
}

/// 상태 필터 문자열을 파싱합니다.
pub fn parse_status(value: &str) -> Result<RuleStatus, DashboardError> {
    RuleStatus::from_str_loose(value).ok_or_else(|| DashboardError::UnknownStatus(value.to_owned()))
}
