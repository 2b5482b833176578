//! 알림(notification) — 사용자에게 보여지는 짧은 메시지
//!
//! 코어 로직은 [`Notifier`] trait만 호출하며, 알림이 어떻게 표시되고
//! 사라지는지(터미널 토스트, 채널 전달, 테스트 기록)에는 의존하지 않습니다.
//!
//! # 구현체
//! - [`MemoryNotifier`]: 받은 알림을 순서대로 기록 (테스트, 스냅샷 용도)
//! - [`ChannelNotifier`]: 알림을 mpsc 채널로 전달 (비동기 출력 태스크 연결용)

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 알림에 딸린 후속 액션의 효과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEffect {
    /// 후속 알림을 띄움
    Notify { notification: Box<Notification> },
    /// 지정한 테스트 케이스를 재시도 대기 상태로 되돌림
    RetryTest { test_id: String },
}

/// 라벨이 붙은 후속 액션 (예: "Fix Now", "Retry")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub effect: ActionEffect,
}

/// 사용자 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
}

impl Notification {
    /// 종류와 제목으로 알림을 생성합니다.
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            action: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    /// 설명을 추가합니다.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 후속 알림을 띄우는 액션을 추가합니다.
    pub fn with_follow_up(mut self, label: impl Into<String>, follow_up: Notification) -> Self {
        self.action = Some(NotificationAction {
            label: label.into(),
            effect: ActionEffect::Notify {
                notification: Box::new(follow_up),
            },
        });
        self
    }

    /// 테스트 재시도 액션을 추가합니다.
    pub fn with_retry(mut self, label: impl Into<String>, test_id: impl Into<String>) -> Self {
        self.action = Some(NotificationAction {
            label: label.into(),
            effect: ActionEffect::RetryTest {
                test_id: test_id.into(),
            },
        });
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.title)?;
        if let Some(ref description) = self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// 알림 전달 인터페이스
///
/// 호출자는 전이 시점마다 올바른 종류와 내용으로 한 번씩 호출하기만 하면 되며,
/// 표시 방식은 구현체가 결정합니다.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 받은 알림을 메모리에 기록하는 notifier
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 받은 알림의 복사본
    pub fn snapshot(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 기록된 알림을 모두 꺼내고 비웁니다.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .received
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn len(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}

/// 알림을 unbounded mpsc 채널로 전달하는 notifier
///
/// 수신 측이 닫혔으면 알림은 버려집니다.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// notifier와 수신 채널을 함께 생성합니다.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            debug!(title = %e.0.title, "notification receiver closed, dropping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_description_and_follow_up() {
        let n = Notification::error("Integration Endpoints")
            .with_description("HRIS sync endpoint unreachable")
            .with_follow_up("Fix Now", Notification::success("Opening fix wizard..."));

        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.description.as_deref(), Some("HRIS sync endpoint unreachable"));
        let action = n.action.expect("action should be set");
        assert_eq!(action.label, "Fix Now");
        match action.effect {
            ActionEffect::Notify { notification } => {
                assert_eq!(notification.kind, NotificationKind::Success);
                assert_eq!(notification.title, "Opening fix wizard...");
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn display_includes_kind_and_description() {
        let n = Notification::info("Configuration Rules").with_description("Viewing all 6");
        assert_eq!(n.to_string(), "[info] Configuration Rules: Viewing all 6");
    }

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::info("first"));
        notifier.notify(Notification::success("second"));

        assert_eq!(notifier.len(), 2);
        let titles: Vec<_> = notifier.snapshot().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["first", "second"]);

        let taken = notifier.take();
        assert_eq!(taken.len(), 2);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn channel_notifier_forwards_notifications() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::warning("Test run complete"));
        let received = rx.recv().await.expect("should receive notification");
        assert_eq!(received.kind, NotificationKind::Warning);
    }

    #[test]
    fn channel_notifier_drops_when_receiver_closed() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        // must not panic
        notifier.notify(Notification::info("nobody listening"));
    }

    #[test]
    fn retry_action_serializes_with_tag() {
        let n = Notification::error("IT provisioning automation failed").with_retry("Retry", "4");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["action"]["label"], "Retry");
        assert_eq!(json["action"]["effect"]["type"], "retry_test");
        assert_eq!(json["action"]["effect"]["test_id"], "4");
    }
}
