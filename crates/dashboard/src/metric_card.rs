//! 메트릭 카드 위젯 (표시 전용)

use serde::Serialize;

use workflowos_core::types::{MetricCard, Trend};

use crate::presentation::Tone;

const TREND_SUFFIX: &str = "vs last week";

/// 표시용 메트릭 카드
#[derive(Debug, Clone, Serialize)]
pub struct MetricCardView<'a> {
    #[serde(flatten)]
    pub card: &'a MetricCard,
    /// "+15% vs last week" 형식
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_tone: Option<Tone>,
}

impl<'a> MetricCardView<'a> {
    pub fn new(card: &'a MetricCard) -> Self {
        Self {
            card,
            trend_label: card.trend.as_ref().map(trend_label),
            trend_tone: card.trend.as_ref().map(trend_tone),
        }
    }
}

pub fn trend_label(trend: &Trend) -> String {
    format!("{trend} {TREND_SUFFIX}")
}

pub fn trend_tone(trend: &Trend) -> Tone {
    if trend.positive {
        Tone::Success
    } else {
        Tone::Destructive
    }
}
