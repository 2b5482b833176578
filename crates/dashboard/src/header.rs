//! 상단 헤더 (표시 전용)

use serde::Serialize;

pub const PRODUCT_NAME: &str = "WorkflowOS";

const NAV_LABELS: [&str; 4] = ["Dashboard", "Workflows", "Employees", "Reports"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub product: &'static str,
    pub nav: Vec<NavItem>,
    /// 알림 벨 배지 숫자
    pub notification_count: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            product: PRODUCT_NAME,
            nav: NAV_LABELS
                .iter()
                .enumerate()
                .map(|(i, &label)| NavItem {
                    label,
                    active: i == 0,
                })
                .collect(),
            notification_count: 3,
        }
    }
}

impl Header {
    pub fn active(&self) -> Option<&NavItem> {
        self.nav.iter().find(|n| n.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_matches_product() {
        let header = Header::default();
        assert_eq!(header.product, "WorkflowOS");
        assert_eq!(header.notification_count, 3);
        let labels: Vec<_> = header.nav.iter().map(|n| n.label).collect();
        assert_eq!(labels, NAV_LABELS);
        assert_eq!(header.active().unwrap().label, "Dashboard");
    }
}
