// ============================================================================
// Registry Core - Statistics
// File: crates/registry-core/src/domain/statistics.rs
// ============================================================================

use serde::Deserialize;

use crate::labels::{gender_label, status_label};

pub const NO_DATA: &str = "Chưa có dữ liệu";

/// Grouping key may be null when the server aggregates records missing it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenderCount {
    #[serde(default)]
    pub gender: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgeGroupCount {
    #[serde(default)]
    pub age_group: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusCount {
    #[serde(default)]
    pub status: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatItem {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatPanel {
    Empty,
    Items(Vec<StatItem>),
}

impl StatPanel {
    fn from_items(items: Vec<StatItem>) -> Self {
        if items.is_empty() {
            StatPanel::Empty
        } else {
            StatPanel::Items(items)
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            StatPanel::Empty => 0,
            StatPanel::Items(items) => items.iter().map(|i| i.count).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsView {
    pub gender: StatPanel,
    pub age: StatPanel,
    pub feedback: StatPanel,
}

impl StatisticsView {
    pub fn render(gender: &[GenderCount], age: &[AgeGroupCount], feedback: &[StatusCount]) -> Self {
        Self {
            gender: StatPanel::from_items(
                gender
                    .iter()
                    .map(|g| StatItem {
                        label: gender_label(g.gender.as_deref().unwrap_or_default()),
                        count: g.count,
                    })
                    .collect(),
            ),
            age: StatPanel::from_items(
                age.iter()
                    .map(|a| StatItem {
                        label: a.age_group.clone().unwrap_or_default(),
                        count: a.count,
                    })
                    .collect(),
            ),
            feedback: StatPanel::from_items(
                feedback
                    .iter()
                    .map(|s| StatItem {
                        label: status_label(s.status.as_deref().unwrap_or_default()),
                        count: s.count,
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_labels_and_empty_panels() {
        let view = StatisticsView::render(
            &[
                GenderCount { gender: Some("nam".into()), count: 3 },
                GenderCount { gender: Some("nu".into()), count: 4 },
            ],
            &[],
            &[StatusCount { status: Some("resolved".into()), count: 2 }],
        );

        assert_eq!(view.gender.total(), 7);
        assert_eq!(view.age, StatPanel::Empty);
        assert_eq!(
            view.feedback,
            StatPanel::Items(vec![StatItem { label: "Đã giải quyết".into(), count: 2 }])
        );
    }
}
