// ============================================================================
// Registry Core - Feedback Entity
// File: crates/registry-core/src/domain/feedback.rs
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::labels::{FeedbackCategory, FeedbackStatus};

fn default_status() -> FeedbackStatus {
    FeedbackStatus::New
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub person_name: String,
    pub content: String,
    pub date: String,
    pub category: FeedbackCategory,
    #[serde(default = "default_status")]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub response_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Feedback {
    pub fn has_response(&self) -> bool {
        self.response.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}
