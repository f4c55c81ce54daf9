// ============================================================================
// Registry Core - Household Entity
// File: crates/registry-core/src/domain/household.rs
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub id: String,
    pub household_number: String,
    pub address: String,
    /// Embedded member documents; only their count is displayed.
    #[serde(default)]
    pub members: Vec<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Household {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_without_members() {
        let household: Household = serde_json::from_value(json!({
            "id": "65a1",
            "household_number": "HK001",
            "address": "123 Main St",
            "created_at": "2024-01-05T10:00:00.123456"
        }))
        .unwrap();

        assert_eq!(household.member_count(), 0);
        assert_eq!(household.created_at.as_deref(), Some("2024-01-05T10:00:00.123456"));
    }
}
