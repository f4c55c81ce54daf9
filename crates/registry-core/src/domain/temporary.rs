// ============================================================================
// Registry Core - Temporary Absence / Residence Entities
// File: crates/registry-core/src/domain/temporary.rs
// ============================================================================
//! Absences and residences share one record shape; the newtypes only exist so
//! each can be bound to its own endpoint.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::labels::RecordStatus;

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporaryRecord {
    pub id: String,
    pub person_id: String,
    pub person_name: String,
    #[serde(default)]
    pub household_id: Option<String>,
    pub household_number: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(default = "default_status")]
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryAbsence(pub TemporaryRecord);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryResidence(pub TemporaryRecord);

impl Deref for TemporaryAbsence {
    type Target = TemporaryRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for TemporaryResidence {
    type Target = TemporaryRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_defaults_to_active() {
        let absence: TemporaryAbsence = serde_json::from_value(json!({
            "id": "a1",
            "person_id": "p1",
            "person_name": "Trần Thị B",
            "household_number": "HK002",
            "start_date": "2024-02-01",
            "end_date": "2024-05-01",
            "reason": "Công tác"
        }))
        .unwrap();

        assert_eq!(absence.status, RecordStatus::Active);
        assert_eq!(absence.person_name, "Trần Thị B");
    }
}
