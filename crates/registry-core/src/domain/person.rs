// ============================================================================
// Registry Core - Person Entity
// File: crates/registry-core/src/domain/person.rs
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::labels::{Gender, Relationship};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub gender: Gender,
    pub id_number: String,
    pub relationship: Relationship,
    pub occupation: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
