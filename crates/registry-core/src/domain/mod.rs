//! # Registry Core - Domain Module
//!
//! Pass-through DTOs owned by the registry server. The client only ever holds
//! transient copies of them.

pub mod feedback;
pub mod household;
pub mod person;
pub mod statistics;
pub mod temporary;
pub mod user;

pub use feedback::Feedback;
pub use household::Household;
pub use person::Person;
pub use statistics::{
    AgeGroupCount, GenderCount, StatItem, StatPanel, StatisticsView, StatusCount, NO_DATA,
};
pub use temporary::{TemporaryAbsence, TemporaryRecord, TemporaryResidence};
pub use user::{AuthView, RegisterProfile, Session, TokenResponse, UserProfile};
