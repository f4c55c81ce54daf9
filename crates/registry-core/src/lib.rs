//! # Registry Core
//!
//! IO-free layer of the resident registry client: DTOs, label tables, form
//! mapping, row view-models and the modal/navigation state machines.

pub mod dates;
pub mod domain;
pub mod error;
pub mod form;
pub mod labels;
pub mod modal;
pub mod navigation;
pub mod ports;
pub mod resource;

pub use domain::*;
pub use error::ClientError;
pub use form::{FieldSpec, FormValues};
pub use modal::{ClickTarget, ModalKind, ModalShell, ModalState, SubmitTicket};
pub use navigation::{Navigation, Section, Tab};
pub use ports::{ConfirmGate, TokenStorage};
pub use resource::{EmptyState, ListView, Resource, RowView, StatusBadge};
