//! # Registry Client
//!
//! Networked half of the resident registry client: the authenticated request
//! client, session and auth flows, the generic resource controller, the
//! statistics join, transient notices and the [`AdminConsole`] that wires
//! them together.

pub mod auth;
pub mod console;
pub mod controller;
pub mod notice;
pub mod request;
pub mod session;
pub mod statistics;

pub use auth::AuthService;
pub use console::{AdminConsole, PickerOption, RefreshReport};
pub use controller::{ResourceController, SelfService};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use request::RequestClient;
pub use reqwest::Method;
pub use session::{FileTokenStorage, MemoryTokenStorage, SessionStore};
pub use statistics::StatisticsLoader;
