//! ============================================================================
//! ADMIN CONSOLE - Injected view-shell state
//! ============================================================================
//!
//! Owns the request client, session, notices, the five resource controllers,
//! statistics, the modal shell, navigation and the person picker. Every
//! method takes `&self`; locks are never held across an `.await`.

use parking_lot::{Mutex, RwLock};
use registry_core::{
    AuthView, ClickTarget, ClientError, ConfirmGate, Feedback, FormValues, Household, ModalKind,
    ModalShell, ModalState, Navigation, Person, RegisterProfile, Section, Session, Tab,
    TemporaryAbsence, TemporaryResidence, TokenStorage,
};
use registry_shared::ClientConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::AuthService;
use crate::controller::{ResourceController, SelfService};
use crate::notice::{Notice, NoticeBoard};
use crate::request::RequestClient;
use crate::session::SessionStore;
use crate::statistics::StatisticsLoader;

pub const PERSON_PLACEHOLDER: &str = "Chọn nhân khẩu";

/// One `<option>` of the person dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

impl PickerOption {
    fn placeholder() -> Self {
        Self { value: String::new(), label: PERSON_PLACEHOLDER.to_string() }
    }
}

/// Loads that failed during a refresh. Each load fails on its own.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub failures: Vec<ClientError>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct AdminConsole {
    client: RequestClient,
    auth: AuthService,
    households: ResourceController<Household>,
    persons: ResourceController<Person>,
    absences: ResourceController<TemporaryAbsence>,
    residences: ResourceController<TemporaryResidence>,
    feedbacks: ResourceController<Feedback>,
    statistics: StatisticsLoader,
    self_service: SelfService,
    modal: Mutex<ModalShell>,
    navigation: Mutex<Navigation>,
    person_options: RwLock<Vec<PickerOption>>,
}

impl AdminConsole {
    pub fn new(client: RequestClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            households: ResourceController::new(client.clone()),
            persons: ResourceController::new(client.clone()),
            absences: ResourceController::new(client.clone()),
            residences: ResourceController::new(client.clone()),
            feedbacks: ResourceController::new(client.clone()),
            statistics: StatisticsLoader::new(client.clone()),
            self_service: SelfService::new(client.clone()),
            modal: Mutex::new(ModalShell::new()),
            navigation: Mutex::new(Navigation::new()),
            person_options: RwLock::new(vec![PickerOption::placeholder()]),
            client,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, ClientError> {
        let notices = NoticeBoard::new(config.notice_ttl());
        let client = RequestClient::from_config(config, SessionStore::new(storage), notices)?;
        Ok(Self::new(client))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Restore the session, then load every list regardless of the outcome.
    pub async fn start(&self) -> AuthView {
        let view = self.auth.restore().await;
        let report = self.refresh_all().await;
        info!(authenticated = !matches!(view, AuthView::Anonymous), failures = report.failures.len(), "Console started");
        view
    }

    pub async fn refresh_all(&self) -> RefreshReport {
        let (households, persons, absences, residences, feedbacks, statistics) = tokio::join!(
            self.households.list(),
            self.persons.list(),
            self.absences.list(),
            self.residences.list(),
            self.feedbacks.list(),
            self.statistics.load(),
        );

        let failures: Vec<ClientError> = [
            households.err(),
            persons.err(),
            absences.err(),
            residences.err(),
            feedbacks.err(),
            statistics.err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(failures = failures.len(), "Refresh finished");
        RefreshReport { failures }
    }

    // ------------------------------------------------------------------
    // Modal shell
    // ------------------------------------------------------------------

    pub async fn open_create(&self, kind: ModalKind) {
        self.modal.lock().open_create(kind);
        if kind.needs_person_picker() {
            self.refresh_person_picker().await;
        }
    }

    /// Fetch the item first; the modal opens only when the fetch succeeds.
    pub async fn open_edit(&self, kind: ModalKind, id: &str) -> Result<(), ClientError> {
        let form = match kind {
            ModalKind::Household => self.households.fetch_form(id).await?,
            ModalKind::Person => self.persons.fetch_form(id).await?,
            ModalKind::Absence => self.absences.fetch_form(id).await?,
            ModalKind::Residence => self.residences.fetch_form(id).await?,
            ModalKind::Feedback => self.feedbacks.fetch_form(id).await?,
            ModalKind::Login | ModalKind::Register => {
                return Err(ClientError::Unsupported {
                    operation: "edit",
                    path: kind.as_str().to_string(),
                })
            }
        };
        self.modal.lock().open_edit(kind, id, form);
        Ok(())
    }

    pub fn close_modal(&self) {
        self.modal.lock().close();
    }

    pub fn click(&self, target: ClickTarget) -> bool {
        self.modal.lock().click(target)
    }

    pub fn set_field(&self, field: &str, value: &str) -> Result<(), ClientError> {
        if self.modal.lock().set_field(field, value) {
            Ok(())
        } else {
            Err(ClientError::NoOpenForm)
        }
    }

    pub fn modal_kind(&self) -> Option<ModalKind> {
        self.modal.lock().kind()
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.lock().state().clone()
    }

    pub fn form(&self) -> FormValues {
        self.modal.lock().form().clone()
    }

    /// Dispatch on the open modal. The edit context is read now, not at open.
    ///
    /// On failure the modal stays open with its form and edit context.
    pub async fn submit(&self) -> Result<(), ClientError> {
        let ticket = self.modal.lock().submit_ticket().ok_or(ClientError::NoOpenForm)?;
        let form = &ticket.form;
        let edit_id = ticket.edit_id.as_deref();

        match ticket.kind {
            ModalKind::Household => {
                self.households.upsert(form, edit_id).await?;
            }
            ModalKind::Person => {
                self.persons.upsert(form, edit_id).await?;
            }
            ModalKind::Absence => {
                self.absences.upsert(form, edit_id).await?;
            }
            ModalKind::Residence => {
                self.residences.upsert(form, edit_id).await?;
            }
            ModalKind::Feedback => {
                self.feedbacks.upsert(form, edit_id).await?;
            }
            ModalKind::Login => {
                self.auth
                    .login(form.value("username"), form.value("password"))
                    .await?;
            }
            ModalKind::Register => {
                let profile = RegisterProfile::new(
                    form.value("username"),
                    form.value("password"),
                    form.get("full_name"),
                );
                self.auth.register(&profile).await?;
            }
        }

        let closed = self.modal.lock().finish_submit(&ticket);
        if !closed {
            debug!(modal = ticket.kind.as_str(), "Modal changed during submit, left as is");
        }

        match ticket.kind {
            ModalKind::Login => {
                self.refresh_all().await;
            }
            ModalKind::Register if closed => {
                self.open_create(ModalKind::Login).await;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn delete(
        &self,
        kind: ModalKind,
        id: &str,
        gate: &dyn ConfirmGate,
    ) -> Result<bool, ClientError> {
        match kind {
            ModalKind::Household => self.households.remove(id, gate).await,
            ModalKind::Person => self.persons.remove(id, gate).await,
            ModalKind::Absence => self.absences.remove(id, gate).await,
            ModalKind::Residence => self.residences.remove(id, gate).await,
            ModalKind::Feedback => self.feedbacks.remove(id, gate).await,
            ModalKind::Login | ModalKind::Register => Err(ClientError::Unsupported {
                operation: "delete",
                path: kind.as_str().to_string(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let session = self.auth.login(username, password).await?;
        self.refresh_all().await;
        Ok(session)
    }

    pub fn logout(&self) {
        self.auth.logout();
    }

    pub async fn register(&self, profile: &RegisterProfile) -> Result<(), ClientError> {
        self.auth.register(profile).await
    }

    pub fn auth_view(&self) -> AuthView {
        self.auth.view()
    }

    // ------------------------------------------------------------------
    // Navigation & notices
    // ------------------------------------------------------------------

    pub fn show_section(&self, section: Section) {
        self.navigation.lock().show_section(section);
    }

    pub fn show_tab(&self, tab: Tab) {
        self.navigation.lock().show_tab(tab);
    }

    pub fn navigation(&self) -> Navigation {
        *self.navigation.lock()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.client.notices().active()
    }

    pub fn dismiss_notice(&self, id: u64) -> bool {
        self.client.notices().dismiss(id)
    }

    // ------------------------------------------------------------------
    // Person picker
    // ------------------------------------------------------------------

    pub fn person_options(&self) -> Vec<PickerOption> {
        self.person_options.read().clone()
    }

    /// Rebuild from the server's person list; on failure the old options stay.
    pub async fn refresh_person_picker(&self) {
        match self.persons.fetch_all().await {
            Ok(persons) => {
                let mut options = Vec::with_capacity(persons.len() + 1);
                options.push(PickerOption::placeholder());
                options.extend(persons.into_iter().map(|person| PickerOption {
                    value: person.id,
                    label: person.name,
                }));
                *self.person_options.write() = options;
            }
            Err(e) => warn!(error = %e, "Person picker not refreshed"),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn households(&self) -> &ResourceController<Household> {
        &self.households
    }

    pub fn persons(&self) -> &ResourceController<Person> {
        &self.persons
    }

    pub fn absences(&self) -> &ResourceController<TemporaryAbsence> {
        &self.absences
    }

    pub fn residences(&self) -> &ResourceController<TemporaryResidence> {
        &self.residences
    }

    pub fn feedbacks(&self) -> &ResourceController<Feedback> {
        &self.feedbacks
    }

    pub fn statistics(&self) -> &StatisticsLoader {
        &self.statistics
    }

    pub fn self_service(&self) -> &SelfService {
        &self.self_service
    }
}
