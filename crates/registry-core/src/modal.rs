//! ============================================================================
//! MODAL SHELL - Modal & edit-context state machine
//! ============================================================================
//!
//! States: `Closed`, `OpenForCreate`, `OpenForEdit(id)`.
//!
//! - Every open and every close resets the edit context and the form, so an
//!   update can never target an id left over from a previous modal.
//! - A submit reads the edit context when it starts ([`SubmitTicket`]), not
//!   when the modal was opened.
//! - A close while a submit is in flight does not cancel it. When the submit
//!   completes, [`ModalShell::finish_submit`] only closes the modal if it is
//!   still the opening the ticket was taken from.

use crate::domain::{Feedback, Household, Person, TemporaryAbsence, TemporaryResidence};
use crate::form::{FieldSpec, FormValues};
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Household,
    Person,
    Absence,
    Residence,
    Feedback,
    Login,
    Register,
}

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("username", "username"),
    FieldSpec::required("password", "password"),
];

const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("username", "username"),
    FieldSpec::required("password", "password"),
    FieldSpec::optional("full_name", "full_name"),
];

impl ModalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::Household => "householdModal",
            ModalKind::Person => "personModal",
            ModalKind::Absence => "absenceModal",
            ModalKind::Residence => "residenceModal",
            ModalKind::Feedback => "feedbackModal",
            ModalKind::Login => "loginModal",
            ModalKind::Register => "registerModal",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            ModalKind::Household => Household::FIELDS,
            ModalKind::Person => Person::FIELDS,
            ModalKind::Absence => TemporaryAbsence::FIELDS,
            ModalKind::Residence => TemporaryResidence::FIELDS,
            ModalKind::Feedback => Feedback::FIELDS,
            ModalKind::Login => LOGIN_FIELDS,
            ModalKind::Register => REGISTER_FIELDS,
        }
    }

    /// Absence/residence forms pick a person from a dropdown.
    pub fn needs_person_picker(&self) -> bool {
        matches!(self, ModalKind::Absence | ModalKind::Residence)
    }

    pub fn is_editable(&self) -> bool {
        match self {
            ModalKind::Household => Household::EDITABLE,
            ModalKind::Person => Person::EDITABLE,
            ModalKind::Absence => TemporaryAbsence::EDITABLE,
            ModalKind::Residence => TemporaryResidence::EDITABLE,
            ModalKind::Feedback => Feedback::EDITABLE,
            ModalKind::Login | ModalKind::Register => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(String),
}

/// Where a click landed while a modal was showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Surface,
}

/// Snapshot of what a submit acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub kind: ModalKind,
    pub edit_id: Option<String>,
    pub form: FormValues,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ModalShell {
    kind: Option<ModalKind>,
    state: ModalState,
    form: FormValues,
    generation: u64,
}

impl ModalShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.kind
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.kind.is_some()
    }

    /// The single edit-context slot.
    pub fn edit_id(&self) -> Option<&str> {
        match &self.state {
            ModalState::OpenForEdit(id) => Some(id),
            _ => None,
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn open_create(&mut self, kind: ModalKind) {
        self.transition(Some(kind), ModalState::OpenForCreate, FormValues::new());
    }

    /// `form` comes from the fetched DTO; the fetch happens before this call.
    pub fn open_edit(&mut self, kind: ModalKind, id: impl Into<String>, form: FormValues) {
        self.transition(Some(kind), ModalState::OpenForEdit(id.into()), form);
    }

    pub fn close(&mut self) {
        self.transition(None, ModalState::Closed, FormValues::new());
    }

    /// Returns true when the click dismissed the modal.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if self.is_open() && target == ClickTarget::Backdrop {
            self.close();
            return true;
        }
        false
    }

    /// Ignored while closed.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !self.is_open() {
            return false;
        }
        self.form.set(field, value);
        true
    }

    pub fn submit_ticket(&self) -> Option<SubmitTicket> {
        let kind = self.kind?;
        Some(SubmitTicket {
            kind,
            edit_id: self.edit_id().map(str::to_string),
            form: self.form.clone(),
            generation: self.generation,
        })
    }

    /// Close after a successful submit, unless the modal moved on meanwhile.
    pub fn finish_submit(&mut self, ticket: &SubmitTicket) -> bool {
        if self.generation != ticket.generation {
            return false;
        }
        self.close();
        true
    }

    fn transition(&mut self, kind: Option<ModalKind>, state: ModalState, form: FormValues) {
        self.kind = kind;
        self.state = state;
        self.form = form;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_create_clears_stale_edit_context() {
        let mut shell = ModalShell::new();
        shell.open_edit(
            ModalKind::Household,
            "h1",
            FormValues::new().with("household_number", "HK001"),
        );
        assert_eq!(shell.edit_id(), Some("h1"));

        shell.open_create(ModalKind::Household);
        assert_eq!(shell.state(), &ModalState::OpenForCreate);
        assert!(shell.edit_id().is_none());
        assert!(shell.form().is_empty());
    }

    #[test]
    fn test_every_close_path_resets_edit_context() {
        let mut shell = ModalShell::new();

        shell.open_edit(ModalKind::Person, "p1", FormValues::new());
        shell.close();
        assert_eq!(shell.state(), &ModalState::Closed);
        assert!(shell.edit_id().is_none());

        shell.open_edit(ModalKind::Person, "p1", FormValues::new());
        assert!(!shell.click(ClickTarget::Surface));
        assert_eq!(shell.edit_id(), Some("p1"));
        assert!(shell.click(ClickTarget::Backdrop));
        assert!(shell.edit_id().is_none());
        assert!(!shell.is_open());
    }

    #[test]
    fn test_ticket_reads_context_at_submit_time() {
        let mut shell = ModalShell::new();
        shell.open_create(ModalKind::Feedback);
        shell.set_field("content", "Ồn ào");

        let ticket = shell.submit_ticket().unwrap();
        assert_eq!(ticket.kind, ModalKind::Feedback);
        assert!(ticket.edit_id.is_none());
        assert_eq!(ticket.form.value("content"), "Ồn ào");

        assert!(shell.finish_submit(&ticket));
        assert!(!shell.is_open());
    }

    #[test]
    fn test_finish_submit_does_not_clobber_newer_modal() {
        let mut shell = ModalShell::new();
        shell.open_edit(ModalKind::Household, "h1", FormValues::new());
        let ticket = shell.submit_ticket().unwrap();

        // user dismisses and opens another form while the request is in flight
        shell.close();
        shell.open_create(ModalKind::Person);

        assert!(!shell.finish_submit(&ticket));
        assert_eq!(shell.kind(), Some(ModalKind::Person));
        assert_eq!(shell.state(), &ModalState::OpenForCreate);
    }

    #[test]
    fn test_closed_shell_has_no_ticket_and_ignores_input() {
        let mut shell = ModalShell::new();
        assert!(shell.submit_ticket().is_none());
        assert!(!shell.set_field("address", "x"));
        assert!(!shell.click(ClickTarget::Backdrop));
    }

    #[test]
    fn test_person_picker_kinds() {
        assert!(ModalKind::Absence.needs_person_picker());
        assert!(ModalKind::Residence.needs_person_picker());
        assert!(!ModalKind::Feedback.needs_person_picker());
        assert!(!ModalKind::Absence.is_editable());
        assert!(ModalKind::Feedback.is_editable());
    }
}
