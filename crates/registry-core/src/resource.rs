//! Resource binding and list view-models.
//!
//! A [`Resource`] ties a DTO to its endpoint, its form fields and a pure row
//! renderer. [`ListView`] is what a table shows for a loaded list.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{de::DeserializeOwned, Serialize};

use crate::dates::{format_date, format_optional_date};
use crate::domain::{Feedback, Household, Person, TemporaryAbsence, TemporaryRecord, TemporaryResidence};
use crate::form::FieldSpec;

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Collection path with trailing slash, e.g. `/api/households/`.
    const BASE_PATH: &'static str;
    /// Vietnamese noun used in notices and prompts.
    const NOUN: &'static str;
    const ICON: &'static str;
    const COLUMNS: &'static [&'static str];
    const FIELDS: &'static [FieldSpec];
    /// Whether the API exposes GET/PUT on single items.
    const EDITABLE: bool;

    fn id(&self) -> &str;

    fn render_row(&self) -> RowView;

    /// The id is encoded as a single path segment.
    fn item_path(id: &str) -> String {
        format!("{}{}", Self::BASE_PATH, utf8_percent_encode(id, PATH_SEGMENT))
    }

    fn empty_state() -> EmptyState {
        EmptyState {
            icon: Self::ICON,
            title: format!("Chưa có {} nào", Self::NOUN),
            hint: format!("Hãy thêm {} đầu tiên", Self::NOUN),
            colspan: Self::COLUMNS.len() + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    /// One entry per column, status label included.
    pub cells: Vec<String>,
    pub badge: Option<StatusBadge>,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl RowView {
    fn matches(&self, needle: &str) -> bool {
        self.cells.iter().any(|c| c.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: &'static str,
    pub title: String,
    pub hint: String,
    pub colspan: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty(EmptyState),
    Rows(Vec<RowView>),
}

impl ListView {
    pub fn render<R: Resource>(items: &[R]) -> Self {
        if items.is_empty() {
            ListView::Empty(R::empty_state())
        } else {
            ListView::Rows(items.iter().map(Resource::render_row).collect())
        }
    }

    pub fn rows(&self) -> &[RowView] {
        match self {
            ListView::Empty(_) => &[],
            ListView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty(_))
    }

    /// Rows whose text contains `term`, ignoring case. Blank term keeps all rows.
    pub fn filter(&self, term: &str) -> Vec<&RowView> {
        let needle = term.trim().to_lowercase();
        self.rows()
            .iter()
            .filter(|row| needle.is_empty() || row.matches(&needle))
            .collect()
    }
}

impl Resource for Household {
    const BASE_PATH: &'static str = "/api/households/";
    const NOUN: &'static str = "hộ khẩu";
    const ICON: &'static str = "fa-home";
    const COLUMNS: &'static [&'static str] = &["Số hộ khẩu", "Địa chỉ", "Số thành viên", "Ngày tạo"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("household_number", "household_number"),
        FieldSpec::required("address", "address"),
    ];
    const EDITABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn render_row(&self) -> RowView {
        RowView {
            id: self.id.clone(),
            cells: vec![
                self.household_number.clone(),
                self.address.clone(),
                self.member_count().to_string(),
                format_optional_date(self.created_at.as_deref()),
            ],
            badge: None,
            can_edit: true,
            can_delete: true,
        }
    }
}

impl Resource for Person {
    const BASE_PATH: &'static str = "/api/persons/";
    const NOUN: &'static str = "nhân khẩu";
    const ICON: &'static str = "fa-user";
    const COLUMNS: &'static [&'static str] =
        &["Họ tên", "Ngày sinh", "Giới tính", "CMND/CCCD", "Quan hệ", "Nghề nghiệp"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "name"),
        FieldSpec::required("birth_date", "birth_date"),
        FieldSpec::required("gender", "gender"),
        FieldSpec::required("id_number", "id_number"),
        FieldSpec::required("relationship", "relationship"),
        FieldSpec::required("occupation", "occupation"),
        FieldSpec::required("address", "address"),
        FieldSpec::optional("phone", "phone"),
    ];
    const EDITABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn render_row(&self) -> RowView {
        RowView {
            id: self.id.clone(),
            cells: vec![
                self.name.clone(),
                format_date(&self.birth_date),
                self.gender.label().to_string(),
                self.id_number.clone(),
                self.relationship.label().to_string(),
                self.occupation.clone(),
            ],
            badge: None,
            can_edit: true,
            can_delete: true,
        }
    }
}

const TEMPORARY_COLUMNS: &[&str] =
    &["Nhân khẩu", "Số hộ khẩu", "Từ ngày", "Đến ngày", "Lý do", "Trạng thái"];

const TEMPORARY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("person_id", "person_id"),
    FieldSpec::required("start_date", "start_date"),
    FieldSpec::required("end_date", "end_date"),
    FieldSpec::required("reason", "reason"),
];

fn render_temporary(record: &TemporaryRecord) -> RowView {
    RowView {
        id: record.id.clone(),
        cells: vec![
            record.person_name.clone(),
            record.household_number.clone(),
            format_date(&record.start_date),
            format_date(&record.end_date),
            record.reason.clone(),
            record.status.label().to_string(),
        ],
        badge: Some(StatusBadge {
            code: record.status.as_str().to_string(),
            label: record.status.label().to_string(),
        }),
        can_edit: false,
        can_delete: true,
    }
}

impl Resource for TemporaryAbsence {
    const BASE_PATH: &'static str = "/api/temporary-absences/";
    const NOUN: &'static str = "tạm vắng";
    const ICON: &'static str = "fa-user-minus";
    const COLUMNS: &'static [&'static str] = TEMPORARY_COLUMNS;
    const FIELDS: &'static [FieldSpec] = TEMPORARY_FIELDS;
    const EDITABLE: bool = false;

    fn id(&self) -> &str {
        &self.0.id
    }

    fn render_row(&self) -> RowView {
        render_temporary(&self.0)
    }
}

impl Resource for TemporaryResidence {
    const BASE_PATH: &'static str = "/api/temporary-residences/";
    const NOUN: &'static str = "tạm trú";
    const ICON: &'static str = "fa-user-plus";
    const COLUMNS: &'static [&'static str] = TEMPORARY_COLUMNS;
    const FIELDS: &'static [FieldSpec] = TEMPORARY_FIELDS;
    const EDITABLE: bool = false;

    fn id(&self) -> &str {
        &self.0.id
    }

    fn render_row(&self) -> RowView {
        render_temporary(&self.0)
    }
}

pub const NO_RESPONSE: &str = "Chưa có";

impl Resource for Feedback {
    const BASE_PATH: &'static str = "/api/feedbacks/";
    const NOUN: &'static str = "phản ánh/kiến nghị";
    const ICON: &'static str = "fa-comments";
    const COLUMNS: &'static [&'static str] =
        &["Người phản ánh", "Nội dung", "Ngày", "Loại", "Trạng thái", "Phản hồi"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("person_name", "person_name"),
        FieldSpec::required("content", "content"),
        FieldSpec::required("date", "date"),
        FieldSpec::required("category", "category"),
        FieldSpec::optional("response", "response"),
    ];
    const EDITABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn render_row(&self) -> RowView {
        let response = if self.has_response() {
            self.response.clone().unwrap_or_default()
        } else {
            NO_RESPONSE.to_string()
        };
        RowView {
            id: self.id.clone(),
            cells: vec![
                self.person_name.clone(),
                self.content.clone(),
                format_date(&self.date),
                self.category.label().to_string(),
                self.status.label().to_string(),
                response,
            ],
            badge: Some(StatusBadge {
                code: self.status.as_str().to_string(),
                label: self.status.label().to_string(),
            }),
            can_edit: true,
            can_delete: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{FeedbackCategory, FeedbackStatus, Gender, RecordStatus, Relationship};

    fn household(id: &str, number: &str) -> Household {
        Household {
            id: id.to_string(),
            household_number: number.to_string(),
            address: "123 Main St".to_string(),
            members: vec![serde_json::json!({}), serde_json::json!({})],
            created_at: Some("2024-01-05T08:00:00".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let view = ListView::render::<Household>(&[]);
        match view {
            ListView::Empty(state) => {
                assert_eq!(state.title, "Chưa có hộ khẩu nào");
                assert_eq!(state.hint, "Hãy thêm hộ khẩu đầu tiên");
                assert_eq!(state.colspan, 5);
                assert_eq!(state.icon, "fa-home");
            }
            ListView::Rows(_) => panic!("empty list must render the placeholder"),
        }
    }

    #[test]
    fn test_household_row_cells() {
        let view = ListView::render(&[household("h1", "HK001")]);
        let row = &view.rows()[0];
        assert_eq!(row.id, "h1");
        assert_eq!(row.cells, vec!["HK001", "123 Main St", "2", "5/1/2024"]);
        assert!(row.can_edit && row.can_delete);
    }

    #[test]
    fn test_person_row_uses_labels() {
        let person = Person {
            id: "p1".to_string(),
            name: "Lê Văn C".to_string(),
            birth_date: "2001-09-02".to_string(),
            gender: Gender::Nu,
            id_number: "0790".to_string(),
            relationship: Relationship::Con,
            occupation: "Sinh viên".to_string(),
            address: "Hà Nội".to_string(),
            phone: None,
            created_at: None,
        };
        let row = person.render_row();
        assert_eq!(row.cells[1], "2/9/2001");
        assert_eq!(row.cells[2], "Nữ");
        assert_eq!(row.cells[4], "Con");
    }

    #[test]
    fn test_temporary_rows_are_delete_only() {
        let absence = TemporaryAbsence(TemporaryRecord {
            id: "a1".to_string(),
            person_id: "p1".to_string(),
            person_name: "An".to_string(),
            household_id: None,
            household_number: "HK001".to_string(),
            start_date: "2024-02-01".to_string(),
            end_date: "2024-03-01".to_string(),
            reason: "Du lịch".to_string(),
            status: RecordStatus::Expired,
            created_at: None,
        });
        let row = absence.render_row();
        assert!(!row.can_edit);
        assert_eq!(row.badge.unwrap().label, "Hết hạn");
        assert_eq!(TemporaryAbsence::item_path("a1"), "/api/temporary-absences/a1");
    }

    #[test]
    fn test_item_path_keeps_id_in_one_segment() {
        assert_eq!(Household::item_path("65f0a1-b_c.d~e"), "/api/households/65f0a1-b_c.d~e");
        assert_eq!(Household::item_path("a/b"), "/api/households/a%2Fb");
        assert_eq!(Person::item_path("x?y#z"), "/api/persons/x%3Fy%23z");
    }

    #[test]
    fn test_feedback_without_response_shows_placeholder() {
        let feedback = Feedback {
            id: "f1".to_string(),
            user_id: None,
            person_name: "Bình".to_string(),
            content: "Đèn đường hỏng".to_string(),
            date: "2024-06-10".to_string(),
            category: FeedbackCategory::PhanAnh,
            status: FeedbackStatus::New,
            response: Some("".to_string()),
            response_date: None,
            created_at: None,
        };
        let row = feedback.render_row();
        assert_eq!(row.cells[3], "Phản ánh");
        assert_eq!(row.cells[4], "Mới");
        assert_eq!(row.cells[5], NO_RESPONSE);
        assert_eq!(row.badge.unwrap().code, "new");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let view = ListView::render(&[household("h1", "HK001"), household("h2", "HX900")]);

        assert_eq!(view.filter("hk0").len(), 1);
        assert_eq!(view.filter("MAIN st").len(), 2);
        assert_eq!(view.filter("").len(), 2);
        assert!(view.filter("zzz").is_empty());
    }
}
