//! Coded enum values and their display labels.
//!
//! The server stores these as short ASCII codes. Unknown codes are kept in an
//! `Other` variant so a record survives a load/edit/save cycle unchanged, and
//! their label falls back to the raw code.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Other(code) => code.as_str(),
                }
            }

            pub fn from_code(code: &str) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(code) => code.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self::from_code(&code)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

coded_enum! {
    Gender {
        Nam => ("nam", "Nam"),
        Nu => ("nu", "Nữ"),
    }
}

coded_enum! {
    /// Relationship of a person to the head of household.
    Relationship {
        ChuHo => ("chu_ho", "Chủ hộ"),
        Vo => ("vo", "Vợ"),
        Chong => ("chong", "Chồng"),
        Con => ("con", "Con"),
        Cha => ("cha", "Cha"),
        Me => ("me", "Mẹ"),
        AnhEm => ("anh_em", "Anh/Em"),
        Khac => ("khac", "Khác"),
    }
}

coded_enum! {
    FeedbackCategory {
        PhanAnh => ("phan_anh", "Phản ánh"),
        KienNghi => ("kien_nghi", "Kiến nghị"),
        Khac => ("khac", "Khác"),
    }
}

coded_enum! {
    FeedbackStatus {
        New => ("new", "Mới"),
        Processing => ("processing", "Đang xử lý"),
        Resolved => ("resolved", "Đã giải quyết"),
        Rejected => ("rejected", "Đã từ chối"),
    }
}

coded_enum! {
    /// Lifecycle of a temporary absence or residence record.
    RecordStatus {
        Active => ("active", "Hoạt động"),
        Expired => ("expired", "Hết hạn"),
    }
}

pub fn gender_label(code: &str) -> String {
    Gender::from_code(code).label().to_string()
}

pub fn relationship_label(code: &str) -> String {
    Relationship::from_code(code).label().to_string()
}

pub fn category_label(code: &str) -> String {
    FeedbackCategory::from_code(code).label().to_string()
}

/// One table covers feedback and absence/residence statuses.
pub fn status_label(code: &str) -> String {
    let feedback = FeedbackStatus::from_code(code);
    if feedback.is_known() {
        return feedback.label().to_string();
    }
    RecordStatus::from_code(code).label().to_string()
}
