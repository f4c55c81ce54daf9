//! Section and tab selection.
//!
//! Each call names its target explicitly; exactly one section and one
//! temporary-records tab are active at any time.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Households,
    Persons,
    Temporary,
    Feedbacks,
    Statistics,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Households,
        Section::Persons,
        Section::Temporary,
        Section::Feedbacks,
        Section::Statistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Households => "households",
            Section::Persons => "persons",
            Section::Temporary => "temporary",
            Section::Feedbacks => "feedbacks",
            Section::Statistics => "statistics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Households => "Quản lý hộ khẩu",
            Section::Persons => "Quản lý nhân khẩu",
            Section::Temporary => "Tạm vắng / Tạm trú",
            Section::Feedbacks => "Phản ánh / Kiến nghị",
            Section::Statistics => "Thống kê",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Absences,
    Residences,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Absences => "absences",
            Tab::Residences => "residences",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absences" => Ok(Tab::Absences),
            "residences" => Ok(Tab::Residences),
            _ => Err(format!("unknown tab: {}", s)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    section: Section,
    tab: Tab,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.section == section
    }

    pub fn show_section(&mut self, section: Section) {
        self.section = section;
    }

    /// Only affects the temporary-records section.
    pub fn show_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }
}
