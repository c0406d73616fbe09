//! Statement types, sections and the policy that ties them together
//!
//! Each statement type decides which sections are appended after its skeleton,
//! which must be present, which must be absent, and which it consumes at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sql::template::placeholder;

/// Kind of statement a query produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    Select,
    Update,
    Insert,
    Delete,
    Raw,
}

/// A named fragment of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Columns,
    Escaped,
    Values,
    Where,
    OrderBy,
    Limit,
}

impl Section {
    /// Every section, in the order they are appended to a statement
    pub const ALL: [Section; 6] = [
        Section::Columns,
        Section::Escaped,
        Section::Values,
        Section::Where,
        Section::OrderBy,
        Section::Limit,
    ];

    /// Name used in error messages and `{{name}}` placeholders
    pub fn name(&self) -> &'static str {
        match self {
            Section::Columns => "columns",
            Section::Escaped => "escaped",
            Section::Values => "values",
            Section::Where => "where",
            Section::OrderBy => "orderBy",
            Section::Limit => "limit",
        }
    }

    pub fn from_name(name: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_name(s).ok_or_else(|| format!("Unknown section: '{}'", s))
    }
}

impl StatementType {
    pub fn name(&self) -> &'static str {
        match self {
            StatementType::Select => "select",
            StatementType::Update => "update",
            StatementType::Insert => "insert",
            StatementType::Delete => "delete",
            StatementType::Raw => "raw",
        }
    }

    /// Sections appended after the skeleton, in declared order
    pub fn permitted_sections(&self) -> &'static [Section] {
        match self {
            StatementType::Select => &[Section::Where, Section::OrderBy, Section::Limit],
            StatementType::Update => &[Section::Escaped, Section::Where],
            StatementType::Insert => &[Section::Columns, Section::Escaped, Section::Where],
            StatementType::Delete => &[Section::Where],
            StatementType::Raw => &[],
        }
    }

    /// Sections that must be non-empty for the statement to be valid
    pub fn required_sections(&self) -> &'static [Section] {
        match self {
            StatementType::Update | StatementType::Insert => &[Section::Values],
            StatementType::Delete => &[Section::Where],
            StatementType::Select | StatementType::Raw => &[],
        }
    }

    /// Sections that must be empty for the statement to be valid
    pub fn forbidden_sections(&self) -> &'static [Section] {
        match self {
            StatementType::Select => &[Section::Values],
            StatementType::Delete => &[Section::Columns, Section::Values],
            StatementType::Update | StatementType::Insert | StatementType::Raw => &[],
        }
    }

    /// Whether the statement consumes this section at all, either by appending it,
    /// filling a placeholder with it, or binding it
    pub fn accepts(&self, section: Section) -> bool {
        match self {
            StatementType::Select => matches!(
                section,
                Section::Columns | Section::Where | Section::OrderBy | Section::Limit
            ),
            StatementType::Update | StatementType::Insert => matches!(
                section,
                Section::Columns | Section::Escaped | Section::Values | Section::Where
            ),
            StatementType::Delete => section == Section::Where,
            StatementType::Raw => false,
        }
    }

    /// Initial template for the statement; raw statements use the caller's text instead
    pub fn skeleton(&self, table: &str) -> String {
        match self {
            StatementType::Select => {
                format!("SELECT {} FROM {}", placeholder(Section::Columns), table)
            }
            StatementType::Update => format!("UPDATE {} SET", table),
            StatementType::Insert => format!("INSERT INTO {}", table),
            StatementType::Delete => format!("DELETE FROM {}", table),
            StatementType::Raw => String::new(),
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Section Tests
    // =========================================================================

    #[test]
    fn test_section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_name(section.name()), Some(section));
        }
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("orderBy".parse::<Section>(), Ok(Section::OrderBy));
        assert!("order_by".parse::<Section>().is_err());
        assert!("WHERE".parse::<Section>().is_err());
    }

    #[test]
    fn test_section_declared_order() {
        let names: Vec<_> = Section::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["columns", "escaped", "values", "where", "orderBy", "limit"]
        );
    }

    #[test]
    fn test_section_serialization() {
        assert_eq!(
            serde_json::to_string(&Section::OrderBy).unwrap(),
            "\"orderBy\""
        );
    }

    // =========================================================================
    // Policy Tests
    // =========================================================================

    #[test]
    fn test_raw_permits_nothing() {
        assert!(StatementType::Raw.permitted_sections().is_empty());
        assert!(Section::ALL.iter().all(|s| !StatementType::Raw.accepts(*s)));
    }

    #[test]
    fn test_limit_only_permitted_for_select() {
        for statement in [
            StatementType::Update,
            StatementType::Insert,
            StatementType::Delete,
            StatementType::Raw,
        ] {
            assert!(!statement.permitted_sections().contains(&Section::Limit));
        }
        assert!(
            StatementType::Select
                .permitted_sections()
                .contains(&Section::Limit)
        );
    }

    #[test]
    fn test_required_and_forbidden() {
        assert_eq!(StatementType::Insert.required_sections(), &[Section::Values]);
        assert_eq!(StatementType::Update.required_sections(), &[Section::Values]);
        assert_eq!(StatementType::Delete.required_sections(), &[Section::Where]);
        assert_eq!(StatementType::Select.forbidden_sections(), &[Section::Values]);
        assert_eq!(
            StatementType::Delete.forbidden_sections(),
            &[Section::Columns, Section::Values]
        );
    }

    #[test]
    fn test_permitted_sections_are_accepted() {
        for statement in [
            StatementType::Select,
            StatementType::Update,
            StatementType::Insert,
            StatementType::Delete,
        ] {
            for section in statement.permitted_sections() {
                assert!(statement.accepts(*section), "{} {}", statement, section);
            }
        }
    }

    #[test]
    fn test_skeletons() {
        assert_eq!(
            StatementType::Select.skeleton("users"),
            "SELECT {{columns}} FROM users"
        );
        assert_eq!(StatementType::Update.skeleton("users"), "UPDATE users SET");
        assert_eq!(StatementType::Insert.skeleton("users"), "INSERT INTO users");
        assert_eq!(StatementType::Delete.skeleton("users"), "DELETE FROM users");
        assert_eq!(StatementType::Raw.skeleton("users"), "");
    }
}
