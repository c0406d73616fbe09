//! Placeholder resolution for statement skeletons
//!
//! Skeletons reference sections through `{{name}}` tokens. Tokens that do not
//! name a section are left untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::sql::section::Section;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z]+)\}\}").unwrap());

/// Build the `{{name}}` token for a section
pub fn placeholder(section: Section) -> String {
    format!("{{{{{}}}}}", section.name())
}

/// Replace every section placeholder in `template` with the text `render` gives for it
///
/// Replacement text is inserted as-is and never re-scanned.
pub fn fill_placeholders<F>(template: &str, mut render: F) -> String
where
    F: FnMut(Section) -> String,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match Section::from_name(&caps[1]) {
                Some(section) => render(section),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token() {
        assert_eq!(placeholder(Section::Columns), "{{columns}}");
        assert_eq!(placeholder(Section::OrderBy), "{{orderBy}}");
    }

    #[test]
    fn test_fill_known_placeholders() {
        let filled = fill_placeholders("SELECT {{columns}} FROM t", |section| {
            assert_eq!(section, Section::Columns);
            "t.a, t.b".to_string()
        });
        assert_eq!(filled, "SELECT t.a, t.b FROM t");
    }

    #[test]
    fn test_bare_section_names_untouched() {
        let filled = fill_placeholders("SELECT columns, limit FROM t", |_| "X".to_string());
        assert_eq!(filled, "SELECT columns, limit FROM t");
    }

    #[test]
    fn test_unknown_placeholder_untouched() {
        let filled = fill_placeholders("a {{nope}} b", |_| "X".to_string());
        assert_eq!(filled, "a {{nope}} b");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let filled = fill_placeholders("{{columns}}", |_| "{{where}}".to_string());
        assert_eq!(filled, "{{where}}");
    }
}
