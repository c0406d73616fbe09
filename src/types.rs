//! Core type definitions for models
//!
//! Includes column definitions and how they render as select fragments.

use serde::{Deserialize, Serialize};

/// Column definition for a model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name as stored in the table
    pub name: String,

    /// Name the column is exposed under in select results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ColumnDefinition {
    /// Create a new column definition without an alias
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Set an alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Render as a table-qualified select fragment, e.g. `users.first_name AS firstName`
    pub fn to_fragment(&self, table: &str) -> String {
        match &self.alias {
            Some(alias) if alias != &self.name => {
                format!("{}.{} AS {}", table, self.name, alias)
            }
            _ => format!("{}.{}", table, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_without_alias() {
        let column = ColumnDefinition::new("email");
        assert_eq!(column.to_fragment("users"), "users.email");
    }

    #[test]
    fn test_fragment_with_alias() {
        let column = ColumnDefinition::new("first_name").alias("firstName");
        assert_eq!(column.to_fragment("users"), "users.first_name AS firstName");
    }

    #[test]
    fn test_fragment_alias_same_as_name() {
        let column = ColumnDefinition::new("id").alias("id");
        assert_eq!(column.to_fragment("users"), "users.id");
    }

    #[test]
    fn test_column_deserialization() {
        let column: ColumnDefinition =
            serde_json::from_str(r#"{"name": "created_at", "alias": "createdAt"}"#).unwrap();
        assert_eq!(column, ColumnDefinition::new("created_at").alias("createdAt"));

        let column: ColumnDefinition = serde_json::from_str(r#"{"name": "id"}"#).unwrap();
        assert!(column.alias.is_none());
    }

    #[test]
    fn test_column_serialization_skips_missing_alias() {
        let json = serde_json::to_string(&ColumnDefinition::new("id")).unwrap();
        assert_eq!(json, r#"{"name":"id"}"#);
    }
}
