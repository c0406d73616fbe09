//! Model descriptors consumed by Query
//!
//! Includes the SchemaSource capability and the Model implementation of it.

use serde::{Deserialize, Serialize};

use crate::types::ColumnDefinition;

/// Anything that can tell a query which table it targets and how its columns are selected
pub trait SchemaSource {
    /// Database table the statements operate on
    fn table_name(&self) -> &str;

    /// Select fragments for every column, typically `table.column AS alias`
    fn aliased_columns(&self) -> Vec<String>;
}

impl<T: SchemaSource + ?Sized> SchemaSource for &T {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    fn aliased_columns(&self) -> Vec<String> {
        (**self).aliased_columns()
    }
}

/// A table together with its column definitions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    /// Human-readable name of the model
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Database table name
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Column definitions for the table
    pub columns: Vec<ColumnDefinition>,
}

impl Model {
    /// Create a new Model with the given parameters
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            table_name: table_name.into(),
            columns,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Find a column by its name or alias
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|c| c.name == name || c.alias.as_deref() == Some(name))
    }
}

impl SchemaSource for Model {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn aliased_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.to_fragment(&self.table_name))
            .collect()
    }
}
