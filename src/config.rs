//! Configuration for Query
//!
//! Provides a builder pattern for tuning how strictly statements are finalized.

use serde::Deserialize;

/// Configuration for statement finalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    /// Fail `create()` when a section was populated that the statement type never uses.
    /// When disabled, such sections are dropped with a warning.
    pub strict_sections: bool,
    /// Validate the table name and assigned column names as plain SQL identifiers
    pub validate_identifiers: bool,
}

impl QueryConfig {
    /// Create a new configuration builder
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::new()
    }
}

/// Builder for QueryConfig
#[derive(Debug, Default)]
pub struct QueryConfigBuilder {
    strict_sections: bool,
    validate_identifiers: bool,
}

impl QueryConfigBuilder {
    /// Create a new builder with everything relaxed
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict section checking (default: false)
    pub fn strict_sections(mut self, enabled: bool) -> Self {
        self.strict_sections = enabled;
        self
    }

    /// Enable or disable identifier validation (default: false)
    pub fn validate_identifiers(mut self, enabled: bool) -> Self {
        self.validate_identifiers = enabled;
        self
    }

    /// Enable every check
    pub fn strict(mut self) -> Self {
        self.strict_sections = true;
        self.validate_identifiers = true;
        self
    }

    /// Build the configuration
    pub fn build(self) -> QueryConfig {
        QueryConfig {
            strict_sections: self.strict_sections,
            validate_identifiers: self.validate_identifiers,
        }
    }
}
