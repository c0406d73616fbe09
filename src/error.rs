//! Error types for statement assembly

use thiserror::Error;

use crate::sql::section::{Section, StatementType};

/// Errors that can occur while finalizing a statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("\"{0}\" missing in query")]
    MissingRequiredSection(Section),

    #[error("\"{0}\" cannot be in query")]
    ForbiddenSectionPresent(Section),

    #[error("\"{section}\" is not used by {statement} statements")]
    UnusedSection {
        section: Section,
        statement: StatementType,
    },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("No statement started: call select, update, insert, delete or raw first")]
    NoStatement,
}

impl QueryError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// The section this error refers to, if any
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::MissingRequiredSection(section)
            | Self::ForbiddenSectionPresent(section)
            | Self::UnusedSection { section, .. } => Some(*section),
            Self::InvalidIdentifier(_) | Self::NoStatement => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
