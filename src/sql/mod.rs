//! SQL utilities for Query
//!
//! Provides the statement/section policy, placeholder templates, literal
//! rendering, and identifier validation.

pub mod sanitize;
pub mod section;
pub mod template;
pub mod value;

pub use sanitize::{RESERVED_WORDS, validate_identifier};
pub use section::{Section, StatementType};
pub use template::{fill_placeholders, placeholder};
pub use value::{NULL_SENTINEL, parse_value, parse_values, quote_literal, to_bound_value};
