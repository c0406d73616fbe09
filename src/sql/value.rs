//! Value handling for statements
//!
//! Two paths exist: inline literals that are written into the SQL text (used by
//! where clauses), and bound values that are handed to the driver next to the
//! `?` placeholders (used by `set_values`).

use serde_json::Value;

/// Unquoted literal that always means SQL NULL
pub const NULL_SENTINEL: &str = "NULL";

/// Wrap `text` in `quote`, doubling any occurrence of `quote` inside it
///
/// # Example
/// ```
/// use runtara_query::sql::quote_literal;
///
/// assert_eq!(quote_literal("it's", '\''), "'it''s'");
/// assert_eq!(quote_literal("say \"hi\"", '"'), "\"say \"\"hi\"\"\"");
/// ```
pub fn quote_literal(text: &str, quote: char) -> String {
    let doubled: String = [quote, quote].iter().collect();
    let escaped = text.replace(quote, &doubled);
    format!("{}{}{}", quote, escaped, quote)
}

/// Render a value as an inline SQL literal
///
/// - `null` gives `None`; the caller decides how to express it
/// - objects and arrays are JSON encoded and single-quoted
/// - numbers are emitted as-is
/// - booleans become `TRUE` / `FALSE`
/// - the string `"NULL"` is emitted unquoted
/// - any other string is trimmed and double-quoted
pub fn parse_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(quote_literal(&value.to_string(), '\'')),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("TRUE".to_string()),
        Value::Bool(false) => Some("FALSE".to_string()),
        Value::String(s) if s == NULL_SENTINEL => Some(NULL_SENTINEL.to_string()),
        Value::String(s) => Some(quote_literal(s.trim(), '"')),
    }
}

/// Render several values as a parenthesized literal list, e.g. `(1, "a", NULL)`
pub fn parse_values(values: &[Value]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| parse_value(v).unwrap_or_else(|| NULL_SENTINEL.to_string()))
        .collect();
    format!("({})", parts.join(", "))
}

/// Prepare a value for parameter binding
///
/// Structured values are serialized to JSON text so the driver receives a string
/// rather than a nested structure. Scalars pass through untouched.
pub fn to_bound_value(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        other => other,
    }
}

/// Render a value for a single-quoted `IN (...)` list, expanding arrays element-wise
pub(crate) fn quoted_list(value: &Value) -> String {
    fn quote_one(value: &Value) -> String {
        match value {
            Value::Null => NULL_SENTINEL.to_string(),
            Value::String(s) => quote_literal(s, '\''),
            other => quote_literal(&other.to_string(), '\''),
        }
    }

    match value {
        Value::Array(items) => items.iter().map(quote_one).collect::<Vec<_>>().join(", "),
        other => quote_one(other),
    }
}
