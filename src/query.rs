//! Query - fluent statement builder
//!
//! A `Query` is started with one of `select`, `update`, `insert`, `delete` or
//! `raw`, collects sections through chained calls, and is finalized with
//! `create`, which validates the sections against the statement type and
//! assembles the SQL text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::schema::SchemaSource;
use crate::sql::sanitize::validate_identifier;
use crate::sql::section::{Section, StatementType};
use crate::sql::template::fill_placeholders;
use crate::sql::value::{parse_value, parse_values, quoted_list, to_bound_value};

/// Direction of an ORDER BY term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(format!(
                "Invalid sort order: '{}'. Must be 'asc' or 'desc'.",
                s
            )),
        }
    }
}

/// Result of finalizing a query
///
/// Serializes as a bare string, or as a `[sql, values]` pair when values are bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    /// SQL text with every value inlined
    Sql(String),
    /// SQL text with `?` placeholders and the values to bind, in placeholder order
    Parameterized(String, Vec<Value>),
}

impl Statement {
    pub fn sql(&self) -> &str {
        match self {
            Statement::Sql(sql) | Statement::Parameterized(sql, _) => sql,
        }
    }

    /// Bound values; empty for plain SQL
    pub fn values(&self) -> &[Value] {
        match self {
            Statement::Sql(_) => &[],
            Statement::Parameterized(_, values) => values,
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Statement::Parameterized(..))
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        match self {
            Statement::Sql(sql) => (sql, Vec::new()),
            Statement::Parameterized(sql, values) => (sql, values),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// Filter rows by ids reachable through a pivot table
///
/// Produces `<table1.>id IN (SELECT t1.<join_column> FROM <pivot> AS t1
/// LEFT JOIN <table2> AS t2 ON t2.id = t1.<column> WHERE t2.<filter_by> IN (<value>))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotFilter {
    /// Pivot (join) table
    pub pivot: String,
    /// Qualifier for the outer `id` column; unqualified when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table1: Option<String>,
    /// Related table the filter is applied to
    pub table2: String,
    /// Pivot column referencing `table2.id`
    pub column: String,
    /// Single value or array of values matched against `filter_by`
    pub value: Value,
    /// Pivot column returned by the subquery
    pub join_column: String,
    /// Column of `table2` compared with `value`
    pub filter_by: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Columns {
    #[default]
    Unset,
    /// Select list entries such as `users.name AS userName`
    Fragments(Vec<String>),
    /// Column names assigned by `set_values`
    Assigned(Vec<String>),
}

#[derive(Debug, Clone, Default)]
struct Sections {
    columns: Columns,
    escaped: Vec<String>,
    values: Vec<Value>,
    where_clauses: Vec<String>,
    order_by: Vec<String>,
    /// (count, offset)
    limit: Option<(u64, u64)>,
}

impl Sections {
    fn is_present(&self, section: Section) -> bool {
        match section {
            Section::Columns => match &self.columns {
                Columns::Unset => false,
                Columns::Fragments(names) | Columns::Assigned(names) => !names.is_empty(),
            },
            Section::Escaped => !self.escaped.is_empty(),
            Section::Values => !self.values.is_empty(),
            Section::Where => !self.where_clauses.is_empty(),
            Section::OrderBy => !self.order_by.is_empty(),
            Section::Limit => self.limit.is_some(),
        }
    }

    /// SQL text for a section. Values are bound, never rendered.
    fn render(&self, section: Section, statement: StatementType) -> Option<String> {
        if !self.is_present(section) {
            return None;
        }

        match section {
            Section::Columns => match &self.columns {
                Columns::Fragments(fragments) => Some(fragments.join(", ")),
                Columns::Assigned(names) => Some(format!("({})", names.join(", "))),
                Columns::Unset => None,
            },
            Section::Escaped => Some(match statement {
                StatementType::Insert => {
                    format!("VALUES ({})", vec!["?"; self.escaped.len()].join(", "))
                }
                _ => self
                    .escaped
                    .iter()
                    .map(|column| format!("{} = ?", column))
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
            Section::Values => None,
            Section::Where => Some(format!("WHERE {}", self.where_clauses.join(" AND "))),
            Section::OrderBy => Some(format!("ORDER BY {}", self.order_by.join(", "))),
            Section::Limit => self
                .limit
                .map(|(count, offset)| format!("LIMIT {}, {}", offset, count)),
        }
    }
}

/// Column name and alias of a select fragment like `users.first_name AS firstName`
fn fragment_names(fragment: &str) -> (&str, Option<&str>) {
    let (expr, alias) = match fragment
        .split_once(" AS ")
        .or_else(|| fragment.split_once(" as "))
    {
        Some((expr, alias)) => (expr.trim(), Some(alias.trim())),
        None => (fragment.trim(), None),
    };
    let column = expr.rsplit('.').next().unwrap_or(expr);
    (column, alias)
}

/// Fluent builder for a single SQL statement against one table
#[derive(Debug, Clone)]
pub struct Query {
    table: String,
    aliased_columns: Vec<String>,
    config: QueryConfig,
    statement: Option<StatementType>,
    template: String,
    /// Caller text from `append_raw`, added after placeholders are filled
    appended: String,
    sections: Sections,
}

/// Append `text` to `sql`, separated by a space unless either side already has one
fn push_fragment(sql: &mut String, text: &str) {
    if !sql.is_empty()
        && !sql.ends_with(char::is_whitespace)
        && !text.starts_with(char::is_whitespace)
    {
        sql.push(' ');
    }
    sql.push_str(text);
}

impl Query {
    /// Create a query for the model's table with the default configuration
    pub fn new<S: SchemaSource + ?Sized>(model: &S) -> Self {
        Self::with_config(model, QueryConfig::default())
    }

    pub fn with_config<S: SchemaSource + ?Sized>(model: &S, config: QueryConfig) -> Self {
        Self {
            table: model.table_name().to_string(),
            aliased_columns: model.aliased_columns(),
            config,
            statement: None,
            template: String::new(),
            appended: String::new(),
            sections: Sections::default(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Statement type chosen by the last starter call, if any
    pub fn statement_type(&self) -> Option<StatementType> {
        self.statement
    }

    /// Current template text, before sections are appended
    pub fn template(&self) -> &str {
        &self.template
    }

    // =========================================================================
    // Starters
    // =========================================================================

    fn start(mut self, statement: StatementType, template: String) -> Self {
        self.statement = Some(statement);
        self.template = template;
        self.appended.clear();
        self
    }

    /// `SELECT <model columns> FROM <table>`
    pub fn select(mut self) -> Self {
        self.sections.columns = Columns::Fragments(self.aliased_columns.clone());
        let template = StatementType::Select.skeleton(&self.table);
        self.start(StatementType::Select, template)
    }

    /// `UPDATE <table> SET ...`; pair with `set_values`
    pub fn update(self) -> Self {
        let template = StatementType::Update.skeleton(&self.table);
        self.start(StatementType::Update, template)
    }

    /// `INSERT INTO <table> ...`; pair with `set_values`
    pub fn insert(self) -> Self {
        let template = StatementType::Insert.skeleton(&self.table);
        self.start(StatementType::Insert, template)
    }

    /// `DELETE FROM <table> ...`; requires at least one where clause
    pub fn delete(self) -> Self {
        let template = StatementType::Delete.skeleton(&self.table);
        self.start(StatementType::Delete, template)
    }

    /// Use `sql` verbatim. No section is ever added to a raw statement.
    pub fn raw(self, sql: impl Into<String>) -> Self {
        self.start(StatementType::Raw, sql.into())
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// `column = value`, with the value inlined as a literal
    pub fn where_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.where_op(column, "=", value)
    }

    /// `column <operator> value`, with the value inlined as a literal
    ///
    /// A null value becomes `IS NULL` for `=` and `IS NOT NULL` for `!=` / `<>`.
    pub fn where_op(mut self, column: &str, operator: &str, value: impl Into<Value>) -> Self {
        let clause = match parse_value(&value.into()) {
            Some(literal) => format!("{} {} {}", column, operator, literal),
            None => match operator.trim() {
                "=" => format!("{} IS NULL", column),
                "!=" | "<>" => format!("{} IS NOT NULL", column),
                other => format!("{} {} NULL", column, other),
            },
        };
        self.sections.where_clauses.push(clause);
        self
    }

    /// `column IN <list>`, where `list` is an already formatted list or subquery
    pub fn where_in(mut self, column: &str, list: &str) -> Self {
        self.sections
            .where_clauses
            .push(format!("{} IN {}", column, list));
        self
    }

    /// `column IN (v1, v2, ...)`, with every value inlined as a literal
    pub fn where_in_values<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.where_in(column, &parse_values(&values))
    }

    /// Restrict to rows whose id appears in a pivot table joined to `table2`
    pub fn where_in_pivot(self, filter: PivotFilter) -> Self {
        let subquery = format!(
            "(SELECT t1.{} FROM {} AS t1 LEFT JOIN {} AS t2 ON t2.id = t1.{} WHERE t2.{} IN ({}))",
            filter.join_column,
            filter.pivot,
            filter.table2,
            filter.column,
            filter.filter_by,
            quoted_list(&filter.value)
        );
        let column = match &filter.table1 {
            Some(table) => format!("{}.id", table),
            None => "id".to_string(),
        };
        self.where_in(&column, &subquery)
    }

    /// Columns and values to write, bound as parameters in iteration order
    ///
    /// Arrays and objects are bound as their JSON text.
    pub fn set_values<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = data
            .into_iter()
            .map(|(column, value)| (column.into(), to_bound_value(value.into())))
            .unzip();

        self.sections.escaped = columns.clone();
        self.sections.columns = Columns::Assigned(columns);
        self.sections.values = values;
        self
    }

    /// Sort ascending by `column`; repeated calls add further sort terms
    pub fn order_by(self, column: &str) -> Self {
        self.order_by_dir(column, SortOrder::Asc)
    }

    pub fn order_by_dir(mut self, column: &str, order: SortOrder) -> Self {
        self.sections.order_by.push(format!("{} {}", column, order));
        self
    }

    /// `LIMIT 0, count`
    pub fn limit(self, count: u64) -> Self {
        self.limit_with_offset(count, 0)
    }

    /// `LIMIT offset, count`; replaces any earlier limit
    pub fn limit_with_offset(mut self, count: u64, offset: u64) -> Self {
        self.sections.limit = Some((count, offset));
        self
    }

    /// One-based page of `page_size` rows. Page 0 is treated as page 1.
    pub fn paginate(self, page: u64, page_size: u64) -> Self {
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        self.limit_with_offset(page_size, offset)
    }

    /// Select only these columns, qualified with the table name
    pub fn only(mut self, columns: &[&str]) -> Self {
        let fragments = columns
            .iter()
            .map(|column| format!("{}.{}", self.table, column))
            .collect();
        self.sections.columns = Columns::Fragments(fragments);
        self
    }

    /// Drop selected columns whose name or alias matches one of `columns`
    pub fn except(mut self, columns: &[&str]) -> Self {
        match &mut self.sections.columns {
            Columns::Fragments(fragments) => fragments.retain(|fragment| {
                let (name, alias) = fragment_names(fragment);
                !columns
                    .iter()
                    .any(|excluded| *excluded == name || Some(*excluded) == alias)
            }),
            _ => {
                tracing::warn!(
                    table = %self.table,
                    "except() ignored: no select column list to filter"
                );
            }
        }
        self
    }

    /// Turn `SELECT` into `SELECT DISTINCT` on select and raw statements
    pub fn distinct(mut self) -> Self {
        let rewritable = matches!(
            self.statement,
            Some(StatementType::Select | StatementType::Raw)
        );
        if rewritable && !self.template.contains("SELECT DISTINCT") {
            self.template = self.template.replacen("SELECT", "SELECT DISTINCT", 1);
        }
        self
    }

    /// Append text after the template, ahead of any sections
    ///
    /// The text is used verbatim; placeholders inside it are not filled.
    pub fn append_raw(mut self, sql: &str) -> Self {
        push_fragment(&mut self.appended, sql);
        self
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Validate the collected sections and assemble the statement
    ///
    /// Returns plain SQL, or SQL plus bound values when `set_values` supplied any.
    /// The query is not modified, so calling this repeatedly yields the same result.
    pub fn create(&self) -> Result<Statement> {
        let statement = self.statement.ok_or(QueryError::NoStatement)?;
        self.validate(statement)?;

        let mut sql = match statement {
            StatementType::Raw => self.template.clone(),
            _ => fill_placeholders(&self.template, |section| {
                let text = self.sections.render(section, statement);
                match section {
                    Section::Columns => text.unwrap_or_else(|| "*".to_string()),
                    _ => text.unwrap_or_default(),
                }
            }),
        };

        if !self.appended.is_empty() {
            push_fragment(&mut sql, &self.appended);
        }

        for section in statement.permitted_sections() {
            if let Some(text) = self.sections.render(*section, statement) {
                push_fragment(&mut sql, &text);
            }
        }

        tracing::debug!(
            statement = %statement,
            sql = %sql,
            bound = self.sections.values.len(),
            "statement created"
        );

        if statement.accepts(Section::Values) && self.sections.is_present(Section::Values) {
            Ok(Statement::Parameterized(sql, self.sections.values.clone()))
        } else {
            Ok(Statement::Sql(sql))
        }
    }

    fn validate(&self, statement: StatementType) -> Result<()> {
        for section in statement.required_sections() {
            if !self.sections.is_present(*section) {
                return Err(QueryError::MissingRequiredSection(*section));
            }
        }

        for section in statement.forbidden_sections() {
            if self.sections.is_present(*section) {
                return Err(QueryError::ForbiddenSectionPresent(*section));
            }
        }

        for section in Section::ALL {
            if self.sections.is_present(section) && !statement.accepts(section) {
                if self.config.strict_sections {
                    return Err(QueryError::UnusedSection { section, statement });
                }
                tracing::warn!(
                    statement = %statement,
                    section = %section,
                    "section is not used by this statement and will be dropped"
                );
            }
        }

        if self.config.validate_identifiers {
            validate_identifier(&self.table).map_err(QueryError::InvalidIdentifier)?;
            for column in &self.sections.escaped {
                validate_identifier(column).map_err(QueryError::InvalidIdentifier)?;
            }
        }

        Ok(())
    }
}
