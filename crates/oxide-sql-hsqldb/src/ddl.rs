//! DDL statement synthesis.
//!
//! Builders here only produce SQL text. The adapter hands each statement
//! to the connection.

use crate::config::Driver;
use crate::error::{HsqldbError, Result};
use crate::quoting::{quote, quote_identifier, quote_table_name};
use crate::types::LogicalType;
use crate::value::{ColumnHint, Value};

/// Size and constraint options for a column definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnOptions {
    /// Requested limit.
    pub limit: Option<u32>,
    /// Requested precision.
    pub precision: Option<u32>,
    /// Requested scale.
    pub scale: Option<u32>,
    /// Default value. `Some(Value::Null)` is an explicit NULL default.
    pub default: Option<Value>,
    /// `Some(false)` adds `NOT NULL`.
    pub null: Option<bool>,
}

impl ColumnOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.null = Some(false);
        self
    }

    fn includes_default(&self) -> bool {
        match &self.default {
            None => false,
            Some(Value::Null) => self.null != Some(false),
            Some(_) => true,
        }
    }
}

/// Identifies an index by name or by the columns it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// Explicit index name.
    Name(String),
    /// Columns, named `index_<table>_on_<a>_and_<b>`.
    Columns(Vec<String>),
}

/// Returns the name of an index.
#[must_use]
pub fn index_name(table: &str, target: &IndexTarget) -> String {
    match target {
        IndexTarget::Name(name) => name.clone(),
        IndexTarget::Columns(columns) => format!("index_{table}_on_{}", columns.join("_and_")),
    }
}

/// Renders the SQL type for a column definition.
///
/// HSQLDB integers are fixed-width, so an explicit limit on `integer` is
/// dropped and the bare keyword returned. H2 keeps the generic rendering.
///
/// # Errors
///
/// Returns [`HsqldbError::InvalidDefinition`] for a decimal scale without
/// precision.
pub fn type_to_sql(
    driver: Driver,
    logical_type: LogicalType,
    options: &ColumnOptions,
) -> Result<String> {
    if driver == Driver::Hsqldb && logical_type == LogicalType::Integer && options.limit.is_some() {
        return Ok(logical_type.as_str().to_string());
    }
    generic_type_to_sql(logical_type, options)
}

/// Renders a type from the catalog, applying limit or precision/scale.
///
/// # Errors
///
/// Returns [`HsqldbError::InvalidDefinition`] for a decimal scale without
/// precision.
pub fn generic_type_to_sql(logical_type: LogicalType, options: &ColumnOptions) -> Result<String> {
    let native = logical_type.native();
    match logical_type {
        LogicalType::Decimal | LogicalType::Numeric => {
            let scale = options.scale.or(native.scale);
            match (options.precision.or(native.precision), scale) {
                (Some(p), Some(s)) => Ok(format!("{}({p},{s})", native.name)),
                (Some(p), None) => Ok(format!("{}({p})", native.name)),
                (None, Some(_)) => Err(HsqldbError::InvalidDefinition(format!(
                    "{logical_type} column: precision cannot be empty if scale is specified"
                ))),
                (None, None) => Ok(native.name.to_string()),
            }
        }
        LogicalType::PrimaryKey => Ok(native.name.to_string()),
        _ => Ok(match options.limit.or(native.limit) {
            Some(limit) => format!("{}({limit})", native.name),
            None => native.name.to_string(),
        }),
    }
}

/// Appends ` DEFAULT ..` and ` NOT NULL` clauses.
///
/// # Errors
///
/// Returns [`HsqldbError::TypeCoercion`] if the default cannot be rendered
/// for the column type.
pub fn add_column_options(
    sql: &mut String,
    logical_type: LogicalType,
    options: &ColumnOptions,
) -> Result<()> {
    if options.includes_default() {
        if let Some(default) = &options.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&quote(default, Some(ColumnHint::of(logical_type)))?);
        }
    }
    if options.null == Some(false) {
        sql.push_str(" NOT NULL");
    }
    Ok(())
}

/// `ALTER TABLE <table> ADD <column> <type> [DEFAULT ..] [NOT NULL]`
///
/// # Errors
///
/// Fails if the type or the default cannot be rendered.
pub fn add_column(
    driver: Driver,
    table: &str,
    column: &str,
    logical_type: LogicalType,
    options: &ColumnOptions,
) -> Result<String> {
    let mut sql = format!(
        "ALTER TABLE {} ADD {} {}",
        quote_table_name(table),
        quote_identifier(column),
        type_to_sql(driver, logical_type, options)?
    );
    add_column_options(&mut sql, logical_type, options)?;
    Ok(sql)
}

/// `ALTER TABLE <table> ALTER COLUMN <column> <type>`
///
/// # Errors
///
/// Fails if the type cannot be rendered.
pub fn change_column(
    driver: Driver,
    table: &str,
    column: &str,
    logical_type: LogicalType,
    options: &ColumnOptions,
) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ALTER COLUMN {} {}",
        quote_table_name(table),
        quote_identifier(column),
        type_to_sql(driver, logical_type, options)?
    ))
}

/// `ALTER TABLE <table> ALTER COLUMN <column> SET DEFAULT <literal>`
///
/// # Errors
///
/// Never fails for an untyped default; kept fallible because literal
/// rendering is.
pub fn change_column_default(table: &str, column: &str, default: &Value) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {}",
        quote_table_name(table),
        quote_identifier(column),
        quote(default, None)?
    ))
}

/// `ALTER TABLE <table> ALTER COLUMN <column> RENAME TO <new>`
#[must_use]
pub fn rename_column(table: &str, column: &str, new_column: &str) -> String {
    format!(
        "ALTER TABLE {} ALTER COLUMN {} RENAME TO {}",
        quote_table_name(table),
        quote_identifier(column),
        quote_identifier(new_column)
    )
}

/// `ALTER TABLE <table> RENAME TO <new>`
#[must_use]
pub fn rename_table(table: &str, new_table: &str) -> String {
    format!(
        "ALTER TABLE {} RENAME TO {}",
        quote_table_name(table),
        quote_table_name(new_table)
    )
}

/// `DROP INDEX <index>`
#[must_use]
pub fn remove_index(table: &str, target: &IndexTarget) -> String {
    format!("DROP INDEX {}", quote_identifier(&index_name(table, target)))
}
