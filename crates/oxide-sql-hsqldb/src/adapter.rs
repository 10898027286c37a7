//! The HSQLDB adapter.
//!
//! [`HsqldbAdapter`] owns one [`Connection`] and routes every statement
//! through it. All statement-issuing methods take `&mut self`, so the
//! identity lookup that follows an insert can never interleave with
//! another statement on the same session.

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::column::{Column, RawColumnDescriptor};
use crate::config::AdapterConfig;
use crate::connection::{Connection, Row};
use crate::ddl::{self, ColumnOptions, IndexTarget};
use crate::error::{HsqldbError, Result};
use crate::pagination;
use crate::quoting;
use crate::structure;
use crate::types::{self, LogicalType, NativeTypeSpec};
use crate::value::{ColumnHint, Value};

/// Adapter name reported to the host framework.
pub const ADAPTER_NAME: &str = "HSQLDB";

/// Query returning the identity generated by the session's last insert.
const IDENTITY_QUERY: &str = "CALL IDENTITY()";

/// Outcome of [`HsqldbAdapter::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    /// Rows returned by the driver.
    Rows(Vec<Row>),
    /// Identity generated by an insert.
    InsertId(i64),
}

/// Returns whether a statement is an insert.
#[must_use]
pub fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|keyword| keyword.eq_ignore_ascii_case("insert"))
}

/// HSQLDB adapter over a single connection.
#[derive(Debug)]
pub struct HsqldbAdapter<C> {
    conn: C,
    config: AdapterConfig,
}

impl<C: Connection> HsqldbAdapter<C> {
    /// Creates an adapter over a connection.
    pub const fn new(conn: C, config: AdapterConfig) -> Self {
        Self { conn, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &C {
        &self.conn
    }

    /// Consumes the adapter, returning the connection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Returns `"HSQLDB"`.
    #[must_use]
    pub const fn adapter_name(&self) -> &'static str {
        ADAPTER_NAME
    }

    /// Returns the native type catalog.
    #[must_use]
    pub fn native_database_types(&self) -> &'static BTreeMap<LogicalType, NativeTypeSpec> {
        types::native_database_types()
    }

    /// Value list for an insert that supplies no columns.
    ///
    /// Only works on tables where every column has a default.
    #[must_use]
    pub const fn empty_insert_statement_value(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    /// Builds column metadata from a driver descriptor.
    #[must_use]
    pub fn column(&self, raw: &RawColumnDescriptor) -> Column {
        Column::new(self.config.column_dialect(), raw)
    }

    /// Renders a value as a literal. See [`quoting::quote`].
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::TypeCoercion`] for text that cannot be
    /// rendered as the hinted type.
    pub fn quote(&self, value: &Value, hint: Option<ColumnHint>) -> Result<String> {
        quoting::quote(value, hint)
    }

    /// Quotes a column name. See [`quoting::quote_identifier`].
    #[must_use]
    pub fn quote_column_name(&self, name: &str) -> String {
        quoting::quote_identifier(name)
    }

    /// Renders a column type for the configured driver.
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::InvalidDefinition`] for unrenderable options.
    pub fn type_to_sql(
        &self,
        logical_type: LogicalType,
        options: &ColumnOptions,
    ) -> Result<String> {
        ddl::type_to_sql(self.config.driver, logical_type, options)
    }

    /// Rewrites a `SELECT` with HSQLDB row limiting.
    #[must_use]
    pub fn add_limit_offset<'a>(
        &self,
        sql: &'a str,
        limit: Option<u64>,
        offset: u64,
    ) -> Cow<'a, str> {
        pagination::add_limit_offset(sql, limit, offset)
    }

    /// Runs a statement.
    ///
    /// Inserts report the identity they generated instead of their rows.
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::Driver`] if the connection fails, or
    /// [`HsqldbError::TypeCoercion`] if the identity is not an integer.
    pub fn execute(&mut self, sql: &str) -> Result<StatementResult> {
        debug!(sql = %sql, "Executing SQL");
        let rows = self.conn.execute(sql)?;
        if is_insert(sql) {
            return self.last_insert_id().map(StatementResult::InsertId);
        }
        Ok(StatementResult::Rows(rows))
    }

    /// Returns the identity generated by this session's last insert.
    ///
    /// A NULL or missing result is reported as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::Driver`] if the query fails, or
    /// [`HsqldbError::TypeCoercion`] if the result is not an integer.
    pub fn last_insert_id(&mut self) -> Result<i64> {
        debug!(sql = IDENTITY_QUERY, "Fetching identity");
        match self.conn.select_value(IDENTITY_QUERY)? {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Int(id)) => Ok(id),
            Some(Value::Text(text)) => text.trim().parse().map_err(|_| HsqldbError::TypeCoercion {
                value: text,
                target: "integer",
            }),
            Some(other) => Err(HsqldbError::TypeCoercion {
                value: format!("{other:?}"),
                target: "integer",
            }),
        }
    }

    fn run(&mut self, sql: &str) -> Result<()> {
        self.execute(sql).map(|_| ())
    }

    /// Adds a column.
    ///
    /// # Errors
    ///
    /// Fails if the definition cannot be rendered or the driver rejects it.
    pub fn add_column(
        &mut self,
        table: &str,
        column: &str,
        logical_type: LogicalType,
        options: &ColumnOptions,
    ) -> Result<()> {
        let sql = ddl::add_column(self.config.driver, table, column, logical_type, options)?;
        self.run(&sql)
    }

    /// Changes a column's type.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot be rendered or the driver rejects it.
    pub fn change_column(
        &mut self,
        table: &str,
        column: &str,
        logical_type: LogicalType,
        options: &ColumnOptions,
    ) -> Result<()> {
        let sql = ddl::change_column(self.config.driver, table, column, logical_type, options)?;
        self.run(&sql)
    }

    /// Changes a column's default.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn change_column_default(
        &mut self,
        table: &str,
        column: &str,
        default: &Value,
    ) -> Result<()> {
        let sql = ddl::change_column_default(table, column, default)?;
        self.run(&sql)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn rename_column(&mut self, table: &str, column: &str, new_column: &str) -> Result<()> {
        self.run(&ddl::rename_column(table, column, new_column))
    }

    /// Renames a table.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn rename_table(&mut self, table: &str, new_table: &str) -> Result<()> {
        self.run(&ddl::rename_table(table, new_table))
    }

    /// Drops an index.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn remove_index(&mut self, table: &str, target: &IndexTarget) -> Result<()> {
        self.run(&ddl::remove_index(table, target))
    }

    /// Lists user tables, hiding HSQLDB's `SYSTEM_*` tables.
    ///
    /// # Errors
    ///
    /// Fails if the driver cannot list tables.
    pub fn tables(&mut self) -> Result<Vec<String>> {
        Ok(self
            .conn
            .tables()?
            .into_iter()
            .filter(|name| !is_system_table(name))
            .collect())
    }

    /// Dumps the schema as a replayable script.
    ///
    /// # Errors
    ///
    /// Fails if `SCRIPT` fails or returns a non-textual command.
    pub fn structure_dump(&mut self) -> Result<String> {
        debug!(sql = "SCRIPT", "Executing SQL");
        let rows = self.conn.execute("SCRIPT")?;

        let mut commands = Vec::with_capacity(rows.len());
        for row in &rows {
            match row.first() {
                Some(Value::Text(sql)) => {
                    if structure::is_bootstrap_statement(sql) {
                        debug!(sql = %sql, "Skipping bootstrap statement");
                    } else {
                        commands.push(sql.as_str());
                    }
                }
                Some(other) => {
                    return Err(HsqldbError::TypeCoercion {
                        value: format!("{other:?}"),
                        target: "text",
                    })
                }
                None => {}
            }
        }

        info!(
            statements = commands.len(),
            skipped = rows.len() - commands.len(),
            "Dumped structure"
        );
        Ok(structure::build_script(commands))
    }

    /// Replays a script produced by [`structure_dump`](Self::structure_dump).
    ///
    /// Statements run one by one; on failure the statements before it stay
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::SchemaReplay`] naming the failing fragment.
    pub fn structure_load(&mut self, script: &str) -> Result<()> {
        let fragments = structure::split_script(script);
        for (index, fragment) in fragments.iter().enumerate() {
            debug!(index, sql = %fragment, "Replaying statement");
            if let Err(source) = self.conn.execute(fragment) {
                warn!(index, error = %source, "Structure load failed");
                return Err(HsqldbError::SchemaReplay {
                    index,
                    fragment: (*fragment).to_string(),
                    source,
                });
            }
        }
        info!(statements = fragments.len(), "Loaded structure");
        Ok(())
    }

    /// Shuts the database down.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn shutdown(&mut self) -> Result<()> {
        self.run("SHUTDOWN")
    }

    /// Does nothing: HSQLDB creates the `PUBLIC` schema implicitly.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn create_database(&mut self, name: Option<&str>) -> Result<()> {
        debug!(name = ?name, "create_database is a no-op on HSQLDB");
        Ok(())
    }

    /// Drops everything in the `PUBLIC` schema.
    ///
    /// # Errors
    ///
    /// Fails if the driver rejects the statement.
    pub fn drop_database(&mut self, name: Option<&str>) -> Result<()> {
        debug!(name = ?name, "Dropping schema");
        self.run("DROP SCHEMA PUBLIC CASCADE")
    }

    /// Drops then creates the database.
    ///
    /// # Errors
    ///
    /// Fails if the drop fails.
    pub fn recreate_database(&mut self, name: Option<&str>) -> Result<()> {
        self.drop_database(name)?;
        self.create_database(name)
    }
}

fn is_system_table(name: &str) -> bool {
    name.get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("system_"))
}
