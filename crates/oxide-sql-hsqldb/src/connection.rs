//! The execution collaborator.
//!
//! The dialect layer never talks to the wire itself. A [`Connection`] runs
//! one statement at a time and reports driver failures as [`DriverError`].

use crate::error::DriverError;
use crate::value::Value;

/// One result row: column names paired with values, in select order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates a row from `(column, value)` pairs.
    #[must_use]
    pub fn new<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the value of the first column.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.columns.first().map(|(_, v)| v)
    }

    /// Returns the value of a column, matched case-insensitively.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, v)| v)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single database session.
///
/// Implementations run each statement to completion before returning.
/// Session-scoped server state (such as the last generated identity) is
/// only meaningful if the same `Connection` value is used throughout.
pub trait Connection {
    /// Runs a statement and returns its rows (empty for DDL/DML).
    ///
    /// # Errors
    ///
    /// Returns the driver's failure unchanged.
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, DriverError>;

    /// Runs a statement and returns the first column of the first row.
    ///
    /// # Errors
    ///
    /// Returns the driver's failure unchanged.
    fn select_value(&mut self, sql: &str) -> Result<Option<Value>, DriverError> {
        Ok(self
            .execute(sql)?
            .into_iter()
            .next()
            .and_then(|row| row.first().cloned()))
    }

    /// Lists the user-visible table names of the current schema.
    ///
    /// # Errors
    ///
    /// Returns the driver's failure unchanged.
    fn tables(&mut self) -> Result<Vec<String>, DriverError>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, DriverError> {
        (**self).execute(sql)
    }

    fn select_value(&mut self, sql: &str) -> Result<Option<Value>, DriverError> {
        (**self).select_value(sql)
    }

    fn tables(&mut self) -> Result<Vec<String>, DriverError> {
        (**self).tables()
    }
}
