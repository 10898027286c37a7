#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use oxide_sql_hsqldb::{Connection, DriverError, Row, Value};

/// In-memory stand-in for a JDBC session.
///
/// Records every statement it receives, answers queries from a table of
/// canned results and fails statements it was told to reject.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    pub executed: Vec<String>,
    pub results: HashMap<String, Vec<Row>>,
    pub failing: HashSet<String>,
    pub tables: Vec<String>,
    pub identity: Option<Value>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, sql: &str, rows: Vec<Row>) -> Self {
        self.results.insert(sql.to_string(), rows);
        self
    }

    pub fn with_identity(mut self, identity: Value) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|t| (*t).to_string()).collect();
        self
    }

    pub fn failing_on(mut self, sql: &str) -> Self {
        self.failing.insert(sql.to_string());
        self
    }
}

impl Connection for RecordingConnection {
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, DriverError> {
        self.executed.push(sql.to_string());
        if self.failing.contains(sql) {
            return Err(DriverError::msg(format!("unexpected token in: {sql}")));
        }
        if sql == "CALL IDENTITY()" {
            return Ok(self
                .identity
                .clone()
                .map(|id| vec![Row::new([("@p0", id)])])
                .unwrap_or_default());
        }
        Ok(self.results.get(sql).cloned().unwrap_or_default())
    }

    fn tables(&mut self) -> Result<Vec<String>, DriverError> {
        Ok(self.tables.clone())
    }
}

/// Builds `SCRIPT` output rows.
pub fn script_rows(commands: &[&str]) -> Vec<Row> {
    commands
        .iter()
        .map(|c| Row::new([("COMMAND", Value::from(*c))]))
        .collect()
}
