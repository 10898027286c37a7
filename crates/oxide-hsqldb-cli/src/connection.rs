//! Offline connections.
//!
//! The tool never opens a network session. Statements are either printed
//! (dry run) or answered from an HSQLDB `.script` file, which holds the
//! same statements the `SCRIPT` command returns, one per line.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use oxide_sql_hsqldb::{Connection, DriverError, Row, Value};
use regex::Regex;
use tracing::debug;

static CREATE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CREATE\s+(?:(?:MEMORY|CACHED|TEXT|TEMP)\s+)?TABLE\s+(?:\w+\.)?(\w+)")
        .expect("static regex is valid")
});

/// Prints every statement instead of running it.
#[derive(Debug, Default)]
pub struct DryRunConnection {
    /// Statements printed so far.
    pub statements: Vec<String>,
}

impl DryRunConnection {
    /// Creates a dry-run connection.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for DryRunConnection {
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, DriverError> {
        println!("{sql};");
        self.statements.push(sql.to_string());
        Ok(Vec::new())
    }

    fn select_value(&mut self, sql: &str) -> Result<Option<Value>, DriverError> {
        self.execute(sql)?;
        Ok(None)
    }

    fn tables(&mut self) -> Result<Vec<String>, DriverError> {
        Ok(Vec::new())
    }
}

/// Read-only connection backed by a `.script` file.
#[derive(Debug)]
pub struct ScriptFileConnection {
    commands: Vec<String>,
}

impl ScriptFileConnection {
    /// Reads a `.script` file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_script(&text))
    }

    /// Builds a connection from `.script` text.
    pub fn from_script(text: &str) -> Self {
        let commands = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { commands }
    }
}

impl Connection for ScriptFileConnection {
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, DriverError> {
        debug!(sql = %sql, "Script file query");
        if sql.trim().eq_ignore_ascii_case("SCRIPT") {
            Ok(self
                .commands
                .iter()
                .map(|c| Row::new([("COMMAND", Value::from(c.as_str()))]))
                .collect())
        } else {
            Err(DriverError::msg(format!(
                "script files are read-only, cannot run: {sql}"
            )))
        }
    }

    fn tables(&mut self) -> Result<Vec<String>, DriverError> {
        Ok(self
            .commands
            .iter()
            .filter_map(|c| CREATE_TABLE.captures(c))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect())
    }
}
