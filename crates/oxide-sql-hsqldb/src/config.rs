//! Adapter configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HsqldbError, Result};

/// The JDBC driver family a connection goes through.
///
/// HSQLDB is the primary target. H2 connections share this adapter but keep
/// the generic type rendering for integer limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// HyperSQL.
    #[default]
    Hsqldb,
    /// H2, reached through the HSQLDB-compatible adapter.
    H2,
}

impl Driver {
    /// Detects the driver from an adapter name or JDBC URL.
    ///
    /// ```
    /// use oxide_sql_hsqldb::Driver;
    ///
    /// assert_eq!(Driver::detect("jdbc:hsqldb:mem:test"), Some(Driver::Hsqldb));
    /// assert_eq!(Driver::detect("jdbch2"), Some(Driver::H2));
    /// assert_eq!(Driver::detect("postgresql"), None);
    /// ```
    #[must_use]
    pub fn detect(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.contains("hsqldb") {
            Some(Self::Hsqldb)
        } else if lower.contains("h2") {
            Some(Self::H2)
        } else {
            None
        }
    }

    /// Returns the driver name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hsqldb => "hsqldb",
            Self::H2 => "h2",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = HsqldbError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::detect(s)
            .ok_or_else(|| HsqldbError::InvalidDefinition(format!("unknown driver '{s}'")))
    }
}

/// Which column introspection rules apply to a column.
///
/// Set once when the column is built; every extraction and classification
/// step dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDialect {
    /// HSQLDB limit repair, classification and default unquoting.
    #[default]
    Hsqldb,
    /// The host framework's generic rules only.
    Generic,
}

impl ColumnDialect {
    /// Selects the column dialect for an adapter name.
    #[must_use]
    pub fn select(adapter_name: &str) -> Self {
        if adapter_name.to_ascii_lowercase().contains("hsqldb") {
            Self::Hsqldb
        } else {
            Self::Generic
        }
    }
}

/// Adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Driver family.
    pub driver: Driver,
    /// Adapter name as configured by the host (e.g. `jdbchsqldb`).
    pub adapter: Option<String>,
}

impl AdapterConfig {
    /// Creates a configuration for the given driver.
    #[must_use]
    pub const fn new(driver: Driver) -> Self {
        Self {
            driver,
            adapter: None,
        }
    }

    /// Sets the adapter name, detecting the driver from it when possible.
    #[must_use]
    pub fn adapter(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(driver) = Driver::detect(&name) {
            self.driver = driver;
        }
        self.adapter = Some(name);
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HsqldbError::InvalidDefinition`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| HsqldbError::InvalidDefinition(format!("adapter config: {e}")))
    }

    /// Returns the column dialect columns of this adapter are built with.
    #[must_use]
    pub fn column_dialect(&self) -> ColumnDialect {
        self.adapter
            .as_deref()
            .map_or(ColumnDialect::Hsqldb, ColumnDialect::select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_detection() {
        assert_eq!(Driver::detect("hsqldb"), Some(Driver::Hsqldb));
        assert_eq!(Driver::detect("JDBCHSQLDB"), Some(Driver::Hsqldb));
        assert_eq!(Driver::detect("jdbc:h2:mem:"), Some(Driver::H2));
        assert_eq!(Driver::detect("mysql"), None);
        assert!("oracle".parse::<Driver>().is_err());
    }

    #[test]
    fn test_column_dialect_selection() {
        assert_eq!(ColumnDialect::select("jdbchsqldb"), ColumnDialect::Hsqldb);
        assert_eq!(ColumnDialect::select("HSQLDB"), ColumnDialect::Hsqldb);
        assert_eq!(ColumnDialect::select("h2"), ColumnDialect::Generic);
    }

    #[test]
    fn test_config_from_json() {
        let config = AdapterConfig::from_json(r#"{"driver": "h2"}"#).unwrap();
        assert_eq!(config.driver, Driver::H2);
        assert_eq!(config.adapter, None);

        let config = AdapterConfig::from_json("{}").unwrap();
        assert_eq!(config.driver, Driver::Hsqldb);

        assert!(AdapterConfig::from_json(r#"{"driver": "db2"}"#).is_err());
    }

    #[test]
    fn test_adapter_name_sets_driver() {
        let config = AdapterConfig::default().adapter("jdbch2");
        assert_eq!(config.driver, Driver::H2);
        assert_eq!(config.column_dialect(), ColumnDialect::Generic);

        let config = AdapterConfig::new(Driver::H2).adapter("jdbchsqldb");
        assert_eq!(config.driver, Driver::Hsqldb);
        assert_eq!(config.column_dialect(), ColumnDialect::Hsqldb);
    }
}
