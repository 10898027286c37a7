//! Introspected column metadata.

use serde::Serialize;

use crate::config::ColumnDialect;
use crate::inference;
use crate::types::LogicalType;
use crate::value::ColumnHint;

/// A column as reported by the driver, before any correction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Driver type string, e.g. `TINYINT(1)` or `LONGVARCHAR(0)`.
    pub sql_type: String,
    /// Size the driver claims for the column.
    pub declared_limit: Option<u32>,
    /// Default value as literal SQL text.
    pub default_raw: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    pub primary: bool,
}

impl RawColumnDescriptor {
    /// Creates a nullable column descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            ..Self::default()
        }
    }

    /// Sets the driver-reported limit.
    #[must_use]
    pub const fn declared_limit(mut self, limit: u32) -> Self {
        self.declared_limit = Some(limit);
        self
    }

    /// Sets the raw default.
    #[must_use]
    pub fn default_raw(mut self, default: impl Into<String>) -> Self {
        self.default_raw = Some(default.into());
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// Column metadata with the dialect's corrections applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Rules this column was built with.
    pub dialect: ColumnDialect,
    /// Canonical type name.
    pub sql_type: String,
    /// Logical type.
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    /// Corrected limit.
    pub limit: Option<u32>,
    /// Decimal precision.
    pub precision: Option<u32>,
    /// Decimal scale.
    pub scale: Option<u32>,
    /// Default value with literal quotes removed.
    pub default: Option<String>,
    /// Whether the column accepts NULL.
    pub null: bool,
    /// Whether the column is the primary key.
    pub primary: bool,
}

impl Column {
    /// Builds a column from a driver descriptor using the given rules.
    #[must_use]
    pub fn new(dialect: ColumnDialect, raw: &RawColumnDescriptor) -> Self {
        let (sql_type, limit, logical_type, default) = match dialect {
            ColumnDialect::Hsqldb => {
                let info = inference::correct(&raw.sql_type, raw.declared_limit);
                (
                    info.canonical_sql_type,
                    info.limit,
                    inference::classify(&raw.sql_type),
                    raw.default_raw
                        .as_deref()
                        .map(|d| inference::strip_literal_quotes(d).to_string()),
                )
            }
            ColumnDialect::Generic => (
                raw.sql_type.clone(),
                raw.declared_limit,
                inference::classify_generic(&raw.sql_type),
                raw.default_raw.clone(),
            ),
        };

        Self {
            name: raw.name.clone(),
            dialect,
            sql_type,
            logical_type,
            limit,
            precision: inference::extract_precision(&raw.sql_type),
            scale: inference::extract_scale(&raw.sql_type),
            default,
            null: raw.nullable,
            primary: raw.primary,
        }
    }

    /// Returns the quoting hint for values stored in this column.
    #[must_use]
    pub const fn hint(&self) -> ColumnHint {
        ColumnHint {
            logical_type: self.logical_type,
            primary: self.primary,
        }
    }
}
