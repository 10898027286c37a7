//! Native type catalog.
//!
//! Maps the host framework's logical column types to the HSQLDB type names
//! used in generated DDL, together with the default limit each carries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::HsqldbError;

/// Abstract column kinds recognized by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    /// Auto-generated integer primary key.
    PrimaryKey,
    /// Bounded character string.
    String,
    /// Unbounded character data.
    Text,
    /// 32-bit integer.
    Integer,
    /// 8-bit integer.
    Tinyint,
    /// 16-bit integer.
    Smallint,
    /// 64-bit integer.
    Bigint,
    /// Floating point.
    Float,
    /// Double precision floating point.
    Double,
    /// HSQLDB `REAL` (a double on this engine).
    Real,
    /// Exact decimal.
    Decimal,
    /// Exact numeric.
    Numeric,
    /// Boolean.
    Boolean,
    /// Single bit, stored as 0/1.
    Bit,
    /// Binary large object.
    Binary,
    /// Date only.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Datetime,
    /// Timestamp.
    Timestamp,
    /// Serialized Java object (`OTHER`).
    Other,
    /// Fixed-length character string.
    Character,
    /// Case-insensitive variable-length string.
    VarcharIgnorecase,
}

impl LogicalType {
    /// Every logical type, in declaration order.
    pub const ALL: [Self; 22] = [
        Self::PrimaryKey,
        Self::String,
        Self::Text,
        Self::Integer,
        Self::Tinyint,
        Self::Smallint,
        Self::Bigint,
        Self::Float,
        Self::Double,
        Self::Real,
        Self::Decimal,
        Self::Numeric,
        Self::Boolean,
        Self::Bit,
        Self::Binary,
        Self::Date,
        Self::Time,
        Self::Datetime,
        Self::Timestamp,
        Self::Other,
        Self::Character,
        Self::VarcharIgnorecase,
    ];

    /// Returns the framework name of this type (e.g. `varchar_ignorecase`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Tinyint => "tinyint",
            Self::Smallint => "smallint",
            Self::Bigint => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Real => "real",
            Self::Decimal => "decimal",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Bit => "bit",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Other => "other",
            Self::Character => "character",
            Self::VarcharIgnorecase => "varchar_ignorecase",
        }
    }

    /// Returns the native type for this logical type.
    ///
    /// The match is exhaustive, so a type added without a catalog entry
    /// fails to compile rather than at runtime.
    #[must_use]
    pub const fn native(self) -> NativeTypeSpec {
        match self {
            Self::PrimaryKey => NativeTypeSpec::named(
                "integer GENERATED BY DEFAULT AS IDENTITY(START WITH 0) PRIMARY KEY",
            ),
            Self::String => NativeTypeSpec::with_limit("varchar", 255),
            Self::Text => NativeTypeSpec::named("clob"),
            Self::Binary => NativeTypeSpec::named("blob"),
            Self::Boolean => NativeTypeSpec::named("boolean"),
            Self::Bit => NativeTypeSpec::named("bit"),
            Self::Integer => NativeTypeSpec::with_limit("integer", 4),
            Self::Decimal => NativeTypeSpec::named("decimal"),
            Self::Numeric => NativeTypeSpec::named("numeric"),
            Self::Tinyint => NativeTypeSpec::with_limit("tinyint", 1),
            Self::Smallint => NativeTypeSpec::with_limit("smallint", 2),
            Self::Bigint => NativeTypeSpec::with_limit("bigint", 8),
            Self::Float => NativeTypeSpec::named("float"),
            Self::Double => NativeTypeSpec::with_limit("double", 8),
            Self::Real => NativeTypeSpec::with_limit("real", 8),
            Self::Date => NativeTypeSpec::named("date"),
            Self::Time => NativeTypeSpec::named("time"),
            Self::Timestamp | Self::Datetime => NativeTypeSpec::named("timestamp"),
            Self::Other => NativeTypeSpec::named("other"),
            Self::Character => NativeTypeSpec::named("character"),
            Self::VarcharIgnorecase => NativeTypeSpec::named("varchar_ignorecase"),
        }
    }

    /// Returns whether values of this type are Rust/host strings.
    ///
    /// Primary keys of a textual type keep their quotes when rendered.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::String | Self::Text | Self::Binary | Self::Character | Self::VarcharIgnorecase
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = HsqldbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(':');
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| HsqldbError::UnmappedType(s.to_string()))
    }
}

/// A native HSQLDB type with its default size parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeTypeSpec {
    /// Native type name (or full DDL fragment for primary keys).
    pub name: &'static str,
    /// Default limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Default precision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Default scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl NativeTypeSpec {
    const fn named(name: &'static str) -> Self {
        Self {
            name,
            limit: None,
            precision: None,
            scale: None,
        }
    }

    const fn with_limit(name: &'static str, limit: u32) -> Self {
        Self {
            name,
            limit: Some(limit),
            precision: None,
            scale: None,
        }
    }
}

static NATIVE_DATABASE_TYPES: LazyLock<BTreeMap<LogicalType, NativeTypeSpec>> =
    LazyLock::new(|| LogicalType::ALL.into_iter().map(|t| (t, t.native())).collect());

/// Returns the full catalog, keyed by logical type.
#[must_use]
pub fn native_database_types() -> &'static BTreeMap<LogicalType, NativeTypeSpec> {
    &NATIVE_DATABASE_TYPES
}

/// Looks up the native type for a logical type.
#[must_use]
pub const fn lookup(logical_type: LogicalType) -> NativeTypeSpec {
    logical_type.native()
}

/// Looks up the native type for a framework type name such as `"string"`.
///
/// # Errors
///
/// Returns [`HsqldbError::UnmappedType`] if the name is not a known type.
pub fn lookup_by_name(name: &str) -> crate::error::Result<NativeTypeSpec> {
    name.parse::<LogicalType>().map(LogicalType::native)
}
