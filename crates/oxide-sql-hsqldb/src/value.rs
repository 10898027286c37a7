//! Runtime values handed to the quoter and returned by the driver.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::types::LogicalType;

/// A runtime value.
///
/// Values that already know their SQL form (resolved key references) are
/// an explicit variant instead of something the quoter has to probe for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Character data.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Point in time. Rendered as a time of day for `time` columns.
    Timestamp(NaiveDateTime),
    /// Already-quoted SQL, emitted verbatim.
    PreQuoted(String),
}

impl Value {
    /// Returns the value as text, if it is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::PreQuoted(s) => Some(s),
            _ => None,
        }
    }

    /// Returns whether the value is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// What the quoter knows about the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHint {
    /// Logical type of the column.
    pub logical_type: LogicalType,
    /// Whether the column is the primary key.
    pub primary: bool,
}

impl ColumnHint {
    /// A hint for a non-key column.
    #[must_use]
    pub const fn of(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            primary: false,
        }
    }

    /// A hint for a primary-key column.
    #[must_use]
    pub const fn primary_key(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            primary: true,
        }
    }

    /// Whether string values must be rendered as bare integers.
    ///
    /// True for integer columns and for primary keys whose type is not
    /// textual.
    #[must_use]
    pub const fn wants_integer(self) -> bool {
        matches!(self.logical_type, LogicalType::Integer)
            || (self.primary && !self.logical_type.is_textual())
    }
}

impl From<LogicalType> for ColumnHint {
    fn from(logical_type: LogicalType) -> Self {
        Self::of(logical_type)
    }
}
