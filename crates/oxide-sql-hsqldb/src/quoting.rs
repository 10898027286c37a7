//! Literal and identifier quoting.
//!
//! Every string that ends up inside a statement passes through here, so
//! embedded quotes are always doubled and a value can never close the
//! literal it is placed in.

use std::fmt::Write;

use chrono::Timelike;

use crate::error::{HsqldbError, Result};
use crate::types::LogicalType;
use crate::value::{ColumnHint, Value};

/// Renders a value as an HSQLDB literal.
///
/// - `PreQuoted` values are emitted verbatim.
/// - Text for a `binary` column becomes a hex blob `X'..'`.
/// - Text for an integer column (or a non-textual primary key) is parsed
///   and emitted as bare digits.
/// - Timestamps for a `time` column become `'HH:MM:SS'`.
/// - Everything else uses [`quote_generic`].
///
/// # Errors
///
/// Returns [`HsqldbError::TypeCoercion`] if text bound for an integer
/// column is not an integer, or for a non-finite float.
pub fn quote(value: &Value, hint: Option<ColumnHint>) -> Result<String> {
    match (value, hint) {
        (Value::PreQuoted(sql), _) => Ok(sql.clone()),
        (Value::Text(s), Some(h)) if h.logical_type == LogicalType::Binary => {
            Ok(hex_literal(s.as_bytes()))
        }
        (Value::Text(s), Some(h)) if h.wants_integer() => {
            let n: i64 = s.trim().parse().map_err(|_| HsqldbError::TypeCoercion {
                value: s.clone(),
                target: "integer",
            })?;
            Ok(n.to_string())
        }
        (Value::Timestamp(ts), Some(h)) if h.logical_type == LogicalType::Time => Ok(format!(
            "'{:02}:{:02}:{:02}'",
            ts.hour(),
            ts.minute(),
            ts.second()
        )),
        _ => quote_generic(value),
    }
}

/// Renders a value without any column-specific treatment.
///
/// # Errors
///
/// Returns [`HsqldbError::TypeCoercion`] for NaN and infinite floats, which
/// have no HSQLDB literal.
pub fn quote_generic(value: &Value) -> Result<String> {
    let sql = match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(f) => {
            return Err(HsqldbError::TypeCoercion {
                value: f.to_string(),
                target: "float",
            })
        }
        Value::Text(s) => format!("'{}'", quote_string(s)),
        Value::Bytes(b) => hex_literal(b),
        Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Value::Time(t) => format!("'{}'", t.format("%H:%M:%S")),
        Value::Timestamp(ts) => {
            if ts.nanosecond() == 0 {
                format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S"))
            } else {
                format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.6f"))
            }
        }
        Value::PreQuoted(sql) => sql.clone(),
    };
    Ok(sql)
}

/// Escapes a string for use between single quotes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    s.replace('\'', "''")
}

fn hex_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 3);
    out.push_str("X'");
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out.push('\'');
    out
}

/// Quotes a column, table or index name.
///
/// HSQLDB folds unquoted identifiers to upper case, so a name that needs
/// quoting (one containing a hyphen) is also upper-cased to stay
/// resolvable, with embedded double quotes doubled. All other names are
/// returned unchanged.
///
/// ```
/// use oxide_sql_hsqldb::quoting::quote_identifier;
///
/// assert_eq!(quote_identifier("first-name"), "\"FIRST-NAME\"");
/// assert_eq!(quote_identifier("firstname"), "firstname");
/// ```
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if name.contains('-') {
        format!("\"{}\"", name.to_uppercase().replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// Quotes a table name. Tables follow the same rules as columns.
#[must_use]
pub fn quote_table_name(name: &str) -> String {
    quote_identifier(name)
}
