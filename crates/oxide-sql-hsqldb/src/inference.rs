//! Limit repair and type classification for introspected columns.
//!
//! The HSQLDB JDBC driver reports wrong size limits for most fixed-width
//! types, so limits are re-derived from the type name. Both the limit rules
//! and the classification rules are ordered tables: the first matching
//! entry wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::LogicalType;

/// A raw type name with its repaired limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectedColumnInfo {
    /// Lower-case canonical type name (e.g. `tinyint`).
    pub canonical_sql_type: String,
    /// Size limit, or `None` for unbounded.
    pub limit: Option<u32>,
}

/// How a rule matches a lower-cased type name.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    Prefix(&'static str),
    Contains(&'static str),
}

impl Pattern {
    fn matches(self, lower: &str) -> bool {
        match self {
            Self::Prefix(p) => lower.starts_with(p),
            Self::Contains(p) => lower.contains(p),
        }
    }
}

/// Limit repair table: `(prefix, limit)`. The prefix is also the canonical
/// type name. `timestamp` must precede `time`.
const LIMIT_RULES: &[(&str, Option<u32>)] = &[
    ("tinyint", Some(1)),
    ("smallint", Some(2)),
    ("bigint", Some(8)),
    ("double", Some(8)),
    ("real", Some(8)),
    ("integer", Some(4)),
    ("float", Some(8)),
    ("decimal", None),
    ("datetime", None),
    ("timestamp", None),
    ("time", None),
    ("date", None),
];

/// HSQLDB classification table. `int` must come after the prefix rules
/// for character types and before the floating point rules.
const CLASSIFY_RULES: &[(Pattern, LogicalType)] = &[
    (Pattern::Prefix("nvarchar"), LogicalType::String),
    (Pattern::Prefix("character"), LogicalType::String),
    (Pattern::Prefix("longvarchar"), LogicalType::Text),
    (Pattern::Contains("int"), LogicalType::Integer),
    (Pattern::Contains("real"), LogicalType::Float),
    (Pattern::Contains("double"), LogicalType::Float),
    (Pattern::Prefix("bit"), LogicalType::Boolean),
    (Pattern::Contains("binary"), LogicalType::Binary),
];

/// Outcome of a generic classification rule.
#[derive(Debug, Clone, Copy)]
enum Generic {
    Type(LogicalType),
    /// Integer when the declared scale is zero, decimal otherwise.
    ExactNumeric,
}

/// The host framework's default classifier, used when no HSQLDB rule
/// matches.
const GENERIC_RULES: &[(&[&str], Generic)] = &[
    (&["int"], Generic::Type(LogicalType::Integer)),
    (&["float", "double"], Generic::Type(LogicalType::Float)),
    (&["decimal", "numeric", "number"], Generic::ExactNumeric),
    (&["datetime"], Generic::Type(LogicalType::Datetime)),
    (&["timestamp"], Generic::Type(LogicalType::Timestamp)),
    (&["time"], Generic::Type(LogicalType::Time)),
    (&["date"], Generic::Type(LogicalType::Date)),
    (&["clob", "text"], Generic::Type(LogicalType::Text)),
    (&["blob", "binary"], Generic::Type(LogicalType::Binary)),
    (&["char", "string"], Generic::Type(LogicalType::String)),
    (&["boolean"], Generic::Type(LogicalType::Boolean)),
];

static EXACT_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:numeric|decimal|number)\((\d+)(?:,\s*(\d+))?\)")
        .expect("static regex is valid")
});

/// Repairs the limit of a driver-reported type.
///
/// Known fixed-width types get their byte width regardless of what the
/// driver said. Anything else keeps the driver limit, except that a
/// `(0)` suffix means "no limit" (HSQLDB reports `LONGVARCHAR(0)` for
/// unbounded text).
///
/// ```
/// use oxide_sql_hsqldb::inference::correct;
///
/// assert_eq!(correct("TINYINT(1)", Some(255)).limit, Some(1));
/// assert_eq!(correct("LONGVARCHAR(0)", Some(0)).limit, None);
/// ```
#[must_use]
pub fn correct(raw_sql_type: &str, driver_limit: Option<u32>) -> CorrectedColumnInfo {
    let lower = raw_sql_type.to_ascii_lowercase();

    if let Some(&(name, limit)) = LIMIT_RULES.iter().find(|(p, _)| lower.starts_with(p)) {
        return CorrectedColumnInfo {
            canonical_sql_type: name.to_string(),
            limit,
        };
    }

    let limit = if lower.ends_with("(0)") {
        None
    } else {
        driver_limit
    };
    CorrectedColumnInfo {
        canonical_sql_type: lower,
        limit,
    }
}

/// Classifies a raw HSQLDB type name into a logical type.
///
/// Falls back to [`classify_generic`] when no HSQLDB rule matches.
#[must_use]
pub fn classify(raw_sql_type: &str) -> LogicalType {
    let lower = raw_sql_type.to_ascii_lowercase();
    CLASSIFY_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(&lower))
        .map_or_else(|| classify_generic(raw_sql_type), |&(_, t)| t)
}

/// Classifies a raw type name with the framework's generic rules.
///
/// Unrecognized names map to [`LogicalType::Other`].
#[must_use]
pub fn classify_generic(raw_sql_type: &str) -> LogicalType {
    let lower = raw_sql_type.to_ascii_lowercase();
    let rule = GENERIC_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)));

    match rule {
        Some((_, Generic::Type(t))) => *t,
        Some((_, Generic::ExactNumeric)) => {
            if extract_scale(raw_sql_type) == Some(0) {
                LogicalType::Integer
            } else {
                LogicalType::Decimal
            }
        }
        None => LogicalType::Other,
    }
}

/// Extracts the precision of a `DECIMAL(p[,s])`-style type.
#[must_use]
pub fn extract_precision(raw_sql_type: &str) -> Option<u32> {
    EXACT_NUMERIC
        .captures(raw_sql_type)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extracts the scale of a `DECIMAL(p[,s])`-style type.
///
/// A precision without scale means a scale of zero.
#[must_use]
pub fn extract_scale(raw_sql_type: &str) -> Option<u32> {
    let captures = EXACT_NUMERIC.captures(raw_sql_type)?;
    match captures.get(2) {
        Some(scale) => scale.as_str().parse().ok(),
        None => Some(0),
    }
}

/// Removes the single quotes the driver leaves around string defaults.
///
/// ```
/// use oxide_sql_hsqldb::inference::strip_literal_quotes;
///
/// assert_eq!(strip_literal_quotes("'hello'"), "hello");
/// assert_eq!(strip_literal_quotes("42"), "42");
/// ```
#[must_use]
pub fn strip_literal_quotes(default_value: &str) -> &str {
    default_value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(default_value)
}
