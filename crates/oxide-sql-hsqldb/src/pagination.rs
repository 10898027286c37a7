//! `LIMIT`/`OFFSET` emulation.
//!
//! HSQLDB's row limiting goes right after the `SELECT` keyword:
//! `SELECT LIMIT <offset> <count> ...`, where a count of `0` means no
//! upper bound.

use std::borrow::Cow;

const SELECT: &str = "select";

/// Returns the part of `sql` after a leading `SELECT` keyword, minus one
/// separating whitespace character if there is one. `None` if `sql` does
/// not start with the keyword.
fn after_select(sql: &str) -> Option<&str> {
    let keyword = sql.get(..SELECT.len())?;
    if !keyword.eq_ignore_ascii_case(SELECT) {
        return None;
    }
    let rest = &sql[SELECT.len()..];
    match rest.as_bytes().first() {
        None => Some(rest),
        Some(b) if b.is_ascii_whitespace() => Some(&rest[1..]),
        Some(&b) if is_identifier_byte(b) => None,
        Some(_) => Some(rest),
    }
}

const fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || !b.is_ascii()
}

/// Injects HSQLDB row limiting into a `SELECT` statement.
///
/// Statements that are not `SELECT`s, and `SELECT`s with neither a limit
/// nor a positive offset, are returned unchanged. Everything after the
/// keyword is kept byte for byte.
///
/// ```
/// use oxide_sql_hsqldb::pagination::add_limit_offset;
///
/// assert_eq!(
///     add_limit_offset("SELECT * FROM t", Some(10), 5),
///     "SELECT LIMIT 5 10 * FROM t"
/// );
/// assert_eq!(add_limit_offset("SELECT * FROM t", None, 0), "SELECT * FROM t");
/// ```
#[must_use]
pub fn add_limit_offset(sql: &str, limit: Option<u64>, offset: u64) -> Cow<'_, str> {
    let Some(rest) = after_select(sql) else {
        return Cow::Borrowed(sql);
    };

    match limit {
        Some(limit) => Cow::Owned(format!("SELECT LIMIT {offset} {limit} {rest}")),
        None if offset > 0 => Cow::Owned(format!("SELECT LIMIT {offset} 0 {rest}")),
        None => Cow::Borrowed(sql),
    }
}
