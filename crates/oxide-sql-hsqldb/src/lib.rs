//! # oxide-sql-hsqldb
//!
//! HSQLDB (HyperSQL) dialect layer for the oxide-sql migration stack.
//!
//! # How HSQLDB differs from other dialects
//!
//! - **Type limits**: the JDBC driver misreports sizes for fixed-width
//!   types (`TINYINT` comes back as 255 wide) and reports `LONGVARCHAR(0)`
//!   for unbounded text. [`inference`] re-derives limits from the type name.
//! - **Identity columns**: primary keys are declared inline as
//!   `integer GENERATED BY DEFAULT AS IDENTITY(START WITH 0) PRIMARY KEY`,
//!   and the generated value is read back with `CALL IDENTITY()`.
//! - **Pagination**: no `LIMIT .. OFFSET`; instead
//!   `SELECT LIMIT <offset> <count> ...` with `0` meaning "no upper bound".
//! - **Identifiers**: unquoted names fold to upper case, so a quoted name
//!   must be upper-cased by hand to stay resolvable.
//! - **Schema dumps**: the `SCRIPT` command returns the full DDL of the
//!   database, including bootstrap statements that must not be replayed.
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_hsqldb::prelude::*;
//!
//! let sql = ddl::add_column(
//!     Driver::Hsqldb,
//!     "users",
//!     "nickname",
//!     LogicalType::String,
//!     &ColumnOptions::new().limit(40).default_value("anon").not_null(),
//! )
//! .unwrap();
//! assert_eq!(
//!     sql,
//!     "ALTER TABLE users ADD nickname varchar(40) DEFAULT 'anon' NOT NULL"
//! );
//!
//! let paged = add_limit_offset("SELECT * FROM users", Some(10), 20);
//! assert_eq!(paged, "SELECT LIMIT 20 10 * FROM users");
//! ```

pub mod adapter;
pub mod column;
pub mod config;
pub mod connection;
pub mod ddl;
pub mod error;
pub mod inference;
pub mod pagination;
pub mod quoting;
pub mod structure;
pub mod types;
pub mod value;

pub use adapter::{HsqldbAdapter, StatementResult, ADAPTER_NAME};
pub use column::{Column, RawColumnDescriptor};
pub use config::{AdapterConfig, ColumnDialect, Driver};
pub use connection::{Connection, Row};
pub use error::{DriverError, HsqldbError, Result};
pub use types::{LogicalType, NativeTypeSpec};
pub use value::{ColumnHint, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapter::{is_insert, HsqldbAdapter, StatementResult};
    pub use crate::column::{Column, RawColumnDescriptor};
    pub use crate::config::{AdapterConfig, ColumnDialect, Driver};
    pub use crate::connection::{Connection, Row};
    pub use crate::ddl::{self, ColumnOptions, IndexTarget};
    pub use crate::error::{DriverError, HsqldbError, Result};
    pub use crate::inference::{classify, correct, strip_literal_quotes, CorrectedColumnInfo};
    pub use crate::pagination::add_limit_offset;
    pub use crate::quoting::{quote, quote_identifier};
    pub use crate::types::{lookup, native_database_types, LogicalType, NativeTypeSpec};
    pub use crate::value::{ColumnHint, Value};
}
