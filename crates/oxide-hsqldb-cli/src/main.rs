//! oxide-hsqldb CLI
//!
//! Offline companion for the HSQLDB dialect layer: previews DDL, rewrites
//! paginated queries and turns `.script` files into replayable dumps.

mod connection;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_hsqldb::prelude::*;

use crate::connection::{DryRunConnection, ScriptFileConnection};

/// HSQLDB dialect tool.
#[derive(Parser)]
#[command(name = "oxide-hsqldb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Driver family (hsqldb or h2), or a JDBC URL / adapter name to detect it from.
    #[arg(short, long, env = "HSQLDB_DRIVER", default_value = "hsqldb")]
    driver: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the native type catalog as JSON.
    Types,

    /// Render the SQL type for a logical type.
    TypeSql {
        /// Logical type (e.g. string, integer, decimal).
        logical_type: LogicalType,

        /// Column limit.
        #[arg(short, long)]
        limit: Option<u32>,

        /// Decimal precision.
        #[arg(short, long)]
        precision: Option<u32>,

        /// Decimal scale (requires precision).
        #[arg(short, long, requires = "precision")]
        scale: Option<u32>,
    },

    /// Show how a driver-reported column type is interpreted.
    Column {
        /// Driver type string, e.g. "TINYINT(1)".
        sql_type: String,

        /// Limit reported by the driver.
        #[arg(short, long)]
        limit: Option<u32>,

        /// Raw default as reported by the driver.
        #[arg(long)]
        default: Option<String>,

        /// Use the generic rules instead of the HSQLDB ones.
        #[arg(long)]
        generic: bool,
    },

    /// Rewrite a SELECT with HSQLDB row limiting.
    Paginate {
        /// The SELECT statement.
        sql: String,

        /// Maximum rows.
        #[arg(short, long)]
        limit: Option<u64>,

        /// Rows to skip.
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Print DDL for a schema change without executing it.
    Ddl {
        #[command(subcommand)]
        change: DdlCommand,
    },

    /// List user tables defined in a .script file.
    Tables {
        /// HSQLDB .script file.
        script: PathBuf,
    },

    /// Produce a replayable structure dump from a .script file.
    Dump {
        /// HSQLDB .script file.
        script: PathBuf,

        /// Write the dump here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the statements a structure dump replays, in order.
    Load {
        /// Dump file produced by `dump`.
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum DdlCommand {
    /// ALTER TABLE .. ADD.
    AddColumn {
        table: String,
        column: String,
        logical_type: LogicalType,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(short, long)]
        precision: Option<u32>,
        #[arg(short, long, requires = "precision")]
        scale: Option<u32>,
        /// Default value.
        #[arg(long)]
        default: Option<String>,
        /// Add NOT NULL.
        #[arg(long)]
        not_null: bool,
    },

    /// ALTER TABLE .. ALTER COLUMN .. <type>.
    ChangeColumn {
        table: String,
        column: String,
        logical_type: LogicalType,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(short, long)]
        precision: Option<u32>,
        #[arg(short, long, requires = "precision")]
        scale: Option<u32>,
    },

    /// ALTER TABLE .. ALTER COLUMN .. SET DEFAULT.
    ChangeDefault {
        table: String,
        column: String,
        /// New default; omit for NULL.
        value: Option<String>,
    },

    /// ALTER TABLE .. ALTER COLUMN .. RENAME TO.
    RenameColumn {
        table: String,
        column: String,
        new_name: String,
    },

    /// ALTER TABLE .. RENAME TO.
    RenameTable { table: String, new_name: String },

    /// DROP INDEX, by name or by the indexed columns.
    RemoveIndex {
        table: String,
        #[arg(short, long, conflicts_with = "columns")]
        name: Option<String>,
        #[arg(short, long = "column", required_unless_present = "name")]
        columns: Vec<String>,
    },
}

fn column_options(
    limit: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> ColumnOptions {
    ColumnOptions {
        limit,
        precision,
        scale,
        ..ColumnOptions::default()
    }
}

fn run_ddl(config: AdapterConfig, change: DdlCommand) -> Result<()> {
    let mut adapter = HsqldbAdapter::new(DryRunConnection::new(), config);
    match change {
        DdlCommand::AddColumn {
            table,
            column,
            logical_type,
            limit,
            precision,
            scale,
            default,
            not_null,
        } => {
            let mut options = column_options(limit, precision, scale);
            if let Some(default) = default {
                options = options.default_value(default);
            }
            if not_null {
                options = options.not_null();
            }
            adapter.add_column(&table, &column, logical_type, &options)
        }
        DdlCommand::ChangeColumn {
            table,
            column,
            logical_type,
            limit,
            precision,
            scale,
        } => adapter.change_column(
            &table,
            &column,
            logical_type,
            &column_options(limit, precision, scale),
        ),
        DdlCommand::ChangeDefault {
            table,
            column,
            value,
        } => adapter.change_column_default(&table, &column, &Value::from(value)),
        DdlCommand::RenameColumn {
            table,
            column,
            new_name,
        } => adapter.rename_column(&table, &column, &new_name),
        DdlCommand::RenameTable { table, new_name } => adapter.rename_table(&table, &new_name),
        DdlCommand::RemoveIndex {
            table,
            name,
            columns,
        } => {
            let target = name.map_or(IndexTarget::Columns(columns), IndexTarget::Name);
            adapter.remove_index(&table, &target)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let driver: Driver = cli.driver.parse()?;
    let config = AdapterConfig::default().adapter(cli.driver.clone());
    info!(driver = %driver, "Using driver");

    match cli.command {
        Commands::Types => {
            println!("{}", serde_json::to_string_pretty(native_database_types())?);
        }

        Commands::TypeSql {
            logical_type,
            limit,
            precision,
            scale,
        } => {
            let options = column_options(limit, precision, scale);
            println!("{}", ddl::type_to_sql(driver, logical_type, &options)?);
        }

        Commands::Column {
            sql_type,
            limit,
            default,
            generic,
        } => {
            let mut raw = RawColumnDescriptor::new("column", sql_type);
            raw.declared_limit = limit;
            raw.default_raw = default;
            let dialect = if generic {
                ColumnDialect::Generic
            } else {
                config.column_dialect()
            };
            let column = Column::new(dialect, &raw);
            println!("{}", serde_json::to_string_pretty(&column)?);
        }

        Commands::Paginate { sql, limit, offset } => {
            println!("{}", add_limit_offset(&sql, limit, offset));
        }

        Commands::Ddl { change } => run_ddl(config, change)?,

        Commands::Tables { script } => {
            let conn = ScriptFileConnection::open(&script)?;
            let mut adapter = HsqldbAdapter::new(conn, config);
            for table in adapter.tables()? {
                println!("{table}");
            }
        }

        Commands::Dump { script, output } => {
            let conn = ScriptFileConnection::open(&script)?;
            let mut adapter = HsqldbAdapter::new(conn, config);
            let dump = adapter.structure_dump()?;
            match output {
                Some(path) => {
                    fs::write(&path, format!("{dump}\n"))?;
                    info!("Wrote structure dump: {}", path.display());
                }
                None => println!("{dump}"),
            }
        }

        Commands::Load { file } => {
            let script = fs::read_to_string(&file)?;
            let mut adapter = HsqldbAdapter::new(DryRunConnection::new(), config);
            info!("Dry run mode - SQL will be printed but not executed.");
            adapter.structure_load(&script)?;
            info!(
                statements = adapter.connection().statements.len(),
                "Dry run complete"
            );
        }
    }

    Ok(())
}
