//! Structure dump and load scripts.
//!
//! A dump is the output of HSQLDB's `SCRIPT` command minus the statements
//! that bootstrap a fresh database, joined with a blank line. Loading
//! splits on the same blank line and replays each statement.

use std::sync::LazyLock;

use regex::RegexSet;

/// Separator between statements in a dump.
pub const STATEMENT_SEPARATOR: &str = "\n\n";

/// Statements every new HSQLDB database creates on its own. Replaying them
/// into another database fails or clobbers its credentials.
///
/// Each pattern matches a whole statement, so data rows that merely mention
/// one of them are kept.
static BOOTSTRAP_STATEMENTS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^CREATE USER SA PASSWORD DIGEST '[^']*'$",
        r"(?i)^CREATE SCHEMA PUBLIC AUTHORIZATION DBA$",
        r"(?i)^GRANT DBA TO SA$",
    ])
    .expect("static regex set is valid")
});

/// Returns whether a statement is part of a new database's bootstrap.
#[must_use]
pub fn is_bootstrap_statement(sql: &str) -> bool {
    BOOTSTRAP_STATEMENTS.is_match(sql.trim())
}

/// Drops bootstrap statements and joins the rest into a dump.
#[must_use]
pub fn build_script<I, S>(commands: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    commands
        .into_iter()
        .map(|sql| sql.as_ref().to_string())
        .filter(|sql| !is_bootstrap_statement(sql))
        .collect::<Vec<_>>()
        .join(STATEMENT_SEPARATOR)
}

/// Splits a dump into its statements.
///
/// Blank fragments (from runs of empty lines or a trailing separator) are
/// skipped.
#[must_use]
pub fn split_script(script: &str) -> Vec<&str> {
    script
        .split(STATEMENT_SEPARATOR)
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: [&str; 6] = [
        "SET DATABASE SQL SIZE TRUE",
        "CREATE USER SA PASSWORD DIGEST 'd41d8cd98f00b204e9800998ecf8427e'",
        "CREATE SCHEMA PUBLIC AUTHORIZATION DBA",
        "CREATE MEMORY TABLE PUBLIC.USERS(ID INTEGER GENERATED BY DEFAULT AS IDENTITY(START WITH 0) NOT NULL PRIMARY KEY,NAME VARCHAR(255))",
        "ALTER TABLE PUBLIC.USERS ALTER COLUMN ID RESTART WITH 3",
        "GRANT DBA TO SA",
    ];

    #[test]
    fn test_bootstrap_detection() {
        assert!(is_bootstrap_statement(SCRIPT[1]));
        assert!(is_bootstrap_statement(SCRIPT[2]));
        assert!(is_bootstrap_statement(SCRIPT[5]));
        assert!(is_bootstrap_statement("grant dba to sa"));
        assert!(!is_bootstrap_statement(SCRIPT[0]));
        assert!(!is_bootstrap_statement("CREATE USER BOB PASSWORD 'x'"));
        assert!(!is_bootstrap_statement("GRANT SELECT ON USERS TO SA"));
        assert!(!is_bootstrap_statement("GRANT DBA TO SAM"));
        assert!(!is_bootstrap_statement("CREATE SCHEMA PUBLIC AUTHORIZATION DBA2"));
    }

    #[test]
    fn test_data_rows_mentioning_bootstrap_are_kept() {
        let commands = [
            "CREATE MEMORY TABLE PUBLIC.NOTES(ID INTEGER,BODY VARCHAR(255))",
            "INSERT INTO NOTES VALUES(1,'ops: run GRANT DBA TO SA on staging')",
            "INSERT INTO NOTES VALUES(2,'CREATE SCHEMA PUBLIC AUTHORIZATION DBA')",
            "INSERT INTO NOTES VALUES(3,'CREATE USER SA PASSWORD DIGEST ''x''')",
            "GRANT DBA TO SA",
        ];
        let script = build_script(commands);
        assert_eq!(split_script(&script), &commands[..4]);
    }

    #[test]
    fn test_build_script_filters_and_joins() {
        let script = build_script(SCRIPT);
        assert_eq!(
            script,
            format!("{}\n\n{}\n\n{}", SCRIPT[0], SCRIPT[3], SCRIPT[4])
        );
    }

    #[test]
    fn test_build_script_any_order() {
        let mut commands = SCRIPT.to_vec();
        commands.reverse();
        let script = build_script(&commands);
        assert!(!script.contains("DIGEST"));
        assert!(!script.contains("AUTHORIZATION DBA"));
        assert!(!script.contains("GRANT DBA"));
        assert_eq!(split_script(&script).len(), 3);
    }

    #[test]
    fn test_split_matches_join() {
        let statements = ["CREATE TABLE A(X INT)", "CREATE VIEW V AS\nSELECT X\nFROM A"];
        let script = build_script(statements);
        assert_eq!(split_script(&script), statements);
    }

    #[test]
    fn test_split_skips_blank_fragments() {
        assert_eq!(split_script("A\n\n\n\nB\n\n"), vec!["A", "B"]);
        assert!(split_script("").is_empty());
    }
}
