use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use tabula_core::{
    driver::Connection,
    schema::{Column, Schema, Table, TypeTag},
    Error, Result,
};
use tabula_sql::{MigrationConfig, MigrationOutcome, Migrator, Renderer};

/// Records executed statements and keeps just enough table state for the
/// migrator's queries.
#[derive(Debug, Default)]
struct ExecLog {
    executed: Vec<String>,
    tables: BTreeMap<String, FakeTable>,
    foreign_keys: bool,
    fail_on: Option<&'static str>,
    unreadable: Option<&'static str>,
    fail_foreign_keys: bool,
}

#[derive(Debug)]
struct FakeTable {
    definition: String,
    rows: u64,
}

impl ExecLog {
    fn new() -> ExecLog {
        ExecLog {
            foreign_keys: true,
            ..ExecLog::default()
        }
    }

    fn table(mut self, definition: &str, rows: u64) -> ExecLog {
        let name = definition.split_whitespace().nth(2).unwrap();
        self.tables.insert(
            name.to_string(),
            FakeTable {
                definition: definition.to_string(),
                rows,
            },
        );
        self
    }

    /// Fails every statement starting with `prefix`.
    fn fail_on(mut self, prefix: &'static str) -> ExecLog {
        self.fail_on = Some(prefix);
        self
    }

    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.executed)
    }

    fn failure(sql: &str, message: &str) -> Error {
        Error::statement_execution(sql, Some(1), std::io::Error::other(message.to_string()))
    }
}

impl Connection for ExecLog {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        self.executed.push(sql.to_string());

        if self.fail_on.is_some_and(|prefix| sql.starts_with(prefix)) {
            return Err(ExecLog::failure(sql, "simulated failure"));
        }

        let words: Vec<_> = sql
            .split(|ch: char| ch.is_whitespace() || ch == '(')
            .filter(|word| !word.is_empty())
            .collect();

        match words.as_slice() {
            ["PRAGMA", "foreign_keys", "=", value] => self.foreign_keys = *value == "ON",
            ["CREATE", "TABLE", "IF", "NOT", "EXISTS", name, ..] => {
                self.tables
                    .entry(name.to_string())
                    .or_insert_with(|| FakeTable {
                        definition: sql.to_string(),
                        rows: 0,
                    });
            }
            ["CREATE", "TABLE", name, ..] => {
                if self.tables.contains_key(*name) {
                    return Err(ExecLog::failure(sql, "table already exists"));
                }
                self.tables.insert(
                    name.to_string(),
                    FakeTable {
                        definition: sql.to_string(),
                        rows: 0,
                    },
                );
            }
            ["DROP", "TABLE", "IF", "EXISTS", name] => {
                self.tables.remove(*name);
            }
            ["DROP", "TABLE", name] => {
                if self.tables.remove(*name).is_none() {
                    return Err(ExecLog::failure(sql, "no such table"));
                }
            }
            ["INSERT", "INTO", target, .., "FROM", source] => {
                let rows = self.count_rows(source)?;
                let Some(target) = self.tables.get_mut(*target) else {
                    return Err(ExecLog::failure(sql, "no such table"));
                };
                target.rows += rows;
                return Ok(rows as usize);
            }
            _ => panic!("unexpected statement: {sql}"),
        }

        Ok(0)
    }

    fn table_definition(&mut self, table: &str) -> Result<Option<String>> {
        if self.unreadable == Some(table) {
            return Err(ExecLog::failure(table, "disk I/O error"));
        }
        Ok(self.tables.get(table).map(|t| t.definition.clone()))
    }

    fn count_rows(&mut self, table: &str) -> Result<u64> {
        self.tables
            .get(table)
            .map(|t| t.rows)
            .ok_or_else(|| ExecLog::failure(table, "no such table"))
    }

    fn foreign_keys(&mut self) -> Result<bool> {
        if self.fail_foreign_keys {
            return Err(ExecLog::failure("PRAGMA foreign_keys", "database is locked"));
        }
        Ok(self.foreign_keys)
    }
}

const USERS_DDL: &str =
    "CREATE TABLE users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(32) NULL, legacy TEXT NULL)";

const NEW_USERS_DDL: &str = "CREATE TABLE IF NOT EXISTS users (\n\
                             id INTEGER PRIMARY KEY NOT NULL,\n\
                             name VARCHAR(64) NULL,\n\
                             email VARCHAR NULL DEFAULT ''\n\
                             )";

/// `users` as the database reports it after a completed rebuild.
const MIGRATED_USERS_DDL: &str =
    "CREATE TABLE users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(64) NULL, email VARCHAR NULL DEFAULT '')";

fn previous() -> Table {
    Table::new("users")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(Column::new("name", TypeTag::string()).max_length(32))
        .column(Column::new("legacy", TypeTag::text()))
}

fn next() -> Table {
    Table::new("users")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(Column::new("name", TypeTag::string()).max_length(64))
        .column(Column::new("avatar", TypeTag::files()))
        .column(Column::new("email", TypeTag::string()).default_value(""))
}

fn migrate(conn: &mut ExecLog, config: MigrationConfig) -> Result<tabula_sql::MigrationReport> {
    let schema = Schema::new([next()]);
    Migrator::new(Renderer::new(&schema))
        .config(config)
        .migrate(conn, &previous(), &next())
}

#[test]
fn plan() {
    let schema = Schema::default();
    let plan = Migrator::new(Renderer::new(&schema))
        .plan(&previous(), &next())
        .unwrap();

    assert_eq!(plan.live, "users");
    assert_eq!(plan.shadow, "zzz_temp_users");
    assert_eq!(plan.common_columns, ["id", "name"]);
}

#[test]
fn shadow_copy_swap() {
    let mut conn = ExecLog::new().table(USERS_DDL, 2);

    let report = migrate(&mut conn, MigrationConfig::default()).unwrap();

    assert_eq!(
        conn.take(),
        [
            "PRAGMA foreign_keys = OFF",
            "CREATE TABLE zzz_temp_users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(32) NULL, legacy TEXT NULL)",
            "INSERT INTO zzz_temp_users SELECT * FROM users",
            "DROP TABLE users",
            NEW_USERS_DDL,
            "INSERT INTO users (id, name) SELECT id, name FROM zzz_temp_users",
            "DROP TABLE zzz_temp_users",
            "PRAGMA foreign_keys = ON",
        ]
    );

    assert_eq!(report.outcome, MigrationOutcome::Migrated);
    assert_eq!(report.restored_rows, 2);
    assert!(conn.foreign_keys);
    assert_eq!(conn.tables.keys().collect::<Vec<_>>(), ["users"]);
    assert_eq!(conn.tables["users"].definition, NEW_USERS_DDL);
}

#[test]
fn foreign_keys_left_off_when_they_were_off() {
    let mut conn = ExecLog::new().table(USERS_DDL, 0);
    conn.foreign_keys = false;

    migrate(&mut conn, MigrationConfig::default()).unwrap();

    let executed = conn.take();
    assert!(!executed.iter().any(|sql| sql.starts_with("PRAGMA")));
    assert!(!conn.foreign_keys);
}

#[test]
fn custom_shadow_prefix() {
    let mut conn = ExecLog::new().table(USERS_DDL, 1);

    let report = migrate(&mut conn, MigrationConfig::new().shadow_prefix("_old_")).unwrap();

    assert_eq!(report.plan.shadow, "_old_users");
    assert!(conn
        .take()
        .contains(&"INSERT INTO _old_users SELECT * FROM users".to_string()));
}

#[test]
fn missing_live_table_is_created() {
    let mut conn = ExecLog::new();

    let report = migrate(&mut conn, MigrationConfig::default()).unwrap();

    assert_eq!(conn.take(), [NEW_USERS_DDL]);
    assert_eq!(report.outcome, MigrationOutcome::Created);
    assert_eq!(report.restored_rows, 0);
}

#[test]
fn failed_copy_leaves_live_table_untouched() {
    let mut conn = ExecLog::new()
        .table(USERS_DDL, 2)
        .fail_on("INSERT INTO zzz_temp_users");

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();

    assert!(err.is_migration_failed());
    assert!(err.is_statement_execution());
    assert!(err.to_string().contains("copy-to-shadow"));

    assert_eq!(
        conn.take(),
        [
            "PRAGMA foreign_keys = OFF",
            "CREATE TABLE zzz_temp_users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(32) NULL, legacy TEXT NULL)",
            "INSERT INTO zzz_temp_users SELECT * FROM users",
            "DROP TABLE IF EXISTS zzz_temp_users",
            "PRAGMA foreign_keys = ON",
        ]
    );

    assert_eq!(conn.tables.keys().collect::<Vec<_>>(), ["users"]);
    assert_eq!(conn.tables["users"].definition, USERS_DDL);
    assert_eq!(conn.tables["users"].rows, 2);
    assert!(conn.foreign_keys);
}

#[test]
fn failed_restore_keeps_shadow_and_resumes() {
    let mut conn = ExecLog::new()
        .table(USERS_DDL, 2)
        .fail_on("INSERT INTO users");

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();
    assert!(err.is_migration_failed());
    assert!(err.to_string().contains("restore-data"));

    // The shadow holds the only copy of the rows.
    assert_eq!(conn.tables["zzz_temp_users"].rows, 2);
    assert_eq!(conn.tables["users"].rows, 0);
    assert!(conn.foreign_keys);
    conn.take();

    conn.fail_on = None;
    let report = migrate(&mut conn, MigrationConfig::default()).unwrap();

    assert_eq!(
        conn.take(),
        [
            "PRAGMA foreign_keys = OFF",
            "DROP TABLE IF EXISTS users",
            NEW_USERS_DDL,
            "INSERT INTO users (id, name) SELECT id, name FROM zzz_temp_users",
            "DROP TABLE zzz_temp_users",
            "PRAGMA foreign_keys = ON",
        ]
    );
    assert_eq!(report.outcome, MigrationOutcome::Resumed);
    assert_eq!(report.restored_rows, 2);
    assert_eq!(conn.tables["users"].rows, 2);
}

#[test]
fn empty_stale_shadow_is_dropped() {
    let mut conn = ExecLog::new()
        .table(USERS_DDL, 3)
        .table("CREATE TABLE zzz_temp_users (id INTEGER)", 0);

    let report = migrate(&mut conn, MigrationConfig::default()).unwrap();

    let executed = conn.take();
    assert_eq!(executed[0], "DROP TABLE zzz_temp_users");
    assert_eq!(executed[1], "PRAGMA foreign_keys = OFF");
    assert_eq!(report.outcome, MigrationOutcome::Migrated);
    assert_eq!(report.restored_rows, 3);
}

#[test]
fn unexpected_live_definition() {
    let mut conn = ExecLog::new();
    conn.tables.insert(
        "users".to_string(),
        FakeTable {
            definition: "CREATE VIEW users AS SELECT 1".to_string(),
            rows: 1,
        },
    );

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();

    assert!(err.is_invalid_statement());
    assert!(err.is_migration_failed());
    assert_eq!(
        conn.take(),
        [
            "PRAGMA foreign_keys = OFF",
            "DROP TABLE IF EXISTS zzz_temp_users",
            "PRAGMA foreign_keys = ON",
        ]
    );
}

#[test]
fn invalid_next_shape_touches_nothing() {
    let mut conn = ExecLog::new().table(USERS_DDL, 2);
    let broken = Table::new("users").column(Column::new("status", TypeTag::enumeration()));

    let schema = Schema::default();
    let err = Migrator::new(Renderer::new(&schema))
        .migrate(&mut conn, &previous(), &broken)
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(conn.take().is_empty());
}

#[test]
fn descriptors_of_different_tables() {
    let mut conn = ExecLog::new().table(USERS_DDL, 2);
    let schema = Schema::default();

    let err = Migrator::new(Renderer::new(&schema))
        .migrate(&mut conn, &previous(), &Table::new("accounts"))
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(conn.take().is_empty());
}

#[test]
fn plan_skips_references_of_dropped_columns() {
    let previous = Table::new("posts")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(Column::new("author", TypeTag::object()).references("users"))
        .column(Column::new("attachments", TypeTag::files()));
    let next = Table::new("posts")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true));

    // `users` is gone from the schema along with the relation.
    let schema = Schema::new([next.clone()]);
    let migrator = Migrator::new(Renderer::new(&schema));

    let plan = migrator.plan(&previous, &next).unwrap();
    assert_eq!(plan.common_columns, ["id"]);

    let mut conn = ExecLog::new().table(
        "CREATE TABLE posts (id INTEGER PRIMARY KEY NOT NULL, author INTEGER NULL)",
        4,
    );
    let report = migrator.migrate(&mut conn, &previous, &next).unwrap();

    assert_eq!(report.outcome, MigrationOutcome::Migrated);
    assert_eq!(report.restored_rows, 4);
    assert!(conn
        .take()
        .contains(&"INSERT INTO posts (id) SELECT id FROM zzz_temp_posts".to_string()));
}

#[test]
fn shadow_and_live_rows_are_never_merged() {
    let mut conn = ExecLog::new()
        .table(MIGRATED_USERS_DDL, 3)
        .table(
            "CREATE TABLE zzz_temp_users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(32) NULL, legacy TEXT NULL)",
            2,
        );

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();

    assert!(err.is_migration_failed());
    let message = err.to_string();
    assert!(message.contains("drop-stale-shadow"), "{message}");
    assert!(message.contains("`users` holds 3 rows"), "{message}");
    assert!(message.contains("`zzz_temp_users` holds 2 rows"), "{message}");

    assert!(conn.take().is_empty());
    assert_eq!(conn.tables["users"].rows, 3);
    assert_eq!(conn.tables["zzz_temp_users"].rows, 2);
}

#[test]
fn shadow_is_restored_into_empty_live_table() {
    let mut conn = ExecLog::new()
        .table(MIGRATED_USERS_DDL, 0)
        .table(
            "CREATE TABLE zzz_temp_users (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR(32) NULL, legacy TEXT NULL)",
            2,
        );

    let report = migrate(&mut conn, MigrationConfig::default()).unwrap();

    assert_eq!(report.outcome, MigrationOutcome::Resumed);
    assert_eq!(conn.tables["users"].rows, 2);
    assert!(!conn.tables.contains_key("zzz_temp_users"));
}

#[test]
fn failed_reads_name_the_table_and_step() {
    let mut conn = ExecLog::new().table(USERS_DDL, 2);
    conn.unreadable = Some("users");

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();
    assert!(err.is_migration_failed());
    assert!(err.is_statement_execution());
    assert!(err.to_string().contains("snapshot-shadow"));
    assert!(conn.take().is_empty());

    let mut conn = ExecLog::new().table(USERS_DDL, 2);
    conn.fail_foreign_keys = true;

    let err = migrate(&mut conn, MigrationConfig::default()).unwrap_err();
    assert!(err.is_migration_failed());
    assert!(err.to_string().contains("disable-foreign-keys"));
    assert!(conn.take().is_empty());
    assert_eq!(conn.tables["users"].rows, 2);
}
