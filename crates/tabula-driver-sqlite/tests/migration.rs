use pretty_assertions::assert_eq;
use tabula_core::{
    driver::Connection as _,
    schema::{Column, Schema, Table, TypeTag},
    Error, Result,
};
use tabula_driver_sqlite::{Connection, ConnectionConfig, Sqlite};
use tabula_sql::{MigrationOutcome, MigrationReport, Migrator, Renderer};

/// Forwards to a real connection, failing statements that start with a
/// prefix.
struct FailOn<'a> {
    inner: &'a mut Connection,
    prefix: &'static str,
}

impl tabula_core::driver::Connection for FailOn<'_> {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        if sql.starts_with(self.prefix) {
            return Err(Error::statement_execution(
                sql,
                None,
                std::io::Error::other("injected failure"),
            ));
        }
        self.inner.execute(sql)
    }

    fn table_definition(&mut self, table: &str) -> Result<Option<String>> {
        self.inner.table_definition(table)
    }

    fn count_rows(&mut self, table: &str) -> Result<u64> {
        self.inner.count_rows(table)
    }

    fn foreign_keys(&mut self) -> Result<bool> {
        self.inner.foreign_keys()
    }
}

fn connect() -> Connection {
    Sqlite::in_memory()
        .connect(&ConnectionConfig::default())
        .unwrap()
}

fn before() -> Table {
    Table::new("t")
        .column(Column::new("a", TypeTag::int()))
        .column(Column::new("b", TypeTag::text()))
}

fn after() -> Table {
    Table::new("t")
        .column(Column::new("a", TypeTag::int()))
        .column(Column::new("c", TypeTag::text()).default_value("z"))
}

fn seeded() -> Connection {
    let mut conn = connect();
    conn.push_schema(&Schema::new([before()])).unwrap();
    conn.execute("INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')")
        .unwrap();
    conn
}

fn migrate(conn: &mut dyn tabula_core::driver::Connection) -> Result<MigrationReport> {
    let schema = Schema::new([after()]);
    Migrator::new(Renderer::new(&schema)).migrate(conn, &before(), &after())
}

fn rows(conn: &mut Connection, sql: &str) -> Vec<Vec<Option<String>>> {
    conn.query_rows(sql).unwrap()
}

fn row(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

#[test]
fn keeps_common_columns_and_fills_new_ones() {
    let mut conn = seeded();

    let report = migrate(&mut conn).unwrap();

    assert_eq!(report.outcome, MigrationOutcome::Migrated);
    assert_eq!(report.restored_rows, 2);
    assert_eq!(report.plan.common_columns, ["a"]);

    assert_eq!(
        rows(&mut conn, "SELECT a, c FROM t ORDER BY a"),
        [row(&["1", "z"]), row(&["2", "z"])]
    );

    // `b` is gone, and so is the shadow.
    assert!(conn.query_rows("SELECT b FROM t").is_err());
    assert!(!conn.table_exists("zzz_temp_t").unwrap());
    assert!(conn.foreign_keys().unwrap());
}

#[test]
fn create_table_is_idempotent() {
    let mut conn = connect();
    let schema = Schema::new([after()]);
    let sql = Renderer::new(&schema).render_table(&after()).unwrap();

    conn.execute(&sql).unwrap();
    let definition = conn.table_definition("t").unwrap();
    conn.execute(&sql).unwrap();

    assert_eq!(conn.table_definition("t").unwrap(), definition);
    assert!(definition.unwrap().contains("c TEXT NULL DEFAULT 'z'"));
}

#[test]
fn failed_copy_leaves_live_table_unchanged() {
    let mut conn = seeded();
    let definition = conn.table_definition("t").unwrap();

    let err = migrate(&mut FailOn {
        inner: &mut conn,
        prefix: "INSERT INTO zzz_temp_t",
    })
    .unwrap_err();

    assert!(err.is_migration_failed());
    assert!(err.is_statement_execution());

    assert_eq!(conn.table_definition("t").unwrap(), definition);
    assert_eq!(
        rows(&mut conn, "SELECT a, b FROM t ORDER BY a"),
        [row(&["1", "x"]), row(&["2", "y"])]
    );
    assert!(!conn.table_exists("zzz_temp_t").unwrap());
    assert!(conn.foreign_keys().unwrap());
}

#[test]
fn failed_restore_is_resumed() {
    let mut conn = seeded();

    let err = migrate(&mut FailOn {
        inner: &mut conn,
        prefix: "INSERT INTO t ",
    })
    .unwrap_err();
    assert!(err.is_migration_failed());

    // The rows only survive in the shadow table.
    assert_eq!(conn.count_rows("t").unwrap(), 0);
    assert_eq!(conn.count_rows("zzz_temp_t").unwrap(), 2);
    assert!(conn.foreign_keys().unwrap());

    let report = migrate(&mut conn).unwrap();

    assert_eq!(report.outcome, MigrationOutcome::Resumed);
    assert_eq!(
        rows(&mut conn, "SELECT a, c FROM t ORDER BY a"),
        [row(&["1", "z"]), row(&["2", "z"])]
    );
    assert!(!conn.table_exists("zzz_temp_t").unwrap());
}

#[test]
fn migrating_twice_is_harmless() {
    let mut conn = seeded();

    migrate(&mut conn).unwrap();
    let definition = conn.table_definition("t").unwrap();

    let schema = Schema::new([after()]);
    let report = Migrator::new(Renderer::new(&schema))
        .migrate(&mut conn, &after(), &after())
        .unwrap();

    assert_eq!(report.plan.common_columns, ["a", "c"]);
    assert_eq!(conn.table_definition("t").unwrap(), definition);
    assert_eq!(conn.count_rows("t").unwrap(), 2);
}

#[test]
fn referencing_rows_survive_migration_of_the_referenced_table() {
    let users = Table::new("users")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(Column::new("name", TypeTag::string()).max_length(32));
    let posts = Table::new("posts")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(
            Column::new("author", TypeTag::object())
                .references("users")
                .not_null(true),
        );

    let schema = Schema::new([users.clone(), posts]);
    let mut conn = connect();
    conn.push_schema(&schema).unwrap();
    conn.execute("INSERT INTO users (name) VALUES ('ann')").unwrap();
    let user = conn.last_insert_id();
    conn.execute(&format!("INSERT INTO posts (author) VALUES ({user})"))
        .unwrap();

    let next = users
        .clone()
        .column(Column::new("active", TypeTag::bool()).default_value("1"));
    let next_schema = Schema::new([next.clone()]);

    Migrator::new(Renderer::new(&next_schema))
        .migrate(&mut conn, &users, &next)
        .unwrap();

    assert_eq!(
        rows(
            &mut conn,
            "SELECT users.name, users.active FROM posts JOIN users ON users.id = posts.author"
        ),
        [row(&["ann", "1"])]
    );
    assert!(conn.foreign_keys().unwrap());
}

#[test]
fn rows_written_after_a_failed_shadow_drop_are_kept() {
    let mut conn = seeded();

    let err = migrate(&mut FailOn {
        inner: &mut conn,
        prefix: "DROP TABLE zzz_temp_t",
    })
    .unwrap_err();
    assert!(err.to_string().contains("drop-shadow"));

    // The live table is already migrated and keeps taking writes.
    conn.execute("INSERT INTO t (a, c) VALUES (3, 'new')").unwrap();

    let err = migrate(&mut conn).unwrap_err();
    assert!(err.is_migration_failed());
    assert!(err.to_string().contains("zzz_temp_t"));

    assert_eq!(
        rows(&mut conn, "SELECT a, c FROM t ORDER BY a"),
        [row(&["1", "z"]), row(&["2", "z"]), row(&["3", "new"])]
    );
    assert_eq!(conn.count_rows("zzz_temp_t").unwrap(), 2);
    assert!(conn.foreign_keys().unwrap());

    // Once the leftover shadow is cleared by hand, migrating works again.
    conn.drop_table("zzz_temp_t").unwrap();
    let report = migrate(&mut conn).unwrap();

    assert_eq!(report.outcome, MigrationOutcome::Migrated);
    assert_eq!(report.restored_rows, 3);
}

#[test]
fn relation_dropped_with_its_target_table() {
    let users = Table::new("users")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true));
    let posts = Table::new("posts")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true))
        .column(Column::new("author", TypeTag::object()).references("users"));

    let mut conn = connect();
    conn.push_schema(&Schema::new([users, posts.clone()])).unwrap();
    conn.execute("INSERT INTO users DEFAULT VALUES").unwrap();
    conn.execute("INSERT INTO posts (author) VALUES (1), (1)")
        .unwrap();

    let next = Table::new("posts")
        .column(Column::new("id", TypeTag::auto_inc()).primary_key(true));
    let next_schema = Schema::new([next.clone()]);

    let report = Migrator::new(Renderer::new(&next_schema))
        .migrate(&mut conn, &posts, &next)
        .unwrap();

    assert_eq!(report.plan.common_columns, ["id"]);
    assert_eq!(report.restored_rows, 2);
    assert!(conn.query_rows("SELECT author FROM posts").is_err());
}
