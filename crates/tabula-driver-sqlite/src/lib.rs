mod config;
pub use config::ConnectionConfig;

use rusqlite::{types::ValueRef, Connection as RusqliteConnection, OptionalExtension};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tabula_core::{
    driver::TransactionGuard,
    schema::{Schema, Table},
    Error, Result,
};
use tabula_sql::{quote, Renderer, Serializer, Statement};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else if url.path().is_empty() {
            Err(Error::invalid_connection_url(format!(
                "connection URL does not name a database file; url={url_str}"
            )))
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection and applies `config`.
    pub fn connect(&self, config: &ConnectionConfig) -> Result<Connection> {
        let mut connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        connection.setup(config)?;
        Ok(connection)
    }
}

/// A single SQLite connection.
#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    transaction: TransactionGuard,
    serializer: Serializer,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory()
            .map_err(|err| Error::connection_failed(":memory:", err))?;
        Ok(Self::from_rusqlite(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = RusqliteConnection::open(path)
            .map_err(|err| Error::connection_failed(path.display().to_string(), err))?;
        Ok(Self::from_rusqlite(connection))
    }

    fn from_rusqlite(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            transaction: TransactionGuard::new(),
            serializer: Serializer::new(),
        }
    }

    /// Applies the session pragmas of `config`.
    pub fn setup(&mut self, config: &ConnectionConfig) -> Result<()> {
        let mut pragmas = vec![
            Statement::pragma("encoding", quote("UTF-8")),
            Statement::pragma("journal_mode", quote(&config.journal_mode)),
        ];

        if !config.install {
            pragmas.push(Statement::pragma_foreign_keys(true));
            pragmas.push(Statement::pragma(
                "query_only",
                if config.read_only { "ON" } else { "OFF" },
            ));
        }

        for pragma in &pragmas {
            // `journal_mode` reports the new mode as a row, which only a batch
            // execution accepts.
            let sql = self.serializer.serialize(pragma);
            debug!("{}", sql);
            self.connection
                .execute_batch(&sql)
                .map_err(|err| execution_failed(&sql, err))?;
        }

        Ok(())
    }

    /// Creates `table` unless it exists.
    pub fn create_table(&mut self, schema: &Schema, table: &Table) -> Result<()> {
        let sql = Renderer::new(schema).render_table(table)?;
        self.execute_sql(&sql)?;
        Ok(())
    }

    /// Creates every table of `schema` that does not exist yet.
    pub fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        for table in &schema.tables {
            self.create_table(schema, table)?;
        }

        Ok(())
    }

    pub fn drop_table(&mut self, table: &str) -> Result<()> {
        self.execute_stmt(&Statement::drop_table_if_exists(table))?;
        Ok(())
    }

    /// Deletes every row of `table`.
    pub fn truncate_table(&mut self, table: &str) -> Result<usize> {
        self.execute_stmt(&Statement::truncate_table(table))
    }

    /// Runs a query and returns its rows. Values are returned as text, `NULL`
    /// as `None`.
    pub fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<Option<String>>>> {
        debug!("{}", sql);

        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(|err| execution_failed(sql, err))?;
        let width = stmt.column_count();
        let mut rows = stmt.query([]).map_err(|err| execution_failed(sql, err))?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(|err| execution_failed(sql, err))? {
            let mut items = Vec::with_capacity(width);

            for index in 0..width {
                let value = row
                    .get_ref(index)
                    .map_err(|err| execution_failed(sql, err))?;
                items.push(to_text(value));
            }

            ret.push(items);
        }

        Ok(ret)
    }

    /// Row id of the most recent successful insert.
    pub fn last_insert_id(&self) -> i64 {
        self.connection.last_insert_rowid()
    }

    /// Rows changed by the most recent statement.
    pub fn affected_rows(&self) -> u64 {
        self.connection.changes() as u64
    }

    /// Opens a transaction unless one is open already.
    pub fn begin(&mut self) -> Result<()> {
        let was_open = self.transaction.is_open();
        self.control(was_open, |guard| guard.begin())
    }

    /// Commits the open transaction, if any.
    pub fn commit(&mut self) -> Result<()> {
        let was_open = self.transaction.is_open();
        self.control(was_open, |guard| guard.commit())
    }

    /// Rolls back the open transaction, if any.
    pub fn rollback(&mut self) -> Result<()> {
        let was_open = self.transaction.is_open();
        self.control(was_open, |guard| guard.rollback())
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_open()
    }

    fn control(
        &mut self,
        was_open: bool,
        f: impl FnOnce(&mut TransactionGuard) -> Option<&'static str>,
    ) -> Result<()> {
        let Some(sql) = f(&mut self.transaction) else {
            return Ok(());
        };

        if let Err(err) = self.execute_sql(sql) {
            self.transaction.reset(was_open);
            return Err(err);
        }

        Ok(())
    }

    fn execute_stmt(&mut self, stmt: &Statement) -> Result<usize> {
        let sql = self.serializer.serialize(stmt);
        self.execute_sql(&sql)
    }

    fn execute_sql(&mut self, sql: &str) -> Result<usize> {
        debug!("{}", sql);
        self.connection
            .execute(sql, [])
            .map_err(|err| execution_failed(sql, err))
    }
}

impl tabula_core::driver::Connection for Connection {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        self.execute_sql(sql)
    }

    fn table_definition(&mut self, table: &str) -> Result<Option<String>> {
        const SQL: &str = "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1";

        let definition: Option<Option<String>> = self
            .connection
            .query_row(SQL, [table], |row| row.get(0))
            .optional()
            .map_err(|err| execution_failed(SQL, err))?;

        Ok(definition.flatten())
    }

    fn count_rows(&mut self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        debug!("{}", sql);

        let count: i64 = self
            .connection
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|err| execution_failed(&sql, err))?;

        Ok(count as u64)
    }

    fn foreign_keys(&mut self) -> Result<bool> {
        let sql = self
            .serializer
            .serialize(&Statement::pragma_query("foreign_keys"));
        debug!("{}", sql);

        let enabled: i64 = self
            .connection
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|err| execution_failed(&sql, err))?;

        Ok(enabled != 0)
    }
}

/// Wraps an engine error, keeping SQLite's extended result code.
fn execution_failed(sql: &str, err: rusqlite::Error) -> Error {
    let code = match &err {
        rusqlite::Error::SqliteFailure(inner, _) => Some(inner.extended_code),
        _ => None,
    };

    Error::statement_execution(sql, code, err)
}

fn to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(value) | ValueRef::Blob(value) => {
            Some(String::from_utf8_lossy(value).into_owned())
        }
    }
}
