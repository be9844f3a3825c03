mod transaction;
pub use transaction::TransactionGuard;

use crate::Result;

/// The statement executor a driver hands to renderers and migrations.
///
/// Implementations wrap a single native connection. SQL is passed as plain
/// text: every literal has already been quoted by the renderer, nothing is
/// bound as a parameter.
pub trait Connection {
    /// Executes one statement and returns the number of affected rows.
    fn execute(&mut self, sql: &str) -> Result<usize>;

    /// Returns the `CREATE TABLE` statement the database holds for `table`,
    /// or `None` when the table does not exist.
    fn table_definition(&mut self, table: &str) -> Result<Option<String>>;

    /// Counts the rows of `table`.
    fn count_rows(&mut self, table: &str) -> Result<u64>;

    /// Returns whether foreign key enforcement is currently on.
    fn foreign_keys(&mut self) -> Result<bool>;

    /// Returns `true` if `table` exists.
    fn table_exists(&mut self, table: &str) -> Result<bool> {
        Ok(self.table_definition(table)?.is_some())
    }
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        (**self).execute(sql)
    }

    fn table_definition(&mut self, table: &str) -> Result<Option<String>> {
        (**self).table_definition(table)
    }

    fn count_rows(&mut self, table: &str) -> Result<u64> {
        (**self).count_rows(table)
    }

    fn foreign_keys(&mut self) -> Result<bool> {
        (**self).foreign_keys()
    }

    fn table_exists(&mut self, table: &str) -> Result<bool> {
        (**self).table_exists(table)
    }
}
