use super::Error;

/// Error when the database rejects a statement.
///
/// Wraps the engine's own error together with the SQL text that failed and,
/// when the engine reports one, its numeric result code.
#[derive(Debug)]
pub(super) struct StatementExecution {
    sql: Box<str>,
    code: Option<i32>,
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StatementExecution {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StatementExecution {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("statement failed")?;
        if let Some(code) = self.code {
            write!(f, " (code {code})")?;
        }
        write!(f, ": {}", self.inner)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        write!(f, "; sql=`{}`", self.sql.trim())
    }
}

impl Error {
    /// Creates a statement execution error from the engine error raised while
    /// running `sql`.
    pub fn statement_execution(
        sql: impl Into<String>,
        code: Option<i32>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::StatementExecution(StatementExecution {
            sql: sql.into().into(),
            code,
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a statement execution error.
    pub fn is_statement_execution(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::StatementExecution(_)))
    }

    /// Returns the engine result code of the first statement execution error
    /// in the chain.
    pub fn statement_code(&self) -> Option<i32> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::StatementExecution(err) => err.code,
            _ => None,
        })
    }
}
