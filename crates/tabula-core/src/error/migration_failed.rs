use super::Error;

/// Context attached to an error raised while migrating a table, naming the
/// table and the step that failed.
#[derive(Debug)]
pub(super) struct MigrationFailed {
    table: Box<str>,
    step: &'static str,
}

impl std::error::Error for MigrationFailed {}

impl core::fmt::Display for MigrationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "migration of table `{}` failed at step {}",
            self.table, self.step
        )
    }
}

impl Error {
    /// Creates a migration failure. Intended to be passed to
    /// [`Error::context`] around the root cause.
    pub fn migration_failed(table: impl Into<String>, step: &'static str) -> Error {
        Error::from(super::ErrorKind::MigrationFailed(MigrationFailed {
            table: table.into().into(),
            step,
        }))
    }

    /// Returns `true` if this error carries migration failure context.
    pub fn is_migration_failed(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MigrationFailed(_)))
    }
}
