use super::Error;

/// Error when a relational column does not name a target table, or names a
/// table that is not part of the schema.
#[derive(Debug)]
pub(super) struct MissingReferenceTable {
    table: Box<str>,
    column: Box<str>,
    target: Option<Box<str>>,
}

impl std::error::Error for MissingReferenceTable {}

impl core::fmt::Display for MissingReferenceTable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.target {
            Some(target) => write!(
                f,
                "column `{}.{}` references unknown table `{}`",
                self.table, self.column, target
            ),
            None => write!(
                f,
                "relational column `{}.{}` has no referenced table",
                self.table, self.column
            ),
        }
    }
}

impl Error {
    /// Creates a missing reference table error. `target` is the table name the
    /// column declared, if it declared one.
    pub fn missing_reference_table(
        table: impl Into<String>,
        column: impl Into<String>,
        target: Option<&str>,
    ) -> Error {
        Error::from(super::ErrorKind::MissingReferenceTable(
            MissingReferenceTable {
                table: table.into().into(),
                column: column.into().into(),
                target: target.map(Into::into),
            },
        ))
    }

    /// Returns `true` if this error is a missing reference table error.
    pub fn is_missing_reference_table(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingReferenceTable(_)))
    }
}
