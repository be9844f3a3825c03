use super::Error;

/// Error when a relational column references a table without a primary key.
#[derive(Debug)]
pub(super) struct MissingPrimaryKey {
    referenced: Box<str>,
    table: Box<str>,
    column: Box<str>,
}

impl std::error::Error for MissingPrimaryKey {}

impl core::fmt::Display for MissingPrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "table `{}` referenced by `{}.{}` has no primary key",
            self.referenced, self.table, self.column
        )
    }
}

impl Error {
    /// Creates a missing primary key error.
    pub fn missing_primary_key(
        referenced: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKey {
            referenced: referenced.into().into(),
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingPrimaryKey(_)))
    }
}
