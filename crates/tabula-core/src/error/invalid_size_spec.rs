use super::Error;

/// Error when an integer column declares a byte width other than 1, 2, 4 or 8.
#[derive(Debug)]
pub(super) struct InvalidSizeSpec {
    table: Box<str>,
    column: Box<str>,
    bytes: u8,
}

impl std::error::Error for InvalidSizeSpec {}

impl core::fmt::Display for InvalidSizeSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid integer size of {} bytes for column `{}.{}`; expected 1, 2, 4 or 8",
            self.bytes, self.table, self.column
        )
    }
}

impl Error {
    /// Creates an invalid size spec error.
    pub fn invalid_size_spec(
        table: impl Into<String>,
        column: impl Into<String>,
        bytes: u8,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidSizeSpec(InvalidSizeSpec {
            table: table.into().into(),
            column: column.into().into(),
            bytes,
        }))
    }

    /// Returns `true` if this error is an invalid size spec error.
    pub fn is_invalid_size_spec(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSizeSpec(_)))
    }
}
