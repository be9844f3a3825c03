use super::Error;

/// Error when no rendering rule is registered for a column's type or any of
/// its ancestor types.
#[derive(Debug)]
pub(super) struct UnsupportedColumnType {
    ty: Box<str>,
    column: Box<str>,
}

impl std::error::Error for UnsupportedColumnType {}

impl core::fmt::Display for UnsupportedColumnType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported column type `{}` for column `{}`",
            self.ty, self.column
        )
    }
}

impl Error {
    /// Creates an unsupported column type error naming the concrete type and
    /// the column that declared it.
    pub fn unsupported_column_type(ty: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedColumnType(
            UnsupportedColumnType {
                ty: ty.into().into(),
                column: column.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported column type error.
    pub fn is_unsupported_column_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedColumnType(_)))
    }
}
