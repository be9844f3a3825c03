use super::Statement;

/// A SQLite PRAGMA statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Pragma {
    /// The pragma name (e.g. "foreign_keys").
    pub name: String,

    /// The value to set, if any. When `None`, this is a query pragma.
    pub value: Option<String>,
}

impl Statement {
    /// Sets `PRAGMA foreign_keys = ON` or `OFF`.
    pub fn pragma_foreign_keys(enabled: bool) -> Self {
        Self::pragma("foreign_keys", if enabled { "ON" } else { "OFF" })
    }

    /// Creates a PRAGMA statement with the given name and value.
    pub fn pragma(name: impl Into<String>, value: impl Into<String>) -> Self {
        Pragma {
            name: name.into(),
            value: Some(value.into()),
        }
        .into()
    }

    /// Creates a PRAGMA statement that queries the current value.
    pub fn pragma_query(name: impl Into<String>) -> Self {
        Pragma {
            name: name.into(),
            value: None,
        }
        .into()
    }
}

impl From<Pragma> for Statement {
    fn from(value: Pragma) -> Self {
        Self::Pragma(value)
    }
}
