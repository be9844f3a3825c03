use super::{Name, Statement};

/// Removes every row of a table. SQLite has no `TRUNCATE`, so this is
/// serialized as an unconditional `DELETE`.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncateTable {
    pub name: Name,
}

impl Statement {
    pub fn truncate_table(name: impl Into<Name>) -> Self {
        TruncateTable { name: name.into() }.into()
    }
}

impl From<TruncateTable> for Statement {
    fn from(value: TruncateTable) -> Self {
        Self::TruncateTable(value)
    }
}
