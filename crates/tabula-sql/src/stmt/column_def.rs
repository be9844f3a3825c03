use super::{Name, Type};

/// One column definition inside a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Name,
    pub ty: Type,

    /// Declared inline as the table's primary key.
    pub primary_key: bool,

    /// The column aliases the row id and is assigned automatically. SQLite
    /// needs no keyword for this; the flag records intent so derived
    /// definitions can drop it.
    pub auto_increment: bool,

    pub not_null: bool,

    /// Unquoted default literal.
    pub default: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<Name>, ty: Type) -> ColumnDef {
        ColumnDef {
            name: name.into(),
            ty,
            primary_key: false,
            auto_increment: false,
            not_null: false,
            default: None,
        }
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    pub fn not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn default_value(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }
}
