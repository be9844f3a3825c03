use super::{ColumnDef, Name, Statement, TableConstraint};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Table constraints, in the order they are emitted
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    /// Looks up a column definition by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name.as_str() == name)
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
