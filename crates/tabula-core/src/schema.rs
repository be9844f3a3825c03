mod column;
pub use column::{Column, Digits};

mod index;
pub use index::Index;

mod table;
pub use table::Table;

mod ty;
pub use ty::TypeTag;

/// The catalog of tables a set of descriptors is rendered against.
///
/// Relational columns name their target by table name; the schema is what
/// resolves that name to a [`Table`].
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Schema {
        Schema {
            tables: tables.into_iter().collect(),
        }
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Adds a table, replacing any existing table with the same name.
    pub fn push(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }
}
