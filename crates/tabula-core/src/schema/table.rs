use super::{Column, Index};

/// A database table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns, in declaration order
    #[cfg_attr(feature = "serde", serde(default))]
    pub columns: Vec<Column>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub indices: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            columns: vec![],
            indices: vec![],
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indices.push(index);
        self
    }

    /// Columns flagged as primary key, in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// The first primary key column; the one foreign keys point at.
    pub fn primary_key_column(&self) -> Option<&Column> {
        self.primary_key_columns().next()
    }

    /// Looks up a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeTag;

    #[test]
    fn primary_key_columns_keep_declaration_order() {
        let table = Table::new("memberships")
            .column(Column::new("note", TypeTag::text()))
            .column(Column::new("user_id", TypeTag::object()).primary_key(true))
            .column(Column::new("group_id", TypeTag::object()).primary_key(true));

        let names: Vec<_> = table.primary_key_columns().map(|c| &c.name[..]).collect();
        assert_eq!(names, ["user_id", "group_id"]);
        assert_eq!(table.primary_key_column().unwrap().name, "user_id");
        assert!(table.column_by_name("note").is_some());
    }

    #[test]
    fn no_primary_key() {
        let table = Table::new("log").column(Column::new("line", TypeTag::text()));
        assert!(table.primary_key_column().is_none());
    }
}
