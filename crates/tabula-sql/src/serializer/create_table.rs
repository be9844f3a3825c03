use super::{Delimited, Formatter, ToSql};

use crate::stmt;

/// Column definitions followed by table constraints, one per line.
struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

enum Item<'a> {
    Column(&'a stmt::ColumnDef),
    Constraint(&'a stmt::TableConstraint),
}

impl ToSql for Item<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Item::Column(column) => column.to_sql(f),
            Item::Constraint(constraint) => constraint.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let name = &self.name;
        let columns = ColumnsWithConstraints(self);

        fmt!(f, "CREATE TABLE " if_not_exists name " (\n" columns "\n)");
    }
}

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let items = self
            .0
            .columns
            .iter()
            .map(Item::Column)
            .chain(self.0.constraints.iter().map(Item::Constraint));

        fmt!(f, Delimited(items, ",\n"));
    }
}
