use super::{Formatter, Literal, ToSql};

use crate::stmt;

impl ToSql for &stmt::ColumnDef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = &self.name;
        let ty = &self.ty;

        fmt!(f, name " " ty);

        if self.primary_key {
            fmt!(f, " PRIMARY KEY");
        }

        fmt!(f, if self.not_null { " NOT NULL" } else { " NULL" });

        if let Some(default) = &self.default {
            fmt!(f, " DEFAULT " Literal(default));
        }
    }
}
