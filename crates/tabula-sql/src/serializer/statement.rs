use super::{Comma, Formatter, ToSql};

use crate::stmt;

impl ToSql for &stmt::CopyTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let source = &self.source;
        let target = &self.target;

        match &self.columns {
            Some(columns) => fmt!(
                f, "INSERT INTO " target " (" Comma(columns) ") SELECT " Comma(columns) " FROM " source
            ),
            None => fmt!(f, "INSERT INTO " target " SELECT * FROM " source),
        }
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP TABLE " if_exists name);
    }
}

impl ToSql for &stmt::Pragma {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = &self.name;

        match &self.value {
            Some(value) => fmt!(f, "PRAGMA " name " = " value),
            None => fmt!(f, "PRAGMA " name),
        }
    }
}

impl ToSql for &stmt::TruncateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = &self.name;
        fmt!(f, "DELETE FROM " name);
    }
}

impl ToSql for &stmt::Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Statement::CopyTable(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Pragma(stmt) => stmt.to_sql(f),
            stmt::Statement::TruncateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Raw(sql) => fmt!(f, sql),
        }
    }
}
