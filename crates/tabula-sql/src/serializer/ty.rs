use super::{Formatter, ToSql};

use crate::stmt;

/// `(n)` when a length is set.
struct Length(Option<u64>);

impl ToSql for Length {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if let Some(len) = self.0 {
            fmt!(f, "(" len ")");
        }
    }
}

impl ToSql for &stmt::Type {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use stmt::Type::*;

        let unsigned = |unsigned: bool| if unsigned { " UNSIGNED" } else { "" };

        match *self {
            RowId => fmt!(f, "INTEGER"),
            Integer { size, unsigned: u } => fmt!(f, size.keyword() unsigned(u)),
            Float { unsigned: u } => fmt!(f, "FLOAT" unsigned(u)),
            Numeric(None) => fmt!(f, "DECIMAL"),
            Numeric(Some((precision, scale))) => {
                fmt!(f, "DECIMAL(" precision "," scale ")")
            }
            Char(len) => fmt!(f, "CHAR" Length(len)),
            VarChar(len) => fmt!(f, "VARCHAR" Length(len)),
            Text(len) => fmt!(f, "TEXT" Length(len)),
            Blob(len) => fmt!(f, "BLOB" Length(len)),
            Date => fmt!(f, "DATE"),
            Time => fmt!(f, "TIME"),
            DateTime(millis) => fmt!(f, "DATETIME(" millis ")"),
            Timestamp(millis) => fmt!(f, "TIMESTAMP(" millis ")"),
        }
    }
}
