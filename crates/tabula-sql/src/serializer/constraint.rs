use super::{Comma, Formatter, ToSql};

use crate::stmt::{self, TableConstraint};

impl ToSql for &stmt::TableConstraint {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            TableConstraint::PrimaryKey(columns) => {
                fmt!(f, "PRIMARY KEY (" Comma(columns) ")")
            }
            TableConstraint::Unique(columns) => fmt!(f, "UNIQUE(" Comma(columns) ")"),
            TableConstraint::ForeignKey {
                columns,
                table,
                references,
            } => fmt!(
                f, "FOREIGN KEY (" Comma(columns) ") REFERENCES " table "(" Comma(references) ")"
            ),
            TableConstraint::Index {
                columns,
                fulltext,
                using,
            } => {
                if *fulltext {
                    fmt!(f, "FULLTEXT ");
                }
                fmt!(f, "INDEX(" Comma(columns) ")");
                if let Some(using) = using {
                    fmt!(f, " USING " using);
                }
            }
        }
    }
}
