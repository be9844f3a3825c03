#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

// Fragment serializers
mod column_def;
mod constraint;
mod create_table;
mod name;
mod statement;
mod ty;
mod value;
use value::Literal;

use crate::stmt::{ColumnDef, Statement, TableConstraint};

/// Serialize a statement to a SQL string
///
/// The output carries no trailing `;`. Identifiers are written verbatim and
/// literals are quoted with [`quote`](crate::quote()).
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        self.write(stmt)
    }

    /// Serializes a single column definition, as it appears inside
    /// `CREATE TABLE`.
    pub fn serialize_column_def(&self, column: &ColumnDef) -> String {
        self.write(column)
    }

    /// Serializes a single table constraint clause.
    pub fn serialize_constraint(&self, constraint: &TableConstraint) -> String {
        self.write(constraint)
    }

    fn write(&self, fragment: impl ToSql) -> String {
        let mut ret = String::new();
        let mut f = Formatter { dst: &mut ret };
        fragment.to_sql(&mut f);
        ret
    }
}
