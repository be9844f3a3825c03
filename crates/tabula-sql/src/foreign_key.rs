//! Relational columns.
//!
//! A column referring to another table takes the storage type of that table's
//! primary key. The type is derived from the referenced key's own rendered
//! definition rather than redeclared, so the two always agree.

use crate::{
    render::{ColumnCx, ColumnFragment},
    stmt::{ColumnDef, Name, TableConstraint},
};

use tabula_core::{schema::Column, Error, Result};

/// A `FOREIGN KEY (column) REFERENCES table(references)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: Name,
    pub table: Name,
    pub references: Name,
}

impl From<ForeignKey> for TableConstraint {
    fn from(value: ForeignKey) -> Self {
        TableConstraint::ForeignKey {
            columns: vec![value.column],
            table: value.table,
            references: vec![value.references],
        }
    }
}

/// Rule for relational kinds.
///
/// Renders the first primary key column of the referenced table and keeps
/// only its storage type: the name, nullability and default come from the
/// referencing column, and neither primary key, auto-increment nor the
/// referenced column's own foreign key carry over.
pub fn synthesize(cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let Some(target) = column.references.as_deref() else {
        return Err(Error::missing_reference_table(
            cx.table_name(),
            &column.name,
            None,
        ));
    };

    let Some(referenced) = cx.referenced_table(target) else {
        return Err(Error::missing_reference_table(
            cx.table_name(),
            &column.name,
            Some(target),
        ));
    };

    let Some(key) = referenced.primary_key_column() else {
        return Err(Error::missing_primary_key(
            target,
            cx.table_name(),
            &column.name,
        ));
    };

    let Some(key_fragment) = cx.render_referenced(referenced, key)? else {
        return Err(Error::invalid_schema(format!(
            "column `{}.{}` references `{}.{}`, which is not stored",
            cx.table_name(),
            column.name,
            referenced.name,
            key.name
        )));
    };

    let def = ColumnDef::new(&column.name, key_fragment.def.ty)
        .not_null(column.not_null)
        .default_value(column.default.clone());

    let foreign_key = ForeignKey {
        column: Name::from(&column.name),
        table: Name::from(&referenced.name),
        references: Name::from(&key.name),
    };

    Ok(Some(ColumnFragment::new(def).foreign_key(foreign_key.into())))
}
