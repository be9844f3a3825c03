mod column_def;
pub use column_def::ColumnDef;

mod constraint;
pub use constraint::TableConstraint;

mod copy_table;
pub use copy_table::CopyTable;

mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

mod name;
pub use name::Name;

mod pragma;
pub use pragma::Pragma;

mod truncate_table;
pub use truncate_table::TruncateTable;

mod ty;
pub use ty::{IntegerSize, Type};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CopyTable(CopyTable),
    CreateTable(CreateTable),
    DropTable(DropTable),
    Pragma(Pragma),
    TruncateTable(TruncateTable),

    /// SQL text taken as-is, e.g. a table definition read back from the
    /// database.
    Raw(String),
}

impl Statement {
    pub fn raw(sql: impl Into<String>) -> Self {
        Statement::Raw(sql.into())
    }
}
