use super::{Name, Statement};

/// A statement to copy rows from one table to another.
///
/// Generates `INSERT INTO target SELECT * FROM source`, or with an explicit
/// column list `INSERT INTO target (a, b) SELECT a, b FROM source`.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyTable {
    /// Source table name.
    pub source: Name,

    /// Target table name.
    pub target: Name,

    /// Columns copied by name. `None` copies whole rows positionally.
    pub columns: Option<Vec<Name>>,
}

impl Statement {
    /// Copies every row and column of `source` into `target`, which must have
    /// the same shape.
    pub fn copy_table(source: impl Into<Name>, target: impl Into<Name>) -> Self {
        CopyTable {
            source: source.into(),
            target: target.into(),
            columns: None,
        }
        .into()
    }

    /// Copies the named columns of every row of `source` into `target`.
    pub fn copy_columns<I, N>(source: impl Into<Name>, target: impl Into<Name>, columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        CopyTable {
            source: source.into(),
            target: target.into(),
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
        .into()
    }
}

impl From<CopyTable> for Statement {
    fn from(value: CopyTable) -> Self {
        Self::CopyTable(value)
    }
}
