use super::Name;

/// Clauses following the column definitions of a `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    /// `PRIMARY KEY (a, b)`
    PrimaryKey(Vec<Name>),

    /// `UNIQUE(a)`
    Unique(Vec<Name>),

    /// `FOREIGN KEY (a) REFERENCES t(b)`
    ForeignKey {
        columns: Vec<Name>,
        table: Name,
        references: Vec<Name>,
    },

    /// `[FULLTEXT ]INDEX(a, b)[ USING method]`
    Index {
        columns: Vec<Name>,
        fulltext: bool,
        using: Option<String>,
    },
}
