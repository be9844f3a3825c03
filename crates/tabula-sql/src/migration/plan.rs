/// What migrating one table involves. Derived from the previous and next
/// descriptors of the table; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// The table being migrated
    pub live: String,

    /// The table holding a copy of the rows while the live table is rebuilt
    pub shadow: String,

    /// Columns stored under both shapes, in their previous order. Their data
    /// is carried over.
    pub common_columns: Vec<String>,
}

/// How a migration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The live table did not exist and was created.
    Created,

    /// The live table was rebuilt under the new shape.
    Migrated,

    /// A shadow table left by an earlier failed run was restored into the
    /// rebuilt live table.
    Resumed,
}

/// Summary of a completed migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub plan: MigrationPlan,
    pub outcome: MigrationOutcome,

    /// Rows copied back into the live table.
    pub restored_rows: usize,
}
