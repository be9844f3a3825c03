/// Configuration for table migrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Prepended to a table's name to name its shadow table
    pub shadow_prefix: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            shadow_prefix: "zzz_temp_".to_string(),
        }
    }
}

impl MigrationConfig {
    /// Create a new MigrationConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shadow table prefix
    pub fn shadow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.shadow_prefix = prefix.into();
        self
    }

    /// The name of the shadow table of `table`.
    pub fn shadow_name(&self, table: &str) -> String {
        format!("{}{}", self.shadow_prefix, table)
    }
}
