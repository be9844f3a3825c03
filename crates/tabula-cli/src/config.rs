use tabula_driver_sqlite::ConnectionConfig;
use tabula_sql::MigrationConfig;

/// Configuration for Tabula CLI operations
#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Migration-related configuration
    pub migration: MigrationConfig,

    /// Settings applied to database connections
    pub connection: ConnectionConfig,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migration configuration
    pub fn migration(mut self, migration: MigrationConfig) -> Self {
        self.migration = migration;
        self
    }

    /// Set the connection configuration
    pub fn connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }
}
