/// Settings applied to every connection when it is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Value of the `journal_mode` pragma
    pub journal_mode: String,

    /// Reject writes by turning on the `query_only` pragma
    pub read_only: bool,

    /// The connection is used to install the schema. Foreign key enforcement
    /// and read-only mode are left at their SQLite defaults so tables can be
    /// created in any order.
    pub install: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            journal_mode: "WAL".to_string(),
            read_only: false,
            install: false,
        }
    }
}

impl ConnectionConfig {
    /// Create a new ConnectionConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the journal mode
    pub fn journal_mode(mut self, mode: impl Into<String>) -> Self {
        self.journal_mode = mode.into();
        self
    }

    /// Set read-only mode
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set install mode
    pub fn install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }
}
