use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tabula_core::schema::{Schema, Table};

const SCHEMA_FILE_VERSION: u32 = 1;

/// A TOML file describing the tables of a database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema file format version
    version: u32,

    /// The described schema
    pub schema: Schema,
}

impl SchemaFile {
    /// Create a new schema file with the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            version: SCHEMA_FILE_VERSION,
            schema,
        }
    }

    /// Load a schema file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
        contents.parse()
    }

    /// Save the schema file to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_string())?;
        Ok(())
    }

    /// The tables selected by `name`, or every table when `name` is `None`.
    pub fn tables(&self, name: Option<&str>) -> Result<Vec<&Table>> {
        match name {
            None => Ok(self.schema.tables.iter().collect()),
            Some(name) => match self.schema.table(name) {
                Some(table) => Ok(vec![table]),
                None => bail!("table `{name}` is not part of the schema"),
            },
        }
    }
}

impl FromStr for SchemaFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(s)?;

        // Validate version
        if file.version != SCHEMA_FILE_VERSION {
            bail!(
                "Unsupported schema file version: {}. Expected version {}",
                file.version,
                SCHEMA_FILE_VERSION
            );
        }

        Ok(file)
    }
}

impl fmt::Display for SchemaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&doc)
    }
}
