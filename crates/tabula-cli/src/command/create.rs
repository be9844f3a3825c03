use crate::{theme, Config, SchemaFile};
use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tabula_driver_sqlite::Sqlite;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CreateCommand {
    /// Connection URL of the database, e.g. `sqlite:app.db`
    #[arg(long)]
    database: String,

    /// Path to the schema file
    schema: PathBuf,
}

impl CreateCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        theme::heading("Create Tables");

        let file = SchemaFile::load(&self.schema)?;
        let driver = Sqlite::new(&self.database)?;

        // Tables are created in file order; enforcement would reject forward
        // references.
        let connection = config.connection.clone().install(true);
        let mut conn = driver.connect(&connection)?;

        info!("creating {} table(s) in {}", file.schema.tables.len(), driver.url());
        conn.push_schema(&file.schema)?;

        for table in &file.schema.tables {
            println!("  {} {}", theme::check(), style(&table.name).bold());
        }

        println!();
        println!(
            "  {}",
            style(format!("Created {} table(s)", file.schema.tables.len()))
                .green()
                .bold()
        );
        println!();

        Ok(())
    }
}
