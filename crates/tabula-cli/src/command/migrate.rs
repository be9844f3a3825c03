use crate::{theme, Config, SchemaFile};
use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tabula_driver_sqlite::Sqlite;
use tabula_sql::{MigrationOutcome, Migrator, Renderer};

#[derive(Parser, Debug)]
pub struct MigrateCommand {
    /// Connection URL of the database, e.g. `sqlite:app.db`
    #[arg(long)]
    database: String,

    /// Schema file describing the live tables
    #[arg(long)]
    previous: PathBuf,

    /// Schema file describing the shape to migrate to
    #[arg(long)]
    next: PathBuf,

    /// Only migrate this table
    #[arg(long)]
    table: Option<String>,

    /// Prefix of the shadow table holding rows during the swap
    #[arg(long)]
    shadow_prefix: Option<String>,
}

impl MigrateCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        theme::heading("Migrate Tables");

        let previous = SchemaFile::load(&self.previous)?;
        let next = SchemaFile::load(&self.next)?;

        let mut migration = config.migration.clone();
        if let Some(prefix) = self.shadow_prefix {
            migration = migration.shadow_prefix(prefix);
        }

        let driver = Sqlite::new(&self.database)?;
        let mut conn = driver.connect(&config.connection)?;

        let migrator = Migrator::new(Renderer::new(&next.schema)).config(migration);

        let tables = next.tables(self.table.as_deref())?;
        for table in &tables {
            // A table new to the schema is migrated from its own shape, which
            // creates it.
            let live = previous.schema.table(&table.name).unwrap_or(table);

            println!(
                "  {} Migrating table: {}",
                theme::arrow(),
                style(&table.name).bold()
            );

            let report = migrator.migrate(&mut conn, live, table)?;

            let summary = match report.outcome {
                MigrationOutcome::Created => "created".to_string(),
                MigrationOutcome::Migrated => {
                    format!("migrated, {} row(s) restored", report.restored_rows)
                }
                MigrationOutcome::Resumed => format!(
                    "resumed from {}, {} row(s) restored",
                    report.plan.shadow, report.restored_rows
                ),
            };

            println!("    {} {}", theme::check(), style(summary).dim());
        }

        println!();
        println!(
            "  {}",
            style(format!("Migrated {} table(s)", tables.len()))
                .green()
                .bold()
        );
        println!();

        Ok(())
    }
}
