use crate::{Config, SchemaFile};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tabula_sql::Renderer;

#[derive(Parser, Debug)]
pub struct RenderCommand {
    /// Path to the schema file
    schema: PathBuf,

    /// Only render this table
    #[arg(long)]
    table: Option<String>,
}

impl RenderCommand {
    pub(crate) fn run(self, _config: &Config) -> Result<()> {
        let file = SchemaFile::load(&self.schema)?;
        let renderer = Renderer::new(&file.schema);

        let mut statements = vec![];
        for table in file.tables(self.table.as_deref())? {
            statements.push(renderer.render_table(table)?);
        }

        for sql in statements {
            println!("{sql};");
            println!();
        }

        Ok(())
    }
}
