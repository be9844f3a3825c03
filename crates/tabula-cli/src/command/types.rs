use crate::{theme, Config};
use anyhow::Result;
use clap::Parser;
use console::style;
use tabula_core::schema::TypeTag;
use tabula_sql::Registry;

#[derive(Parser, Debug)]
pub struct TypesCommand {
    /// Kinds to resolve; lists every built-in kind when empty
    kinds: Vec<String>,
}

impl TypesCommand {
    pub(crate) fn run(self, _config: &Config) -> Result<()> {
        theme::heading("Column Kinds");

        let registry = Registry::global();
        let kinds: Vec<TypeTag> = if self.kinds.is_empty() {
            TypeTag::builtins().collect()
        } else {
            self.kinds.into_iter().map(TypeTag::new).collect()
        };

        for kind in &kinds {
            let ancestry = kind.ancestry().collect::<Vec<_>>().join(" → ");

            match registry.lookup(kind) {
                Some(rule) => println!(
                    "  {} {:<14} {:<12} {}",
                    theme::arrow(),
                    style(kind.name()).bold(),
                    rule.name(),
                    style(ancestry).dim()
                ),
                None => println!(
                    "  {} {:<14} {:<12} {}",
                    theme::warning(),
                    style(kind.name()).bold(),
                    style("unsupported").yellow(),
                    style(ancestry).dim()
                ),
            }
        }

        println!();
        Ok(())
    }
}
