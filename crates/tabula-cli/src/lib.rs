mod command;
mod config;
mod schema_file;
mod theme;

pub use command::{CreateCommand, MigrateCommand, RenderCommand, TypesCommand};
pub use config::*;
pub use schema_file::SchemaFile;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tabula CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct TabulaCli {
    config: Config,
}

impl TabulaCli {
    /// Create a new TabulaCli instance with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new TabulaCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        init_tracing(cli.verbose);

        match cli.command {
            Command::Render(cmd) => cmd.run(&self.config),
            Command::Types(cmd) => cmd.run(&self.config),
            Command::Create(cmd) => cmd.run(&self.config),
            Command::Migrate(cmd) => cmd.run(&self.config),
        }
    }
}

/// Logs go to stderr so rendered SQL on stdout can be piped.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    // A subscriber may already be installed by an embedding application.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(about = "Tabula CLI - Render and migrate SQLite table schemas")]
#[command(version)]
struct Cli {
    /// Log every executed statement
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print the CREATE TABLE statements of a schema file
    Render(RenderCommand),

    /// List column kinds and the rule each one renders with
    Types(TypesCommand),

    /// Create the tables of a schema file in a database
    Create(CreateCommand),

    /// Migrate live tables from one schema file to another
    Migrate(MigrateCommand),
}
