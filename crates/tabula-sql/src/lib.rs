pub mod dialect;

pub mod foreign_key;
pub use foreign_key::ForeignKey;

pub mod migration;
pub use migration::{
    MigrationConfig, MigrationOutcome, MigrationPlan, MigrationReport, Migrator,
};

pub mod quote;
pub use quote::{quote, unquote};

pub mod registry;
pub use registry::{RenderFn, Registry, TypeRule};

mod render;
pub use render::{ColumnCx, ColumnFragment, Renderer};

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
