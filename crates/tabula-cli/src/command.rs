mod create;
pub use create::CreateCommand;

mod migrate;
pub use migrate::MigrateCommand;

mod render;
pub use render::RenderCommand;

mod types;
pub use types::TypesCommand;
