//! Deployment option resolution for distship: defaults, `distship.toml`
//! parsing, and `{{key}}` templating against the project's `package.json`.

pub mod metadata;
pub mod options;
pub mod template;

pub use metadata::ProjectMetadata;
pub use options::{Config, RawOptions, Repository};
