//! Configuration source implementations.

mod config_source;
mod file;
mod resource;

pub use config_source::ConfigSource;
pub use file::FileSource;
pub use resource::ResourceSource;
