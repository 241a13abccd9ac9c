//! Core configuration management types.

mod builder;
mod loader;
mod merge;
mod settings;

pub use builder::HissBuilder;
pub use loader::{LoadSession, SourceLoader};
pub use merge::deep_merge;
pub use settings::Hiss;
