//! Resource identifiers: parsing, backend resolution and format sniffing.

mod format;
mod identifier;
mod resolver;

pub use format::{Format, format_tag, materialize};
pub use identifier::{ResourceIdentifier, is_resource_identifier};
pub use resolver::{BackendKind, ResolvedResource, resolve};
