mod builder;
mod config;
mod error;
pub mod generate;
mod node;
mod output;
mod render;
mod validate;
mod wrap;

pub use builder::Builder;
pub use config::{ChangelogConfig, Config, RulesConfig, WrapConfig};
pub use error::{Error, Result};
pub use node::{Document, ItemRole, ListKind, Node, NodeId, NodeKind};
pub use output::{write_document, write_markdown, write_text};
pub use render::render;
pub use validate::{ValidationError, validate};
pub use wrap::{wrap_markdown, wrap_text};

