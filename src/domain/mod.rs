//! Domain layer: document values, the output tree and the builder between them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod value;

pub use builder::{TreeBuilder, CHILDREN_KEY, DEFAULT_MAX_DEPTH, NAME_KEY};
pub use error::{ConversionError, ConversionResult};
pub use node::TreeNode;
pub use value::{DocumentError, DocumentLocation, RawValue};
