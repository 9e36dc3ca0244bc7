//! Infrastructure layer: I/O implementations, YAML adapters and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod di;
pub mod traits;
pub mod yaml;

pub use traits::{DocumentDeserializer, FileSystem, RealFileSystem};
pub use yaml::{OutlineWriter, YamlDeserializer};
