//! Infrastructure adapters for Quire.
//!
//! This crate implements the ports defined in `quire-core::application::ports`
//! and hosts the template engines. It contains all external dependencies and
//! I/O operations.

pub mod decoder;
pub mod encoder;
pub mod filesystem;
pub mod template;

pub use decoder::SerdeDecoder;
pub use encoder::SerdeEncoder;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template::{LoadedTemplate, TemplateHandle, TemplateLoader, execute};
