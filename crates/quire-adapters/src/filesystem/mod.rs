//! [`Filesystem`](quire_core::application::ports::Filesystem) port
//! implementations.
//!
//! [`LocalFilesystem`] is what the CLI runs on. [`MemoryFilesystem`] backs
//! template loader tests and anything else that should not touch disk.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
