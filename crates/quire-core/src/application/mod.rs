//! Application layer for Quire.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PathResolver, DataLoader,
//!   FileOrdering, ContextService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Options**: The explicit per-render configuration
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Merging, ordering rules and context assembly live
//! in `crate::domain`.

pub mod error;
pub mod options;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ContextOutcome, ContextService, DataLoader, FileOrdering, LoadOutcome, Ordered, PathResolver,
    Resolution,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DataDecoder, DataEncoder, DecodeError, EncodeError, EntryKind, Filesystem};

pub use error::ApplicationError;
pub use options::RenderOptions;
