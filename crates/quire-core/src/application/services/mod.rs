//! Application services (use case orchestrators).

pub mod context_service;
pub mod data_loader;
pub mod file_ordering;
pub mod path_resolver;

pub use context_service::{ContextOutcome, ContextService};
pub use data_loader::{DataLoader, LoadOutcome};
pub use file_ordering::{FileOrdering, Ordered};
pub use path_resolver::{PathResolver, Resolution};
