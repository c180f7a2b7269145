//! Core domain layer for Quire.
//!
//! This module contains pure logic with no I/O. Reading files, decoding
//! grammars and running template engines are handled via ports (traits)
//! defined in the application layer.
//!
//! Merges report conflicts instead of printing them, and ordering is a pure
//! comparator over values the caller has already read.

pub mod data;
pub mod error;
pub mod merge;
pub mod ordering;
pub mod super_data;
pub mod template;
pub mod value_objects;

pub use data::{DEFAULT_DATA_KEY, Diagnostic, KeyedData, LoadedFileSet, SuperData};
pub use error::{DomainError, ErrorCategory};
pub use merge::{MergeOutcome, merge};
pub use ordering::{SortEntry, compare};
pub use super_data::{Assembly, assemble};
pub use template::partial_name;
pub use value_objects::{
    DataFormat, DataKeyCollision, SortDirection, SortField, SortOrder, TemplateDialect,
};
