//! Quire Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Quire, a
//! document generator that renders structured data files through text, HTML
//! or Mustache templates, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            quire-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (PathResolver, DataLoader, FileOrdering,│
//! │            ContextService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, DataDecoder, DataEncoder)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     quire-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SerdeDecoder, engines)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (formats, dialects, merge, super-data)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quire_core::prelude::*;
//!
//! // 1. Describe the render
//! let options = RenderOptions::new()
//!     .with_global_data("site.toml")
//!     .with_data("posts")
//!     .with_data_key("posts")
//!     .with_sort("modified-desc");
//!
//! // 2. Use application service (with injected adapters)
//! let service = ContextService::new(filesystem, decoder);
//! let outcome = service.build(&options)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Everything a front end needs to build a render context.
pub mod prelude {
    pub use crate::application::{
        ContextOutcome, ContextService, DataLoader, FileOrdering, PathResolver, RenderOptions,
        ports::{DataDecoder, DataEncoder, DecodeError, EncodeError, EntryKind, Filesystem},
    };
    pub use crate::domain::{
        DataFormat, DataKeyCollision, Diagnostic, KeyedData, LoadedFileSet, SortOrder, SuperData,
        TemplateDialect,
    };
    pub use crate::error::{QuireError, QuireResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
