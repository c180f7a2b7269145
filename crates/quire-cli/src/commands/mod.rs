//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and print results.
//! No business logic lives here.

pub mod completions;
pub mod config;
pub mod data;
pub mod render;

use quire_adapters::{LocalFilesystem, SerdeDecoder};
use quire_core::application::ContextService;

/// Context service wired to the real filesystem.
fn context_service() -> ContextService {
    ContextService::new(Box::new(LocalFilesystem::new()), Box::new(SerdeDecoder::new()))
}
