//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `quire-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Stat, read, walk and glob
//!   - `DataDecoder`: JSON / YAML / TOML grammars
//!   - `DataEncoder`: the same grammars, written back out
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DataDecoder, DataEncoder, DecodeError, EncodeError, EntryKind, Filesystem};

#[cfg(test)]
pub use output::{MockDataDecoder, MockFilesystem};
