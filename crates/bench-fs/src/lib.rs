//! Filesystem primitives for the bench manager
//!
//! Provides bench path resolution and safe whole-file I/O for the plain
//! listings and JSON documents a bench keeps under `sites/`.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::BenchPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
