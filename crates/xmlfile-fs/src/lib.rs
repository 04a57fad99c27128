//! Filesystem access for XML configuration files
//!
//! Provides normalized path handling and safe read/write primitives used by
//! the document store.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
