//! Filesystem layer for buildcfg
//!
//! Provides lexically normalized paths, format-detecting config file
//! loading and atomic writes.

pub mod checksum;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod path;

pub use config::{CONFIG_FILE_NAMES, ConfigFormat, ConfigStore};
pub use document::StrictDocument;
pub use error::{Error, Result};
pub use path::NormalizedPath;
