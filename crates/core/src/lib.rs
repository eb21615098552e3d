//! Domain building blocks shared by the storage and HTTP crates.
//!
//! Everything here is pure: derived-field computation, the legacy flat-file
//! format, export rendering and the error taxonomy. Only [`legacy::parse_file`]
//! touches the filesystem.

pub mod article;
pub mod error;
pub mod export;
pub mod legacy;
pub mod search;
pub mod types;
