//! Core types for tilecast.
//!
//! This crate holds the pieces that do not depend on SQLite or on the HTTP
//! stack: tile coordinates and their XYZ/TMS conversion, tile formats with
//! their MIME types, binary payloads, tileset metadata and shared constants.

pub mod types;

pub use types::*;
