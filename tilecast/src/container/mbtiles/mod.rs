//! Support for the MBTiles format: SQLite archives with a `tiles` table in
//! TMS row order and a `metadata` key/value table.

mod reader;
pub use reader::*;

#[cfg(test)]
pub mod testing;
