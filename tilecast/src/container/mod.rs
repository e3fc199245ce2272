//! Reading tile archives.

mod mbtiles;
pub use mbtiles::*;
