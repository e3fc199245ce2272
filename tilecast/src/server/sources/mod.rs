//! Tile sources and the registry that publishes them.

mod registry;
pub use registry::*;

mod tile_source;
pub use tile_source::*;
