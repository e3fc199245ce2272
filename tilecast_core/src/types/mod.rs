//! Data types shared across the project: binary blobs, tile coordinates,
//! tile formats and tileset metadata.

mod blob;
pub use blob::*;

mod constants;
pub use constants::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_format;
pub use tile_format::*;

mod tileset_metadata;
pub use tileset_metadata::*;
