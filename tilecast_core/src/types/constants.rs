//! Constants shared between the tile reader and the HTTP server.

use std::time::Duration;

/// Hard wall time for a single tile request.
///
/// The same bound is used when waiting for a pooled SQLite connection, so a
/// request can never queue on the pool longer than it is allowed to run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Edge length in pixels reported for tiles. MBTiles archives do not declare
/// a tile size, so every tileset is published with this value.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Spatial reference system of the Web Mercator tile pyramid.
pub const WEB_MERCATOR_SRS: &str = "EPSG:3857";
