//! tilecast publishes map tiles from MBTiles archives over HTTP.
//!
//! An MBTiles file is a SQLite database with a `tiles` table in TMS row
//! order and a `metadata` key/value table. tilecast opens one archive or a
//! whole directory of them and serves:
//!
//! * `GET /{tileset}/{z}/{x}/{y}` - one tile, addressed in XYZ order
//! * `GET /{tileset}/meta` - tileset metadata as JSON
//! * `GET /status` - liveness probe
//!
//! The [`container`] module reads archives, the [`server`] module publishes
//! them.

pub mod container;
pub mod server;
