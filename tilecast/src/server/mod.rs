//! The HTTP server: published sources, route table, handlers and lifecycle.

mod cors;
mod handlers;
mod routes;
pub mod sources;
mod tile_server;

pub use sources::{SourceRegistry, TileSource};
pub use tile_server::TileServer;
