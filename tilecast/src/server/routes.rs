//! Route table of the tile server.

use super::{handlers, sources::SourceRegistry};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Builds the router serving tiles, tileset metadata and the status probe.
pub fn build_router(registry: Arc<SourceRegistry>) -> Router {
	Router::new()
		.route("/status", get(handlers::serve_status))
		.route("/{tileset}/meta", get(handlers::serve_meta))
		.route("/{tileset}/{z}/{x}/{y}", get(handlers::serve_tile))
		.fallback(handlers::not_found)
		.with_state(registry)
}
