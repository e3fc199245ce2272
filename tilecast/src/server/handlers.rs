//! Request handlers for tiles, tileset metadata and the status probe.
//!
//! Handlers translate every outcome into a response instead of propagating
//! errors: a missing tileset or tile becomes a 404 with a plain text body, an
//! internal failure becomes a 500 with the error chain in the log but not in
//! the response.

use crate::server::sources::SourceRegistry;
use axum::{
	Json,
	body::Body,
	extract::{Path, State},
	http::header,
	response::{IntoResponse, Response},
};
use std::sync::Arc;
use tilecast_core::types::{Blob, TileCoord};

/// Handles `GET /{tileset}/{z}/{x}/{y}`.
pub async fn serve_tile(
	Path((tileset, z, x, y)): Path<(String, u8, u32, u32)>,
	State(registry): State<Arc<SourceRegistry>>,
) -> Response<Body> {
	log::debug!("handle tile request: /{tileset}/{z}/{x}/{y}");

	let Some(source) = registry.resolve(&tileset) else {
		log::debug!("send 404, tileset '{tileset}' not found");
		return error_404(&format!("tileset '{tileset}' not found"));
	};

	let Ok(coord) = TileCoord::new(z, x, y) else {
		// a zoom level beyond 31 addresses no grid at all
		log::debug!("send 404, zoom level {z} is outside every grid");
		return tile_not_found(&tileset, z, x, y);
	};

	match source.get_tile(&coord).await {
		Ok(Some(tile)) => match source.tile_mime() {
			Ok(mime) => ok_blob(tile, mime),
			Err(err) => {
				log::warn!("send 500 for /{tileset}/{z}/{x}/{y}:\n{}", format_error_chain(&err));
				error_500()
			}
		},
		Ok(None) => {
			log::debug!("send 404, tile {coord:?} not found in '{tileset}'");
			tile_not_found(&tileset, z, x, y)
		}
		Err(err) => {
			log::warn!("send 500 for /{tileset}/{z}/{x}/{y}:\n{}", format_error_chain(&err));
			error_500()
		}
	}
}

/// Handles `GET /{tileset}/meta`.
pub async fn serve_meta(
	Path(tileset): Path<String>,
	State(registry): State<Arc<SourceRegistry>>,
) -> Response<Body> {
	log::debug!("handle meta request: /{tileset}/meta");

	match registry.resolve(&tileset) {
		Some(source) => Json(source.metadata().summary()).into_response(),
		None => {
			log::debug!("send 404, tileset '{tileset}' not found");
			error_404(&format!("tileset '{tileset}' not found"))
		}
	}
}

/// Handles `GET /status`.
pub async fn serve_status() -> &'static str {
	"ready!"
}

/// Fallback for every route the router does not know.
pub async fn not_found() -> Response<Body> {
	error_404("Not Found")
}

fn ok_blob(tile: Blob, mime: &str) -> Response<Body> {
	Response::builder()
		.status(200)
		.header(header::CONTENT_TYPE, mime)
		.body(Body::from(tile.into_vec()))
		.expect("failed to build tile response")
}

fn tile_not_found(tileset: &str, z: u8, x: u32, y: u32) -> Response<Body> {
	error_404(&format!("tile {z}/{x}/{y} not found in tileset '{tileset}'"))
}

fn error_404(message: &str) -> Response<Body> {
	error_with(404, message)
}

fn error_500() -> Response<Body> {
	error_with(500, "Internal Server Error")
}

fn error_with(status: u16, message: &str) -> Response<Body> {
	Response::builder()
		.status(status)
		.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
		.body(Body::from(message.to_string()))
		.expect("failed to build error response")
}

/// Renders an error and its chain of causes into one log message.
fn format_error_chain(err: &anyhow::Error) -> String {
	let mut out = err.to_string();
	let causes: Vec<_> = err.chain().skip(1).collect();
	if !causes.is_empty() {
		out.push_str("\n  Caused by:");
		for cause in causes {
			out.push_str(&format!("\n    {cause}"));
		}
	}
	out
}
