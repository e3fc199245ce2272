//! Fixed CORS headers.
//!
//! Every response of the server carries the same three headers, on success
//! and on error responses alike.

use axum::{
	Router,
	http::{HeaderValue, header},
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Wraps `app` so that every outgoing response carries the CORS headers.
pub fn add_cors_headers(app: Router) -> Router {
	app.layer(SetResponseHeaderLayer::overriding(
		header::ACCESS_CONTROL_ALLOW_ORIGIN,
		HeaderValue::from_static("*"),
	))
	.layer(SetResponseHeaderLayer::overriding(
		header::ACCESS_CONTROL_ALLOW_METHODS,
		HeaderValue::from_static("GET, POST"),
	))
	.layer(SetResponseHeaderLayer::overriding(
		header::ACCESS_CONTROL_ALLOW_HEADERS,
		HeaderValue::from_static("Content-Type"),
	))
}
