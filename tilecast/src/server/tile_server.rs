//! HTTP server lifecycle.
//!
//! [`TileServer`] owns the lifecycle concerns only: binding listeners,
//! wrapping the route table in its protection layers and shutting everything
//! down gracefully. What is served comes from the [`SourceRegistry`] it is
//! given at construction.

use super::{cors, routes, sources::SourceRegistry};
use anyhow::{Context, Result};
use axum::{
	BoxError, Router,
	error_handling::HandleErrorLayer,
	http::{HeaderValue, StatusCode},
	response::IntoResponse,
};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tilecast_core::types::REQUEST_TIMEOUT;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::timeout};
use tower::{ServiceBuilder, timeout::TimeoutLayer};

struct Listener {
	addr: SocketAddr,
	exit_signal: oneshot::Sender<()>,
	join: JoinHandle<()>,
}

/// A tile server listening on one IP and any number of ports.
pub struct TileServer {
	ip: String,
	ports: Vec<u16>,
	registry: Arc<SourceRegistry>,
	listeners: Vec<Listener>,
}

impl TileServer {
	pub fn new(ip: &str, ports: &[u16], registry: Arc<SourceRegistry>) -> TileServer {
		TileServer {
			ip: ip.to_string(),
			ports: ports.to_vec(),
			registry,
			listeners: Vec::new(),
		}
	}

	/// Starts a listener on every configured port. A server that is already
	/// running is stopped first.
	pub async fn start(&mut self) -> Result<()> {
		if !self.listeners.is_empty() {
			self.stop().await;
		}
		log::info!("starting server");

		let app = self.build_app();

		// bind every port before serving any of them, a port conflict must
		// not leave a half-started server behind
		let mut bound = Vec::new();
		for port in &self.ports {
			let addr = format!("{}:{port}", self.ip);
			log::info!("binding {addr}");
			let listener = TcpListener::bind(&addr)
				.await
				.with_context(|| format!("failed to bind '{addr}'"))?;
			bound.push(listener);
		}

		for listener in bound {
			let addr = listener.local_addr()?;
			let (exit_signal, exit_receiver) = oneshot::channel::<()>();
			let app = app.clone();
			let join = tokio::spawn(async move {
				if let Err(err) = axum::serve(listener, app.into_make_service())
					.with_graceful_shutdown(async move {
						exit_receiver.await.ok();
					})
					.await
				{
					log::error!("server on {addr} exited with error: {err}");
				}
			});
			self.listeners.push(Listener { addr, exit_signal, join });
		}
		Ok(())
	}

	fn build_app(&self) -> Router {
		let app = routes::build_router(Arc::clone(&self.registry));

		// every request gets a hard wall time; an elapsed timeout surfaces
		// as 503, handled outermost so the router sees an infallible stack
		let protection = ServiceBuilder::new()
			.layer(HandleErrorLayer::new(|_err: BoxError| async move {
				let mut resp = (StatusCode::SERVICE_UNAVAILABLE, "Service overloaded, try later").into_response();
				resp.headers_mut().insert("Retry-After", HeaderValue::from_static("2"));
				Ok::<_, Infallible>(resp)
			}))
			.layer(TimeoutLayer::new(REQUEST_TIMEOUT));

		// CORS outermost, a 503 from the protection stack carries the
		// headers too
		cors::add_cors_headers(app.layer(protection))
	}

	/// Stops all listeners, waiting up to ten seconds for each to drain.
	pub async fn stop(&mut self) {
		log::info!("stopping server");
		for listener in self.listeners.drain(..) {
			listener.exit_signal.send(()).ok();
			match timeout(Duration::from_secs(10), listener.join).await {
				Ok(Ok(())) => {}
				Ok(Err(err)) => log::warn!("server task on {} ended with error: {err}", listener.addr),
				Err(_) => log::warn!("server task on {} did not stop in time", listener.addr),
			}
		}
	}

	/// Returns the addresses the server is currently listening on. Useful
	/// when a port was given as 0 and the OS picked one.
	pub fn bound_addrs(&self) -> Vec<SocketAddr> {
		self.listeners.iter().map(|listener| listener.addr).collect()
	}
}
