//! A published tileset: an archive reader plus the name it is served under.

use crate::container::MBTilesReader;
use anyhow::{Context, Result};
use std::path::Path;
use tilecast_core::types::{Blob, TileCoord, TileFormat, TilesetMetadata};

/// One tileset as exposed by the HTTP server.
pub struct TileSource {
	pub name: String,
	reader: MBTilesReader,
}

impl TileSource {
	/// Opens the archive at `path` and publishes it under its file stem.
	pub fn open_path(path: &Path) -> Result<TileSource> {
		let reader = MBTilesReader::open_path(path)?;
		Ok(TileSource {
			name: reader.name().to_string(),
			reader,
		})
	}

	pub async fn get_tile(&self, coord: &TileCoord) -> Result<Option<Blob>> {
		self.reader.get_tile(coord).await
	}

	pub fn metadata(&self) -> &TilesetMetadata {
		self.reader.metadata()
	}

	/// Returns the MIME type of this tileset's tiles.
	///
	/// The format string of the archive is resolved on every call, so a
	/// tileset declaring an unknown format still serves metadata and only
	/// fails on tile requests.
	pub fn tile_mime(&self) -> Result<&'static str> {
		let format = TileFormat::try_from_str(&self.metadata().format)
			.with_context(|| format!("tileset '{}' declares an unsupported tile format", self.name))?;
		Ok(format.as_mime_str())
	}
}
