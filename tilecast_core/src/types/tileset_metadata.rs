//! Descriptive metadata of a published tileset.
//!
//! [`TilesetMetadata`] is filled once when an archive is opened: every field
//! starts from a default and is overwritten by the matching row of the
//! archive's metadata table. [`TilesetMetadata::summary`] turns it into the
//! fixed JSON shape returned by the `/meta` endpoint.

use crate::types::constants::{DEFAULT_TILE_SIZE, WEB_MERCATOR_SRS};
use serde::Serialize;

/// Vertical axis convention of a tile grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
	Tms,
	Xyz,
}

/// Metadata of one tileset, with defaults for everything an archive omits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TilesetMetadata {
	pub name: String,
	pub description: String,
	pub version: String,
	pub attribution: String,
	/// Tile encoding as declared by the archive. Kept verbatim and resolved
	/// to a [`TileFormat`](crate::types::TileFormat) per tile request.
	pub format: String,
	pub srs: String,
	pub y_axis: YAxis,
	pub tile_width: u32,
	pub tile_height: u32,
}

impl TilesetMetadata {
	/// Creates metadata for a tileset called `name` with every other field
	/// at its default.
	pub fn new(name: &str) -> TilesetMetadata {
		TilesetMetadata {
			name: name.to_string(),
			description: String::new(),
			version: String::new(),
			attribution: String::new(),
			format: String::new(),
			srs: WEB_MERCATOR_SRS.to_string(),
			y_axis: YAxis::Tms,
			tile_width: DEFAULT_TILE_SIZE,
			tile_height: DEFAULT_TILE_SIZE,
		}
	}

	/// Builds the response body of the `/meta` endpoint.
	pub fn summary(&self) -> TilesetSummary {
		TilesetSummary {
			description: self.description.clone(),
			version: self.version.clone(),
			attribution: self.attribution.clone(),
			format: self.format.clone(),
			srs: self.srs.clone(),
			y_axis: self.y_axis,
			size: format!("{}*{}", self.tile_width, self.tile_height),
		}
	}
}

/// JSON shape of the `/meta` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetSummary {
	pub description: String,
	pub version: String,
	pub attribution: String,
	pub format: String,
	pub srs: String,
	pub y_axis: YAxis,
	pub size: String,
}
