//! Tile payload formats and their MIME types.
//!
//! The format of a tileset is declared in the `format` row of its metadata
//! table. Only the formats listed here can be published; a tileset declaring
//! anything else is served for metadata but fails on tile requests.

use anyhow::{Result, bail};
use std::fmt::{self, Display};

/// Data format of a tile payload.
///
/// `JPEG` and `JPG` are kept apart on purpose: archives declare either
/// spelling and each one maps to its own MIME type.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TileFormat {
	JPEG,
	JPG,
	PBF,
	PNG,
}

impl TileFormat {
	/// Returns the lowercase name of the format.
	pub fn as_str(&self) -> &'static str {
		match self {
			TileFormat::JPEG => "jpeg",
			TileFormat::JPG => "jpg",
			TileFormat::PBF => "pbf",
			TileFormat::PNG => "png",
		}
	}

	/// Parses a format name, ignoring case and surrounding whitespace.
	pub fn try_from_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"jpeg" => TileFormat::JPEG,
			"jpg" => TileFormat::JPG,
			"pbf" => TileFormat::PBF,
			"png" => TileFormat::PNG,
			_ => bail!("Unknown tile format: '{value}'"),
		})
	}

	/// Returns the MIME type sent in the `Content-Type` header.
	pub fn as_mime_str(&self) -> &'static str {
		match self {
			TileFormat::JPEG => "image/jpeg",
			TileFormat::JPG => "image/jpg",
			TileFormat::PBF => "application/x-protobuf",
			TileFormat::PNG => "image/png",
		}
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
