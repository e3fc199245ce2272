//! Tile coordinates in the XYZ addressing scheme.
//!
//! A [`TileCoord`] names one tile by zoom `level`, column `x` and row `y`,
//! counted from the north-west corner of the pyramid. MBTiles archives store
//! rows in TMS order (counted from the south edge), so [`TileCoord::tms_row`]
//! mirrors the row exactly once when a tile is looked up.

use anyhow::{Result, ensure};
use std::fmt;

/// One tile address: zoom level, column and row.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a new coordinate.
	///
	/// Only the zoom level is checked, `x` and `y` are taken as-is. An index
	/// outside the grid of `level` resolves to a storage row that no archive
	/// contains, so the lookup reports the tile as absent instead of failing.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		Ok(TileCoord { level, x, y })
	}

	/// Returns the largest valid column/row index on this zoom level.
	pub fn max_value(&self) -> u32 {
		(1u32 << self.level) - 1
	}

	/// Returns the row of this tile in a TMS (south origin) grid.
	///
	/// The mirror is plain arithmetic without clamping: a `y` beyond the grid
	/// produces a negative row, which matches no stored tile.
	pub fn tms_row(&self) -> i64 {
		i64::from(self.max_value()) - i64::from(self.y)
	}
}

impl fmt::Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y)
	}
}
