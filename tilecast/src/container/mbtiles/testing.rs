//! Helpers for building scratch MBTiles archives in tests.

use anyhow::Result;
use r2d2_sqlite::rusqlite::{Connection, params};
use std::path::Path;

/// Creates an MBTiles archive at `path` with the given metadata rows and
/// tiles. Tile rows are stored exactly as passed, in TMS order.
pub fn write_archive(path: &Path, metadata: &[(&str, &str)], tiles: &[(i64, i64, i64, &[u8])]) -> Result<()> {
	let conn = Connection::open(path)?;
	conn.execute("CREATE TABLE metadata (name TEXT, value TEXT)", [])?;
	conn.execute(
		"CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB)",
		[],
	)?;
	for (name, value) in metadata {
		conn.execute("INSERT INTO metadata (name, value) VALUES (?1, ?2)", params![name, value])?;
	}
	for &(zoom, column, row, data) in tiles {
		conn.execute(
			"INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
			params![zoom, column, row, data],
		)?;
	}
	Ok(())
}

/// Creates the archive used by most server tests: a PNG tileset with one
/// 3 byte tile at `2/1/2` (XYZ), stored as TMS row 1.
pub fn write_png_archive(path: &Path) -> Result<()> {
	write_archive(
		path,
		&[
			("name", "Berlin"),
			("description", "Berlin city map"),
			("version", "1.3"),
			("attribution", "© contributors"),
			("format", "png"),
		],
		&[(2, 1, 1, &[1, 2, 3])],
	)
}
