//! MBTiles archive reader.
//!
//! [`MBTilesReader`] opens an archive read-only, verifies that it has the two
//! tables the format requires, loads the metadata table once and then serves
//! point lookups through a connection pool. A tile that is not in the archive
//! is a regular outcome (`Ok(None)`), never an error.

use anyhow::{Context, Result, ensure};
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{OpenFlags, OptionalExtension},
};
use std::{
	env,
	fmt::{self, Debug},
	path::Path,
};
use tilecast_core::types::{Blob, REQUEST_TIMEOUT, TileCoord, TilesetMetadata};

/// Read-only access to one MBTiles archive.
pub struct MBTilesReader {
	name: String,
	pool: Pool<SqliteConnectionManager>,
	metadata: TilesetMetadata,
}

impl MBTilesReader {
	/// Opens an MBTiles archive.
	///
	/// The tileset name is derived from the file stem; a `name` row in the
	/// metadata table only changes the descriptive metadata, not the name the
	/// tileset is published under.
	pub fn open_path(path: &Path) -> Result<MBTilesReader> {
		log::debug!("open {path:?}");

		let path = if path.is_absolute() {
			path.to_path_buf()
		} else {
			env::current_dir()?.join(path)
		};
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "{path:?} is not a file");

		let name = path
			.file_stem()
			.with_context(|| format!("cannot derive a tileset name from {path:?}"))?
			.to_string_lossy()
			.into_owned();

		MBTilesReader::load_from_sqlite(&path, name).with_context(|| format!("failed to open MBTiles archive {path:?}"))
	}

	fn load_from_sqlite(path: &Path, name: String) -> Result<MBTilesReader> {
		let manager = SqliteConnectionManager::file(path)
			.with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI);
		let pool = Pool::builder()
			.max_size(10)
			.connection_timeout(REQUEST_TIMEOUT)
			.build(manager)?;

		let mut reader = MBTilesReader {
			metadata: TilesetMetadata::new(&name),
			name,
			pool,
		};
		reader.validate_schema()?;
		reader.load_metadata()?;

		Ok(reader)
	}

	/// Checks that the archive has the `tiles` and `metadata` tables. Both may
	/// also be views, which some conversion tools produce.
	fn validate_schema(&self) -> Result<()> {
		let conn = self.pool.get()?;
		for table in ["tiles", "metadata"] {
			let count: i64 = conn.query_row(
				"SELECT count(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?",
				[table],
				|row| row.get(0),
			)?;
			ensure!(count > 0, "archive has no '{table}' table");
		}
		Ok(())
	}

	fn load_metadata(&mut self) -> Result<()> {
		log::debug!("load metadata of '{}'", self.name);

		let conn = self.pool.get()?;
		let mut stmt = conn.prepare("SELECT name, value FROM metadata")?;
		let entries = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

		for entry in entries {
			let (key, value) = entry?;
			match key.as_str() {
				"name" => self.metadata.name = value,
				"description" => self.metadata.description = value,
				"version" => self.metadata.version = value,
				"attribution" => self.metadata.attribution = value,
				"format" => self.metadata.format = value,
				_ => {}
			}
		}
		Ok(())
	}

	/// Reads one tile. The XYZ row is mirrored to TMS exactly once, here.
	pub async fn get_tile(&self, coord: &TileCoord) -> Result<Option<Blob>> {
		log::trace!("read tile {coord:?} from '{}'", self.name);

		let conn = self.pool.get()?;
		let mut stmt =
			conn.prepare("SELECT tile_data FROM tiles WHERE tile_column = ? AND tile_row = ? AND zoom_level = ?")?;
		let data = stmt
			.query_row([i64::from(coord.x), coord.tms_row(), i64::from(coord.level)], |row| {
				row.get::<_, Vec<u8>>(0)
			})
			.optional()
			.with_context(|| format!("failed to read tile {coord:?} from '{}'", self.name))?;

		Ok(data.map(Blob::from))
	}

	/// Name the tileset is published under, the stem of the archive file.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn metadata(&self) -> &TilesetMetadata {
		&self.metadata
	}
}

impl Debug for MBTilesReader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MBTilesReader")
			.field("name", &self.name)
			.field("metadata", &self.metadata)
			.finish()
	}
}
