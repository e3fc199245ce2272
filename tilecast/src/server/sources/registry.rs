//! Registry of all tilesets published by a server.
//!
//! Sources are registered once at startup and the registry is shared
//! immutably with the request handlers afterwards. Names are unique; the
//! first registration of a name wins and later ones are rejected.

use super::TileSource;
use anyhow::{Context, Result, bail, ensure};
use std::{collections::HashMap, ffi::OsStr, fs, path::Path, sync::Arc};

/// All tilesets served by one server, addressed by name.
#[derive(Default)]
pub struct SourceRegistry {
	sources: HashMap<String, Arc<TileSource>>,
}

impl SourceRegistry {
	pub fn new() -> SourceRegistry {
		SourceRegistry {
			sources: HashMap::new(),
		}
	}

	/// Adds a tileset. Fails if a tileset of the same name is already
	/// registered, leaving the existing one in place.
	pub fn register(&mut self, source: TileSource) -> Result<()> {
		if self.sources.contains_key(&source.name) {
			bail!("tileset '{}' is already registered", source.name);
		}
		log::info!("add tileset '{}'", source.name);
		self.sources.insert(source.name.clone(), Arc::new(source));
		Ok(())
	}

	/// Looks up a tileset by name.
	pub fn resolve(&self, name: &str) -> Option<Arc<TileSource>> {
		self.sources.get(name).cloned()
	}

	/// Returns all tileset names in alphabetical order.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.sources.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Opens a single archive and registers it. Any failure is fatal, a
	/// server started for one specific archive must not come up without it.
	pub fn open_archive(&mut self, path: &Path) -> Result<()> {
		let source = TileSource::open_path(path)?;
		self.register(source)
	}

	/// Registers every `*.mbtiles` archive in `dir`.
	///
	/// An archive that cannot be opened is skipped with a warning so that one
	/// corrupt file does not take down the remaining tilesets. A directory
	/// without any usable archive is not an error.
	pub fn scan_directory(&mut self, dir: &Path) -> Result<()> {
		log::debug!("scan directory {dir:?}");
		ensure!(dir.is_dir(), "'{}' is not a directory", dir.display());

		for entry in fs::read_dir(dir).with_context(|| format!("failed to read directory {dir:?}"))? {
			let path = entry?.path();
			if !path.is_file() || path.extension().and_then(OsStr::to_str) != Some("mbtiles") {
				continue;
			}
			match TileSource::open_path(&path) {
				Ok(source) => {
					if let Err(err) = self.register(source) {
						log::warn!("skipping '{}': {err:#}", path.display());
					}
				}
				Err(err) => log::warn!("skipping '{}': {err:#}", path.display()),
			}
		}

		if self.sources.is_empty() {
			log::warn!("no usable tile archives found in {dir:?}");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::container::testing;
	use std::fs;
	use tempfile::tempdir;

	#[test]
	fn registers_and_resolves() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("berlin.mbtiles");
		testing::write_png_archive(&path)?;

		let mut registry = SourceRegistry::new();
		assert!(registry.is_empty());
		assert!(registry.resolve("berlin").is_none());

		registry.open_archive(&path)?;
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.resolve("berlin").unwrap().name, "berlin");
		assert!(registry.resolve("hamburg").is_none());
		Ok(())
	}

	#[test]
	fn first_registration_wins() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("berlin.mbtiles");
		testing::write_png_archive(&path)?;

		let mut registry = SourceRegistry::new();
		registry.open_archive(&path)?;

		let err = registry.open_archive(&path).unwrap_err();
		assert_eq!(err.to_string(), "tileset 'berlin' is already registered");
		assert_eq!(registry.len(), 1);
		Ok(())
	}

	#[test]
	fn names_are_sorted() -> Result<()> {
		let dir = tempdir()?;
		for name in ["munich", "berlin", "cologne"] {
			testing::write_png_archive(&dir.path().join(format!("{name}.mbtiles")))?;
		}

		let mut registry = SourceRegistry::new();
		registry.scan_directory(dir.path())?;
		assert_eq!(registry.names(), vec!["berlin", "cologne", "munich"]);
		Ok(())
	}

	#[test]
	fn open_archive_fails_on_missing_file() {
		let mut registry = SourceRegistry::new();
		assert!(registry.open_archive(Path::new("/no/such/file.mbtiles")).is_err());
	}

	#[test]
	fn scan_skips_unreadable_archives() -> Result<()> {
		let dir = tempdir()?;
		testing::write_png_archive(&dir.path().join("berlin.mbtiles"))?;
		testing::write_png_archive(&dir.path().join("munich.mbtiles"))?;
		fs::write(dir.path().join("corrupt.mbtiles"), b"this is not a database")?;

		let mut registry = SourceRegistry::new();
		registry.scan_directory(dir.path())?;
		assert_eq!(registry.names(), vec!["berlin", "munich"]);
		Ok(())
	}

	#[test]
	fn scan_ignores_other_file_types() -> Result<()> {
		let dir = tempdir()?;
		testing::write_png_archive(&dir.path().join("berlin.mbtiles"))?;
		fs::write(dir.path().join("readme.txt"), b"nothing to serve here")?;
		fs::create_dir(dir.path().join("nested.mbtiles"))?;

		let mut registry = SourceRegistry::new();
		registry.scan_directory(dir.path())?;
		assert_eq!(registry.names(), vec!["berlin"]);
		Ok(())
	}

	#[test]
	fn scan_of_empty_directory_is_not_an_error() -> Result<()> {
		let dir = tempdir()?;
		let mut registry = SourceRegistry::new();
		registry.scan_directory(dir.path())?;
		assert!(registry.is_empty());
		Ok(())
	}

	#[test]
	fn scan_rejects_non_directories() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("berlin.mbtiles");
		testing::write_png_archive(&path)?;

		let mut registry = SourceRegistry::new();
		let err = registry.scan_directory(&path).unwrap_err();
		assert!(err.to_string().contains("is not a directory"), "unexpected error: {err}");
		Ok(())
	}
}
