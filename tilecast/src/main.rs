//! Command line entry point of the tile server.

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tilecast::server::{SourceRegistry, TileServer};
use tokio::time::sleep;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Path to an MBTiles archive, or with --folder a directory of archives
	path: PathBuf,

	/// Serve every *.mbtiles archive found in PATH
	#[arg(short, long)]
	folder: bool,

	/// Comma separated list of ports to listen on
	#[arg(short, long, value_delimiter = ',', default_value = "8080")]
	ports: Vec<u16>,

	/// IP address to bind
	#[arg(short, long, default_value = "0.0.0.0")]
	ip: String,

	/// Shut the server down automatically after this many milliseconds
	#[arg(long)]
	auto_shutdown: Option<u64>,

	#[command(flatten)]
	verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

#[tokio::main]
async fn run(cli: Cli) -> Result<()> {
	let mut registry = SourceRegistry::new();
	if cli.folder {
		registry.scan_directory(&cli.path)?;
	} else {
		registry.open_archive(&cli.path)?;
	}
	let registry = Arc::new(registry);

	let mut server = TileServer::new(&cli.ip, &cli.ports, Arc::clone(&registry));
	server.start().await?;

	eprintln!("tile server is running:");
	for (url, name) in url_mapping(&server.bound_addrs(), &registry.names()) {
		eprintln!("   {url:48}  <-  {name}");
	}

	if let Some(milliseconds) = cli.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
	} else {
		tokio::signal::ctrl_c().await?;
	}

	server.stop().await;
	Ok(())
}

fn url_mapping(addrs: &[SocketAddr], names: &[String]) -> Vec<(String, String)> {
	let mut list = Vec::new();
	for addr in addrs {
		for name in names {
			list.push((format!("http://{addr}/{name}/{{z}}/{{x}}/{{y}}"), name.clone()));
			list.push((format!("http://{addr}/{name}/meta"), name.clone()));
		}
	}
	list
}

#[cfg(test)]
mod tests {
	use super::*;
	use r2d2_sqlite::rusqlite::Connection;
	use std::path::Path;

	fn run_command(args: Vec<&str>) -> Result<()> {
		run(Cli::try_parse_from(args)?)
	}

	fn write_test_archive(path: &Path) -> Result<()> {
		let conn = Connection::open(path)?;
		conn.execute("CREATE TABLE metadata (name TEXT, value TEXT)", [])?;
		conn.execute(
			"CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB)",
			[],
		)?;
		conn.execute("INSERT INTO metadata (name, value) VALUES ('format', 'png')", [])?;
		conn.execute(
			"INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (0, 0, 0, x'010203')",
			[],
		)?;
		Ok(())
	}

	#[test]
	fn parses_defaults() -> Result<()> {
		let cli = Cli::try_parse_from(["tilecast", "city.mbtiles"])?;
		assert_eq!(cli.path, PathBuf::from("city.mbtiles"));
		assert!(!cli.folder);
		assert_eq!(cli.ports, vec![8080]);
		assert_eq!(cli.ip, "0.0.0.0");
		assert_eq!(cli.auto_shutdown, None);
		Ok(())
	}

	#[test]
	fn parses_port_lists() -> Result<()> {
		let cli = Cli::try_parse_from(["tilecast", "-p", "8080,8081,9000", "city.mbtiles"])?;
		assert_eq!(cli.ports, vec![8080, 8081, 9000]);
		Ok(())
	}

	#[test]
	fn requires_a_path() {
		assert!(Cli::try_parse_from(["tilecast"]).is_err());
	}

	#[test]
	fn rejects_invalid_ports() {
		assert!(Cli::try_parse_from(["tilecast", "-p", "eighty", "city.mbtiles"]).is_err());
	}

	#[test]
	fn announces_tile_and_meta_urls() {
		let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
		let urls = url_mapping(&[addr], &["berlin".to_string()]);
		assert_eq!(
			urls,
			vec![
				("http://127.0.0.1:8080/berlin/{z}/{x}/{y}".to_string(), "berlin".to_string()),
				("http://127.0.0.1:8080/berlin/meta".to_string(), "berlin".to_string()),
			]
		);
	}

	#[test]
	fn serves_a_single_archive_until_auto_shutdown() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("city.mbtiles");
		write_test_archive(&path)?;

		run_command(vec![
			"tilecast",
			path.to_str().unwrap(),
			"-i",
			"127.0.0.1",
			"-p",
			"0",
			"--auto-shutdown",
			"250",
		])
	}

	#[test]
	fn serves_a_folder_until_auto_shutdown() -> Result<()> {
		let dir = tempfile::tempdir()?;
		write_test_archive(&dir.path().join("east.mbtiles"))?;
		write_test_archive(&dir.path().join("west.mbtiles"))?;

		run_command(vec![
			"tilecast",
			"--folder",
			dir.path().to_str().unwrap(),
			"-i",
			"127.0.0.1",
			"-p",
			"0",
			"--auto-shutdown",
			"250",
		])
	}

	#[test]
	fn fails_on_missing_archive() {
		let result = run_command(vec![
			"tilecast",
			"/no/such/file.mbtiles",
			"-p",
			"0",
			"--auto-shutdown",
			"100",
		]);
		assert!(result.is_err());
	}
}
