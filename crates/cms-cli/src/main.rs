//! Main entry point for the `cmsutil` command line tool.
//!
//! This binary exposes the toolkit's display string shortening and cache key
//! derivation. Defaults come from an optional TOML configuration file and can
//! be overridden per invocation.

use clap::{Parser, Subcommand};
use cms_config::Config;
use cms_utils::{shorten, CacheKeyBuilder};
use std::path::PathBuf;

/// Command-line arguments for cmsutil.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file; built-in defaults are used when omitted
	#[arg(short, long, env = "CMSUTIL_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Shorten a string for display
	Shorten {
		/// Text to shorten
		text: String,
		/// Target width in characters
		#[arg(short, long)]
		max_length: Option<usize>,
		/// Marker inserted at the cut
		#[arg(short, long)]
		ellipsis: Option<String>,
	},
	/// Derive the cache key for a path
	CacheKey {
		/// Path to derive the key from
		path: String,
		/// Bound on the path component of the key
		#[arg(short, long)]
		max_length: Option<usize>,
		/// Prefix placed before the path component
		#[arg(short, long)]
		prefix: Option<String>,
		/// Site identifier, overriding the configured one
		#[arg(short, long, allow_negative_numbers = true)]
		site_id: Option<i64>,
	},
}

/// Main entry point for cmsutil.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file, if one was given
/// 4. Runs the requested command and prints its result
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let config = match &args.config {
		Some(path) => {
			let config = Config::from_file(path).await?;
			tracing::info!("Loaded configuration from {}", path.display());
			config
		},
		None => Config::default(),
	};

	println!("{}", run(&args.command, &config));
	Ok(())
}

/// Executes a command against the loaded configuration.
fn run(command: &Command, config: &Config) -> String {
	match command {
		Command::Shorten {
			text,
			max_length,
			ellipsis,
		} => {
			let max_length = max_length.unwrap_or(config.display.max_length);
			let ellipsis = ellipsis.as_deref().unwrap_or(&config.display.ellipsis);
			shorten(text, max_length, ellipsis).into_owned()
		},
		Command::CacheKey {
			path,
			max_length,
			prefix,
			site_id,
		} => {
			let builder = CacheKeyBuilder::new(site_id.unwrap_or(config.site.id));
			let max_length = max_length.unwrap_or(config.cache.key_max_length);
			let prefix = prefix.as_deref().unwrap_or(&config.cache.key_prefix);
			builder.build_key(path, max_length, prefix)
		},
	}
}
