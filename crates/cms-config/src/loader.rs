//! Layered loading of configuration files.
//!
//! A file is read as a [`ConfigLayer`]: every value is optional, so a layer
//! only states what it changes. The files named by `include` are applied first,
//! then the including file on top of them, one field at a time.

use crate::{expand_env, Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// `include` accepts one path or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Includes {
	One(PathBuf),
	Many(Vec<PathBuf>),
}

/// One configuration document before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigLayer {
	include: Option<Includes>,
	site: Option<SiteLayer>,
	cache: Option<CacheLayer>,
	display: Option<DisplayLayer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteLayer {
	id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheLayer {
	key_max_length: Option<usize>,
	key_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayLayer {
	max_length: Option<usize>,
	ellipsis: Option<String>,
}

impl ConfigLayer {
	/// Expands environment placeholders in `source` and parses the result.
	pub(crate) fn parse(source: &str) -> Result<Self, ConfigError> {
		let expanded = expand_env(source)?;
		Ok(toml::from_str(&expanded)?)
	}

	/// Paths named by `include`, as written.
	pub(crate) fn includes(&self) -> &[PathBuf] {
		match &self.include {
			Some(Includes::One(path)) => std::slice::from_ref(path),
			Some(Includes::Many(paths)) => paths,
			None => &[],
		}
	}

	/// Overwrites the fields of `config` that this layer sets.
	pub(crate) fn apply(self, config: &mut Config) {
		if let Some(site) = self.site {
			if let Some(id) = site.id {
				config.site.id = id;
			}
		}
		if let Some(cache) = self.cache {
			if let Some(key_max_length) = cache.key_max_length {
				config.cache.key_max_length = key_max_length;
			}
			if let Some(key_prefix) = cache.key_prefix {
				config.cache.key_prefix = key_prefix;
			}
		}
		if let Some(display) = self.display {
			if let Some(max_length) = display.max_length {
				config.display.max_length = max_length;
			}
			if let Some(ellipsis) = display.ellipsis {
				config.display.ellipsis = ellipsis;
			}
		}
	}
}

/// Applies `path` and everything it includes to `config`.
///
/// `chain` holds the canonical paths currently being applied. A file may be
/// included more than once along separate branches, but never by itself.
pub(crate) async fn apply_file(
	path: &Path,
	config: &mut Config,
	chain: &mut Vec<PathBuf>,
) -> Result<(), ConfigError> {
	let io_error = |source: std::io::Error| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	};

	let canonical = tokio::fs::canonicalize(path).await.map_err(io_error)?;
	if chain.contains(&canonical) {
		return Err(ConfigError::IncludeCycle(canonical));
	}

	let source = tokio::fs::read_to_string(&canonical).await.map_err(io_error)?;
	let layer = ConfigLayer::parse(&source)?;

	let base = canonical.parent().map(Path::to_path_buf).unwrap_or_default();
	chain.push(canonical);
	for include in layer.includes() {
		let included = base.join(include);
		tracing::debug!(file = %included.display(), "applying included configuration");
		Box::pin(apply_file(&included, config, chain)).await?;
	}
	chain.pop();

	layer.apply(config);
	Ok(())
}
