//! Configuration for the CMS toolkit.
//!
//! Three sections are recognised, all optional:
//!
//! ```toml
//! [site]
//! id = 1
//!
//! [cache]
//! key_max_length = 200
//! key_prefix = "pages"
//!
//! [display]
//! max_length = 50
//! ellipsis = " … "
//! ```
//!
//! Files may layer on top of others with `include = "base.toml"` or
//! `include = ["a.toml", "b.toml"]`; see [`Config::from_file`]. Values of the
//! form `${VAR}` or `${VAR:-fallback}` are taken from the environment before
//! the file is parsed.

mod loader;

use cms_types::{
	DEFAULT_CACHE_KEY_MAX_LENGTH, DEFAULT_ELLIPSIS, DEFAULT_SHORTEN_LENGTH, DEFAULT_SITE_ID,
};
use loader::ConfigLayer;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A configuration file could not be read.
	#[error("cannot read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// The TOML is malformed or contains unknown keys.
	#[error("invalid configuration: {0}")]
	Parse(String),
	/// A `${VAR}` placeholder without fallback names an unset variable.
	#[error("environment variable '{0}' is not set")]
	MissingVariable(String),
	/// A file includes itself, directly or through other files.
	#[error("include cycle through {}", .0.display())]
	IncludeCycle(PathBuf),
	/// `include` was used in configuration that was not loaded from a file.
	#[error("include is only supported when loading from a file")]
	UnexpectedInclude,
	/// A value breaks the helpers' preconditions.
	#[error("{0}")]
	Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().trim().to_string())
	}
}

/// Complete toolkit configuration with every default applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
	/// Identity of the site this process serves.
	pub site: SiteConfig,
	/// Defaults for cache key derivation.
	pub cache: CacheConfig,
	/// Defaults for display string shortening.
	pub display: DisplayConfig,
}

/// The `[site]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteConfig {
	/// Site identifier scoping every cache key.
	pub id: i64,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			id: DEFAULT_SITE_ID,
		}
	}
}

/// The `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
	/// Bound on the path component before it is collapsed into a digest.
	pub key_max_length: usize,
	/// Prefix placed between the site identifier and the path component.
	pub key_prefix: String,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			key_max_length: DEFAULT_CACHE_KEY_MAX_LENGTH,
			key_prefix: String::new(),
		}
	}
}

/// The `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
	/// Target width of shortened strings.
	pub max_length: usize,
	/// Marker inserted at the cut.
	pub ellipsis: String,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			max_length: DEFAULT_SHORTEN_LENGTH,
			ellipsis: DEFAULT_ELLIPSIS.to_string(),
		}
	}
}

fn placeholder() -> &'static Regex {
	static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
	PLACEHOLDER.get_or_init(|| {
		Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
			.expect("placeholder pattern is valid")
	})
}

/// Substitutes `${VAR}` and `${VAR:-fallback}` placeholders from the environment.
pub(crate) fn expand_env(source: &str) -> Result<String, ConfigError> {
	let mut unset = None;
	let expanded = placeholder().replace_all(source, |caps: &Captures| {
		let name = &caps[1];
		match (std::env::var(name), caps.get(2)) {
			(Ok(value), _) => value,
			(Err(_), Some(fallback)) => fallback.as_str().to_string(),
			(Err(_), None) => {
				unset.get_or_insert_with(|| name.to_string());
				String::new()
			},
		}
	});

	match unset {
		Some(name) => Err(ConfigError::MissingVariable(name)),
		None => Ok(expanded.into_owned()),
	}
}

impl Config {
	/// Loads configuration from `path`, applying its includes first.
	///
	/// Included files are applied in the order listed and resolved relative to
	/// the file naming them. The including file then overrides them field by
	/// field, so a base file can hold shared values and a site file only the
	/// few that differ.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let mut config = Config::default();
		loader::apply_file(path.as_ref(), &mut config, &mut Vec::new()).await?;
		config.validate()?;
		tracing::debug!(site = config.site.id, "configuration loaded");
		Ok(config)
	}

	/// Checks values against the preconditions of the helpers.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.cache.key_max_length == 0 {
			return Err(ConfigError::Invalid(
				"cache.key_max_length must be at least 1".into(),
			));
		}
		if self.display.max_length == 0 {
			return Err(ConfigError::Invalid(
				"display.max_length must be at least 1".into(),
			));
		}
		if self.display.ellipsis.is_empty() {
			return Err(ConfigError::Invalid("display.ellipsis is empty".into()));
		}

		// The head takes 60% of the width; the marker must fit in what is left.
		let head = (self.display.max_length as f64 * 0.6) as usize;
		let room = self.display.max_length - head;
		let marker = self.display.ellipsis.chars().count();
		if marker > room {
			return Err(ConfigError::Invalid(format!(
				"display.ellipsis has {} characters, display.max_length {} leaves room for {}",
				marker, self.display.max_length, room
			)));
		}

		Ok(())
	}
}

/// Parses a single configuration document. `include` is rejected here
/// because there is no file to resolve it against.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let layer = ConfigLayer::parse(s)?;
		if !layer.includes().is_empty() {
			return Err(ConfigError::UnexpectedInclude);
		}

		let mut config = Config::default();
		layer.apply(&mut config);
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_expand_env() {
		std::env::set_var("CMS_TEST_HOST", "localhost");
		std::env::set_var("CMS_TEST_PORT", "5432");

		let expanded = expand_env("host = \"${CMS_TEST_HOST}:${CMS_TEST_PORT}\"").unwrap();
		assert_eq!(expanded, "host = \"localhost:5432\"");

		std::env::remove_var("CMS_TEST_HOST");
		std::env::remove_var("CMS_TEST_PORT");
	}

	#[test]
	fn test_expand_env_fallback() {
		let expanded = expand_env("value = \"${CMS_MISSING_VAR:-fallback}\"").unwrap();
		assert_eq!(expanded, "value = \"fallback\"");

		let expanded = expand_env("value = \"${CMS_MISSING_VAR:-}\"").unwrap();
		assert_eq!(expanded, "value = \"\"");
	}

	#[test]
	fn test_expand_env_unset() {
		let result = expand_env("a = \"${CMS_MISSING_VAR}\"\nb = \"${CMS_OTHER_MISSING}\"");
		assert!(matches!(result, Err(ConfigError::MissingVariable(name)) if name == "CMS_MISSING_VAR"));
	}

	#[test]
	fn test_expand_env_leaves_plain_text() {
		let source = "price = \"$5 {not a placeholder}\"";
		assert_eq!(expand_env(source).unwrap(), source);
	}

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = "".parse().unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.site.id, 0);
		assert_eq!(config.cache.key_max_length, 200);
		assert_eq!(config.cache.key_prefix, "");
		assert_eq!(config.display.max_length, 50);
		assert_eq!(config.display.ellipsis, " \u{2026} ");
	}

	#[test]
	fn test_full_config() {
		let config_str = r#"
[site]
id = 3

[cache]
key_max_length = 120
key_prefix = "pages"

[display]
max_length = 15
ellipsis = "_"
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.site.id, 3);
		assert_eq!(config.cache.key_max_length, 120);
		assert_eq!(config.cache.key_prefix, "pages");
		assert_eq!(config.display.max_length, 15);
		assert_eq!(config.display.ellipsis, "_");
	}

	#[test]
	fn test_partial_section_keeps_other_defaults() {
		let config: Config = "[cache]\nkey_prefix = \"nav\"\n".parse().unwrap();
		assert_eq!(config.cache.key_prefix, "nav");
		assert_eq!(config.cache.key_max_length, 200);
	}

	#[test]
	fn test_negative_site_id() {
		let config: Config = "[site]\nid = -2\n".parse().unwrap();
		assert_eq!(config.site.id, -2);
	}

	#[test]
	fn test_config_with_env_vars() {
		std::env::set_var("CMS_TEST_SITE_ID", "7");

		let config_str = r#"
[site]
id = ${CMS_TEST_SITE_ID}

[cache]
key_prefix = "${CMS_TEST_PREFIX:-nav}"
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.site.id, 7);
		assert_eq!(config.cache.key_prefix, "nav");

		std::env::remove_var("CMS_TEST_SITE_ID");
	}

	#[test]
	fn test_zero_key_max_length_rejected() {
		let result = "[cache]\nkey_max_length = 0\n".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn test_empty_ellipsis_rejected() {
		let result = "[display]\nellipsis = \"\"\n".parse::<Config>();
		assert!(result.unwrap_err().to_string().contains("ellipsis is empty"));
	}

	#[test]
	fn test_oversized_ellipsis_rejected() {
		// width 10 keeps a 6 character head, leaving 4 for the marker
		let ok = "[display]\nmax_length = 10\nellipsis = \"....\"\n".parse::<Config>();
		assert!(ok.is_ok());

		let result = "[display]\nmax_length = 10\nellipsis = \".....\"\n".parse::<Config>();
		assert!(result.unwrap_err().to_string().contains("leaves room for 4"));
	}

	#[test]
	fn test_unknown_key_rejected() {
		let result = "[cache]\nkey_max_lenght = 10\n".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Parse(msg)) if msg.contains("key_max_lenght")));

		let result = "[sites]\nid = 1\n".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_include_needs_a_file() {
		let result = "include = \"base.toml\"\n".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::UnexpectedInclude)));
	}

	#[test]
	fn test_invalid_toml_is_parse_error() {
		let result = "[site\nid = 1".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}
}
