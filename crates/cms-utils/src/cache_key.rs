//! Cache key derivation.
//!
//! Keys have the form `FEINCMS:<site_id>:<prefix>:<path>`. The path is
//! normalized first; when the normalized path is longer than the bound it is
//! collapsed into the MD5 digest of the original path followed by a truncated
//! head of the normalized one.

use crate::index::resolve_index;
use crate::normalize::{IriToUri, PathNormalizer};
use cms_config::SiteConfig;
use cms_types::{
	CACHE_KEY_NAMESPACE, DEFAULT_CACHE_KEY_MAX_LENGTH, DEFAULT_SITE_ID, DIGEST_TRUNCATION_MARGIN,
};
use std::borrow::Cow;

/// Builds namespaced cache keys for one site.
///
/// The site identifier is fixed at construction, so the builder holds no
/// mutable state and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyBuilder<N = IriToUri> {
	site_id: i64,
	normalizer: N,
}

impl CacheKeyBuilder {
	/// Creates a builder for `site_id` using IRI to URI normalization.
	pub fn new(site_id: i64) -> Self {
		Self::with_normalizer(site_id, IriToUri)
	}

	/// Creates a builder for the configured site.
	pub fn from_config(site: &SiteConfig) -> Self {
		Self::new(site.id)
	}
}

impl Default for CacheKeyBuilder {
	fn default() -> Self {
		Self::new(DEFAULT_SITE_ID)
	}
}

impl<N: PathNormalizer> CacheKeyBuilder<N> {
	/// Creates a builder with a custom path normalizer.
	pub fn with_normalizer(site_id: i64, normalizer: N) -> Self {
		Self {
			site_id,
			normalizer,
		}
	}

	/// Returns the site identifier embedded in every key.
	pub fn site_id(&self) -> i64 {
		self.site_id
	}

	/// Converts `path` into a cache key.
	///
	/// Only the path component is bounded by `max_length`; the namespace, site
	/// identifier and prefix come on top. Oversized paths become
	/// `<md5 of path>-<first max_length - 20 characters of the normalized path>`.
	/// With `max_length <= 20` that head is cut from the end instead, so the
	/// component can exceed `max_length`.
	pub fn build_key(&self, path: &str, max_length: usize, prefix: &str) -> String {
		let normalized = self.normalizer.normalize(path);
		let component = collapse_path(path, normalized, max_length);

		format!(
			"{}:{}:{}:{}",
			CACHE_KEY_NAMESPACE, self.site_id, prefix, component
		)
	}

	/// Converts `path` into a cache key with a 200 character bound and no prefix.
	pub fn build_default_key(&self, path: &str) -> String {
		self.build_key(path, DEFAULT_CACHE_KEY_MAX_LENGTH, "")
	}
}

/// Returns the path component for `normalized`, collapsing it when too long.
fn collapse_path<'a>(
	original: &str,
	normalized: Cow<'a, str>,
	max_length: usize,
) -> Cow<'a, str> {
	let length = normalized.chars().count();
	if length <= max_length {
		return normalized;
	}

	let digest = md5::compute(original.as_bytes());
	let keep = resolve_index(
		max_length as isize - DIGEST_TRUNCATION_MARGIN as isize,
		length,
	);
	let head: String = normalized.chars().take(keep).collect();

	tracing::trace!(
		"Collapsed cache key path of {} characters into digest {:x}",
		length,
		digest
	);

	Cow::Owned(format!("{:x}-{}", digest, head))
}
