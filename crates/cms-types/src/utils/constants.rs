//! Common constants used across the toolkit.
//!
//! These are the built-in defaults for string shortening and cache key
//! derivation. Configuration values fall back to them when unset.

/// Literal namespace every cache key starts with.
pub const CACHE_KEY_NAMESPACE: &str = "FEINCMS";

/// Site identifier used when none is configured.
pub const DEFAULT_SITE_ID: i64 = 0;

/// Default bound on the path component of a cache key.
pub const DEFAULT_CACHE_KEY_MAX_LENGTH: usize = 200;

/// Number of characters by which the kept path head is shorter than the bound
/// once a cache key path has been collapsed into a digest.
pub const DIGEST_TRUNCATION_MARGIN: usize = 20;

/// Default target width of shortened display strings.
pub const DEFAULT_SHORTEN_LENGTH: usize = 50;

/// Default marker inserted where a display string was cut.
pub const DEFAULT_ELLIPSIS: &str = " \u{2026} ";
