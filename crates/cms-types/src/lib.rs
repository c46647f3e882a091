//! Common types module for the CMS toolkit.
//!
//! This module defines the shared vocabulary used throughout the toolkit:
//! well-known constants, the registry trait for self-registering
//! implementations, and the schema descriptors that drive record copying.

/// Record schema descriptors used for explicit field-by-field copying.
pub mod record;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Constants shared by the configuration and utility crates.
pub mod utils;

pub use record::{FieldDescriptor, FieldKind, RecordSchema};
pub use registry::ImplementationRegistry;
pub use utils::constants::{
	CACHE_KEY_NAMESPACE, DEFAULT_CACHE_KEY_MAX_LENGTH, DEFAULT_ELLIPSIS, DEFAULT_SHORTEN_LENGTH,
	DEFAULT_SITE_ID, DIGEST_TRUNCATION_MARGIN,
};
