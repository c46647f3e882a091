//! Helpers for the CMS toolkit.
//!
//! This crate holds the pure helpers the rest of the toolkit builds on:
//! display string shortening, IRI normalisation and cache key derivation,
//! plus the explicit object registry, schema-driven record copying and
//! pair grouping. Every helper is synchronous and free of shared mutable
//! state, so all of them can be called from any thread.

pub mod cache_key;
pub mod collections;
pub mod normalize;
pub mod record;
pub mod registry;
pub mod text;

mod index;

pub use cache_key::CacheKeyBuilder;
pub use collections::collect_dict_values;
pub use normalize::{iri_to_uri, IriToUri, PathNormalizer};
pub use record::{copy_record, RecordError};
pub use registry::{Module, ObjectRef, ObjectRegistry, ResolveError, Resolved};
pub use text::{shorten, shorten_string};
