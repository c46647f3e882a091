//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable implementations use
//! to announce the dotted name they are resolved by and the value they register.

/// Base trait for implementation registries.
///
/// Each pluggable implementation provides a Registry struct that implements this
/// trait. The object registry in `cms-utils` uses it to register the implementation
/// under its configuration name without any runtime reflection.
pub trait ImplementationRegistry {
	/// The attribute name used in configuration files to reference this implementation.
	///
	/// Combined with the module it is registered in, this forms the dotted
	/// identifier, for example `"text.shorten"` or `"cache.build_key"`.
	const NAME: &'static str;

	/// The value type this implementation provides, usually a factory function.
	type Factory;

	/// Get the value to register for this implementation.
	fn factory() -> Self::Factory;
}
