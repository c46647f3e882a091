//! Explicit object registry.
//!
//! Configuration refers to functions and types by dotted names such as
//! `"text.shorten"`. Instead of loading code at runtime, every usable value is
//! registered up front under a module name, and dotted names are resolved
//! against that table when the configuration is loaded.

use cms_types::ImplementationRegistry;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while resolving a dotted name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
	/// Neither the full name nor its module part is registered.
	#[error("No module named '{0}'")]
	ModuleNotFound(String),
	/// The module exists but does not hold the attribute.
	#[error("Module '{module}' has no attribute '{attribute}'")]
	AttributeNotFound { module: String, attribute: String },
}

/// A named group of registered values.
#[derive(Debug, Clone)]
pub struct Module<T> {
	name: String,
	attributes: HashMap<String, T>,
}

impl<T> Module<T> {
	fn new(name: String) -> Self {
		Self {
			name,
			attributes: HashMap::new(),
		}
	}

	/// Returns the module name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Registers `value` under `attribute`, replacing any previous value.
	pub fn register(&mut self, attribute: impl Into<String>, value: T) -> &mut Self {
		let attribute = attribute.into();
		tracing::debug!("Registering {}.{}", self.name, attribute);
		self.attributes.insert(attribute, value);
		self
	}

	/// Looks up an attribute of this module.
	pub fn get(&self, attribute: &str) -> Option<&T> {
		self.attributes.get(attribute)
	}

	/// Returns the registered attribute names in arbitrary order.
	pub fn attributes(&self) -> impl Iterator<Item = &str> {
		self.attributes.keys().map(String::as_str)
	}
}

/// Outcome of resolving a dotted name.
#[derive(Debug)]
pub enum Resolved<'a, T> {
	/// The name denotes a whole module.
	Module(&'a Module<T>),
	/// The name denotes a single value.
	Object(&'a T),
}

impl<'a, T> Resolved<'a, T> {
	/// Returns the value if the name resolved to one.
	pub fn into_object(self) -> Option<&'a T> {
		match self {
			Resolved::Object(value) => Some(value),
			Resolved::Module(_) => None,
		}
	}

	/// Returns the module if the name resolved to one.
	pub fn into_module(self) -> Option<&'a Module<T>> {
		match self {
			Resolved::Module(module) => Some(module),
			Resolved::Object(_) => None,
		}
	}
}

impl<T> Clone for Resolved<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Resolved<'_, T> {}

/// Reference to a value, either by dotted name or held directly.
///
/// Direct values pass through resolution untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef<T> {
	/// A dotted name to resolve against a registry.
	Named(String),
	/// A value that needs no resolution.
	Direct(T),
}

/// Registry mapping dotted names to pre-registered values.
#[derive(Debug, Clone)]
pub struct ObjectRegistry<T> {
	modules: HashMap<String, Module<T>>,
}

impl<T> Default for ObjectRegistry<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> ObjectRegistry<T> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			modules: HashMap::new(),
		}
	}

	/// Returns the module called `name`, creating it if needed.
	pub fn register_module(&mut self, name: impl Into<String>) -> &mut Module<T> {
		let name = name.into();
		self.modules
			.entry(name.clone())
			.or_insert_with(|| Module::new(name))
	}

	/// Registers a self-describing implementation inside `module`.
	pub fn register_implementation<R>(&mut self, module: &str) -> &mut Self
	where
		R: ImplementationRegistry<Factory = T>,
	{
		self.register_module(module).register(R::NAME, R::factory());
		self
	}

	/// Resolves a dotted name.
	///
	/// The full name is tried as a module first. Otherwise the part after the
	/// last `.` is looked up as an attribute of the module named by the rest.
	pub fn get_object(&self, path: &str) -> Result<Resolved<'_, T>, ResolveError> {
		if let Some(module) = self.modules.get(path) {
			return Ok(Resolved::Module(module));
		}

		let (module_name, attribute) = path
			.rsplit_once('.')
			.ok_or_else(|| ResolveError::ModuleNotFound(path.to_string()))?;

		let module = self
			.modules
			.get(module_name)
			.ok_or_else(|| ResolveError::ModuleNotFound(module_name.to_string()))?;

		module
			.get(attribute)
			.map(Resolved::Object)
			.ok_or_else(|| ResolveError::AttributeNotFound {
				module: module_name.to_string(),
				attribute: attribute.to_string(),
			})
	}

	/// Resolves a dotted name, yielding `None` instead of an error.
	pub fn try_get_object(&self, path: &str) -> Option<Resolved<'_, T>> {
		self.get_object(path).ok()
	}

	/// Resolves an [`ObjectRef`], passing direct values through unchanged.
	pub fn resolve_ref<'a>(
		&'a self,
		reference: &'a ObjectRef<T>,
	) -> Result<Resolved<'a, T>, ResolveError> {
		match reference {
			ObjectRef::Named(path) => self.get_object(path),
			ObjectRef::Direct(value) => Ok(Resolved::Object(value)),
		}
	}
}
