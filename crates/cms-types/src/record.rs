//! Record schema descriptors.
//!
//! A record type lists its fields explicitly instead of relying on runtime
//! metadata. The descriptor tells the copier which fields carry identity and
//! must never be duplicated.

use serde::{de::DeserializeOwned, Serialize};

/// Role of a field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Auto-generated identity, assigned when the record is stored.
	AutoId,
	/// Link to the parent record of an inherited record type.
	ParentLink,
	/// Regular data field.
	Data,
}

/// Describes a single field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Field name as it appears in the serialized record.
	pub name: &'static str,
	/// Role of the field.
	pub kind: FieldKind,
}

impl FieldDescriptor {
	/// Describes a regular data field.
	pub const fn data(name: &'static str) -> Self {
		Self {
			name,
			kind: FieldKind::Data,
		}
	}

	/// Describes an auto-generated identity field.
	pub const fn auto_id(name: &'static str) -> Self {
		Self {
			name,
			kind: FieldKind::AutoId,
		}
	}

	/// Describes a parent link field.
	pub const fn parent_link(name: &'static str) -> Self {
		Self {
			name,
			kind: FieldKind::ParentLink,
		}
	}

	/// Returns true if the field is copied onto clones.
	pub fn is_copyable(&self) -> bool {
		self.kind == FieldKind::Data
	}
}

/// A record type with an explicit field list.
///
/// Fields that are not copied (identity, parent links and caller exclusions)
/// must have serde defaults so a fresh instance can be built without them.
pub trait RecordSchema: Serialize + DeserializeOwned {
	/// Every field of the record, in declaration order.
	const FIELDS: &'static [FieldDescriptor];

	/// Looks up a field descriptor by name.
	fn field(name: &str) -> Option<&'static FieldDescriptor> {
		Self::FIELDS.iter().find(|field| field.name == name)
	}
}
