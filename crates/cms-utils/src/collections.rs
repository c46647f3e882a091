//! Grouping helpers.

use indexmap::IndexMap;
use std::hash::Hash;

/// Groups `(key, value)` pairs into a map from key to all of its values.
///
/// Values keep the order they were seen in, and keys keep the order of their
/// first appearance.
pub fn collect_dict_values<K, V, I>(pairs: I) -> IndexMap<K, Vec<V>>
where
	I: IntoIterator<Item = (K, V)>,
	K: Hash + Eq,
{
	let mut grouped: IndexMap<K, Vec<V>> = IndexMap::new();
	for (key, value) in pairs {
		grouped.entry(key).or_default().push(value);
	}
	grouped
}
