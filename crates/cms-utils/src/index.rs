//! Index arithmetic shared by the slicing helpers.

/// Resolves a signed index against a sequence of `len` items.
///
/// Non-negative indices count from the start, negative ones from the end.
/// The result is clamped to `0..=len`.
pub(crate) fn resolve_index(index: isize, len: usize) -> usize {
	if index >= 0 {
		index.unsigned_abs().min(len)
	} else {
		len.saturating_sub(index.unsigned_abs())
	}
}
