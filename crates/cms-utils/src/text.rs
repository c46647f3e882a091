//! Display string shortening.
//!
//! Over-long strings are cut into roughly 60% head, an ellipsis marker and a
//! tail taken from the end, so the result is exactly `max_length` characters
//! wide. The head is extended to the next word boundary when that still
//! leaves room for the marker.

use crate::index::resolve_index;
use cms_types::{DEFAULT_ELLIPSIS, DEFAULT_SHORTEN_LENGTH};
use std::borrow::Cow;

/// Shortens `text` for display, truncating it intelligently when too long.
///
/// Strings shorter than `max_length` characters are returned unchanged. Longer
/// ones come back exactly `max_length` characters long, provided `ellipsis`
/// fits in the tail left after the head segment
/// (`ellipsis.chars().count() <= max_length - floor(max_length * 0.6)`).
/// That precondition is not checked; violating it yields a longer result.
///
/// All lengths and offsets are counted in Unicode scalar values.
///
/// ```
/// use cms_utils::shorten;
///
/// let s = shorten("Der Wolf und die Grossmutter assen im Wald zu mittag", 15, "_");
/// assert_eq!(s, "Der Wolf und_ag");
/// assert_eq!(s.chars().count(), 15);
///
/// assert_eq!(
/// 	shorten("Haenschen-Klein, ging allein, in den tiefen Wald hinein", 15, " \u{2026} "),
/// 	"Haenschen \u{2026} ein"
/// );
/// assert_eq!(shorten("Badgerbadgerbadgerbadgerbadger", 10, "-"), "Badger-ger");
/// ```
pub fn shorten<'a>(text: &'a str, max_length: usize, ellipsis: &str) -> Cow<'a, str> {
	if text.chars().count() < max_length {
		return Cow::Borrowed(text);
	}

	let chars: Vec<char> = text.chars().collect();
	let ellipsis_len = ellipsis.chars().count();

	let mut first_part = (max_length as f64 * 0.6) as usize;

	// A negative window end counts from the end of the text.
	let window_end = resolve_index(
		(max_length / 2) as isize - first_part as isize,
		chars.len(),
	);
	let next_space = chars
		.get(first_part..window_end)
		.and_then(|window| window.iter().position(|&c| c == ' '));

	if let Some(offset) = next_space {
		if first_part + offset + ellipsis_len < max_length {
			first_part += offset;
		}
	}

	let tail_len = max_length.saturating_sub(first_part + ellipsis_len);
	let tail_start = chars.len() - tail_len;

	let mut shortened = String::with_capacity(text.len() + ellipsis.len());
	shortened.extend(&chars[..first_part]);
	shortened.push_str(ellipsis);
	shortened.extend(&chars[tail_start..]);
	Cow::Owned(shortened)
}

/// Shortens `text` to the default width of 50 with the `" … "` marker.
pub fn shorten_string(text: &str) -> Cow<'_, str> {
	shorten(text, DEFAULT_SHORTEN_LENGTH, DEFAULT_ELLIPSIS)
}

#[cfg(test)]
mod tests {
	use super::*;

	const LONG_TEXT: &str = "The quick brown fox jumps over the lazy dog while the \
		cat watches from the windowsill and the bird sings in the old oak tree";

	#[test]
	fn test_word_boundary_head() {
		let s = shorten(
			"Der Wolf und die Grossmutter assen im Wald zu mittag",
			15,
			"_",
		);
		assert_eq!(s, "Der Wolf und_ag");
		assert_eq!(s.chars().count(), 15);
	}

	#[test]
	fn test_space_too_far_keeps_head() {
		let s = shorten(
			"Haenschen-Klein, ging allein, in den tiefen Wald hinein",
			15,
			DEFAULT_ELLIPSIS,
		);
		assert_eq!(s, "Haenschen \u{2026} ein");
		assert_eq!(s.chars().count(), 15);
	}

	#[test]
	fn test_no_space_in_window() {
		assert_eq!(
			shorten("Badgerbadgerbadgerbadgerbadger", 10, "-"),
			"Badger-ger"
		);
	}

	#[test]
	fn test_extends_head_to_next_space() {
		// head starts at 12, the next space sits 3 characters later
		let s = shorten("Hello brave new world of rust", 20, "...");
		assert_eq!(s, "Hello brave new...st");
	}

	#[test]
	fn test_short_text_is_borrowed() {
		let s = shorten("short", 10, "-");
		assert!(matches!(s, Cow::Borrowed("short")));

		let s = shorten_string("A title that easily fits");
		assert!(matches!(s, Cow::Borrowed(_)));
	}

	#[test]
	fn test_text_of_exact_width_is_shortened() {
		let s = shorten("abcdefghij", 10, "-");
		assert_eq!(s, "abcdef-hij");
	}

	#[test]
	fn test_identity_below_width() {
		for max_length in 1..=LONG_TEXT.len() + 5 {
			let text: String = LONG_TEXT.chars().take(max_length - 1).collect();
			assert_eq!(shorten(&text, max_length, "-"), text.as_str());
		}
	}

	#[test]
	fn test_exact_width_single_char_marker() {
		for max_length in 1..=LONG_TEXT.len() {
			let s = shorten(LONG_TEXT, max_length, "-");
			assert_eq!(s.chars().count(), max_length, "width {}", max_length);
			assert!(s.contains('-'));
		}
	}

	#[test]
	fn test_exact_width_default_marker() {
		for max_length in 6..=LONG_TEXT.len() {
			let s = shorten(LONG_TEXT, max_length, DEFAULT_ELLIPSIS);
			assert_eq!(s.chars().count(), max_length, "width {}", max_length);
			assert!(s.contains(DEFAULT_ELLIPSIS));
		}
	}

	#[test]
	fn test_small_widths_with_empty_search_window() {
		// window end resolves to index 0, so no boundary search happens
		assert_eq!(shorten("abcdef", 1, "-"), "-");
		assert_eq!(shorten("ab cdef", 2, "-"), "a-");
		assert_eq!(shorten("ab cdef", 4, "-"), "ab-f");
	}

	#[test]
	fn test_oversized_marker_overflows_width() {
		// width 4 keeps a 2 character head and leaves no tail for the 3 character marker
		let s = shorten(LONG_TEXT, 4, DEFAULT_ELLIPSIS);
		assert_eq!(s, "Th \u{2026} ");
		assert_eq!(s.chars().count(), 5);

		// a marker longer than the whole width still only follows the head
		let s = shorten(LONG_TEXT, 3, "-----");
		assert_eq!(s, "T-----");
		assert_eq!(s.chars().count(), 6);
	}

	#[test]
	fn test_counts_characters_not_bytes() {
		let text = "Grüße aus Köln über die Brücke zum Dom hinüber";
		let s = shorten(text, 15, DEFAULT_ELLIPSIS);
		assert_eq!(s, "Grüße aus \u{2026} ber");
		assert_eq!(s.chars().count(), 15);
	}

	#[test]
	fn test_shorten_string_defaults() {
		let s = shorten_string(LONG_TEXT);
		assert_eq!(s.chars().count(), DEFAULT_SHORTEN_LENGTH);
		assert!(s.contains(DEFAULT_ELLIPSIS));
		assert_eq!(s, "The quick brown fox jumps over \u{2026}  the old oak tree");
	}
}
