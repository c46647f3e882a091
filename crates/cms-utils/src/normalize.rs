//! Path normalisation for cache keys.
//!
//! Converts internationalized resource identifiers into URI-safe ASCII by
//! percent-encoding the UTF-8 bytes of every character outside the reserved
//! and unreserved sets. Existing `%XX` escapes are left alone, which makes the
//! transform idempotent.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Characters that are percent-encoded. Everything alphanumeric plus the
/// unreserved marks and the reserved delimiters passes through.
const IRI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'_')
	.remove(b'.')
	.remove(b'-')
	.remove(b'~')
	.remove(b'/')
	.remove(b'#')
	.remove(b'%')
	.remove(b'[')
	.remove(b']')
	.remove(b'=')
	.remove(b':')
	.remove(b';')
	.remove(b'$')
	.remove(b'&')
	.remove(b'(')
	.remove(b')')
	.remove(b'+')
	.remove(b',')
	.remove(b'!')
	.remove(b'?')
	.remove(b'*')
	.remove(b'@')
	.remove(b'\'');

/// Turns a path into the form used inside cache keys.
///
/// Implementations must be idempotent on already-normalized input.
pub trait PathNormalizer: Send + Sync {
	/// Normalizes `path`, borrowing it when nothing changes.
	fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str>;
}

/// IRI to URI conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IriToUri;

impl PathNormalizer for IriToUri {
	fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
		iri_to_uri(path)
	}
}

/// Percent-encodes the characters of `iri` that are not allowed in a URI.
pub fn iri_to_uri(iri: &str) -> Cow<'_, str> {
	utf8_percent_encode(iri, IRI_ENCODE_SET).into()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ascii_path_is_borrowed() {
		let path = "/blog/2024/03/hello-world/";
		assert!(matches!(iri_to_uri(path), Cow::Borrowed(p) if p == path));
	}

	#[test]
	fn test_reserved_characters_pass_through() {
		let path = "/search/?q=a+b&page=2;s=1#top[0]:(x),!*@'$~_.";
		assert_eq!(iri_to_uri(path), path);
	}

	#[test]
	fn test_non_ascii_is_percent_encoded() {
		assert_eq!(iri_to_uri("/blog/über/"), "/blog/%C3%BCber/");
		assert_eq!(iri_to_uri("/♥/"), "/%E2%99%A5/");
	}

	#[test]
	fn test_unsafe_ascii_is_percent_encoded() {
		assert_eq!(
			iri_to_uri("/a b/\"quoted\"/<tag>/{x}|^`\\"),
			"/a%20b/%22quoted%22/%3Ctag%3E/%7Bx%7D%7C%5E%60%5C"
		);
	}

	#[test]
	fn test_idempotent() {
		let once = iri_to_uri("/Grüße aus Köln/?q=ä");
		let twice = iri_to_uri(&once);
		assert_eq!(once, twice);
		assert_eq!(once, "/Gr%C3%BC%C3%9Fe%20aus%20K%C3%B6ln/?q=%C3%A4");
	}

	#[test]
	fn test_trait_delegates() {
		assert_eq!(IriToUri.normalize("/ü"), "/%C3%BC");
	}
}
