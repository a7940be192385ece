//! URL encoding utilities for constructing safe REST paths.
//!
//! Uuids come from local storage and user input, so they are percent-encoded
//! before being spliced into a path. Without encoding, `a/b` would address a
//! nested resource and `a?b` would start a query string.
//!
//! # Example
//!
//! ```
//! use muzima_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("form/uuid");
//! assert_eq!(encoded, "form%2Fuuid");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3, plus `%` (no double decoding) and `/` (no path
/// traversal).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
///
/// ```
/// use muzima_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("c5b8d3f2-7a1e"), "c5b8d3f2-7a1e");
/// assert_eq!(encode_path_segment("a b"), "a%20b");
/// assert_eq!(encode_path_segment("100%"), "100%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_passes_through() {
        assert_eq!(
            encode_path_segment("c5b8d3f2-7a1e-4c1b-9a3e-1f2d3c4b5a69"),
            "c5b8d3f2-7a1e-4c1b-9a3e-1f2d3c4b5a69"
        );
    }

    #[test]
    fn test_encode_slash() {
        assert_eq!(encode_path_segment("a/b/c"), "a%2Fb%2Fc");
    }

    #[test]
    fn test_encode_percent() {
        assert_eq!(encode_path_segment("a%20b"), "a%2520b");
    }

    #[test]
    fn test_encode_question_and_hash() {
        assert_eq!(encode_path_segment("a?b"), "a%3Fb");
        assert_eq!(encode_path_segment("a#b"), "a%23b");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(encode_path_segment("\u{00e9}"), "%C3%A9");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_path_segment(""), "");
    }
}
