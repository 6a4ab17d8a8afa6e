//! Textual patterns for endpoint, header and body evidence.
//!
//! All patterns are compiled once and matched against raw file content. No
//! syntax awareness is attempted.

use regex::Regex;
use std::sync::LazyLock;

/// `http://` or `https://`, a host starting with `api.`, and an optional path
/// that stops at whitespace or a quote.
pub(crate) static ENDPOINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://api\.[\w.-]+(?:/[^\s'"]*)?"#).unwrap());

/// A recognized HTTP call whose argument list carries a bare `headers => [...]`
/// entry. A quoted `'headers'` key does not match and leaves the fallback to
/// [`SPECIFIC_HEADER_RE`]. The whole span from the function name to the first
/// closing bracket is the match.
pub(crate) static CALL_SITE_HEADERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?:wp_remote_get|wp_remote_post|curl_setopt|file_get_contents)\s*\([^)]*?headers\s*=>\s*\[.*?\]"#,
    )
    .unwrap()
});

/// Fallback: a single well-known header key with a quoted value.
pub(crate) static SPECIFIC_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)'(?:User-Agent|Content-Type|Authorization)'\s*=>\s*['"].*?['"]"#).unwrap()
});

/// `'body' => <literal>`; group 1 holds the literal.
pub(crate) static BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)'body'\s*=>\s*(\{.*?\}|\[.*?\]|'.*?'|".*?")"#).unwrap()
});
