use crate::extractor::patterns::{BODY_RE, CALL_SITE_HEADERS_RE, ENDPOINT_RE, SPECIFIC_HEADER_RE};
use crate::extractor::record::{ExtractionRecord, NO_BODY_FOUND, NO_HEADERS_FOUND};
use std::collections::HashSet;

const SNIPPET_SEPARATOR: &str = "; ";

/// Extracts every endpoint record from one file's content.
///
/// Header and body evidence is collected from the whole file, not from the
/// neighbourhood of each URL, so every URL in a file carries the same
/// headers and body strings.
pub fn extract(content: &str, source_path: &str) -> HashSet<ExtractionRecord> {
    let endpoints = find_endpoints(content);
    if endpoints.is_empty() {
        return HashSet::new();
    }

    let headers = render(find_headers(content), NO_HEADERS_FOUND);
    let body = render(find_bodies(content), NO_BODY_FOUND);

    endpoints
        .into_iter()
        .map(|url| ExtractionRecord::new(source_path, url, headers.as_str(), body.as_str()))
        .collect()
}

/// All endpoint matches in order of appearance, repeats included.
pub fn find_endpoints(content: &str) -> Vec<&str> {
    ENDPOINT_RE.find_iter(content).map(|m| m.as_str()).collect()
}

/// Call-site header spans, or the specific-header pairs when no call site
/// matched.
pub fn find_headers(content: &str) -> Vec<&str> {
    let call_sites: Vec<&str> = CALL_SITE_HEADERS_RE
        .find_iter(content)
        .map(|m| m.as_str())
        .collect();

    if !call_sites.is_empty() {
        return call_sites;
    }

    SPECIFIC_HEADER_RE
        .find_iter(content)
        .map(|m| m.as_str())
        .collect()
}

/// The literal value of every `'body' => ...` pair.
pub fn find_bodies(content: &str) -> Vec<&str> {
    BODY_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn render(snippets: Vec<&str>, sentinel: &str) -> String {
    if snippets.is_empty() {
        sentinel.to_string()
    } else {
        snippets.join(SNIPPET_SEPARATOR)
    }
}
