use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;

use crate::error::{Error, Result};

pub const MARKER: &str = "SD_COMPONENT_DATA";

static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSD_COMPONENT_DATA\s*=\s*").unwrap());

/// Isolate the value assigned to `SD_COMPONENT_DATA`.
///
/// The value ends at the first `;` that closes a complete json value, so a
/// `;` inside a string or a later statement on the same line is never
/// swallowed. If no candidate is valid json the shortest one is returned and
/// decoding reports the error.
pub fn extract_blob(html: &str) -> Result<&str> {
    let not_found = || Error::PatternNotFound { marker: MARKER };
    let start = ASSIGNMENT_RE.find(html).ok_or_else(not_found)?.end();
    let rest = &html[start..];

    let mut shortest = None;
    for (end, _) in rest.match_indices(';') {
        let candidate = rest[..end].trim_end();
        if serde_json::from_str::<IgnoredAny>(candidate).is_ok() {
            return Ok(candidate);
        }
        shortest.get_or_insert(candidate);
    }
    shortest.ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_whitespace_around_assignment() {
        assert_eq!(extract_blob(r#"SD_COMPONENT_DATA={"a":1};"#).unwrap(), r#"{"a":1}"#);
        assert_eq!(
            extract_blob("window.SD_COMPONENT_DATA \t=\n  {\"a\":1}  ;").unwrap(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn stops_at_first_terminator_after_value() {
        let html = r#"<script>SD_COMPONENT_DATA = {"a":"x;y"}; window.SD_OTHER = {"b":2};</script>"#;
        assert_eq!(extract_blob(html).unwrap(), r#"{"a":"x;y"}"#);
    }

    #[test]
    fn ignores_longer_identifiers_with_same_prefix() {
        let html = r#"window.SD_COMPONENT_DATA_VERSION = 2;</script><script>window.SD_COMPONENT_DATA = {"a":1};"#;
        assert_eq!(extract_blob(html).unwrap(), r#"{"a":1}"#);

        let html = r#"var XSD_COMPONENT_DATA = 3; SD_COMPONENT_DATA = {"a":1};"#;
        assert_eq!(extract_blob(html).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn ignores_bare_references() {
        let html = r#"if (!window.SD_COMPONENT_DATA) { init = 1; } window.SD_COMPONENT_DATA = {"a":1};"#;
        assert_eq!(extract_blob(html).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn falls_back_to_shortest_segment() {
        let html = "SD_COMPONENT_DATA = {broken; more;";
        assert_eq!(extract_blob(html).unwrap(), "{broken");
    }

    #[test]
    fn missing_marker() {
        let err = extract_blob("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, Error::PatternNotFound { marker: MARKER }));
    }

    #[test]
    fn marker_without_terminator() {
        let err = extract_blob(r#"SD_COMPONENT_DATA = {"a":1}"#).unwrap_err();
        assert!(matches!(err, Error::PatternNotFound { .. }));
    }
}
