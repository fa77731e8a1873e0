use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::ScraperError;

/// Load the header set from a JSON object of `name -> string value`.
///
/// The file is read once per run; the resulting map is attached to every
/// request as client default headers.
pub fn load_headers(path: &Path) -> Result<HeaderMap, ScraperError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ScraperError::HeaderConfig(format!("cannot read {}: {}", path.display(), e))
    })?;

    let headers = parse_headers(&raw)?;
    log::debug!("Loaded {} header(s) from {}", headers.len(), path.display());
    Ok(headers)
}

pub fn parse_headers(raw: &str) -> Result<HeaderMap, ScraperError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ScraperError::HeaderConfig(format!("invalid JSON: {}", e)))?;

    let Value::Object(entries) = value else {
        return Err(ScraperError::HeaderConfig(
            "expected a JSON object of header names to values".to_string(),
        ));
    };

    let mut headers = HeaderMap::with_capacity(entries.len());
    for (name, value) in entries {
        let Value::String(value) = value else {
            return Err(ScraperError::HeaderConfig(format!(
                "value for '{}' must be a string",
                name
            )));
        };

        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ScraperError::HeaderConfig(format!("'{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(&value)
            .map_err(|e| ScraperError::HeaderConfig(format!("'{}': {}", name, e)))?;

        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_headers_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"User-Agent": "Mozilla/5.0", "Accept-Language": "pt-BR"}}"#
        )
        .unwrap();

        let headers = load_headers(file.path()).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["user-agent"], "Mozilla/5.0");
        assert_eq!(headers["accept-language"], "pt-BR");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_headers(&dir.path().join("headers.json")).unwrap_err();
        assert!(matches!(err, ScraperError::HeaderConfig(_)));
    }

    #[test]
    fn rejects_non_object_json() {
        let err = parse_headers(r#"["User-Agent"]"#).unwrap_err();
        assert!(matches!(err, ScraperError::HeaderConfig(_)));
    }

    #[test]
    fn rejects_non_string_values() {
        let err = parse_headers(r#"{"DNT": 1}"#).unwrap_err();
        assert!(err.to_string().contains("DNT"));
    }

    #[test]
    fn rejects_invalid_header_names() {
        let err = parse_headers(r#"{"bad header": "x"}"#).unwrap_err();
        assert!(matches!(err, ScraperError::HeaderConfig(_)));
    }

    #[test]
    fn empty_object_yields_no_headers() {
        assert!(parse_headers("{}").unwrap().is_empty());
    }
}
