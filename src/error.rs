use thiserror::Error;

/// Errors raised while fetching and parsing character pages
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
    #[error("Header configuration error: {0}")]
    HeaderConfig(String),
    #[error("Page structure changed: {what} not found")]
    MissingElement { what: String },
    #[error("Page structure changed: <{element}> without `{attribute}` attribute")]
    MissingAttribute { element: String, attribute: String },
    #[error("Malformed key/value segment (no ':'): {0:?}")]
    MalformedSegment(String),
}

impl ScraperError {
    pub fn missing(what: impl Into<String>) -> Self {
        ScraperError::MissingElement { what: what.into() }
    }
}
