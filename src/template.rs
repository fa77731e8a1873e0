use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

pub const DEFAULT_CONTAINER: &str = "div.td-page-content";
pub const DEFAULT_APPEARANCES_HEADING: &str = "h4";

/// Parse a CSS selector, reporting the offending text on failure
pub fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector(format!("{}: {}", css, e)))
}

/// Selectors describing where the data lives on index and character pages
#[derive(Debug, Clone)]
pub struct PageTemplate {
    container: Selector,
    container_css: String,
    heading: Selector,
    heading_css: String,
}

impl PageTemplate {
    pub fn new(container: &str, heading: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            container: selector(container)?,
            container_css: container.to_string(),
            heading: selector(heading)?,
            heading_css: heading.to_string(),
        })
    }

    /// First element matching the content container selector
    pub fn content<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ScraperError> {
        document
            .select(&self.container)
            .next()
            .ok_or_else(|| ScraperError::missing(format!("content container `{}`", self.container_css)))
    }

    pub fn heading(&self) -> &Selector {
        &self.heading
    }

    pub fn heading_css(&self) -> &str {
        &self.heading_css
    }
}

#[cfg(test)]
impl Default for PageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER, DEFAULT_APPEARANCES_HEADING)
            .expect("built-in selectors are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_content_container() {
        let document = Html::parse_document(
            r#"<div class="td-page-content" id="a"></div><div class="td-page-content" id="b"></div>"#,
        );
        let content = PageTemplate::default().content(&document).unwrap();
        assert_eq!(content.value().attr("id"), Some("a"));
    }

    #[test]
    fn missing_container_names_the_selector() {
        let document = Html::parse_document("<div class=\"other\"></div>");
        let err = PageTemplate::default().content(&document).unwrap_err();
        assert!(err.to_string().contains("div.td-page-content"));
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let err = PageTemplate::new("div[", "h4").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidSelector(_)));
    }
}
