use scraper::{ElementRef, Html};

use crate::error::ScraperError;
use crate::template::{selector, PageTemplate};

/// Basic-info paragraph position inside the content container (zero-based)
const BASICS_PARAGRAPH: usize = 1;

/// Ordered `key -> value` pairs taken from a character page.
///
/// Re-inserting an existing key replaces its value but keeps the original
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    entries: Vec<(String, String)>,
}

impl BasicInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when the key was already present
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split an emphasized `key: value` segment.
///
/// Text after a second colon is discarded. Periods are removed from the
/// value, whitespace is trimmed from both sides.
pub fn split_segment(text: &str) -> Result<(String, String), ScraperError> {
    let mut parts = text.split(':');
    let key = parts.next().unwrap_or_default();
    let value = parts
        .next()
        .ok_or_else(|| ScraperError::MalformedSegment(text.to_string()))?;

    Ok((key.trim().to_string(), value.replace('.', "").trim().to_string()))
}

/// Extract the emphasized `key: value` facts from the second paragraph of
/// the content container.
pub fn extract_basics(html: &str, template: &PageTemplate) -> Result<BasicInfo, ScraperError> {
    let document = Html::parse_document(html);
    let content = template.content(&document)?;

    let paragraph_selector = selector("p")?;
    let paragraph = content
        .select(&paragraph_selector)
        .nth(BASICS_PARAGRAPH)
        .ok_or_else(|| {
            ScraperError::missing(format!(
                "paragraph #{} inside the content container",
                BASICS_PARAGRAPH + 1
            ))
        })?;

    let em_selector = selector("em")?;
    let mut basics = BasicInfo::new();

    for em in paragraph.select(&em_selector) {
        let text = em.text().collect::<String>();
        let (key, value) = split_segment(&text)?;

        if let Some(previous) = basics.insert(key.clone(), value) {
            log::debug!("Duplicate field '{}' overwrites {:?}", key, previous);
        }
    }

    Ok(basics)
}

/// Collect the list items of the element right after the first appearances
/// heading in the content container.
///
/// Item text is whitespace-trimmed; order and duplicates are kept.
pub fn extract_appearances(html: &str, template: &PageTemplate) -> Result<Vec<String>, ScraperError> {
    let document = Html::parse_document(html);
    let content = template.content(&document)?;

    let heading = content.select(template.heading()).next().ok_or_else(|| {
        ScraperError::missing(format!(
            "`{}` heading inside the content container",
            template.heading_css()
        ))
    })?;

    let list = heading
        .next_siblings()
        .find_map(ElementRef::wrap)
        .ok_or_else(|| {
            ScraperError::missing(format!("element following the `{}` heading", template.heading_css()))
        })?;

    let li_selector = selector("li")?;
    let appearances = list
        .select(&li_selector)
        .map(|li| li.text().collect::<String>().trim().to_string())
        .collect();

    Ok(appearances)
}
