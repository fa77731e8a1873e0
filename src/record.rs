use serde::Serialize;
use url::Url;

use crate::parser::BasicInfo;

pub const NAME_FIELD: &str = "Name";
pub const URL_FIELD: &str = "URL";
pub const APPEARANCES_FIELD: &str = "Appearances";

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    List(Vec<String>),
}

impl Cell {
    /// Flat rendering used by CSV and text output
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::List(items) => items.join("; "),
        }
    }
}

/// Everything known about one character page.
///
/// `basics` and `appearances` are empty/`None` when the page did not load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub name: String,
    pub url: String,
    pub basics: BasicInfo,
    pub appearances: Option<Vec<String>>,
}

impl CharacterRecord {
    pub fn new(url: &str, basics: BasicInfo, appearances: Option<Vec<String>>) -> Self {
        Self {
            name: display_name(url),
            url: url.to_string(),
            basics,
            appearances,
        }
    }

    /// Record for a page that could not be fetched
    pub fn unavailable(url: &str) -> Self {
        Self::new(url, BasicInfo::new(), None)
    }

    /// Field/value pairs in column order: page fields first, then
    /// `Appearances`, `Name` and `URL`. The injected fields replace page
    /// fields with the same key in place.
    pub fn fields(&self) -> Vec<(String, Cell)> {
        let mut fields: Vec<(String, Cell)> = self
            .basics
            .iter()
            .map(|(k, v)| (k.to_string(), Cell::Text(v.to_string())))
            .collect();

        if let Some(appearances) = &self.appearances {
            upsert(&mut fields, APPEARANCES_FIELD, Cell::List(appearances.clone()));
        }
        upsert(&mut fields, NAME_FIELD, Cell::Text(self.name.clone()));
        upsert(&mut fields, URL_FIELD, Cell::Text(self.url.clone()));

        fields
    }
}

fn upsert(fields: &mut Vec<(String, Cell)>, key: &str, cell: Cell) {
    match fields.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = cell,
        None => fields.push((key.to_string(), cell)),
    }
}

/// Last non-empty path segment, percent-decoded, with hyphens turned into
/// spaces
pub fn display_name(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => url
            .split('/')
            .rfind(|s| !s.is_empty())
            .map(str::to_string),
    };

    let segment = segment.unwrap_or_default();
    let decoded = urlencoding::decode(&segment).map(|s| s.into_owned()).unwrap_or(segment);

    decoded.replace('-', " ")
}
