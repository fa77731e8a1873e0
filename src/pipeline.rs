use std::time::Duration;

use crate::collector::collect_links;
use crate::error::ScraperError;
use crate::fetcher::Fetcher;
use crate::parser::{extract_appearances, extract_basics};
use crate::record::CharacterRecord;
use crate::table::Table;
use crate::template::PageTemplate;

/// Sequential index -> character pages -> table run
pub struct Pipeline {
    fetcher: Fetcher,
    template: PageTemplate,
    delay: Duration,
}

impl Pipeline {
    pub fn new(fetcher: Fetcher, template: PageTemplate, delay: Duration) -> Self {
        Self {
            fetcher,
            template,
            delay,
        }
    }

    pub async fn run(&self, index_url: &str) -> Result<Table, ScraperError> {
        let records = self.collect_records(index_url).await?;
        Ok(Table::from_records(&records))
    }

    /// One record per collected link, same order, failed fetches included
    pub async fn collect_records(&self, index_url: &str) -> Result<Vec<CharacterRecord>, ScraperError> {
        let urls = collect_links(&self.fetcher, index_url, &self.template).await?;
        let total = urls.len();
        let mut records = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            log::info!("[{}/{}] Fetching: {}", i + 1, total, url);
            records.push(self.collect_character(url).await?);

            if self.delay > Duration::ZERO && i + 1 < total {
                log::debug!("Waiting {}ms before next request", self.delay.as_millis());
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(records)
    }

    /// Non-200 statuses yield a record with only the name and URL.
    /// Network and page-structure errors are returned.
    pub async fn collect_character(&self, url: &str) -> Result<CharacterRecord, ScraperError> {
        let page = self.fetcher.fetch(url).await?;

        if !page.is_ok() {
            log::warn!("Request failed with status {} for {}", page.status_code, url);
            return Ok(CharacterRecord::unavailable(url));
        }

        log::info!("Request succeeded for {}", url);
        let html = page.body.unwrap_or_default();
        let basics = extract_basics(&html, &self.template)?;
        let appearances = extract_appearances(&html, &self.template)?;
        if basics.is_empty() {
            log::warn!("No basic info found on {}", url);
        }
        log::debug!(
            "Parsed {} field(s) and {} appearance(s) from {}",
            basics.len(),
            appearances.len(),
            url
        );

        Ok(CharacterRecord::new(url, basics, Some(appearances)))
    }
}
