use scraper::Html;
use url::Url;

use crate::error::ScraperError;
use crate::fetcher::Fetcher;
use crate::template::{selector, PageTemplate};

/// Fetch the index page and return every character link in its content
/// container.
pub async fn collect_links(
    fetcher: &Fetcher,
    index_url: &str,
    template: &PageTemplate,
) -> Result<Vec<String>, ScraperError> {
    log::info!("Collecting character links from {}", index_url);

    let page = fetcher.fetch(index_url).await?;
    if !page.is_ok() {
        log::warn!("Index page returned status {}", page.status_code);
    }

    let links = extract_links(page.body.as_deref().unwrap_or_default(), index_url, template)?;
    log::info!("Found {} character link(s)", links.len());
    Ok(links)
}

/// Anchor hrefs inside the content container, in document order.
///
/// Absolute hrefs are kept verbatim, relative ones are resolved against
/// `base_url`; duplicates are kept.
pub fn extract_links(
    html: &str,
    base_url: &str,
    template: &PageTemplate,
) -> Result<Vec<String>, ScraperError> {
    let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    let document = Html::parse_document(html);
    let content = template.content(&document)?;
    let a_selector = selector("a")?;

    content
        .select(&a_selector)
        .map(|el| {
            let href = el.value().attr("href").ok_or_else(|| ScraperError::MissingAttribute {
                element: "a".to_string(),
                attribute: "href".to_string(),
            })?;

            if is_absolute(href) {
                return Ok(href.to_string());
            }

            base.join(href)
                .map(|url| url.to_string())
                .map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", href, e)))
        })
        .collect()
}

fn is_absolute(href: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
