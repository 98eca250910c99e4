//! Page-level scraping: fetch, locate the missions table, collect rows.

use log::{debug, info};
use scraper::{Html, Selector};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::extract::extract_row;
use crate::fetch::{fetch_with_retry, Transport};
use crate::types::RewardRecord;

/// Class signature of the daily missions table. If this stops
/// matching, the page layout changed and a human needs to look at it.
const TABLE_SELECTOR: &str = "table.summary-honorable.summary-wrapper";

/// Fetch the page and return its reward records in table order.
///
/// Transient fetch conditions are absorbed by the retry loop; the only
/// error a caller sees on the happy path is [`Error::Structure`] when
/// the expected table is missing from the fetched document.
pub fn scrape(transport: &dyn Transport, cfg: &FetchConfig) -> Result<Vec<RewardRecord>> {
    info!("fetching {} via {} transport", cfg.page_url, transport.name());
    let page = fetch_with_retry(transport, &cfg.page_url, &cfg.retry)?;
    let records = extract_records(&page.text(), Some(&cfg.page_url))?;
    info!("extracted {} reward rows", records.len());
    Ok(records)
}

/// Parse a document and collect every well-formed reward row,
/// preserving source order. Malformed rows are dropped silently.
pub fn extract_records(html: &str, base_url: Option<&str>) -> Result<Vec<RewardRecord>> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse(TABLE_SELECTOR).expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| Error::Structure(format!("no element matches `{TABLE_SELECTOR}`")))?;

    let base = base_url.and_then(|u| Url::parse(u).ok());
    let mut records = Vec::new();
    for row in table.select(&row_sel) {
        let Some(mut record) = extract_row(row) else {
            debug!("skipping malformed row");
            continue;
        };
        // Icon srcs can be relative; the renderer needs them absolute.
        if let (Some(base), Some(src)) = (&base, record.image_url.as_deref()) {
            if let Ok(abs) = base.join(src) {
                record.image_url = Some(String::from(abs));
            }
        }
        records.push(record);
    }
    Ok(records)
}
