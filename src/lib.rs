//! Scrape the daily STW V-Bucks missions and render them as an image.
//!
//! Pipeline: [`scrape`] fetches the page (retry-until-success through
//! the evasive client) and extracts one [`RewardRecord`] per
//! well-formed table row; [`render`] composes those records into a
//! fixed-layout PNG with a header caption carrying the day's total.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod scrape;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;

use fetch::{EvasiveTransport, PlainTransport, Transport};

/// Run the whole pipeline: scrape, render, write the output file.
pub fn run(cfg: &AppConfig) -> Result<()> {
    let page_transport: Box<dyn Transport> = if cfg.fetch.use_evasive_transport {
        Box::new(EvasiveTransport::new(&cfg.fetch)?)
    } else {
        Box::new(PlainTransport::new(&cfg.fetch)?)
    };
    let records = scrape::scrape(&*page_transport, &cfg.fetch)?;

    // Icons are plain GETs; no challenge page sits in front of a CDN
    let icon_transport = PlainTransport::new(&cfg.fetch)?;
    render::render_to_file(&records, &cfg.render, &icon_transport, &cfg.fetch.retry)
}
