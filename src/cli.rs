use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{AppConfig, DEFAULT_PAGE_URL};

/// Every flag is optional: a bare invocation scrapes the default page
/// and writes the default output, matching the original tool.
#[derive(Parser)]
#[command(
    name = "stw-daily",
    version,
    about = "Render today's STW V-Bucks missions as an image"
)]
pub struct Cli {
    /// Page to scrape
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    url: String,

    /// Output image path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Themed font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Local icon shown next to the header caption
    #[arg(long)]
    header_icon: Option<PathBuf>,

    /// Resolution scale factor
    #[arg(long)]
    scale: Option<u32>,

    /// Give up after this many fetch attempts instead of retrying
    /// forever
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Seconds to wait between fetch attempts
    #[arg(long)]
    retry_delay_secs: Option<u64>,

    /// Fetch the page with the plain client instead of the
    /// bot-challenge-capable one
    #[arg(long)]
    plain_transport: bool,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.fetch.page_url = self.url;
        if self.plain_transport {
            cfg.fetch.use_evasive_transport = false;
        }
        if let Some(max) = self.max_attempts {
            cfg.fetch.retry.max_attempts = Some(max);
        }
        if let Some(secs) = self.retry_delay_secs {
            cfg.fetch.retry.delay = Duration::from_secs(secs);
        }
        if let Some(output) = self.output {
            cfg.render.output_path = output;
        }
        if let Some(font) = self.font {
            cfg.render.font_path = font;
        }
        if let Some(icon) = self.header_icon {
            cfg.render.header_icon_path = icon;
        }
        if let Some(scale) = self.scale {
            cfg.render.scale_factor = scale.max(1);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_uses_original_defaults() {
        let cfg = Cli::parse_from(["stw-daily"]).into_config();
        assert_eq!(cfg.fetch.page_url, DEFAULT_PAGE_URL);
        assert!(cfg.fetch.use_evasive_transport);
        assert!(cfg.fetch.retry.max_attempts.is_none());
        assert_eq!(cfg.render.output_path, PathBuf::from("Daily Missions.png"));
        assert_eq!(cfg.render.scale_factor, 3);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Cli::parse_from([
            "stw-daily",
            "--output",
            "out.png",
            "--scale",
            "2",
            "--max-attempts",
            "5",
            "--plain-transport",
        ])
        .into_config();
        assert_eq!(cfg.render.output_path, PathBuf::from("out.png"));
        assert_eq!(cfg.render.scale_factor, 2);
        assert_eq!(cfg.fetch.retry.max_attempts, Some(5));
        assert!(!cfg.fetch.use_evasive_transport);
    }
}
