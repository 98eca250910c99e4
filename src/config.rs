//! Explicit configuration for both halves of the pipeline.
//!
//! The original tool hardcoded every layout constant, path, and color
//! inline; here they live in plain structs whose `Default` impls carry
//! those exact observed values, so a no-argument run reproduces the
//! original output while tests and the CLI can override any piece.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use image::Rgba;

pub const DEFAULT_PAGE_URL: &str = "https://v2.fortnitedb.com/";

/// Browser-like user agent sent on every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0";

/// How [`crate::fetch::fetch_with_retry`] behaves between attempts.
///
/// `max_attempts: None` means retry forever, which is the production
/// contract (the target site is assumed eventually reachable). Bounded
/// policies exist for tests and for callers that want a deadline.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<usize>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub page_url: String,
    pub user_agent: String,
    /// Per-request timeout, independent of the retry wrapper.
    pub timeout: Duration,
    /// Route the page fetch through the bot-challenge-capable client.
    pub use_evasive_transport: bool,
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            use_evasive_transport: true,
            retry: RetryPolicy::default(),
        }
    }
}

/// Layout constants, color table, and asset paths for the renderer.
///
/// All pixel dimensions are unscaled; the renderer multiplies them by
/// `scale_factor` for output sharpness.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub scale_factor: u32,
    pub table_width: u32,
    pub header_height: u32,
    pub row_height: u32,
    pub padding: u32,
    /// Caption font size in unscaled pixels.
    pub title_size: f32,
    /// Row text font size in unscaled pixels.
    pub text_size: f32,
    pub background: Rgba<u8>,
    pub header_background: Rgba<u8>,
    pub separator_color: Rgba<u8>,
    pub badge_colors: BTreeMap<String, Rgba<u8>>,
    pub default_badge_color: Rgba<u8>,
    /// Themed font asset; falls back to system fonts when unreadable.
    pub font_path: PathBuf,
    pub fallback_font_paths: Vec<PathBuf>,
    pub header_icon_path: PathBuf,
    pub output_path: PathBuf,
}

impl RenderConfig {
    /// Badge tier to chip color. Total: unknown codes get the default.
    pub fn badge_color(&self, badge: &str) -> Rgba<u8> {
        self.badge_colors
            .get(badge)
            .copied()
            .unwrap_or(self.default_badge_color)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let badge_colors = BTreeMap::from([
            ("T".to_string(), Rgba([128, 0, 128, 255])), // dark purple
            ("C".to_string(), Rgba([205, 133, 63, 255])), // brownish orange
            ("P".to_string(), Rgba([0, 100, 0, 255])),   // dark green
            ("S".to_string(), Rgba([160, 160, 160, 255])), // silver
        ]);
        Self {
            scale_factor: 3,
            table_width: 400,
            header_height: 70,
            row_height: 60,
            padding: 30,
            title_size: 26.0,
            text_size: 20.0,
            background: Rgba([44, 47, 51, 255]),
            header_background: Rgba([30, 30, 30, 255]),
            separator_color: Rgba([180, 180, 180, 255]),
            badge_colors,
            default_badge_color: Rgba([0, 0, 0, 255]),
            font_path: PathBuf::from("fonts/fortnite.otf"),
            fallback_font_paths: vec![
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
                PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"),
                PathBuf::from(
                    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                ),
                PathBuf::from("/Library/Fonts/Arial.ttf"),
                PathBuf::from("C:\\Windows\\Fonts\\arial.ttf"),
            ],
            header_icon_path: PathBuf::from("vbucks.png"),
            output_path: PathBuf::from("Daily Missions.png"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub render: RenderConfig,
}
