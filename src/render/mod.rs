//! Deterministic image composition for the reward table.
//!
//! Layout is a fixed function of the record count: a header band with
//! the total caption, then one row per record (badge chip, power text,
//! icon, reward text) with a separator under every row but the last.

mod draw;
mod font;

pub use font::FontSet;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{info, warn};

use crate::config::{RenderConfig, RetryPolicy};
use crate::error::{Error, Result};
use crate::fetch::{fetch_with_retry, Transport};
use crate::types::{total_caption, RewardRecord};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Canvas height in output pixels: header + one band per record +
/// bottom padding, all pre-scaled. Part of the external contract.
pub fn canvas_height(cfg: &RenderConfig, count: usize) -> u32 {
    (cfg.header_height + cfg.row_height * count as u32 + cfg.padding) * cfg.scale_factor
}

/// Compose the table image. Infallible by design: fonts degrade to
/// no-op text, icons are best-effort, and geometry depends only on the
/// record count.
pub fn render(
    records: &[RewardRecord],
    cfg: &RenderConfig,
    transport: &dyn Transport,
    retry: &RetryPolicy,
) -> RgbaImage {
    let s = cfg.scale_factor as i32;
    let width = cfg.table_width as i32 * s;
    let header_h = cfg.header_height as i32 * s;
    let height = canvas_height(cfg, records.len());

    let mut img = RgbaImage::from_pixel(width as u32, height, cfg.background);
    let fonts = FontSet::load(cfg);

    // Header band with centered caption and the decorative icon to
    // its left.
    draw::fill_rect(&mut img, 0, 0, width, header_h, cfg.header_background);
    let caption = total_caption(records);
    let caption_w = measured_width(&fonts, fonts.title_px, &caption);
    if let Some(face) = fonts.face() {
        draw::draw_text(
            &mut img,
            face,
            fonts.title_px,
            (width - caption_w + 10) / 2,
            (header_h - 30 * s) / 2,
            WHITE,
            &caption,
        );
    }
    paste_header_icon(&mut img, cfg, caption_w, s);

    let padding = cfg.padding as i32 * s;
    let mut y = header_h + 20 * s;
    for (index, record) in records.iter().enumerate() {
        let mut x = padding;

        // Badge chip with the tier code centered inside
        draw::draw_rounded_rect(
            &mut img,
            x + 12 * s,
            y + 12 * s,
            x + 42 * s,
            y + 42 * s,
            8 * s,
            cfg.badge_color(&record.badge),
            WHITE,
            2 * s,
        );
        if let Some(face) = fonts.face() {
            let badge_w = measured_width(&fonts, fonts.text_px, &record.badge);
            draw::draw_text(
                &mut img,
                face,
                fonts.text_px,
                x + 27 * s - badge_w / 2,
                y + 19 * s,
                WHITE,
                &record.badge,
            );
        }

        x += 100 * s;
        if let Some(face) = fonts.face() {
            draw::draw_text(&mut img, face, fonts.text_px, x, y + 20 * s, WHITE, &record.power);
        }
        if let Some(url) = &record.image_url {
            paste_row_icon(&mut img, transport, retry, url, x - 30 * s, y + 19 * s, 20 * s);
        }

        x += 110 * s;
        if let Some(face) = fonts.face() {
            draw::draw_text(&mut img, face, fonts.text_px, x, y + 20 * s, WHITE, &record.vbucks);
        }

        if index + 1 < records.len() {
            draw::fill_rect(
                &mut img,
                padding,
                y + 55 * s,
                width - padding,
                y + 55 * s + 3 * s,
                cfg.separator_color,
            );
        }

        y += cfg.row_height as i32 * s;
    }

    img
}

/// Render and write the PNG to the configured output path.
pub fn render_to_file(
    records: &[RewardRecord],
    cfg: &RenderConfig,
    transport: &dyn Transport,
    retry: &RetryPolicy,
) -> Result<()> {
    let img = render(records, cfg, transport, retry);
    img.save(&cfg.output_path).map_err(|source| Error::WriteImage {
        path: cfg.output_path.clone(),
        source,
    })?;
    info!("wrote {}", cfg.output_path.display());
    Ok(())
}

fn measured_width(fonts: &FontSet, px: f32, text: &str) -> i32 {
    fonts
        .face()
        .map(|f| draw::text_width(f, px, text).round() as i32)
        .unwrap_or(0)
}

/// Local decorative icon next to the caption. Missing or undecodable
/// asset degrades to no icon, like row icons.
fn paste_header_icon(img: &mut RgbaImage, cfg: &RenderConfig, caption_w: i32, s: i32) {
    let icon = match image::open(&cfg.header_icon_path) {
        Ok(icon) => icon,
        Err(e) => {
            warn!(
                "header icon {} unavailable: {e}",
                cfg.header_icon_path.display()
            );
            return;
        }
    };
    let size = (30 * s) as u32;
    let icon = imageops::resize(&icon.to_rgba8(), size, size, FilterType::Lanczos3);
    let x = (img.width() as i32 - caption_w - 60 * s) / 2;
    let y = (cfg.header_height as i32 * s - 35 * s) / 2;
    imageops::overlay(img, &icon, x as i64, y as i64);
}

/// Fetch, decode, resize, and paste one reward icon. The fetch
/// inherits the retry policy; anything that still fails is skipped.
fn paste_row_icon(
    img: &mut RgbaImage,
    transport: &dyn Transport,
    retry: &RetryPolicy,
    url: &str,
    x: i32,
    y: i32,
    size: i32,
) {
    let resp = match fetch_with_retry(transport, url, retry) {
        Ok(resp) => resp,
        Err(e) => {
            warn!("icon {url} unavailable: {e}");
            return;
        }
    };
    let decoded = match image::load_from_memory(&resp.body) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("icon {url} did not decode: {e}");
            return;
        }
    };
    let icon = imageops::resize(&decoded.to_rgba8(), size as u32, size as u32, FilterType::Lanczos3);
    imageops::overlay(img, &icon, x as i64, y as i64);
}
