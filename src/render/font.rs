//! Font loading with silent degradation.
//!
//! The themed asset is tried first, then a handful of common system
//! font locations. A fully missing font downgrades text drawing to a
//! no-op; it never fails the render.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rusttype::Font;

use crate::config::RenderConfig;

pub struct FontSet {
    face: Option<Font<'static>>,
    pub title_px: f32,
    pub text_px: f32,
}

impl FontSet {
    pub fn load(cfg: &RenderConfig) -> Self {
        let face = first_usable(&cfg.font_path, &cfg.fallback_font_paths);
        if face.is_none() {
            warn!("no usable font found, text will be omitted from the image");
        }
        let sf = cfg.scale_factor as f32;
        Self {
            face,
            title_px: cfg.title_size * sf,
            text_px: cfg.text_size * sf,
        }
    }

    pub fn face(&self) -> Option<&Font<'static>> {
        self.face.as_ref()
    }
}

fn first_usable(themed: &Path, fallbacks: &[PathBuf]) -> Option<Font<'static>> {
    if let Some(font) = load_font_file(themed) {
        return Some(font);
    }
    debug!(
        "themed font {} unavailable, trying system fonts",
        themed.display()
    );
    fallbacks.iter().find_map(|p| load_font_file(p))
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_never_panic() {
        let cfg = RenderConfig {
            font_path: PathBuf::from("/nonexistent/themed.otf"),
            fallback_font_paths: vec![PathBuf::from("/nonexistent/fallback.ttf")],
            ..RenderConfig::default()
        };
        let fonts = FontSet::load(&cfg);
        assert!(fonts.face().is_none());
        assert_eq!(fonts.title_px, 26.0 * 3.0);
        assert_eq!(fonts.text_px, 20.0 * 3.0);
    }

    #[test]
    fn unreadable_font_file_is_rejected() {
        // A real file that is not a font
        let dir = std::env::temp_dir().join("stw-daily-font-test");
        fs::create_dir_all(&dir).unwrap();
        let bogus = dir.join("bogus.otf");
        fs::write(&bogus, b"definitely not a font").unwrap();
        assert!(load_font_file(&bogus).is_none());
    }
}
