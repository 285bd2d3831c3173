use crate::core::verdict::{BannerPlacement, Verdict};
use crate::utils::error::{Result, SeeFoodError};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

pub const HOT_DOG_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const NOT_HOT_DOG_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

const MIN_BANNER_HEIGHT: u32 = 48;

// Tried in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Draws the verdict banner across the image.
pub struct BannerRenderer {
    font: Option<FontVec>,
}

impl BannerRenderer {
    pub fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    /// Uses `font_path` when given (failing if it is unusable), otherwise the
    /// first system font found. Without any font the banner has no text.
    pub fn from_font_path(font_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = font_path {
            return Ok(Self::new(Some(load_font(path)?)));
        }

        let font = SYSTEM_FONTS
            .iter()
            .map(PathBuf::from)
            .filter(|path| path.is_file())
            .find_map(|path| match load_font(&path) {
                Ok(font) => {
                    tracing::debug!("Using banner font {}", path.display());
                    Some(font)
                }
                Err(e) => {
                    tracing::debug!("Skipping font {}: {}", path.display(), e);
                    None
                }
            });

        if font.is_none() {
            tracing::warn!("No banner font found; the banner will be drawn without text");
        }
        Ok(Self::new(font))
    }

    pub fn render(&self, image: &mut RgbaImage, verdict: &Verdict) {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let banner_height = banner_height(height);
        let top = match verdict.placement() {
            BannerPlacement::Top => 0,
            BannerPlacement::Bottom => height - banner_height,
        };
        let color = if verdict.is_hot_dog() {
            HOT_DOG_COLOR
        } else {
            NOT_HOT_DOG_COLOR
        };

        draw_filled_rect_mut(
            image,
            Rect::at(0, top as i32).of_size(width, banner_height),
            color,
        );

        if let Some(font) = &self.font {
            let text = verdict.banner_text();
            let scale = PxScale::from(banner_height as f32 * 0.75);
            let (text_width, text_height) = text_size(scale, font, text);
            let x = (width as i32 - text_width as i32) / 2;
            let y = top as i32 + (banner_height as i32 - text_height as i32) / 2;
            draw_text_mut(image, TEXT_COLOR, x, y, scale, font, text);
        }
    }
}

/// `max(48, h / 8)`, never taller than the image.
pub fn banner_height(image_height: u32) -> u32 {
    (image_height / 8).max(MIN_BANNER_HEIGHT).min(image_height)
}

fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path)?;
    FontVec::try_from_vec(bytes).map_err(|e| SeeFoodError::FontError {
        message: format!("{}: {}", path.display(), e),
    })
}
