//! Code glyph texture: the box payload as a QR code.
//!
//! One texel per module plus a light quiet zone, sampled nearest so the
//! modules stay sharp on the plate.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use qrcode::types::QrError;
use qrcode::{Color, QrCode};

/// Light modules around the symbol on every side.
pub const QUIET_ZONE: usize = 4;

const DARK: [u8; 4] = [17, 24, 39, 255];
const LIGHT: [u8; 4] = [255, 255, 255, 255];

/// Square module grid of an encoded payload, quiet zone included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphModules {
    pub side: usize,
    /// Row-major, `true` for dark.
    pub dark: Vec<bool>,
}

impl GlyphModules {
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.dark[row * self.side + col]
    }
}

/// Encodes `payload` and pads it with the quiet zone.
pub fn glyph_modules(payload: &str) -> Result<GlyphModules, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    let width = code.width();
    let colors = code.to_colors();
    let side = width + 2 * QUIET_ZONE;

    let mut dark = vec![false; side * side];
    for (index, color) in colors.into_iter().enumerate() {
        let row = index / width + QUIET_ZONE;
        let col = index % width + QUIET_ZONE;
        dark[row * side + col] = color == Color::Dark;
    }
    Ok(GlyphModules { side, dark })
}

/// Nearest-sampled RGBA texture of [`glyph_modules`].
pub fn glyph_image(payload: &str) -> Result<Image, QrError> {
    let modules = glyph_modules(payload)?;
    let side = modules.side as u32;
    let data = modules
        .dark
        .into_iter()
        .flat_map(|dark| if dark { DARK } else { LIGHT })
        .collect();
    let mut image = Image::new(
        Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    Ok(image)
}
