use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, ImageError, RgbImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-left coordinate that centers an asset of `asset` pixels inside `canvas`,
/// rounding toward negative infinity.
pub fn centered_offset(canvas: u32, asset: u32) -> i64 {
    (canvas as i64 - asset as i64).div_euclid(2)
}

/// Pastes `overlay` at `(x, y)` using its own alpha channel as the mask.
/// Parts falling outside the canvas are dropped.
pub fn paste_masked(base: &mut RgbImage, overlay: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = (base.width() as i64, base.height() as i64);

    for (ox, oy, src) in overlay.enumerate_pixels() {
        let bx = x + ox as i64;
        let by = y + oy as i64;
        if bx < 0 || by < 0 || bx >= bw || by >= bh {
            continue;
        }

        let alpha = src[3] as u32;
        if alpha == 0 {
            continue;
        }

        let dst = base.get_pixel_mut(bx as u32, by as u32);
        for c in 0..3 {
            let blended = src[c] as u32 * alpha + dst[c] as u32 * (255 - alpha);
            dst[c] = ((blended + 127) / 255) as u8;
        }
    }
}

/// Writes the image as PNG, replacing any existing file.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), ImageError> {
    let file = File::create(path).map_err(ImageError::IoError)?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Best,
        FilterType::Adaptive,
    );
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8,
    )
}
