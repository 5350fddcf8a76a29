use crate::error::GenerateError;
use crate::style::MAX_SIDE;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Opens the logo and converts it to RGBA.
pub fn load(path: &Path) -> Result<RgbaImage, GenerateError> {
    let img = image::open(path).map_err(|source| GenerateError::LogoUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Shrinks the logo so neither side exceeds `target`, keeping its aspect ratio.
/// Logos that already fit are returned unchanged.
pub fn fit_within(logo: RgbaImage, target: u32) -> RgbaImage {
    let (w, h) = logo.dimensions();
    if w <= target && h <= target {
        return logo;
    }

    let (nw, nh) = fitted_dimensions(w, h, target);
    imageops::resize(&logo, nw, nh, FilterType::Lanczos3)
}

fn fitted_dimensions(w: u32, h: u32, target: u32) -> (u32, u32) {
    let ratio = f64::min(target as f64 / w as f64, target as f64 / h as f64);
    let scale = |d: u32| ((d as f64 * ratio).round() as u32).clamp(1, target.max(1));
    (scale(w), scale(h))
}

/// A transparent square `halo` pixels larger than the logo's larger side, with
/// an opaque white disk inscribed in it.
///
/// A pixel is filled when its centre lies inside the circle through the square's
/// edges, so the disk is symmetric for odd and even sides alike.
pub fn backdrop(logo_dims: (u32, u32), halo: u32) -> Result<RgbaImage, GenerateError> {
    let side = logo_dims.0.max(logo_dims.1) as u64 + halo as u64;
    if side > MAX_SIDE as u64 {
        return Err(GenerateError::CanvasTooLarge {
            what: "Logo backdrop",
            requested: side,
            max: MAX_SIDE,
        });
    }

    let radius = side as f64 / 2.0;
    Ok(RgbaImage::from_fn(side as u32, side as u32, |x, y| {
        let dx = x as f64 + 0.5 - radius;
        let dy = y as f64 + 0.5 - radius;
        if dx * dx + dy * dy <= radius * radius {
            OPAQUE_WHITE
        } else {
            TRANSPARENT
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn square(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 20, 20, 255]))
    }

    #[test]
    fn shrinks_square_logo_to_target() {
        let fitted = fit_within(square(200, 200), 155);
        assert_eq!(fitted.dimensions(), (155, 155));
    }

    #[test]
    fn keeps_aspect_ratio() {
        let fitted = fit_within(square(400, 300), 155);
        assert_eq!(fitted.dimensions(), (155, 116));

        let fitted = fit_within(square(100, 310), 155);
        assert_eq!(fitted.dimensions(), (50, 155));
    }

    #[test]
    fn never_enlarges() {
        let fitted = fit_within(square(40, 60), 155);
        assert_eq!(fitted.dimensions(), (40, 60));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fitted_dimensions(10_000, 2, 155), (155, 1));
    }

    #[test]
    fn missing_logo_is_recoverable() {
        let err = load(Path::new("definitely/missing.png")).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn opaque_rgb_logo_gains_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        ImageBuffer::from_pixel(8, 8, Rgb([1u8, 2, 3])).save(&path).unwrap();

        let logo = load(&path).unwrap();
        assert_eq!(*logo.get_pixel(4, 4), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn backdrop_is_a_white_disk_on_transparency() {
        let disk = backdrop((155, 155), 20).unwrap();
        assert_eq!(disk.dimensions(), (175, 175));

        assert_eq!(*disk.get_pixel(87, 87), OPAQUE_WHITE);
        // Edges of the inscribed circle touch the square.
        assert_eq!(*disk.get_pixel(87, 0), OPAQUE_WHITE);
        assert_eq!(*disk.get_pixel(0, 87), OPAQUE_WHITE);
        assert_eq!(*disk.get_pixel(174, 87), OPAQUE_WHITE);
        assert_eq!(*disk.get_pixel(87, 174), OPAQUE_WHITE);
        // Corners stay clear.
        for (x, y) in [(0, 0), (174, 0), (0, 174), (174, 174)] {
            assert_eq!(disk.get_pixel(x, y)[3], 0);
        }
    }

    #[test]
    fn backdrop_uses_larger_logo_side() {
        let disk = backdrop((155, 116), 20).unwrap();
        assert_eq!(disk.dimensions(), (175, 175));
    }

    #[test]
    fn even_backdrop_is_symmetric() {
        let disk = backdrop((156, 100), 20).unwrap();
        assert_eq!(disk.dimensions(), (176, 176));

        for y in 0..176 {
            for x in 0..176 {
                let p = disk.get_pixel(x, y);
                assert_eq!(p, disk.get_pixel(175 - x, y), "({x}, {y})");
                assert_eq!(p, disk.get_pixel(x, 175 - y), "({x}, {y})");
                assert_eq!(p, disk.get_pixel(y, x), "({x}, {y})");
            }
        }
        assert_eq!(*disk.get_pixel(0, 88), OPAQUE_WHITE);
        assert_eq!(*disk.get_pixel(175, 88), OPAQUE_WHITE);
        assert_eq!(*disk.get_pixel(0, 87), OPAQUE_WHITE);
        assert_eq!(disk.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn oversized_halo_is_rejected_without_overflow() {
        let err = backdrop((155, 155), u32::MAX).unwrap_err();
        assert!(matches!(err, GenerateError::CanvasTooLarge { .. }));
        assert!(backdrop((u32::MAX, 1), u32::MAX).is_err());
    }
}
