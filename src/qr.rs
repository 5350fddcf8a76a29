use crate::error::GenerateError;
use crate::style::{QrRequest, Style, MAX_SIDE, MAX_VERSION};
use image::RgbImage;
use ndarray::Array2;
use qrcode::types::QrError;
use qrcode::{QrCode, Version};
use rayon::prelude::*;

/// Encodes the payload, treating the requested version as a floor: if the data
/// does not fit, the next larger version is tried until version 40.
///
/// Returns the module matrix indexed `[[y, x]]`, `true` for dark modules.
pub fn encode(request: &QrRequest) -> Result<Array2<bool>, GenerateError> {
    let mut version = request.min_version.clamp(1, MAX_VERSION);

    let code = loop {
        match QrCode::with_version(
            request.payload.as_bytes(),
            Version::Normal(version),
            request.ec_level,
        ) {
            Ok(code) => break code,
            Err(QrError::DataTooLong) if version < MAX_VERSION => version += 1,
            Err(source) => {
                return Err(GenerateError::Encode {
                    min_version: request.min_version,
                    source,
                })
            }
        }
    };

    if version != request.min_version {
        tracing::info!(
            requested = request.min_version,
            chosen = version,
            "payload did not fit requested version"
        );
    }

    let width = code.width();
    let colors = code.to_colors();
    Ok(Array2::from_shape_fn((width, width), |(y, x)| {
        matches!(colors[y * width + x], qrcode::Color::Dark)
    }))
}

/// Side length in pixels of the rendered symbol including its border, or
/// `CanvasTooLarge` past `MAX_SIDE`.
pub fn canvas_side(modules: usize, box_size: u32, border: u32) -> Result<u32, GenerateError> {
    let side = (modules as u64 + 2 * border as u64)
        .checked_mul(box_size as u64)
        .unwrap_or(u64::MAX);
    if side > MAX_SIDE as u64 {
        return Err(GenerateError::CanvasTooLarge {
            what: "QR canvas",
            requested: side,
            max: MAX_SIDE,
        });
    }
    Ok(side as u32)
}

/// Paints the module matrix onto a new canvas, `box_size` pixels per module
/// with `border` light modules of quiet zone on each side.
pub fn rasterize(
    modules: &Array2<bool>,
    style: &Style,
    box_size: u32,
    border: u32,
) -> Result<RgbImage, GenerateError> {
    let qr_size = modules.nrows();
    let side = canvas_side(qr_size, box_size, border)?;
    let mut canvas = RgbImage::from_pixel(side, side, style.background);

    if side == 0 {
        return Ok(canvas);
    }

    let border = border as usize;
    let box_size = box_size as usize;
    let fill = style.fill.0;

    // Rows are independent, so paint them in parallel.
    canvas
        .par_chunks_mut(side as usize * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let my = y / box_size;
            if my < border || my >= border + qr_size {
                return;
            }
            let my = my - border;

            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let mx = x / box_size;
                if mx < border || mx >= border + qr_size {
                    continue;
                }
                if modules[[my, mx - border]] {
                    px.copy_from_slice(&fill);
                }
            }
        });

    Ok(canvas)
}
