use crate::compose::{centered_offset, paste_masked, save_png};
use crate::error::GenerateError;
use crate::logo;
use crate::qr;
use crate::style::{QrRequest, Style};
use image::RgbImage;
use std::path::Path;

/// Renders the QR code, centers the logo on a white disk, and writes the PNG.
///
/// Nothing is written unless every step before the save succeeds, so a missing
/// logo leaves any existing file at `output` untouched.
pub fn generate(
    request: &QrRequest,
    style: &Style,
    logo_path: &Path,
    output: &Path,
) -> Result<RgbImage, GenerateError> {
    let modules = qr::encode(request)?;
    let mut canvas = qr::rasterize(&modules, style, request.box_size, request.border)?;
    let (width, height) = canvas.dimensions();
    tracing::debug!(modules = modules.nrows(), width, height, "rasterized symbol");

    let target = style.logo_target(width);
    let logo = logo::fit_within(logo::load(logo_path)?, target);
    let disk = logo::backdrop(logo.dimensions(), style.halo)?;
    tracing::debug!(
        logo_target = target,
        logo_width = logo.width(),
        logo_height = logo.height(),
        backdrop = disk.width(),
        "prepared logo"
    );

    paste_masked(
        &mut canvas,
        &disk,
        centered_offset(width, disk.width()),
        centered_offset(height, disk.height()),
    );
    paste_masked(
        &mut canvas,
        &logo,
        centered_offset(width, logo.width()),
        centered_offset(height, logo.height()),
    );

    save_png(&canvas, output).map_err(|source| GenerateError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(canvas)
}
