use anyhow::{bail, Result};
use image::Rgb;
use qrcode::EcLevel;

pub const DEFAULT_PAYLOAD: &str =
    "https://sikadfare.vercel.app/?utm_source=qr&utm_medium=print&utm_campaign=sfc_qr";
pub const DEFAULT_LOGO: &str = "tricycle_logo.png";
pub const DEFAULT_OUTPUT: &str = "SFC_QR_CODE.png";

pub const DEFAULT_VERSION: i16 = 4;
pub const MAX_VERSION: i16 = 40;
pub const DEFAULT_BOX_SIZE: u32 = 15;
pub const DEFAULT_BORDER: u32 = 2;
pub const MAX_BOX_SIZE: u32 = 100;
pub const MAX_BORDER: u32 = 40;
pub const MAX_HALO: u32 = 1000;
/// Largest canvas or backdrop side the generator will allocate.
pub const MAX_SIDE: u32 = 16_384;

pub const DEFAULT_FILL: Rgb<u8> = Rgb([0x1e, 0x3a, 0x8a]);
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const DEFAULT_LOGO_RATIO: f32 = 0.28;
pub const DEFAULT_HALO: u32 = 20;

/// What to encode and how the symbol is laid out on the canvas.
#[derive(Clone, Debug)]
pub struct QrRequest {
    pub payload: String,
    /// Smallest version to try; encoding moves up until the payload fits.
    pub min_version: i16,
    pub ec_level: EcLevel,
    pub box_size: u32,
    pub border: u32,
}

impl QrRequest {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            min_version: DEFAULT_VERSION,
            ec_level: EcLevel::H,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Rgb<u8>,
    pub background: Rgb<u8>,
    /// Largest logo side as a fraction of the canvas width.
    pub logo_ratio: f32,
    /// Extra pixels the white disk adds around the logo.
    pub halo: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            background: DEFAULT_BACKGROUND,
            logo_ratio: DEFAULT_LOGO_RATIO,
            halo: DEFAULT_HALO,
        }
    }
}

impl Style {
    pub fn logo_target(&self, canvas_width: u32) -> u32 {
        (canvas_width as f32 * self.logo_ratio) as u32
    }
}

/// Parses `#rrggbb` or `rrggbb`.
pub fn parse_hex_color(s: &str) -> Result<Rgb<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid color '{}', expected #rrggbb", s);
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
