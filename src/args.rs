use crate::style::{
    self, parse_hex_color, QrRequest, Style, DEFAULT_BORDER, DEFAULT_BOX_SIZE, DEFAULT_HALO,
    DEFAULT_LOGO, DEFAULT_LOGO_RATIO, DEFAULT_OUTPUT, DEFAULT_PAYLOAD, DEFAULT_VERSION,
};
use clap::{Parser, ValueEnum};
use image::Rgb;
use qrcode::EcLevel;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Debug)]
#[clap(rename_all = "UPPER")]
pub enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for EcLevel {
    fn from(v: EcArg) -> Self {
        match v {
            EcArg::L => EcLevel::L,
            EcArg::M => EcLevel::M,
            EcArg::Q => EcLevel::Q,
            EcArg::H => EcLevel::H,
        }
    }
}

fn parse_color(s: &str) -> Result<Rgb<u8>, String> {
    parse_hex_color(s).map_err(|e| e.to_string())
}

fn parse_ratio(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err("Logo ratio must be in (0, 1]".to_string())
    }
}

#[derive(Parser)]
#[command(name = "logo-qr")]
#[command(about = "Generate a styled QR code with a circular logo at its centre")]
pub struct Args {
    /// Text to encode in the QR code
    #[arg(short, long, default_value = DEFAULT_PAYLOAD)]
    pub text: String,

    /// Logo image path
    #[arg(short, long, default_value = DEFAULT_LOGO)]
    pub logo: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Minimum QR version; larger versions are used if the text does not fit
    #[arg(long = "qr-version", default_value_t = DEFAULT_VERSION,
          value_parser = clap::value_parser!(i16).range(1..=style::MAX_VERSION as i64))]
    pub qr_version: i16,

    /// QR code error correction level (L, M, Q, H)
    #[arg(short = 'e', long, default_value = "H")]
    pub error_correction: EcArg,

    /// Pixels per QR module
    #[arg(short, long, default_value_t = DEFAULT_BOX_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=style::MAX_BOX_SIZE as i64))]
    pub box_size: u32,

    /// Quiet zone width in modules
    #[arg(long, default_value_t = DEFAULT_BORDER,
          value_parser = clap::value_parser!(u32).range(0..=style::MAX_BORDER as i64))]
    pub border: u32,

    /// Module colour (#rrggbb)
    #[arg(long, default_value = "#1e3a8a", value_parser = parse_color)]
    pub fill: Rgb<u8>,

    /// Background colour (#rrggbb)
    #[arg(long, default_value = "#ffffff", value_parser = parse_color)]
    pub background: Rgb<u8>,

    /// Largest logo side as a fraction of the QR width
    #[arg(long, default_value_t = DEFAULT_LOGO_RATIO, value_parser = parse_ratio)]
    pub logo_ratio: f32,

    /// Pixels the white disk extends past the logo
    #[arg(long, default_value_t = DEFAULT_HALO,
          value_parser = clap::value_parser!(u32).range(0..=style::MAX_HALO as i64))]
    pub halo: u32,

    /// Exit with an error if the logo cannot be loaded
    #[arg(long)]
    pub strict: bool,

    /// Increase diagnostic output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn request(&self) -> QrRequest {
        QrRequest {
            min_version: self.qr_version,
            ec_level: self.error_correction.clone().into(),
            box_size: self.box_size,
            border: self.border,
            ..QrRequest::new(self.text.as_str())
        }
    }

    pub fn style(&self) -> Style {
        Style {
            fill: self.fill,
            background: self.background,
            logo_ratio: self.logo_ratio,
            halo: self.halo,
        }
    }
}
