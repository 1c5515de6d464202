use egui::Color32;
use thiserror::Error;

/// Neutral color substituted when a configured color cannot be parsed.
pub const FALLBACK_COLOR: Color32 = Color32::from_rgb(0xd3, 0xd3, 0xd3);

/// Errors produced while parsing `#rrggbb` color strings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),

    #[error("color {0:?} is not 7 characters long")]
    BadLength(String),

    #[error("color {0:?} contains non-hex digits")]
    BadDigits(String),
}

pub fn parse_hex(s: &str) -> Result<Color32, ColorError> {
    if !s.starts_with('#') {
        return Err(ColorError::MissingHash(s.to_string()));
    }
    if s.len() != 7 {
        return Err(ColorError::BadLength(s.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .ok_or_else(|| ColorError::BadDigits(s.to_string()))
    };
    Ok(Color32::from_rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Moves each channel toward white by `alpha` (0 keeps the color, 1 gives white).
pub fn blend_with_white(color: Color32, alpha: f32) -> Color32 {
    let alpha = alpha.clamp(0.0, 1.0);
    let lift = |c: u8| (f32::from(c) + (255.0 - f32::from(c)) * alpha) as u8;
    Color32::from_rgb(lift(color.r()), lift(color.g()), lift(color.b()))
}

/// Parses `hex`, falling back to `default` with a warning.
pub fn parse_or(hex: &str, default: Color32) -> Color32 {
    parse_hex(hex).unwrap_or_else(|err| {
        log::warn!("{}; falling back to {}", err, to_hex(default));
        default
    })
}
