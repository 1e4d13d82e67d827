//! Severity colour table.

use crossterm::style::Color;
use dic_types::Severity;

/// Accent used for severities outside the table.
pub const DEFAULT_ACCENT: &str = "#ccc";
/// Text colour used for severities outside the table.
pub const DEFAULT_TEXT: &str = "#333";
/// Opacity of a card's background tint.
pub const CARD_BACKGROUND_ALPHA: f32 = 0.3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour: {0}")]
    InvalidHex(String),
}

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Any alpha component is ignored.
    pub fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, ch) in rgb.iter_mut().zip(digits.chars()) {
                    let nibble = channel(&ch.to_string())?;
                    *slot = nibble * 17;
                }
                Ok(Self {
                    r: rgb[0],
                    g: rgb[1],
                    b: rgb[2],
                })
            }
            6 | 8 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            _ => Err(invalid()),
        }
    }

    /// CSS `rgba(...)` form with the given opacity.
    pub fn to_rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// The colour seen when this colour is drawn at `alpha` over white.
    pub fn over_white(&self, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Convert a hex colour to CSS `rgba(...)`.
pub fn hex_to_rgba(hex: &str, alpha: f32) -> Result<String, ColorError> {
    Ok(Rgb::parse_hex(hex)?.to_rgba(alpha))
}

/// Table colour for a severity, if it has one.
pub fn severity_hex(severity: &Severity) -> Option<&'static str> {
    match severity {
        Severity::Severe => Some("#a50a0c"),
        Severity::High => Some("#ff4d4f"),
        Severity::Moderate => Some("#d3a54a"),
        Severity::Mild => Some("#f0f056"),
        Severity::Low => Some("#52c41a"),
        Severity::Other(_) => None,
    }
}

/// Colours for one interaction card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    /// Left border colour.
    pub accent: Rgb,
    /// Colour of the severity text.
    pub text: Rgb,
}

impl CardStyle {
    pub fn for_severity(severity: &Severity) -> Self {
        let table = severity_hex(severity);
        Self {
            accent: parse_known(table.unwrap_or(DEFAULT_ACCENT)),
            text: parse_known(table.unwrap_or(DEFAULT_TEXT)),
        }
    }

    /// Background tint flattened over a white page.
    pub fn background(&self) -> Rgb {
        self.accent.over_white(CARD_BACKGROUND_ALPHA)
    }
}

// Only called with the constants above, which always parse.
fn parse_known(hex: &str) -> Rgb {
    Rgb::parse_hex(hex).unwrap_or(Rgb {
        r: 0xcc,
        g: 0xcc,
        b: 0xcc,
    })
}
