// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string like the page's brand colours

use crate::error::{FieldError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_u32(0xffffffff);
    pub const STUDIO_PURPLE: Color = Color::from_u32(0x8b5cf6ff);
    pub const STUDIO_CYAN: Color = Color::from_u32(0x06b6d4ff);
    pub const STUDIO_GOLD: Color = Color::from_u32(0xf59e0bff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Color> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || FieldError::InvalidColor(hex.to_owned());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            3 => {
                // each nibble doubles up, 0xf -> 0xff
                let r = ((num >> 8) & 0xf) as u8 * 0x11;
                let g = ((num >> 4) & 0xf) as u8 * 0x11;
                let b = (num & 0xf) as u8 * 0x11;
                Ok(Color { r, g, b, a: 0xff })
            }
            6 => Ok(Color::from_u32((num << 8) | 0xff)),
            8 => Ok(Color::from_u32(num)),
            _ => Err(invalid()),
        }
    }

    // Canvas fill/stroke style, alpha is applied separately through globalAlpha
    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

pub fn studio_palette() -> Vec<Color> {
    vec![Color::STUDIO_PURPLE, Color::STUDIO_CYAN, Color::STUDIO_GOLD]
}
