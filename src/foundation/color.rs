use crate::foundation::error::{LayerkitError, LayerkitResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiply alpha by `opacity` in `[0, 1]`; non-finite opacity leaves the color unchanged.
    pub fn with_opacity(self, opacity: f64) -> Self {
        if !opacity.is_finite() {
            return self;
        }
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic keyword.
    pub fn parse_css(s: &str) -> LayerkitResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::opaque(255, 255, 255),
            "red" => Self::opaque(255, 0, 0),
            "green" => Self::opaque(0, 128, 0),
            "blue" => Self::opaque(0, 0, 255),
            "yellow" => Self::opaque(255, 255, 0),
            "gray" | "grey" => Self::opaque(128, 128, 128),
            "transparent" => Self::TRANSPARENT,
            _ => {
                return Err(LayerkitError::validation(format!(
                    "unsupported color '{s}'"
                )));
            }
        };
        Ok(named)
    }
}

fn parse_hex(hex: &str) -> LayerkitResult<Rgba8> {
    fn hex_byte(pair: &str) -> LayerkitResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| LayerkitError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !hex.is_ascii() {
        return Err(LayerkitError::validation("hex color must be ASCII"));
    }
    match hex.len() {
        3 => {
            let mut c = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let pair: String = [ch, ch].iter().collect();
                c[i] = hex_byte(&pair)?;
            }
            Ok(Rgba8::opaque(c[0], c[1], c[2]))
        }
        6 | 8 => {
            let r = hex_byte(&hex[0..2])?;
            let g = hex_byte(&hex[2..4])?;
            let b = hex_byte(&hex[4..6])?;
            let a = if hex.len() == 8 {
                hex_byte(&hex[6..8])?
            } else {
                255
            };
            Ok(Rgba8 { r, g, b, a })
        }
        _ => Err(LayerkitError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
