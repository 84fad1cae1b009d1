//! Color values for cell decoration.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use std::fmt;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Opaque color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse any color notation a form author may type: hex, a basic named
    /// color, or `rgb()`/`rgba()`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            return Self::from_hex(text);
        }
        if let Some(args) = text
            .strip_suffix(')')
            .and_then(|t| t.strip_prefix("rgba(").or_else(|| t.strip_prefix("rgb(")))
        {
            return Self::from_rgb_args(args);
        }
        Self::from_named(text)
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The basic 16 HTML colors plus `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "lime" => Self::rgb(0, 255, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "navy" => Self::rgb(0, 0, 128),
            "olive" => Self::rgb(128, 128, 0),
            "purple" => Self::rgb(128, 0, 128),
            "silver" => Self::rgb(192, 192, 192),
            "teal" => Self::rgb(0, 128, 128),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    /// [§ 4.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// Legacy comma syntax only: `r, g, b` or `r, g, b, alpha` with alpha in
    /// `[0, 1]`. "Values outside these ranges are not invalid, but are
    /// clamped to the ranges defined here at parsed-value time."
    fn from_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<f64> = args
            .split(',')
            .map(|p| p.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<_>>()?;
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(clamp_to_u8(*r), clamp_to_u8(*g), clamp_to_u8(*b))),
            [r, g, b, a] => Some(Self {
                r: clamp_to_u8(*r),
                g: clamp_to_u8(*g),
                b: clamp_to_u8(*b),
                a: clamp_to_u8(a.clamp(0.0, 1.0) * 255.0),
            }),
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for ColorValue {
    /// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (f64::from(self.a) / 255.0 * 100.0).round() / 100.0;
            write!(f, "rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(ColorValue::from_hex("#fff"), Some(ColorValue::WHITE));
        assert_eq!(ColorValue::from_hex("#336699"), Some(ColorValue::rgb(0x33, 0x66, 0x99)));
        assert_eq!(
            ColorValue::from_hex("#00000080"),
            Some(ColorValue { r: 0, g: 0, b: 0, a: 128 })
        );
        assert_eq!(ColorValue::from_hex("#12345"), None);
        assert_eq!(ColorValue::from_hex("#zzz"), None);
    }

    #[test]
    fn test_rgb_function_and_names() {
        assert_eq!(ColorValue::parse("rgb(255, 0, 0)"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(
            ColorValue::parse("rgba(0, 0, 0, 0.5)"),
            Some(ColorValue { r: 0, g: 0, b: 0, a: 128 })
        );
        assert_eq!(ColorValue::parse("Navy"), Some(ColorValue::rgb(0, 0, 128)));
        assert_eq!(ColorValue::parse("rgb(1, 2)"), None);
        assert_eq!(ColorValue::parse("chartreuse-ish"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorValue::rgb(0x33, 0x66, 0x99).to_string(), "#336699");
        assert_eq!(
            ColorValue { r: 0, g: 0, b: 0, a: 128 }.to_string(),
            "rgba(0, 0, 0, 0.5)"
        );
    }
}
