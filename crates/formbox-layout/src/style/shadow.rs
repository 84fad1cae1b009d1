//! Drop shadow values.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use std::fmt;

use super::color::ColorValue;

/// [§ 6.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)
///
/// "The 'box-shadow' property attaches one or more drop-shadows to the box."
///
/// Forms only ever attach a single outer shadow, so `inset` and shadow lists
/// are not modelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    /// Horizontal offset. Positive = right.
    pub offset_x: f64,
    /// Vertical offset. Positive = down.
    pub offset_y: f64,
    /// Blur radius. Must be >= 0. Default 0.
    pub blur_radius: f64,
    /// Spread radius. Default 0.
    pub spread_radius: f64,
    /// Shadow color.
    pub color: ColorValue,
}

impl BoxShadow {
    /// Color used when an author sets shadow geometry without a color:
    /// black at 25% opacity.
    pub const DEFAULT_COLOR: ColorValue = ColorValue {
        r: 0,
        g: 0,
        b: 0,
        a: 64,
    };

    /// Whether the shadow would paint anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.color.a > 0
            && (self.offset_x != 0.0
                || self.offset_y != 0.0
                || self.blur_radius > 0.0
                || self.spread_radius != 0.0)
    }
}

impl fmt::Display for BoxShadow {
    /// `<offset-x> <offset-y> <blur> <spread> <color>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px {}",
            self.offset_x,
            self.offset_y,
            self.blur_radius.max(0.0),
            self.spread_radius,
            self.color
        )
    }
}
