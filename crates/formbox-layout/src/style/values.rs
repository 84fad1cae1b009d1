//! Keyword-valued style fields.

use strum_macros::{Display, EnumString};

use crate::directives::Keyword;

/// [§ 5 'justify-content' / § 6 'align-items'](https://www.w3.org/TR/css-align-3/)
///
/// Alignment as authored. Form editors write physical names (`left`, `top`)
/// as often as flex names (`flex-start`), so both spellings parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Align {
    /// Pack toward the start edge.
    #[strum(
        to_string = "start",
        serialize = "left",
        serialize = "top",
        serialize = "flex-start"
    )]
    Start,
    /// Pack toward the end edge.
    #[strum(
        to_string = "end",
        serialize = "right",
        serialize = "bottom",
        serialize = "flex-end"
    )]
    End,
    /// Center.
    #[strum(to_string = "center", serialize = "middle")]
    Center,
    /// Stretch to the container.
    #[strum(serialize = "stretch")]
    Stretch,
    /// Distribute free space between items.
    #[strum(serialize = "space-between")]
    SpaceBetween,
    /// Distribute free space around items.
    #[strum(serialize = "space-around")]
    SpaceAround,
    /// Distribute free space evenly.
    #[strum(serialize = "space-evenly")]
    SpaceEvenly,
}

impl Align {
    /// Keyword for `justify-content`. `stretch` packs to the start, which is
    /// what flex containers do with it on the main axis.
    #[must_use]
    pub const fn justify_keyword(self) -> Keyword {
        match self {
            Self::Start | Self::Stretch => Keyword::FlexStart,
            Self::End => Keyword::FlexEnd,
            Self::Center => Keyword::Center,
            Self::SpaceBetween => Keyword::SpaceBetween,
            Self::SpaceAround => Keyword::SpaceAround,
            Self::SpaceEvenly => Keyword::SpaceEvenly,
        }
    }

    /// Keyword for `align-items` / `align-self`. Distribution values have no
    /// cross-axis meaning for a single line.
    #[must_use]
    pub const fn align_keyword(self) -> Option<Keyword> {
        match self {
            Self::Start => Some(Keyword::FlexStart),
            Self::End => Some(Keyword::FlexEnd),
            Self::Center => Some(Keyword::Center),
            Self::Stretch => Some(Keyword::Stretch),
            Self::SpaceBetween | Self::SpaceAround | Self::SpaceEvenly => None,
        }
    }
}

/// [§ 11.2 'visibility'](https://www.w3.org/TR/css-display-3/#visibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Visibility {
    /// Rendered normally.
    #[default]
    Visible,
    /// Dimmed while authoring, removed when published.
    Hidden,
}

/// [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#propdef-overflow)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Overflow {
    /// Content may paint outside the box.
    Visible,
    /// Content is clipped.
    Hidden,
    /// Always scrollable.
    Scroll,
    /// Scrollable when content overflows.
    Auto,
}

impl Overflow {
    /// Directive keyword.
    #[must_use]
    pub const fn keyword(self) -> Keyword {
        match self {
            Self::Visible => Keyword::Visible,
            Self::Hidden => Keyword::Hidden,
            Self::Scroll => Keyword::Scroll,
            Self::Auto => Keyword::Auto,
        }
    }
}

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BorderStyle {
    /// A single solid line.
    #[default]
    Solid,
    /// Dashes.
    Dashed,
    /// Dots.
    Dotted,
    /// No border.
    None,
}

impl BorderStyle {
    /// Directive keyword.
    #[must_use]
    pub const fn keyword(self) -> Keyword {
        match self {
            Self::Solid => Keyword::Solid,
            Self::Dashed => Keyword::Dashed,
            Self::Dotted => Keyword::Dotted,
            Self::None => Keyword::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_accepts_physical_and_flex_names() {
        assert_eq!("left".parse::<Align>(), Ok(Align::Start));
        assert_eq!("Top".parse::<Align>(), Ok(Align::Start));
        assert_eq!("flex-end".parse::<Align>(), Ok(Align::End));
        assert_eq!("middle".parse::<Align>(), Ok(Align::Center));
        assert_eq!("space-between".parse::<Align>(), Ok(Align::SpaceBetween));
        assert!("sideways".parse::<Align>().is_err());
    }

    #[test]
    fn test_align_keywords() {
        assert_eq!(Align::Stretch.justify_keyword(), Keyword::FlexStart);
        assert_eq!(Align::Stretch.align_keyword(), Some(Keyword::Stretch));
        assert_eq!(Align::SpaceAround.align_keyword(), None);
        assert_eq!(Align::Start.to_string(), "start");
    }

    #[test]
    fn test_visibility_and_overflow_parse() {
        assert_eq!("HIDDEN".parse::<Visibility>(), Ok(Visibility::Hidden));
        assert_eq!("auto".parse::<Overflow>(), Ok(Overflow::Auto));
        assert_eq!("dashed".parse::<BorderStyle>(), Ok(BorderStyle::Dashed));
        assert!("clip".parse::<Overflow>().is_err());
    }
}
