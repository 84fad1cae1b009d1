//! Layout directives: the engine's output vocabulary.
//!
//! A directive is a CSS property paired with a value. The rendering layer
//! applies directive maps to its boxes as inline style; this crate never
//! reads them back. Property and keyword names follow
//! [CSS Flexible Box Layout Level 1](https://www.w3.org/TR/css-flexbox-1/) and
//! [CSS Box Sizing Level 3](https://www.w3.org/TR/css-sizing-3/).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};

use crate::style::{BoxShadow, ColorValue};

/// CSS properties the engine may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    Display,
    /// [§ 2 'position'](https://www.w3.org/TR/css-position-3/#position-property)
    Position,
    /// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    BoxSizing,
    /// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    FlexDirection,
    /// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
    FlexWrap,
    /// [§ 7.2 'flex-grow'](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
    FlexGrow,
    /// [§ 7.2 'flex-shrink'](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property)
    FlexShrink,
    /// [§ 7.2 'flex-basis'](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
    FlexBasis,
    /// [§ 8.3 'align-self'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    AlignSelf,
    /// [§ 8.3 'align-items'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    AlignItems,
    /// [§ 8.2 'justify-content'](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
    JustifyContent,
    /// Preferred width.
    Width,
    /// Preferred height.
    Height,
    /// Lower width bound.
    MinWidth,
    /// Lower height bound.
    MinHeight,
    /// Upper width bound.
    MaxWidth,
    /// Upper height bound.
    MaxHeight,
    /// Outer spacing, top.
    MarginTop,
    /// Outer spacing, right.
    MarginRight,
    /// Outer spacing, bottom.
    MarginBottom,
    /// Outer spacing, left.
    MarginLeft,
    /// Inner spacing, top.
    PaddingTop,
    /// Inner spacing, right.
    PaddingRight,
    /// Inner spacing, bottom.
    PaddingBottom,
    /// Inner spacing, left.
    PaddingLeft,
    /// [§ 8 'gap'](https://www.w3.org/TR/css-align-3/#gaps)
    Gap,
    /// Content clipping.
    Overflow,
    /// Paint-time transparency.
    Opacity,
    /// Border thickness.
    BorderWidth,
    /// Border line style.
    BorderStyle,
    /// Border color.
    BorderColor,
    /// Corner rounding.
    BorderRadius,
    /// Drop shadow.
    BoxShadow,
    /// Background fill.
    BackgroundColor,
    /// Pointer cursor.
    Cursor,
    /// Pseudo-state transition.
    Transition,
}

/// CSS keywords the engine may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Keyword {
    /// `auto`
    Auto,
    /// `none`
    None,
    /// `flex`
    Flex,
    /// `row`
    Row,
    /// `column`
    Column,
    /// `nowrap`
    Nowrap,
    /// `relative`
    Relative,
    /// [§ 5.1 'min-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-min-content)
    MinContent,
    /// [§ 5.1 'max-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-max-content)
    MaxContent,
    /// [§ 5.1 'fit-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-fit-content)
    FitContent,
    /// `flex-start`
    FlexStart,
    /// `flex-end`
    FlexEnd,
    /// `center`
    Center,
    /// `stretch`
    Stretch,
    /// `space-between`
    SpaceBetween,
    /// `space-around`
    SpaceAround,
    /// `space-evenly`
    SpaceEvenly,
    /// `visible`
    Visible,
    /// `hidden`
    Hidden,
    /// `scroll`
    Scroll,
    /// `content-box`
    ContentBox,
    /// `border-box`
    BorderBox,
    /// `pointer`
    Pointer,
    /// `solid`
    Solid,
    /// `dashed`
    Dashed,
    /// `dotted`
    Dotted,
}

/// A resolved directive value.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Absolute length in CSS pixels.
    Px(f64),
    /// Percentage of the containing block.
    Percent(f64),
    /// `calc(<percent>% - <minus_px>px)`, used to keep margins out of
    /// 100%-class sizes.
    Calc {
        /// Percentage term.
        percent: f64,
        /// Subtracted pixel term.
        minus_px: f64,
    },
    /// Unitless number (flex factors, opacity).
    Number(f64),
    /// A keyword.
    Keyword(Keyword),
    /// An sRGB color.
    Color(ColorValue),
    /// A single drop shadow.
    Shadow(BoxShadow),
    /// Preformatted text (transitions).
    Text(String),
}

impl CssValue {
    /// `100%`, or `calc(100% - <margin>px)` when the margin is non-zero.
    #[must_use]
    pub fn full_minus(margin: f64) -> Self {
        if margin > 0.0 {
            Self::Calc {
                percent: 100.0,
                minus_px: margin,
            }
        } else {
            Self::Percent(100.0)
        }
    }

    /// The pixel magnitude, if this is a pixel length.
    #[must_use]
    pub const fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Keyword> for CssValue {
    fn from(keyword: Keyword) -> Self {
        Self::Keyword(keyword)
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
            Self::Calc { percent, minus_px } => write!(f, "calc({percent}% - {minus_px}px)"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Keyword(k) => write!(f, "{k}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Shadow(s) => write!(f, "{s}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

impl Serialize for CssValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Flat, ordered map of directives for one logical target.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DirectiveMap(BTreeMap<Property, CssValue>);

impl DirectiveMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a directive, replacing any earlier value for the property.
    pub fn set(&mut self, property: Property, value: impl Into<CssValue>) {
        let _ = self.0.insert(property, value.into());
    }

    /// Set a pixel length.
    pub fn set_px(&mut self, property: Property, value: f64) {
        self.set(property, CssValue::Px(value));
    }

    /// Set a unitless number.
    pub fn set_number(&mut self, property: Property, value: f64) {
        self.set(property, CssValue::Number(value));
    }

    /// Get a directive.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<&CssValue> {
        self.0.get(&property)
    }

    /// Get a directive rendered as CSS text.
    #[must_use]
    pub fn css(&self, property: Property) -> Option<String> {
        self.get(property).map(ToString::to_string)
    }

    /// Remove a directive.
    pub fn remove(&mut self, property: Property) -> Option<CssValue> {
        self.0.remove(&property)
    }

    /// Whether a directive is set for the property.
    #[must_use]
    pub fn contains(&self, property: Property) -> bool {
        self.0.contains_key(&property)
    }

    /// Number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no directives are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in property order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &CssValue)> {
        self.0.iter().map(|(p, v)| (*p, v))
    }
}

impl fmt::Display for DirectiveMap {
    /// Renders as an inline style declaration block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// Everything the engine resolves for one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedLayout {
    /// The outer box: sizing, flex participation, margins, visibility.
    pub container: DirectiveMap,
    /// The content box arranging children. Empty for elements.
    pub inner_container: DirectiveMap,
    /// Decoration: border, radius, shadow, background, cursor.
    pub cell: DirectiveMap,
    /// Decoration overrides while hovered.
    pub cell_hover: DirectiveMap,
    /// Decoration overrides while pressed or selected.
    pub cell_active: DirectiveMap,
}
