//! Cell decoration: border, corner radius, shadow, background, and the
//! interactive hover/selected variants.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use crate::directives::{CssValue, DirectiveMap, Keyword, Property};
use crate::style::{BorderStyle, ResolutionContext};

/// Transition applied to interactive cells.
pub const INTERACTIVE_TRANSITION: &str = "background-color 0.2s ease, border-color 0.2s ease";

/// Decoration maps for one node: `(cell, cell_hover, cell_active)`.
#[must_use]
pub fn resolve_cell(ctx: &ResolutionContext) -> (DirectiveMap, DirectiveMap, DirectiveMap) {
    let decoration = &ctx.style.decoration;
    let mut cell = DirectiveMap::new();

    // [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
    if let Some(width) = decoration.border_width.filter(|w| *w > 0.0) {
        cell.set_px(Property::BorderWidth, width);
        cell.set(
            Property::BorderStyle,
            decoration.border_style.unwrap_or_default().keyword(),
        );
        if let Some(color) = decoration.border_color {
            cell.set(Property::BorderColor, CssValue::Color(color));
        }
    } else if decoration.border_style == Some(BorderStyle::None) {
        cell.set(Property::BorderStyle, Keyword::None);
    }

    // [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
    //
    // Children paint over the corners unless the cell clips them.
    if let Some(radius) = decoration.corner_radius.filter(|r| *r > 0.0) {
        cell.set_px(Property::BorderRadius, radius);
        cell.set(Property::Overflow, Keyword::Hidden);
    }

    if let Some(shadow) = decoration.shadow {
        cell.set(Property::BoxShadow, CssValue::Shadow(shadow));
    }
    if let Some(color) = decoration.background_color {
        cell.set(Property::BackgroundColor, CssValue::Color(color));
    }

    let mut hover = DirectiveMap::new();
    let mut active = DirectiveMap::new();
    if ctx.has_actions {
        cell.set(Property::Cursor, Keyword::Pointer);
        cell.set(
            Property::Transition,
            CssValue::Text(INTERACTIVE_TRANSITION.to_string()),
        );

        if let Some(color) = decoration.hover_background_color {
            hover.set(Property::BackgroundColor, CssValue::Color(color));
        }
        if let Some(color) = decoration.hover_border_color {
            hover.set(Property::BorderColor, CssValue::Color(color));
        }
        if let Some(color) = decoration.selected_background_color {
            active.set(Property::BackgroundColor, CssValue::Color(color));
        }
        if let Some(color) = decoration.selected_border_color {
            active.set(Property::BorderColor, CssValue::Color(color));
        }
    }

    (cell, hover, active)
}
