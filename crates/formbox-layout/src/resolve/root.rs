//! Root-only sizing rules.
//!
//! The root has no parent flow to participate in, so it gets no flex
//! factors; it sizes against the viewport instead.

use crate::classify;
use crate::directives::{CssValue, DirectiveMap, Keyword, Property};
use crate::sizing::{DEFAULT_MIN_SIZE, Dimension, Sizing, Viewport};
use crate::style::ResolutionContext;

/// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
///
/// A pixel-wide desktop root is a fixed canvas; its padding adds to it.
/// Every other root sizes its border box.
#[must_use]
pub fn box_sizing(ctx: &ResolutionContext) -> Keyword {
    if ctx.viewport == Viewport::Desktop && classify::is_pixel(ctx, Dimension::Width) {
        Keyword::ContentBox
    } else {
        Keyword::BorderBox
    }
}

/// Apply the root rules of one dimension.
pub fn apply_root_dimension(ctx: &ResolutionContext, dimension: Dimension, out: &mut DirectiveMap) {
    let Some(sizing) = ctx.style.sizing(dimension) else {
        return;
    };
    let size = dimension.size_property();

    match sizing {
        Sizing::Pixel(v) => {
            out.set_px(dimension.max_property(), v);
            // Mobile screens are narrower than any authored desktop canvas.
            if dimension == Dimension::Width && ctx.viewport == Viewport::Mobile {
                out.set(size, CssValue::Percent(100.0));
            } else {
                out.set_px(size, v);
            }
        }
        Sizing::Percent(p) => out.set(size, CssValue::Percent(p)),
        Sizing::Fit if ctx.child_count == 0 => {
            out.set_px(dimension.min_property(), DEFAULT_MIN_SIZE);
            out.set_px(dimension.max_property(), DEFAULT_MIN_SIZE);
            out.set_px(size, DEFAULT_MIN_SIZE);
        }
        Sizing::Fit => {
            match ctx.children_extent(dimension) {
                Some(total) => {
                    out.set_px(dimension.max_property(), total);
                    out.set(size, CssValue::full_minus(ctx.margin().along(dimension)));
                }
                None => out.set(size, Keyword::FitContent),
            }
            out.set(dimension.min_property(), Keyword::MinContent);
        }
        Sizing::Fill => {
            out.set(size, CssValue::Percent(100.0));
            if dimension == Dimension::Width {
                out.set(Property::MinWidth, Keyword::Auto);
            }
            if ctx.child_count == 0 {
                out.set_px(dimension.min_property(), DEFAULT_MIN_SIZE);
            }
        }
    }
}
