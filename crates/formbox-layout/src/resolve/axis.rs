//! Per-dimension sizing rules for non-root boxes.
//!
//! Width and height share one rule set; which flex factors a dimension
//! produces depends only on whether it runs along the parent's flow axis
//! (the main axis) or across it.
//!
//! [§ 7 Flexibility](https://www.w3.org/TR/css-flexbox-1/#flexibility)

use formbox_common::warning::warn_once;

use crate::classify;
use crate::directives::{CssValue, DirectiveMap, Keyword, Property};
use crate::sizing::{DEFAULT_MIN_SIZE, Dimension, Sizing};
use crate::style::ResolutionContext;

/// Apply the sizing rules of one dimension to the outer box.
pub fn apply_dimension(ctx: &ResolutionContext, dimension: Dimension, out: &mut DirectiveMap) {
    let Some(sizing) = ctx.style.sizing(dimension) else {
        return;
    };
    let main = ctx.is_main_axis(dimension);
    let margin = ctx.margin().along(dimension);

    match sizing {
        Sizing::Pixel(v) => apply_pixel(ctx, dimension, v, main, margin, out),
        Sizing::Percent(p) => apply_percent(ctx, dimension, p, main, out),
        Sizing::Fit => apply_fit(ctx, dimension, main, margin, out),
        Sizing::Fill => apply_fill(ctx, dimension, main, margin, out),
    }
}

/// A pixel box never grows or shrinks past its magnitude. Along the main
/// axis it asks for the whole line and lets `max` clamp the basis to `v`;
/// across it, it takes the full line minus its margin, clamped the same way.
fn apply_pixel(
    ctx: &ResolutionContext,
    dimension: Dimension,
    v: f64,
    main: bool,
    margin: f64,
    out: &mut DirectiveMap,
) {
    out.set_px(dimension.max_property(), v);
    if main {
        out.set_number(Property::FlexGrow, 0.0);
        out.set_number(Property::FlexShrink, 0.0);
        out.set(Property::FlexBasis, CssValue::Percent(100.0));
    } else {
        out.set(dimension.size_property(), CssValue::full_minus(margin));
    }

    if classify::is_empty_container(ctx) || classify::parent_is_flexible_root(ctx, dimension) {
        out.set_px(dimension.min_property(), v);
    }
}

fn apply_percent(
    ctx: &ResolutionContext,
    dimension: Dimension,
    p: f64,
    main: bool,
    out: &mut DirectiveMap,
) {
    if classify::parent_is_fit(ctx, dimension) {
        warn_once(
            "resolve",
            &format!(
                "percent {} ignored: the parent {} fits its content",
                dimension.name(),
                dimension.name()
            ),
        );
        return;
    }

    if main {
        out.set(Property::FlexBasis, CssValue::Percent(p));
        out.set_number(Property::FlexGrow, 0.0);
    } else {
        out.set(dimension.size_property(), CssValue::Percent(p));
    }
}

fn apply_fit(
    ctx: &ResolutionContext,
    dimension: Dimension,
    main: bool,
    margin: f64,
    out: &mut DirectiveMap,
) {
    // Elements size to their own content and never overflow the parent,
    // padding included.
    if classify::is_element(ctx) {
        out.set(dimension.size_property(), Keyword::FitContent);
        out.set(dimension.max_property(), CssValue::full_minus(margin));
        return;
    }

    // An empty fit container would collapse to nothing; hold a placeholder.
    if ctx.child_count == 0 {
        out.set_px(dimension.max_property(), DEFAULT_MIN_SIZE);
        if main {
            out.set(Property::FlexBasis, CssValue::Percent(100.0));
        } else {
            out.set_px(dimension.size_property(), DEFAULT_MIN_SIZE);
        }
        return;
    }

    match ctx.children_extent(dimension) {
        Some(total) => {
            out.set_px(dimension.max_property(), total);
            out.set(dimension.size_property(), CssValue::full_minus(margin));
        }
        None => out.set(dimension.size_property(), Keyword::FitContent),
    }
    out.set(dimension.min_property(), Keyword::MinContent);

    if main {
        out.set_number(Property::FlexGrow, 0.0);
        out.set_number(Property::FlexShrink, 1.0);
        out.set(Property::FlexBasis, Keyword::Auto);
    }
}

/// A fill box takes whatever is left and gives it back first: the large
/// shrink factor makes fill siblings yield before fixed ones.
fn apply_fill(
    ctx: &ResolutionContext,
    dimension: Dimension,
    main: bool,
    margin: f64,
    out: &mut DirectiveMap,
) {
    let under_root_height =
        dimension == Dimension::Height && ctx.parent.is_some_and(|p| p.is_root);

    if !under_root_height {
        out.set(dimension.size_property(), CssValue::full_minus(margin));
    }
    out.set_number(Property::FlexGrow, 1.0);
    out.set_number(Property::FlexShrink, 100.0);

    if main {
        out.set(Property::FlexBasis, CssValue::Px(0.0));
        out.set_px(dimension.min_property(), 0.0);
    }
    if classify::is_empty_container(ctx) {
        out.set_px(dimension.min_property(), DEFAULT_MIN_SIZE);
    }
    // The root's height is only a minimum, so a percentage height of it
    // would not resolve.
    if under_root_height {
        out.set(dimension.min_property(), CssValue::Percent(100.0));
    }
}

/// Self-alignment within the parent, cross axis only.
pub fn apply_self_alignment(
    ctx: &ResolutionContext,
    dimension: Dimension,
    out: &mut DirectiveMap,
) {
    let Some(parent) = ctx.parent else {
        return;
    };
    if ctx.is_main_axis(dimension) {
        return;
    }

    if classify::fills_cross_axis(ctx, dimension) {
        let parent_stretches = parent
            .align_along(dimension)
            .is_none_or(|a| a.align_keyword() == Some(Keyword::Stretch));
        if !parent_stretches {
            out.set(Property::AlignSelf, Keyword::Stretch);
        }
        return;
    }

    if let Some(align) = ctx.style.self_align_along(dimension) {
        match align.align_keyword() {
            Some(keyword) => out.set(Property::AlignSelf, keyword),
            None => warn_once(
                "resolve",
                &format!("self alignment '{align}' has no cross-axis meaning"),
            ),
        }
    }
}
