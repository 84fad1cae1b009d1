//! The inner container: the flex box that actually arranges children.

use formbox_common::warning::warn_once;

use crate::directives::{CssValue, DirectiveMap, Keyword, Property};
use crate::sizing::{Axis, Dimension, Sizing};
use crate::style::ResolutionContext;

/// Resolve the inner container of a container node. Elements have none.
#[must_use]
pub fn resolve_inner(ctx: &ResolutionContext) -> DirectiveMap {
    let mut out = DirectiveMap::new();
    if ctx.is_element {
        return out;
    }
    let style = &ctx.style;
    let axis = style.flow_axis();

    // [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    out.set(Property::Display, Keyword::Flex);
    out.set(
        Property::FlexDirection,
        match axis {
            Axis::Row => Keyword::Row,
            Axis::Column => Keyword::Column,
        },
    );
    out.set(Property::FlexWrap, Keyword::Nowrap);
    out.set(Property::BoxSizing, Keyword::BorderBox);

    // The inner box tracks the outer box, except where the outer box
    // derives its size from this one.
    for dimension in Dimension::ALL {
        match style.sizing(dimension) {
            Some(Sizing::Fit) | None => {}
            Some(_) => out.set(dimension.size_property(), CssValue::Percent(100.0)),
        }
    }

    if style.gap > 0.0 {
        out.set_px(Property::Gap, style.gap);
    }

    let padding = style.padding;
    for (property, value) in [
        (Property::PaddingTop, padding.top),
        (Property::PaddingRight, padding.right),
        (Property::PaddingBottom, padding.bottom),
        (Property::PaddingLeft, padding.left),
    ] {
        if value != 0.0 {
            out.set_px(property, value);
        }
    }

    // [§ 8.2 'justify-content'](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
    // [§ 8.3 'align-items'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    let main = axis.main_dimension();
    let cross = axis.cross().main_dimension();
    if let Some(align) = style.align_along(main) {
        out.set(Property::JustifyContent, align.justify_keyword());
    }
    if let Some(align) = style.align_along(cross) {
        match align.align_keyword() {
            Some(keyword) => out.set(Property::AlignItems, keyword),
            None => warn_once(
                "resolve",
                &format!("'{align}' cannot align items on the cross axis"),
            ),
        }
    }

    if let Some(overflow) = style.overflow {
        out.set(Property::Overflow, overflow.keyword());
    }

    out
}
