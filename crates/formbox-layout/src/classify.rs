//! Node classification predicates.
//!
//! Small questions the resolver and the intrinsic sizer ask over and over.

use crate::sizing::{Dimension, Sizing};
use crate::style::ResolutionContext;

/// Whether the node is sized in fixed pixels along `dimension`.
#[must_use]
pub fn is_pixel(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    matches!(ctx.style.sizing(dimension), Some(Sizing::Pixel(_)))
}

/// Whether the node fits its content along `dimension`.
#[must_use]
pub fn is_fit(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    ctx.style.sizing(dimension) == Some(Sizing::Fit)
}

/// Whether the node fills available space along `dimension`.
#[must_use]
pub fn is_fill(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    ctx.style.sizing(dimension) == Some(Sizing::Fill)
}

/// Whether the node is a leaf element.
#[must_use]
pub const fn is_element(ctx: &ResolutionContext) -> bool {
    ctx.is_element
}

/// Whether the node is a container.
#[must_use]
pub const fn is_container(ctx: &ResolutionContext) -> bool {
    !ctx.is_element
}

/// Whether the node is a container with no children.
#[must_use]
pub const fn is_empty_container(ctx: &ResolutionContext) -> bool {
    !ctx.is_element && ctx.child_count == 0
}

/// A fit-width container: the only kind of box that can join a fit chain.
#[must_use]
pub fn is_fit_width_container(ctx: &ResolutionContext) -> bool {
    is_container(ctx) && is_fit(ctx, Dimension::Width)
}

/// A fit-width element.
#[must_use]
pub fn is_fit_width_element(ctx: &ResolutionContext) -> bool {
    is_element(ctx) && is_fit(ctx, Dimension::Width)
}

/// Whether the node fills a dimension that is its parent's cross axis.
#[must_use]
pub fn fills_cross_axis(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    !ctx.is_root() && !ctx.is_main_axis(dimension) && is_fill(ctx, dimension)
}

/// Whether the parent's size along `dimension` depends on its content, so
/// percentages of it are indeterminate.
#[must_use]
pub fn parent_is_fit(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    ctx.parent
        .is_some_and(|p| p.sizing(dimension) == Some(Sizing::Fit))
}

/// Whether the parent is the root and is not pixel-sized along `dimension`.
#[must_use]
pub fn parent_is_flexible_root(ctx: &ResolutionContext, dimension: Dimension) -> bool {
    ctx.parent
        .is_some_and(|p| p.is_root && !matches!(p.sizing(dimension), Some(Sizing::Pixel(_))))
}
