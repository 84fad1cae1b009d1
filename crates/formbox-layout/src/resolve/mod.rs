//! Style resolution engine.
//!
//! Maps a [`ResolutionContext`] to the five directive maps of a
//! [`ResolvedLayout`]. Resolution is a pure function of the context: it
//! reads nothing else and never looks at previously emitted directives.
//!
//! # Order of application
//!
//! 1. Base box: position, display, box sizing, element flex defaults.
//! 2. Margins: external padding for containers, padding for elements.
//! 3. Sizing: root rules, or for other boxes the cross-axis dimension first
//!    and the main-axis dimension second, so main-axis flex factors win.
//! 4. Self-alignment (cross axis only).
//! 5. Visibility, last, so `display: none` is never overwritten.

mod axis;
pub mod cell;
mod inner;
mod root;

use std::collections::BTreeMap;

use formbox_common::warning::warn_once;
use formbox_tree::{FormTree, NodeId};

use crate::directives::{CssValue, DirectiveMap, Keyword, Property, ResolvedLayout};
use crate::sizing::{Dimension, RenderMode, Viewport};
use crate::style::{ResolutionContext, Visibility, project};

pub use cell::resolve_cell;
pub use inner::resolve_inner;

/// Opacity of hidden nodes on the authoring surface.
pub const HIDDEN_AUTHORING_OPACITY: f64 = 0.5;

/// Resolve one node of a tree.
///
/// An id outside the arena resolves to empty maps.
#[must_use]
pub fn resolve(tree: &FormTree, id: NodeId, viewport: Viewport, mode: RenderMode) -> ResolvedLayout {
    match project(tree, id, viewport, mode) {
        Some(ctx) => resolve_context(&ctx),
        None => {
            warn_once("resolve", &format!("no node {} in tree", id.0));
            ResolvedLayout::default()
        }
    }
}

/// Resolve every attached node, keyed by node key.
#[must_use]
pub fn resolve_tree(
    tree: &FormTree,
    viewport: Viewport,
    mode: RenderMode,
) -> BTreeMap<String, ResolvedLayout> {
    let mut out = BTreeMap::new();
    for id in tree.descendants(tree.root()) {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let _ = out.insert(node.key.clone(), resolve(tree, id, viewport, mode));
    }
    tracing::debug!(
        nodes = out.len(),
        %viewport,
        %mode,
        "resolved form tree"
    );
    out
}

/// Resolve a prepared context.
#[must_use]
pub fn resolve_context(ctx: &ResolutionContext) -> ResolvedLayout {
    let (cell, cell_hover, cell_active) = resolve_cell(ctx);
    ResolvedLayout {
        container: resolve_container(ctx),
        inner_container: resolve_inner(ctx),
        cell,
        cell_hover,
        cell_active,
    }
}

/// Resolve the outer box: sizing, flex participation, margins, visibility.
#[must_use]
pub fn resolve_container(ctx: &ResolutionContext) -> DirectiveMap {
    let mut out = DirectiveMap::new();

    // STEP 1: Base box.
    out.set(Property::Position, Keyword::Relative);
    out.set(Property::Display, Keyword::Flex);
    out.set(Property::FlexDirection, Keyword::Column);
    if ctx.is_root() {
        out.set(Property::BoxSizing, root::box_sizing(ctx));
    } else {
        out.set(Property::BoxSizing, Keyword::BorderBox);
    }
    if ctx.is_element {
        // [§ 7.1.1 Basic Values of flex](https://www.w3.org/TR/css-flexbox-1/#flex-common)
        // "flex: initial" = "0 1 auto"
        out.set_number(Property::FlexGrow, 0.0);
        out.set_number(Property::FlexShrink, 1.0);
        out.set(Property::FlexBasis, Keyword::Auto);
    }

    // STEP 2: Margins.
    let margin = ctx.margin();
    for (property, value) in [
        (Property::MarginTop, margin.top),
        (Property::MarginRight, margin.right),
        (Property::MarginBottom, margin.bottom),
        (Property::MarginLeft, margin.left),
    ] {
        if value != 0.0 {
            out.set_px(property, value);
        }
    }

    // STEP 3: Sizing.
    if ctx.is_root() {
        for dimension in Dimension::ALL {
            root::apply_root_dimension(ctx, dimension, &mut out);
        }
    } else {
        let main = ctx.parent_axis().main_dimension();
        let cross = ctx.parent_axis().cross().main_dimension();
        axis::apply_dimension(ctx, cross, &mut out);
        axis::apply_dimension(ctx, main, &mut out);

        // STEP 4: Self-alignment.
        axis::apply_self_alignment(ctx, cross, &mut out);
    }

    // STEP 5: Visibility.
    if ctx.style.visibility == Visibility::Hidden {
        match ctx.mode {
            RenderMode::Authoring => {
                out.set(Property::Opacity, CssValue::Number(HIDDEN_AUTHORING_OPACITY));
            }
            RenderMode::Published => out.set(Property::Display, Keyword::None),
        }
    }

    #[cfg(feature = "layout-trace")]
    tracing::trace!(container = %out, "resolved container");

    out
}
