//! Intrinsic sizing of `fit` boxes on a live surface.
//!
//! Declarations alone cannot size a fit container whose children size to
//! their content. This module measures such containers against a
//! [`MeasurableSurface`] and writes corrected width bounds back, without
//! leaving any ancestor in its temporarily expanded state.

mod memory;
mod resolver;
mod surface;

use formbox_tree::{FormTree, NodeId};

pub use memory::{DESKTOP_VIEWPORT_WIDTH, MOBILE_VIEWPORT_WIDTH, MemorySurface};
pub use resolver::{
    IntrinsicSizer, SizingTarget, TransientBounds, Trigger, fit_chain, measure,
    placeholder_bounds,
};
pub use surface::{BoxBounds, ComputedBox, HookId, MeasurableSurface, ObserverId, parse_px};

use crate::sizing::{RenderMode, Viewport};
use crate::style::project;

/// Attach a sizer to every node of `tree` that needs one, deepest first, so
/// nested fit containers are measured before the containers that hold them.
pub fn attach_tree<S>(
    tree: &FormTree,
    surface: &mut S,
    viewport: Viewport,
    mode: RenderMode,
) -> Vec<IntrinsicSizer<NodeId>>
where
    S: MeasurableSurface<Handle = NodeId>,
{
    let order: Vec<NodeId> = tree.descendants(tree.root()).collect();
    let sizers: Vec<IntrinsicSizer<NodeId>> = order
        .into_iter()
        .rev()
        .filter_map(|id| {
            let ctx = project(tree, id, viewport, mode)?;
            let target = SizingTarget::from_context(&ctx)?;
            Some(IntrinsicSizer::attach(surface, id, target))
        })
        .collect();
    tracing::debug!(sizers = sizers.len(), "attached intrinsic sizers");
    sizers
}
