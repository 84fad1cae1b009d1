//! A headless [`MeasurableSurface`].
//!
//! `MemorySurface` materializes a resolved [`FormTree`] as boxes with a
//! deliberately small width model, enough to drive the intrinsic sizer
//! without a renderer:
//!
//! - a box's rendered width is its inline `width` resolved against the
//!   parent's rendered width (the viewport for the root), clamped by its
//!   inline `max-width`;
//! - `fit-content` and unset widths use the content width, capped by the
//!   available width;
//! - an element's content width is its `intrinsic_width` style field, or
//!   [`DEFAULT_MIN_SIZE`] when unset, since there is no text to shape;
//! - a container's content width aggregates its children like the sizer
//!   does.
//!
//! Every bounds write is logged, which is what tests inspect.

use std::collections::BTreeMap;

use formbox_tree::{FormTree, NodeId, StyleFields};

use super::surface::{BoxBounds, ComputedBox, HookId, MeasurableSurface, ObserverId};
use crate::directives::{CssValue, Keyword, Property};
use crate::resolve::resolve_context;
use crate::sizing::{Axis, DEFAULT_MIN_SIZE, RenderMode, SizeUnit, Sizing, Viewport};
use crate::style::{FieldReader, project};

/// Layout viewport width for [`Viewport::Desktop`].
pub const DESKTOP_VIEWPORT_WIDTH: f64 = 1280.0;

/// Layout viewport width for [`Viewport::Mobile`].
pub const MOBILE_VIEWPORT_WIDTH: f64 = 390.0;

#[derive(Debug, Clone)]
struct MemoryBox {
    key: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
    displayed: bool,
    is_element: bool,
    width_unit: Option<SizeUnit>,
    flow_axis: Axis,
    gap: f64,
    margin_left: f64,
    margin_right: f64,
    bounds: BoxBounds,
    declared: BoxBounds,
    natural_width: f64,
}

/// Headless surface over a resolved form tree. Handles are [`NodeId`]s.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    boxes: BTreeMap<NodeId, MemoryBox>,
    viewport_width: f64,
    observers: BTreeMap<ObserverId, NodeId>,
    hooks: BTreeMap<HookId, NodeId>,
    next_registration: u64,
    writes: Vec<(NodeId, BoxBounds)>,
}

fn element_natural_width(style: &StyleFields, viewport: Viewport) -> f64 {
    FieldReader::new(style, viewport)
        .number("intrinsic_width")
        .filter(|w| *w >= 0.0)
        .unwrap_or(DEFAULT_MIN_SIZE)
}

fn resolve_against(value: Option<&CssValue>, available: f64) -> Option<f64> {
    match value? {
        CssValue::Px(v) => Some(*v),
        CssValue::Percent(p) => Some(available * p / 100.0),
        CssValue::Calc { percent, minus_px } => Some(available * percent / 100.0 - minus_px),
        _ => None,
    }
}

impl MemorySurface {
    /// Materialize every attached node of `tree` with its resolved
    /// container directives.
    #[must_use]
    pub fn from_tree(tree: &FormTree, viewport: Viewport, mode: RenderMode) -> Self {
        let mut boxes = BTreeMap::new();
        for id in tree.descendants(tree.root()) {
            let (Some(node), Some(ctx)) = (tree.get(id), project(tree, id, viewport, mode)) else {
                continue;
            };
            let container = resolve_context(&ctx).container;
            let margin = |property| container.get(property).and_then(CssValue::as_px);
            let bounds = BoxBounds {
                width: container.get(Property::Width).cloned(),
                max_width: container.get(Property::MaxWidth).cloned(),
            };
            let memory_box = MemoryBox {
                key: node.key.clone(),
                parent: node.parent,
                children: node.children.clone(),
                attached: true,
                displayed: container.get(Property::Display)
                    != Some(&CssValue::Keyword(Keyword::None)),
                is_element: node.is_element(),
                width_unit: ctx.style.width.map(Sizing::unit),
                flow_axis: ctx.style.flow_axis(),
                gap: ctx.style.gap,
                margin_left: margin(Property::MarginLeft).unwrap_or(0.0),
                margin_right: margin(Property::MarginRight).unwrap_or(0.0),
                declared: bounds.clone(),
                bounds,
                natural_width: if node.is_element() {
                    element_natural_width(&node.style, viewport)
                } else {
                    0.0
                },
            };
            let _ = boxes.insert(id, memory_box);
        }

        Self {
            boxes,
            viewport_width: match viewport {
                Viewport::Desktop => DESKTOP_VIEWPORT_WIDTH,
                Viewport::Mobile => MOBILE_VIEWPORT_WIDTH,
            },
            observers: BTreeMap::new(),
            hooks: BTreeMap::new(),
            next_registration: 0,
            writes: Vec::new(),
        }
    }

    /// Rendered width of a box, `0` for unknown or undisplayed boxes.
    #[must_use]
    pub fn rendered_width(&self, id: NodeId) -> f64 {
        let Some(b) = self.boxes.get(&id) else {
            return 0.0;
        };
        if !b.displayed {
            return 0.0;
        }
        let available = b
            .parent
            .map_or(self.viewport_width, |p| self.rendered_width(p));
        let preferred = resolve_against(b.bounds.width.as_ref(), available)
            .unwrap_or_else(|| self.content_width(id).min(available));
        let max = resolve_against(b.bounds.max_width.as_ref(), available).unwrap_or(f64::INFINITY);
        preferred.min(max).max(0.0)
    }

    /// Width the box's content asks for, independent of its parent.
    #[must_use]
    pub fn content_width(&self, id: NodeId) -> f64 {
        let Some(b) = self.boxes.get(&id) else {
            return 0.0;
        };
        if b.is_element {
            return b.natural_width;
        }

        let contributions: Vec<f64> = b
            .children
            .iter()
            .filter_map(|child| self.boxes.get(child).map(|c| (*child, c)))
            .filter(|(_, c)| c.displayed)
            .filter(|(_, c)| b.flow_axis == Axis::Row || c.width_unit != Some(SizeUnit::Fill))
            .map(|(child, c)| {
                let preferred = match c.bounds.width {
                    Some(CssValue::Px(v)) => v,
                    _ => self.content_width(child),
                };
                let clamped = match c.bounds.max_width {
                    Some(CssValue::Px(m)) => preferred.min(m),
                    _ => preferred,
                };
                clamped + c.margin_left + c.margin_right
            })
            .collect();

        match b.flow_axis {
            Axis::Row => {
                #[allow(clippy::cast_precision_loss)]
                let gaps = b.gap * contributions.len().saturating_sub(1) as f64;
                contributions.iter().sum::<f64>() + gaps
            }
            Axis::Column => contributions.iter().copied().fold(0.0, f64::max),
        }
    }

    /// Look up a box by the key of the node it renders.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.boxes
            .iter()
            .find(|(_, b)| b.attached && b.key == key)
            .map(|(id, _)| *id)
    }

    /// Every bounds write so far, in order.
    #[must_use]
    pub fn writes(&self) -> &[(NodeId, BoxBounds)] {
        &self.writes
    }

    /// Forget the write log.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Number of live resize observations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of live transition-end hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Change the content width of an element, as a font swap would.
    pub fn set_natural_width(&mut self, id: NodeId, width: f64) {
        if let Some(b) = self.boxes.get_mut(&id) {
            b.natural_width = width;
        }
    }

    /// Append a fit-width element box under `parent`, as a host would after
    /// a structural change. Returns `None` when `parent` is unknown.
    pub fn push_fit_element(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        natural_width: f64,
    ) -> Option<NodeId> {
        let id = NodeId(self.boxes.keys().next_back().map_or(0, |last| last.0 + 1));
        let bounds = BoxBounds {
            width: Some(CssValue::Keyword(Keyword::FitContent)),
            max_width: Some(CssValue::Percent(100.0)),
        };
        self.boxes.get_mut(&parent)?.children.push(id);
        let _ = self.boxes.insert(
            id,
            MemoryBox {
                key: key.into(),
                parent: Some(parent),
                children: Vec::new(),
                attached: true,
                displayed: true,
                is_element: true,
                width_unit: Some(SizeUnit::Fit),
                flow_axis: Axis::Column,
                gap: 0.0,
                margin_left: 0.0,
                margin_right: 0.0,
                declared: bounds.clone(),
                bounds,
                natural_width,
            },
        );
        Some(id)
    }

    /// Remove a box and its subtree from the rendered tree.
    pub fn detach_box(&mut self, id: NodeId) {
        if let Some(parent) = self.boxes.get(&id).and_then(|b| b.parent)
            && let Some(p) = self.boxes.get_mut(&parent)
        {
            p.children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(b) = self.boxes.get_mut(&current) {
                b.attached = false;
                stack.extend(b.children.iter().copied());
            }
        }
    }

    fn register(&mut self) -> u64 {
        self.next_registration += 1;
        self.next_registration
    }
}

impl MeasurableSurface for MemorySurface {
    type Handle = NodeId;

    fn is_attached(&self, handle: NodeId) -> bool {
        self.boxes.get(&handle).is_some_and(|b| b.attached)
    }

    fn parent(&self, handle: NodeId) -> Option<NodeId> {
        self.boxes.get(&handle).and_then(|b| b.parent)
    }

    fn children(&self, handle: NodeId) -> Vec<NodeId> {
        self.boxes
            .get(&handle)
            .map(|b| b.children.clone())
            .unwrap_or_default()
    }

    fn computed_box(&self, handle: NodeId) -> Option<ComputedBox> {
        let b = self.boxes.get(&handle)?;
        Some(ComputedBox {
            rendered_width: self.rendered_width(handle),
            width: Some(
                b.bounds
                    .width
                    .as_ref()
                    .map_or_else(|| Keyword::Auto.to_string(), ToString::to_string),
            ),
            max_width: Some(
                b.bounds
                    .max_width
                    .as_ref()
                    .map_or_else(|| Keyword::None.to_string(), ToString::to_string),
            ),
            margin_left: b.margin_left,
            margin_right: b.margin_right,
            width_unit: b.width_unit,
            is_element: b.is_element,
            flow_axis: b.flow_axis,
            gap: b.gap,
        })
    }

    fn bounds(&self, handle: NodeId) -> BoxBounds {
        self.boxes
            .get(&handle)
            .map(|b| b.bounds.clone())
            .unwrap_or_default()
    }

    fn declared_bounds(&self, handle: NodeId) -> BoxBounds {
        self.boxes
            .get(&handle)
            .map(|b| b.declared.clone())
            .unwrap_or_default()
    }

    fn set_bounds(&mut self, handle: NodeId, bounds: BoxBounds) {
        if let Some(b) = self.boxes.get_mut(&handle) {
            b.bounds = bounds.clone();
            self.writes.push((handle, bounds));
        }
    }

    fn observe_resize(&mut self, handle: NodeId) -> ObserverId {
        let id = ObserverId(self.register());
        let _ = self.observers.insert(id, handle);
        id
    }

    fn unobserve(&mut self, id: ObserverId) {
        let _ = self.observers.remove(&id);
    }

    fn add_transition_end_hook(&mut self, handle: NodeId) -> HookId {
        let id = HookId(self.register());
        let _ = self.hooks.insert(id, handle);
        id
    }

    fn remove_transition_end_hook(&mut self, id: HookId) {
        let _ = self.hooks.remove(&id);
    }
}
