//! Expand, measure, collapse.
//!
//! A `fit` container cannot know its width from declarations alone when a
//! child sizes to content. The sizer measures it on the live surface:
//!
//! 1. Walk up the **fit chain**: contiguous fit-width container ancestors,
//!    closest first. Each of them is currently clamped to its own last
//!    measurement, which would clamp the target too.
//! 2. **Expand**: capture the inline bounds of the target and of each chain
//!    box, and set `width` and `max-width` to `100%`. The target's own
//!    previous measurement would clamp its children otherwise.
//! 3. **Measure** the target's children and aggregate them along its flow
//!    axis.
//! 4. **Collapse**: restore the captured bounds.
//! 5. **Apply** `max-width: <total>px` and `width: calc(100% - <margin>)` to
//!    the target.
//! 6. Re-measure every chain box, closest first, so ancestors pick up the
//!    new size.
//!
//! Fit elements have nothing to measure inside; their sizer only performs
//! step 6 for the element's chain.
//!
//! A fit container left without children is not measured. It is put back on
//! the empty-container placeholder instead, so a stale measurement cannot
//! keep clamping it.

use std::fmt::Debug;
use std::hash::Hash;

use strum_macros::Display;

use super::surface::{BoxBounds, ComputedBox, HookId, MeasurableSurface, ObserverId, parse_px};
use crate::classify;
use crate::directives::{CssValue, Property};
use crate::resolve::resolve_container;
use crate::sizing::{Axis, ChildExtent, Dimension, SizeUnit, Sizing, aggregate_extents};
use crate::style::{NodeStyle, ParentFacts, ResolutionContext};

/// Events that make a measurement stale. Each one runs a full cycle; they
/// are not coalesced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Trigger {
    /// A child was added to or removed from the box.
    ChildCountChanged,
    /// A CSS transition on the box finished.
    TransitionEnd,
    /// Web fonts finished loading, changing text metrics.
    FontsReady,
    /// The box was resized.
    Resize,
}

/// What kind of fit box a sizer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingTarget {
    /// A fit-width element: only its fit chain is re-measured.
    FitElement,
    /// A fit-width container with children: measured, then its chain.
    FitContainer,
}

impl SizingTarget {
    /// The target for a resolved node, or `None` when the node does not need
    /// intrinsic sizing (not fit-width, or a container without children).
    #[must_use]
    pub fn from_context(ctx: &ResolutionContext) -> Option<Self> {
        if classify::is_fit_width_element(ctx) {
            Some(Self::FitElement)
        } else if classify::is_fit_width_container(ctx) && ctx.child_count > 0 {
            Some(Self::FitContainer)
        } else {
            None
        }
    }
}

/// Inline bounds captured from the target and its fit chain before
/// expansion.
///
/// Must be handed back through [`TransientBounds::collapse`] within the same
/// cycle.
#[derive(Debug)]
#[must_use = "expanded boxes stay unconstrained until collapsed"]
pub struct TransientBounds<H> {
    captured: Vec<(H, BoxBounds)>,
}

impl<H: Copy> TransientBounds<H> {
    /// Capture and unconstrain every attached box of `chain`.
    pub fn expand<S>(surface: &mut S, chain: &[H]) -> Self
    where
        S: MeasurableSurface<Handle = H>,
    {
        let mut captured = Vec::with_capacity(chain.len());
        for &handle in chain {
            if !surface.is_attached(handle) {
                continue;
            }
            captured.push((handle, surface.bounds(handle)));
            surface.set_bounds(handle, BoxBounds::unconstrained());
        }
        Self { captured }
    }

    /// Restore every captured box.
    pub fn collapse<S>(self, surface: &mut S)
    where
        S: MeasurableSurface<Handle = H>,
    {
        for (handle, bounds) in self.captured.into_iter().rev() {
            surface.set_bounds(handle, bounds);
        }
    }

    /// Number of boxes captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }
}

fn is_fit_container(computed: &ComputedBox) -> bool {
    !computed.is_element && computed.width_unit == Some(SizeUnit::Fit)
}

/// The fit chain of `handle`: contiguous attached fit-width container
/// ancestors, closest first.
#[must_use]
pub fn fit_chain<S: MeasurableSurface>(surface: &S, handle: S::Handle) -> Vec<S::Handle> {
    let mut chain = Vec::new();
    let mut current = surface.parent(handle);
    while let Some(ancestor) = current {
        let fits = surface.is_attached(ancestor)
            && surface
                .computed_box(ancestor)
                .is_some_and(|c| is_fit_container(&c));
        if !fits {
            break;
        }
        chain.push(ancestor);
        current = surface.parent(ancestor);
    }
    chain
}

/// The width one child contributes to its parent's measurement.
///
/// A pixel `max-width` wins, then a pixel `width`, then the rendered width.
/// Fit elements add their margins, which the rendered width excludes.
fn child_extent(child: &ComputedBox) -> ChildExtent {
    let declared = child
        .max_width
        .as_deref()
        .and_then(parse_px)
        .or_else(|| child.width.as_deref().and_then(parse_px));
    let mut width = declared.or_else(|| {
        child
            .rendered_width
            .is_finite()
            .then_some(child.rendered_width)
    });
    if child.is_element && child.width_unit == Some(SizeUnit::Fit) {
        width = width.map(|w| w + child.margin_left + child.margin_right);
    }

    if child.width_unit == Some(SizeUnit::Fill) {
        ChildExtent::fill(width)
    } else {
        width.map_or_else(ChildExtent::unknown, ChildExtent::known)
    }
}

/// Bounds of a fit container with no children, as resolution places it
/// under a parent flowing along `parent_axis` (`None` for the root).
#[must_use]
pub fn placeholder_bounds(parent_axis: Option<Axis>) -> BoxBounds {
    let style = NodeStyle {
        width: Some(Sizing::Fit),
        ..NodeStyle::default()
    };
    let mut ctx = ResolutionContext::standalone(style, false);
    ctx.parent = parent_axis.map(|axis| ParentFacts {
        width: None,
        height: None,
        axis,
        vertical_align: None,
        horizontal_align: None,
        is_root: false,
    });
    let container = resolve_container(&ctx);
    BoxBounds {
        width: container.get(Property::Width).cloned(),
        max_width: container.get(Property::MaxWidth).cloned(),
    }
}

/// Measure the aggregate width of a box's children in its current state.
#[must_use]
pub fn measure<S: MeasurableSurface>(surface: &S, handle: S::Handle) -> Option<f64> {
    let parent = surface.computed_box(handle)?;
    let extents: Vec<ChildExtent> = surface
        .children(handle)
        .into_iter()
        .filter_map(|child| {
            let computed = surface.computed_box(child)?;
            let extent = child_extent(&computed);
            #[cfg(feature = "layout-trace")]
            tracing::trace!(?child, size = ?extent.size, fill = extent.fill, "measured child");
            Some(extent)
        })
        .collect();
    aggregate_extents(parent.flow_axis, Dimension::Width, parent.gap, &extents)
}

/// Keeps one fit box sized to its content for as long as it is attached.
///
/// Created with [`IntrinsicSizer::attach`], which registers a resize
/// observation and a transition-end hook and performs the first
/// measurement. [`IntrinsicSizer::detach`] consumes the sizer, so teardown
/// happens exactly once.
#[derive(Debug)]
pub struct IntrinsicSizer<H> {
    handle: H,
    target: SizingTarget,
    observer: ObserverId,
    hook: HookId,
    /// Last bounds this sizer wrote to each box it corrected.
    applied: Vec<(H, BoxBounds)>,
    last_total: Option<f64>,
}

impl<H: Copy + Eq + Hash + Debug> IntrinsicSizer<H> {
    /// Start sizing `handle` and run the first cycle.
    pub fn attach<S>(surface: &mut S, handle: H, target: SizingTarget) -> Self
    where
        S: MeasurableSurface<Handle = H>,
    {
        let observer = surface.observe_resize(handle);
        let hook = surface.add_transition_end_hook(handle);
        let mut sizer = Self {
            handle,
            target,
            observer,
            hook,
            applied: Vec::new(),
            last_total: None,
        };
        let _ = sizer.run(surface);
        sizer
    }

    /// The box being sized.
    #[must_use]
    pub const fn handle(&self) -> H {
        self.handle
    }

    /// The kind of box being sized.
    #[must_use]
    pub const fn target(&self) -> SizingTarget {
        self.target
    }

    /// Total from the most recent container measurement.
    #[must_use]
    pub const fn last_total(&self) -> Option<f64> {
        self.last_total
    }

    /// React to a trigger. A box that is no longer attached is left alone.
    pub fn on_trigger<S>(&mut self, surface: &mut S, trigger: Trigger) -> Option<f64>
    where
        S: MeasurableSurface<Handle = H>,
    {
        if !surface.is_attached(self.handle) {
            tracing::debug!(handle = ?self.handle, %trigger, "trigger for detached box ignored");
            return None;
        }
        tracing::debug!(handle = ?self.handle, %trigger, "intrinsic sizing triggered");
        self.run(surface)
    }

    /// Run one full cycle: measure the target (containers only), then
    /// re-measure its fit chain closest first.
    pub fn run<S>(&mut self, surface: &mut S) -> Option<f64>
    where
        S: MeasurableSurface<Handle = H>,
    {
        if !surface.is_attached(self.handle) {
            return None;
        }

        let total = match self.target {
            SizingTarget::FitElement => None,
            SizingTarget::FitContainer => {
                let total = self.resize(surface, self.handle);
                self.last_total = total;
                total
            }
        };

        for ancestor in fit_chain(surface, self.handle) {
            let _ = self.resize(surface, ancestor);
        }
        total
    }

    /// Expand `handle` and its chain, measure, collapse, apply.
    fn resize<S>(&mut self, surface: &mut S, handle: H) -> Option<f64>
    where
        S: MeasurableSurface<Handle = H>,
    {
        if surface.children(handle).is_empty() {
            self.settle_empty(surface, handle);
            return None;
        }

        let chain = fit_chain(surface, handle);
        let mut expanded = Vec::with_capacity(chain.len() + 1);
        expanded.push(handle);
        expanded.extend_from_slice(&chain);

        let transient = TransientBounds::expand(surface, &expanded);
        let total = measure(surface, handle);
        transient.collapse(surface);
        if let Some(total) = total {
            self.apply(surface, handle, total);
        }

        tracing::debug!(?handle, ?total, chain = chain.len(), "measured fit box");
        total
    }

    fn apply<S>(&mut self, surface: &mut S, handle: H, total: f64)
    where
        S: MeasurableSurface<Handle = H>,
    {
        let Some(computed) = surface.computed_box(handle) else {
            return;
        };
        let margin = computed.margin_left + computed.margin_right;
        self.write(
            surface,
            handle,
            BoxBounds {
                width: Some(CssValue::full_minus(margin)),
                max_width: Some(CssValue::Px(total)),
            },
        );
    }

    /// Drop a measured clamp from a box that lost its last child.
    fn settle_empty<S>(&mut self, surface: &mut S, handle: H)
    where
        S: MeasurableSurface<Handle = H>,
    {
        let parent_axis = surface
            .parent(handle)
            .map(|parent| surface.computed_box(parent).map_or(Axis::Column, |c| c.flow_axis));
        let placeholder = placeholder_bounds(parent_axis);
        if surface.bounds(handle) != placeholder {
            tracing::debug!(?handle, "fit box emptied, restoring placeholder");
            self.write(surface, handle, placeholder);
        }
    }

    fn write<S>(&mut self, surface: &mut S, handle: H, bounds: BoxBounds)
    where
        S: MeasurableSurface<Handle = H>,
    {
        surface.set_bounds(handle, bounds.clone());
        match self.applied.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, last)) => *last = bounds,
            None => self.applied.push((handle, bounds)),
        }
    }

    /// Stop sizing: release the observation and the hook, and clear this
    /// sizer's overrides.
    ///
    /// A box still holding the bounds this sizer last wrote goes back to its
    /// declared bounds. A box rewritten since then belongs to whoever wrote
    /// it, and a detached box is left alone.
    pub fn detach<S>(self, surface: &mut S)
    where
        S: MeasurableSurface<Handle = H>,
    {
        surface.unobserve(self.observer);
        surface.remove_transition_end_hook(self.hook);
        for (handle, written) in self.applied.into_iter().rev() {
            if surface.is_attached(handle) && surface.bounds(handle) == written {
                let declared = surface.declared_bounds(handle);
                surface.set_bounds(handle, declared);
            }
        }
    }
}
