//! The live rendered tree, as seen by the intrinsic sizer.
//!
//! The sizer never owns boxes. A host hands it a [`MeasurableSurface`]: a
//! view of rendered boxes that can report computed sizes and accept inline
//! bound overrides. Holding `&mut` to the surface for a whole cycle is what
//! keeps the expanded state invisible to paint.

use std::fmt::Debug;
use std::hash::Hash;

use crate::directives::CssValue;
use crate::sizing::{Axis, SizeUnit};

/// Handle of a resize observation registered with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// Handle of a transition-end hook registered with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u64);

/// Computed state of one rendered box, read during measurement.
///
/// `width` and `max_width` are computed-style strings (`"40px"`, `"100%"`,
/// `"none"`); only pixel values are trusted, see [`parse_px`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedBox {
    /// Laid-out border-box width in pixels.
    pub rendered_width: f64,
    /// Computed `width`.
    pub width: Option<String>,
    /// Computed `max-width`.
    pub max_width: Option<String>,
    /// Computed `margin-left` in pixels.
    pub margin_left: f64,
    /// Computed `margin-right` in pixels.
    pub margin_right: f64,
    /// Declared width unit of the node the box renders.
    pub width_unit: Option<SizeUnit>,
    /// Whether the box renders an element.
    pub is_element: bool,
    /// Flow axis of the box's children.
    pub flow_axis: Axis,
    /// Gap between the box's children in pixels.
    pub gap: f64,
}

/// The inline width bounds of a box: the only state the sizer writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxBounds {
    /// Inline `width`, `None` when unset.
    pub width: Option<CssValue>,
    /// Inline `max-width`, `None` when unset.
    pub max_width: Option<CssValue>,
}

impl BoxBounds {
    /// Both bounds at `100%`: the expanded state of a fit-chain box.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            width: Some(CssValue::Percent(100.0)),
            max_width: Some(CssValue::Percent(100.0)),
        }
    }
}

/// A rendered tree the intrinsic sizer can measure and adjust.
pub trait MeasurableSurface {
    /// Identifies one rendered box.
    type Handle: Copy + Eq + Hash + Debug;

    /// Whether the box is still part of the rendered tree.
    fn is_attached(&self, handle: Self::Handle) -> bool;

    /// Parent box, if any.
    fn parent(&self, handle: Self::Handle) -> Option<Self::Handle>;

    /// Child boxes in flow order.
    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;

    /// Computed state of the box; `None` when the box is unknown.
    fn computed_box(&self, handle: Self::Handle) -> Option<ComputedBox>;

    /// Current inline bounds.
    fn bounds(&self, handle: Self::Handle) -> BoxBounds;

    /// Bounds from the box's resolved directives, before any runtime
    /// override. Writing them back clears every override.
    fn declared_bounds(&self, handle: Self::Handle) -> BoxBounds;

    /// Replace the inline bounds. Layout is expected to be current on the
    /// next [`MeasurableSurface::computed_box`] call.
    fn set_bounds(&mut self, handle: Self::Handle, bounds: BoxBounds);

    /// Start observing size changes of the box.
    fn observe_resize(&mut self, handle: Self::Handle) -> ObserverId;

    /// Stop a resize observation.
    fn unobserve(&mut self, id: ObserverId);

    /// Register a hook fired when a transition on the box ends.
    fn add_transition_end_hook(&mut self, handle: Self::Handle) -> HookId;

    /// Remove a transition-end hook.
    fn remove_transition_end_hook(&mut self, id: HookId);
}

/// Parse a computed pixel length (`"40px"`, `"40"`).
///
/// Keywords, percentages, `calc()` and non-finite numbers yield `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("40px"), Some(40.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("100%"), None);
        assert_eq!(parse_px("none"), None);
        assert_eq!(parse_px("calc(100% - 10px)"), None);
        assert_eq!(parse_px("NaNpx"), None);
        assert_eq!(parse_px("infpx"), None);
    }
}
