//! Sizing vocabulary.
//!
//! Every axis of every node is sized in exactly one of four modes:
//!
//! | mode      | meaning                                                   |
//! |-----------|-----------------------------------------------------------|
//! | `px`      | fixed magnitude; never grows past it                      |
//! | `%`       | fraction of the parent's (determinate) dimension          |
//! | `fill`    | consume distributable space along the parent's flow axis  |
//! | `fit`     | exactly as large as the content requires                  |
//!
//! `fit` and `fill` carry no magnitude. [`Sizing`] encodes that in the type.

use strum_macros::{Display, EnumString};

use crate::directives::Property;

/// Placeholder extent (px) for boxes that would otherwise collapse: empty
/// `fit`/`fill` containers and empty roots.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;

/// Declared unit of one axis, as written in a style record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SizeUnit {
    /// Fixed pixel magnitude.
    #[strum(to_string = "px", serialize = "pixel")]
    Px,
    /// Percentage of the parent dimension.
    #[strum(to_string = "%", serialize = "percent")]
    Percent,
    /// Intrinsic content size.
    #[strum(serialize = "fit")]
    Fit,
    /// Available space along the parent's flow axis.
    #[strum(serialize = "fill")]
    Fill,
}

/// Resolved sizing mode of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Fixed magnitude in pixels.
    Pixel(f64),
    /// Percentage of the parent dimension.
    Percent(f64),
    /// Intrinsic content size.
    Fit,
    /// Available space.
    Fill,
}

impl Sizing {
    /// The unit this sizing was declared with.
    #[must_use]
    pub const fn unit(self) -> SizeUnit {
        match self {
            Self::Pixel(_) => SizeUnit::Px,
            Self::Percent(_) => SizeUnit::Percent,
            Self::Fit => SizeUnit::Fit,
            Self::Fill => SizeUnit::Fill,
        }
    }

    /// Combine a unit with its magnitude field.
    ///
    /// `px` and `%` need a finite, non-negative magnitude; `fit` and `fill`
    /// ignore it.
    #[must_use]
    pub fn from_parts(unit: SizeUnit, magnitude: Option<f64>) -> Option<Self> {
        let magnitude = magnitude.filter(|m| m.is_finite() && *m >= 0.0);
        match unit {
            SizeUnit::Px => magnitude.map(Self::Pixel),
            SizeUnit::Percent => magnitude.map(Self::Percent),
            SizeUnit::Fit => Some(Self::Fit),
            SizeUnit::Fill => Some(Self::Fill),
        }
    }
}

/// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
///
/// The direction along which a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Axis {
    /// Children side by side; the main axis is horizontal.
    Row,
    /// Children stacked; the main axis is vertical. Forms stack by default.
    #[default]
    Column,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }

    /// The box dimension that runs along this axis.
    #[must_use]
    pub const fn main_dimension(self) -> Dimension {
        match self {
            Self::Row => Dimension::Width,
            Self::Column => Dimension::Height,
        }
    }
}

/// One of the two box dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl Dimension {
    /// Both dimensions, width first.
    pub const ALL: [Self; 2] = [Self::Width, Self::Height];

    /// The flow axis along which this dimension is the main size.
    #[must_use]
    pub const fn flow_axis(self) -> Axis {
        match self {
            Self::Width => Axis::Row,
            Self::Height => Axis::Column,
        }
    }

    /// Preferred-size property.
    #[must_use]
    pub const fn size_property(self) -> Property {
        match self {
            Self::Width => Property::Width,
            Self::Height => Property::Height,
        }
    }

    /// Lower-bound property.
    #[must_use]
    pub const fn min_property(self) -> Property {
        match self {
            Self::Width => Property::MinWidth,
            Self::Height => Property::MinHeight,
        }
    }

    /// Upper-bound property.
    #[must_use]
    pub const fn max_property(self) -> Property {
        match self {
            Self::Width => Property::MaxWidth,
            Self::Height => Property::MaxHeight,
        }
    }

    /// Lowercase name, as used in style field names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Which of the two parallel style field sets is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Viewport {
    /// Base fields only.
    #[default]
    Desktop,
    /// `mobile_` fields override base fields when present.
    Mobile,
}

/// Who is looking at the rendered form.
///
/// The authoring surface keeps hidden nodes on screen (dimmed) so they can
/// still be selected; the published form removes them from flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RenderMode {
    /// Form editor.
    Authoring,
    /// End-user rendering.
    #[default]
    Published,
}

/// One child's contribution to a `fit` parent's aggregate extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildExtent {
    /// The child's extent along the aggregated dimension, if known.
    pub size: Option<f64>,
    /// Whether the child fills that dimension.
    pub fill: bool,
}

impl ChildExtent {
    /// A child of known, intrinsic extent.
    #[must_use]
    pub const fn known(size: f64) -> Self {
        Self {
            size: Some(size),
            fill: false,
        }
    }

    /// A child of unknown extent.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            size: None,
            fill: false,
        }
    }

    /// A child that fills the aggregated dimension, with its current extent
    /// if one has been measured.
    #[must_use]
    pub const fn fill(size: Option<f64>) -> Self {
        Self { size, fill: true }
    }
}

/// Aggregate children extents along `dimension` for a container flowing
/// along `flow`.
///
/// - When `dimension` is the flow's main dimension (row flow for width),
///   extents are summed and `gap × (n − 1)` is added.
/// - Otherwise the largest extent wins, and children that `fill` the
///   dimension are skipped: a fill child's extent is derived from the parent
///   being measured, so counting it would feed the parent's size back into
///   itself.
///
/// Returns `None` when the aggregate cannot be known (no children, an
/// unknown extent, or a non-finite result); callers then fall back to
/// intrinsic sizing.
#[must_use]
pub fn aggregate_extents(
    flow: Axis,
    dimension: Dimension,
    gap: f64,
    children: &[ChildExtent],
) -> Option<f64> {
    if children.is_empty() {
        return None;
    }

    let total = if flow.main_dimension() == dimension {
        let mut sum = 0.0;
        for child in children {
            sum += child.size?;
        }
        #[allow(clippy::cast_precision_loss)]
        let gaps = gap.max(0.0) * (children.len() - 1) as f64;
        sum + gaps
    } else {
        let mut max: Option<f64> = None;
        for child in children.iter().filter(|c| !c.fill) {
            let size = child.size?;
            max = Some(max.map_or(size, |m: f64| m.max(size)));
        }
        max?
    };

    total.is_finite().then_some(total)
}
