//! Node/style projection.
//!
//! Builds the immutable [`ResolutionContext`] the resolver consumes: the
//! node's style merged for one viewport, what the node is, what its parent
//! looks like, and (for containers) how large its children add up to be.
//! Projection is pure; projecting the same tree twice yields equal contexts.

use formbox_tree::{FormTree, NodeId, StyleFields};

use super::color::ColorValue;
use super::fields::FieldReader;
use super::shadow::BoxShadow;
use super::values::{Align, BorderStyle, Overflow, Visibility};
use crate::sizing::{
    Axis, ChildExtent, DEFAULT_MIN_SIZE, Dimension, RenderMode, Sizing, Viewport,
    aggregate_extents,
};

/// Four box edges in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Edges {
    fn read(reader: &FieldReader<'_>, prefix: &str) -> Self {
        let side = |name: &str| reader.number_or_zero(&format!("{prefix}_{name}"));
        Self {
            top: side("top"),
            right: side("right"),
            bottom: side("bottom"),
            left: side("left"),
        }
    }

    /// Sum of the two edges perpendicular to `dimension` (left + right for
    /// width).
    #[must_use]
    pub fn along(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Width => self.left + self.right,
            Dimension::Height => self.top + self.bottom,
        }
    }

    /// Whether every edge is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Cell decoration fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoration {
    /// Border thickness in pixels.
    pub border_width: Option<f64>,
    /// Border line style.
    pub border_style: Option<BorderStyle>,
    /// Border color.
    pub border_color: Option<ColorValue>,
    /// Corner radius in pixels.
    pub corner_radius: Option<f64>,
    /// Drop shadow, when any shadow geometry is set.
    pub shadow: Option<BoxShadow>,
    /// Background fill.
    pub background_color: Option<ColorValue>,
    /// Background while hovered.
    pub hover_background_color: Option<ColorValue>,
    /// Border color while hovered.
    pub hover_border_color: Option<ColorValue>,
    /// Background while selected.
    pub selected_background_color: Option<ColorValue>,
    /// Border color while selected.
    pub selected_border_color: Option<ColorValue>,
}

impl Decoration {
    fn read(reader: &FieldReader<'_>) -> Self {
        let shadow_fields = [
            "shadow_offset_x",
            "shadow_offset_y",
            "shadow_blur",
            "shadow_spread",
        ];
        let shadow = shadow_fields
            .iter()
            .any(|name| reader.raw(name).is_some())
            .then(|| BoxShadow {
                offset_x: reader.number_or_zero("shadow_offset_x"),
                offset_y: reader.number_or_zero("shadow_offset_y"),
                blur_radius: reader.number_or_zero("shadow_blur"),
                spread_radius: reader.number_or_zero("shadow_spread"),
                color: reader
                    .color("shadow_color")
                    .unwrap_or(BoxShadow::DEFAULT_COLOR),
            })
            .filter(BoxShadow::is_visible);

        Self {
            border_width: reader.number("border_width"),
            border_style: reader.keyword("border_style"),
            border_color: reader.color("border_color"),
            corner_radius: reader.number("corner_radius"),
            shadow,
            background_color: reader.color("background_color"),
            hover_background_color: reader.color("hover_background_color"),
            hover_border_color: reader.color("hover_border_color"),
            selected_background_color: reader.color("selected_background_color"),
            selected_border_color: reader.color("selected_border_color"),
        }
    }
}

/// A node's style merged for one viewport and typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    /// Width sizing; `None` when unset or malformed.
    pub width: Option<Sizing>,
    /// Height sizing; `None` when unset or malformed.
    pub height: Option<Sizing>,
    /// Declared flow axis for children.
    pub axis: Option<Axis>,
    /// Horizontal alignment of children.
    pub horizontal_align: Option<Align>,
    /// Vertical alignment of children.
    pub vertical_align: Option<Align>,
    /// Horizontal self-alignment within the parent.
    pub layout: Option<Align>,
    /// Vertical self-alignment within the parent.
    pub vertical_layout: Option<Align>,
    /// `padding_*` fields.
    pub padding: Edges,
    /// `external_padding_*` fields.
    pub external_padding: Edges,
    /// Space between children.
    pub gap: f64,
    /// Content clipping.
    pub overflow: Option<Overflow>,
    /// Visibility.
    pub visibility: Visibility,
    /// Cell decoration.
    pub decoration: Decoration,
}

impl NodeStyle {
    /// Project a raw style record for one viewport.
    #[must_use]
    pub fn project(fields: &StyleFields, viewport: Viewport) -> Self {
        let reader = FieldReader::new(fields, viewport);
        Self {
            width: reader.sizing(Dimension::Width),
            height: reader.sizing(Dimension::Height),
            axis: reader.keyword("axis"),
            horizontal_align: reader.keyword("horizontal_align"),
            vertical_align: reader.keyword("vertical_align"),
            layout: reader.keyword("layout"),
            vertical_layout: reader.keyword("vertical_layout"),
            padding: Edges::read(&reader, "padding"),
            external_padding: Edges::read(&reader, "external_padding"),
            gap: reader.number_or_zero("gap").max(0.0),
            overflow: reader.keyword("overflow"),
            visibility: reader.keyword("visibility").unwrap_or_default(),
            decoration: Decoration::read(&reader),
        }
    }

    /// Sizing of one dimension.
    #[must_use]
    pub const fn sizing(&self, dimension: Dimension) -> Option<Sizing> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    /// Flow axis for children; `column` when undeclared.
    #[must_use]
    pub fn flow_axis(&self) -> Axis {
        self.axis.unwrap_or_default()
    }

    /// Children alignment along `dimension`: horizontal for width.
    #[must_use]
    pub const fn align_along(&self, dimension: Dimension) -> Option<Align> {
        match dimension {
            Dimension::Width => self.horizontal_align,
            Dimension::Height => self.vertical_align,
        }
    }

    /// Self-alignment along `dimension`: `layout` for width,
    /// `vertical_layout` for height.
    #[must_use]
    pub const fn self_align_along(&self, dimension: Dimension) -> Option<Align> {
        match dimension {
            Dimension::Width => self.layout,
            Dimension::Height => self.vertical_layout,
        }
    }
}

/// What a node needs to know about its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFacts {
    /// Parent width sizing.
    pub width: Option<Sizing>,
    /// Parent height sizing.
    pub height: Option<Sizing>,
    /// Parent flow axis, `column` when undeclared.
    pub axis: Axis,
    /// Parent's vertical alignment of children.
    pub vertical_align: Option<Align>,
    /// Parent's horizontal alignment of children.
    pub horizontal_align: Option<Align>,
    /// Whether the parent is the root.
    pub is_root: bool,
}

impl ParentFacts {
    /// Parent sizing of one dimension.
    #[must_use]
    pub const fn sizing(&self, dimension: Dimension) -> Option<Sizing> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    /// Parent children alignment along `dimension`.
    #[must_use]
    pub const fn align_along(&self, dimension: Dimension) -> Option<Align> {
        match dimension {
            Dimension::Width => self.horizontal_align,
            Dimension::Height => self.vertical_align,
        }
    }
}

/// Everything the resolver reads for one node. Built fresh per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionContext {
    /// Merged, typed style.
    pub style: NodeStyle,
    /// Whether the node is a leaf element.
    pub is_element: bool,
    /// Number of attached children.
    pub child_count: usize,
    /// Whether interactive actions are attached.
    pub has_actions: bool,
    /// Parent facts; `None` at the root.
    pub parent: Option<ParentFacts>,
    /// Aggregated declared width of the children, when known.
    pub children_width: Option<f64>,
    /// Aggregated declared height of the children, when known.
    pub children_height: Option<f64>,
    /// Active viewport variant.
    pub viewport: Viewport,
    /// Who is looking.
    pub mode: RenderMode,
}

impl ResolutionContext {
    /// A context for a detached node with the given style, as a starting
    /// point for hosts that do not keep a [`FormTree`].
    #[must_use]
    pub fn standalone(style: NodeStyle, is_element: bool) -> Self {
        Self {
            style,
            is_element,
            child_count: 0,
            has_actions: false,
            parent: None,
            children_width: None,
            children_height: None,
            viewport: Viewport::default(),
            mode: RenderMode::default(),
        }
    }

    /// Whether this node is the root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Flow axis of the parent; `column` at the root.
    #[must_use]
    pub fn parent_axis(&self) -> Axis {
        self.parent.map_or(Axis::Column, |p| p.axis)
    }

    /// Whether `dimension` runs along the parent's flow axis.
    #[must_use]
    pub fn is_main_axis(&self, dimension: Dimension) -> bool {
        self.parent_axis().main_dimension() == dimension
    }

    /// The node's outer spacing: padding for elements, external padding for
    /// containers.
    #[must_use]
    pub const fn margin(&self) -> Edges {
        if self.is_element {
            self.style.padding
        } else {
            self.style.external_padding
        }
    }

    /// Aggregated children extent along `dimension`.
    #[must_use]
    pub const fn children_extent(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Width => self.children_width,
            Dimension::Height => self.children_height,
        }
    }
}

/// Project the context of one node.
///
/// Returns `None` for an id outside the arena.
#[must_use]
pub fn project(
    tree: &FormTree,
    id: NodeId,
    viewport: Viewport,
    mode: RenderMode,
) -> Option<ResolutionContext> {
    let node = tree.get(id)?;
    let style = NodeStyle::project(&node.style, viewport);

    let parent = node.parent.and_then(|pid| {
        let parent_node = tree.get(pid)?;
        let parent_style = NodeStyle::project(&parent_node.style, viewport);
        Some(ParentFacts {
            width: parent_style.width,
            height: parent_style.height,
            axis: parent_style.flow_axis(),
            vertical_align: parent_style.vertical_align,
            horizontal_align: parent_style.horizontal_align,
            is_root: tree.is_root(pid),
        })
    });

    let (children_width, children_height) = if node.is_element() {
        (None, None)
    } else {
        (
            declared_extent(tree, id, viewport, Dimension::Width),
            declared_extent(tree, id, viewport, Dimension::Height),
        )
    };

    Some(ResolutionContext {
        style,
        is_element: node.is_element(),
        child_count: node.children.len(),
        has_actions: node.has_actions(),
        parent,
        children_width,
        children_height,
        viewport,
        mode,
    })
}

/// Aggregate the declared extents of a container's children along
/// `dimension`, following [`aggregate_extents`].
///
/// A child's extent is known when it is pixel-sized, when it is a fit
/// container whose own children aggregate (recursively), or when it is an
/// empty fit container ([`DEFAULT_MIN_SIZE`]). Anything else is unknown and
/// makes the aggregate unknown, except fill children on the cross axis,
/// which are skipped.
#[must_use]
pub fn declared_extent(
    tree: &FormTree,
    id: NodeId,
    viewport: Viewport,
    dimension: Dimension,
) -> Option<f64> {
    let node = tree.get(id)?;
    if node.is_element() {
        return None;
    }
    let style = NodeStyle::project(&node.style, viewport);

    let extents: Vec<ChildExtent> = node
        .children
        .iter()
        .filter_map(|&child| tree.get(child).map(|n| (child, n)))
        .map(|(child, child_node)| {
            let child_style = NodeStyle::project(&child_node.style, viewport);
            let extent = match child_style.sizing(dimension) {
                Some(Sizing::Pixel(v)) => ChildExtent::known(v),
                Some(Sizing::Fill) => ChildExtent::fill(None),
                Some(Sizing::Fit) if !child_node.is_element() => {
                    if child_node.children.is_empty() {
                        ChildExtent::known(DEFAULT_MIN_SIZE)
                    } else {
                        declared_extent(tree, child, viewport, dimension)
                            .map_or_else(ChildExtent::unknown, ChildExtent::known)
                    }
                }
                _ => ChildExtent::unknown(),
            };
            #[cfg(feature = "layout-trace")]
            tracing::trace!(
                child = %child_node.key,
                dimension = dimension.name(),
                size = ?extent.size,
                fill = extent.fill,
                "declared child extent"
            );
            extent
        })
        .collect();

    aggregate_extents(style.flow_axis(), dimension, style.gap, &extents)
}
