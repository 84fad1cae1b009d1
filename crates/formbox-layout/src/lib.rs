//! Adaptive container layout for formbox forms.
//!
//! # Scope
//!
//! This crate turns a declaratively sized form tree into concrete layout
//! directives for a flex-based renderer:
//!
//! - **Sizing vocabulary**: `px`, `%`, `fit`, `fill` per axis; flow axes;
//!   desktop/mobile viewport variants.
//!   - Children aggregation for `fit` parents
//!
//! - **Style projection**: per-node [`ResolutionContext`] built from the raw
//!   style record, the parent, and the children.
//!   - `mobile_` field overrides
//!   - Declared children extents (recursive through nested `fit` containers)
//!
//! - **Style resolution** ([CSS Flexible Box Layout Level 1](https://www.w3.org/TR/css-flexbox-1/))
//!   - `container`, `inner-container`, `cell`, `cell-hover`, `cell-active`
//!     directive maps
//!   - Root-only rules, visibility, cell decoration
//!
//! - **Intrinsic sizing**: expand/measure/collapse of `fit` boxes against a
//!   live [`MeasurableSurface`](intrinsic::MeasurableSurface), including
//!   nested fit chains.
//!
//! # Not In Scope
//!
//! - Computing layout: the directives are consumed by a real flex engine
//! - Global constraint solving: a node only looks at itself, its parent, and
//!   (for `fit`) its children

/// Node classification predicates.
pub mod classify;
/// Layout directives per [CSS Flexible Box Layout Level 1](https://www.w3.org/TR/css-flexbox-1/).
pub mod directives;
/// Runtime intrinsic sizing of `fit` boxes.
pub mod intrinsic;
/// Style resolution engine.
pub mod resolve;
/// Sizing modes, axes, viewports, aggregation.
pub mod sizing;
/// Style projection and typed style values.
pub mod style;

pub use directives::{CssValue, DirectiveMap, Keyword, Property, ResolvedLayout};
pub use resolve::{resolve, resolve_context, resolve_tree};
pub use sizing::{
    Axis, ChildExtent, DEFAULT_MIN_SIZE, Dimension, RenderMode, SizeUnit, Sizing, Viewport,
    aggregate_extents,
};
pub use style::{ParentFacts, ResolutionContext, project};
