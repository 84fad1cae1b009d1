//! Tests for the intrinsic sizer on the headless surface.

use formbox_layout::intrinsic::{
    BoxBounds, IntrinsicSizer, MeasurableSurface, MemorySurface, SizingTarget, TransientBounds,
    Trigger, attach_tree, fit_chain, measure, placeholder_bounds,
};
use formbox_layout::{Axis, CssValue, RenderMode, Viewport};
use formbox_tree::{FormTree, NodeId};
use serde_json::{Value, json};

fn surface_for(definition: &Value) -> (FormTree, MemorySurface) {
    let tree = FormTree::from_json(&definition.to_string()).unwrap();
    let surface = MemorySurface::from_tree(&tree, Viewport::Desktop, RenderMode::Published);
    (tree, surface)
}

fn max_width(surface: &MemorySurface, id: NodeId) -> Option<CssValue> {
    surface.bounds(id).max_width
}

/// root -> row fit container (gap 10) -> two fit elements of 40 and 60 px.
fn toolbar() -> Value {
    json!({
        "key": "root",
        "style": { "width_unit": "fill" },
        "children": [{
            "key": "bar",
            "style": { "width_unit": "fit", "axis": "row", "gap": 10 },
            "children": [
                { "key": "a", "is_element": true,
                  "style": { "width_unit": "fit", "intrinsic_width": 40 } },
                { "key": "b", "is_element": true,
                  "style": { "width_unit": "fit", "intrinsic_width": 60 } }
            ]
        }]
    })
}

#[test]
fn test_row_fit_container_measures_children() {
    let (tree, mut surface) = surface_for(&toolbar());
    let bar = tree.find("bar").unwrap();

    // Declarations alone cannot size it.
    assert_eq!(
        surface.bounds(bar).width,
        Some(CssValue::Keyword(formbox_layout::Keyword::FitContent))
    );

    let sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);
    assert_eq!(sizer.last_total(), Some(110.0));
    assert_eq!(max_width(&surface, bar), Some(CssValue::Px(110.0)));
    assert_eq!(surface.bounds(bar).width, Some(CssValue::Percent(100.0)));
}

#[test]
fn test_pixel_children_measure_the_same() {
    let (tree, mut surface) = surface_for(&json!({
        "key": "root",
        "children": [{
            "key": "bar",
            "style": { "width_unit": "fit", "axis": "row", "gap": 10 },
            "children": [
                { "key": "a", "is_element": true, "style": { "width_unit": "px", "width": 40 } },
                { "key": "b", "is_element": true, "style": { "width_unit": "px", "width": 60 } }
            ]
        }]
    }));
    let bar = tree.find("bar").unwrap();
    assert_eq!(measure(&surface, bar), Some(110.0));

    let sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);
    assert_eq!(sizer.last_total(), Some(110.0));
    assert_eq!(max_width(&surface, bar), Some(CssValue::Px(110.0)));
}

#[test]
fn test_fit_element_margins_count() {
    let (tree, mut surface) = surface_for(&json!({
        "key": "root",
        "children": [{
            "key": "bar",
            "style": { "width_unit": "fit", "axis": "row" },
            "children": [
                { "key": "a", "is_element": true,
                  "style": { "width_unit": "fit", "intrinsic_width": 40,
                             "padding_left": 5, "padding_right": 5 } }
            ]
        }]
    }));
    let bar = tree.find("bar").unwrap();
    let sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);
    assert_eq!(sizer.last_total(), Some(50.0));
}

#[test]
fn test_column_measurement_skips_fill_children() {
    let (tree, surface) = surface_for(&json!({
        "key": "root",
        "children": [{
            "key": "stack",
            "style": { "width_unit": "fit", "axis": "column" },
            "children": [
                { "key": "a", "is_element": true, "style": { "width_unit": "px", "width": 50 } },
                { "key": "b", "is_element": true, "style": { "width_unit": "fill" } },
                { "key": "c", "is_element": true, "style": { "width_unit": "px", "width": 80 } }
            ]
        }]
    }));
    let stack = tree.find("stack").unwrap();
    assert_eq!(measure(&surface, stack), Some(80.0));
}

#[test]
fn test_running_twice_is_idempotent() {
    let (tree, mut surface) = surface_for(&toolbar());
    let bar = tree.find("bar").unwrap();
    let mut sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);
    let first_total = sizer.last_total();
    let first_bounds = surface.bounds(bar);

    let second_total = sizer.run(&mut surface);
    assert_eq!(second_total, first_total);
    assert_eq!(surface.bounds(bar), first_bounds);
}

/// root -> outer fit column -> inner fit row -> elements.
fn nested_chain() -> Value {
    json!({
        "key": "root",
        "style": { "width_unit": "fill" },
        "children": [{
            "key": "outer",
            "style": { "width_unit": "fit", "axis": "column" },
            "children": [{
                "key": "inner",
                "style": { "width_unit": "fit", "axis": "row", "gap": 10 },
                "children": [
                    { "key": "a", "is_element": true,
                      "style": { "width_unit": "fit", "intrinsic_width": 40 } },
                    { "key": "b", "is_element": true,
                      "style": { "width_unit": "fit", "intrinsic_width": 60 } }
                ]
            }]
        }]
    })
}

#[test]
fn test_fit_chain_is_closest_first_and_stops_at_non_fit() {
    let (tree, surface) = surface_for(&nested_chain());
    let a = tree.find("a").unwrap();
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();

    assert_eq!(fit_chain(&surface, a), vec![inner, outer]);
    assert_eq!(fit_chain(&surface, inner), vec![outer]);
    assert!(fit_chain(&surface, outer).is_empty());
}

#[test]
fn test_chain_is_expanded_then_restored() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();

    let before = surface.bounds(outer);
    let transient = TransientBounds::expand(&mut surface, &[outer]);
    assert_eq!(transient.len(), 1);
    assert_eq!(surface.bounds(outer), BoxBounds::unconstrained());
    assert_eq!(measure(&surface, inner), Some(110.0));
    transient.collapse(&mut surface);
    assert_eq!(surface.bounds(outer), before);
}

#[test]
fn test_nested_chain_propagates_to_ancestors() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();

    let sizer = IntrinsicSizer::attach(&mut surface, inner, SizingTarget::FitContainer);
    assert_eq!(sizer.last_total(), Some(110.0));
    assert_eq!(max_width(&surface, inner), Some(CssValue::Px(110.0)));
    // The outer box was re-measured after collapse.
    assert_eq!(max_width(&surface, outer), Some(CssValue::Px(110.0)));

    // During the cycle the outer box was expanded and then put back.
    let outer_writes: Vec<&BoxBounds> = surface
        .writes()
        .iter()
        .filter(|(id, _)| *id == outer)
        .map(|(_, bounds)| bounds)
        .collect();
    assert_eq!(outer_writes.first(), Some(&&BoxBounds::unconstrained()));
    assert_eq!(
        outer_writes.last().and_then(|b| b.max_width.clone()),
        Some(CssValue::Px(110.0))
    );
}

#[test]
fn test_fit_element_only_notifies_chain() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let a = tree.find("a").unwrap();
    let inner = tree.find("inner").unwrap();

    let sizer = IntrinsicSizer::attach(&mut surface, a, SizingTarget::FitElement);
    assert_eq!(sizer.last_total(), None);
    assert_eq!(max_width(&surface, inner), Some(CssValue::Px(110.0)));
    assert!(surface.writes().iter().all(|(id, _)| *id != a));
}

#[test]
fn test_triggers_pick_up_changes() {
    let (tree, mut surface) = surface_for(&toolbar());
    let bar = tree.find("bar").unwrap();
    let a = tree.find("a").unwrap();
    let mut sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);

    // Wider than the current 110px clamp: the target is expanded before
    // measuring, so the clamp does not cap its children.
    surface.set_natural_width(a, 200.0);
    assert_eq!(sizer.on_trigger(&mut surface, Trigger::FontsReady), Some(270.0));

    let _ = surface.push_fit_element(bar, "c", 30.0).unwrap();
    assert_eq!(
        sizer.on_trigger(&mut surface, Trigger::ChildCountChanged),
        Some(310.0)
    );
    assert_eq!(max_width(&surface, bar), Some(CssValue::Px(310.0)));
}

#[test]
fn test_trigger_for_detached_box_is_noop() {
    let (tree, mut surface) = surface_for(&toolbar());
    let bar = tree.find("bar").unwrap();
    let mut sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);

    surface.detach_box(bar);
    surface.clear_writes();
    assert_eq!(sizer.on_trigger(&mut surface, Trigger::Resize), None);
    assert_eq!(sizer.on_trigger(&mut surface, Trigger::TransitionEnd), None);
    assert!(surface.writes().is_empty());
    assert!(!surface.is_attached(tree.find("a").unwrap()));
}

#[test]
fn test_detach_releases_everything() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();
    let inner_before = surface.bounds(inner);
    let outer_before = surface.bounds(outer);

    let sizer = IntrinsicSizer::attach(&mut surface, inner, SizingTarget::FitContainer);
    assert_eq!(surface.observer_count(), 1);
    assert_eq!(surface.hook_count(), 1);

    sizer.detach(&mut surface);
    assert_eq!(surface.observer_count(), 0);
    assert_eq!(surface.hook_count(), 0);
    assert_eq!(surface.bounds(inner), inner_before);
    assert_eq!(surface.bounds(outer), outer_before);
}

#[test]
fn test_empty_container_never_measures() {
    let (tree, mut surface) = surface_for(&json!({
        "key": "root",
        "children": [{ "key": "empty", "style": { "width_unit": "fit" } }]
    }));
    let empty = tree.find("empty").unwrap();
    surface.clear_writes();

    let sizer = IntrinsicSizer::attach(&mut surface, empty, SizingTarget::FitContainer);
    assert_eq!(sizer.last_total(), None);
    assert!(surface.writes().is_empty());
    assert_eq!(max_width(&surface, empty), Some(CssValue::Px(50.0)));
}

#[test]
fn test_attach_tree_sizes_innermost_first() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let sizers = attach_tree(&tree, &mut surface, Viewport::Desktop, RenderMode::Published);

    // a, b (fit elements), inner, outer (fit containers)
    assert_eq!(sizers.len(), 4);
    assert_eq!(sizers.last().map(IntrinsicSizer::handle), tree.find("outer"));
    assert_eq!(
        max_width(&surface, tree.find("outer").unwrap()),
        Some(CssValue::Px(110.0))
    );

    for sizer in sizers {
        sizer.detach(&mut surface);
    }
    assert_eq!(surface.observer_count(), 0);
}

#[test]
fn test_detaching_every_sizer_restores_declared_bounds() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();
    let inner_before = surface.bounds(inner);
    let outer_before = surface.bounds(outer);

    let sizers = attach_tree(&tree, &mut surface, Viewport::Desktop, RenderMode::Published);
    assert_eq!(max_width(&surface, inner), Some(CssValue::Px(110.0)));

    for sizer in sizers {
        sizer.detach(&mut surface);
    }
    assert_eq!(surface.bounds(inner), inner_before);
    assert_eq!(surface.bounds(outer), outer_before);
}

#[test]
fn test_detach_order_does_not_matter() {
    let (tree, mut surface) = surface_for(&nested_chain());
    let inner = tree.find("inner").unwrap();
    let outer = tree.find("outer").unwrap();
    let inner_before = surface.bounds(inner);
    let outer_before = surface.bounds(outer);

    let sizers = attach_tree(&tree, &mut surface, Viewport::Desktop, RenderMode::Published);
    for sizer in sizers.into_iter().rev() {
        sizer.detach(&mut surface);
    }
    assert_eq!(surface.bounds(inner), inner_before);
    assert_eq!(surface.bounds(outer), outer_before);
}

#[test]
fn test_emptied_container_returns_to_placeholder() {
    let (tree, mut surface) = surface_for(&json!({
        "key": "root",
        "children": [{
            "key": "bar",
            "style": { "width_unit": "fit", "axis": "row" },
            "children": [
                { "key": "a", "is_element": true,
                  "style": { "width_unit": "fit", "intrinsic_width": 300 } }
            ]
        }]
    }));
    let bar = tree.find("bar").unwrap();
    let a = tree.find("a").unwrap();
    let mut sizer = IntrinsicSizer::attach(&mut surface, bar, SizingTarget::FitContainer);
    assert_eq!(max_width(&surface, bar), Some(CssValue::Px(300.0)));

    surface.detach_box(a);
    assert_eq!(sizer.on_trigger(&mut surface, Trigger::ChildCountChanged), None);

    // The root stacks its children, so width is the cross axis.
    let placeholder = placeholder_bounds(Some(Axis::Column));
    assert_eq!(placeholder.max_width, Some(CssValue::Px(50.0)));
    assert_eq!(placeholder.width, Some(CssValue::Px(50.0)));
    assert_eq!(surface.bounds(bar), placeholder);

    sizer.detach(&mut surface);
    assert_eq!(surface.bounds(bar), surface.declared_bounds(bar));
}

#[test]
fn test_placeholder_under_row_parent_leaves_width_to_flex_basis() {
    let placeholder = placeholder_bounds(Some(Axis::Row));
    assert_eq!(placeholder.max_width, Some(CssValue::Px(50.0)));
    assert_eq!(placeholder.width, None);
}
