//! Property tests for children aggregation.

use formbox_layout::{Axis, ChildExtent, Dimension, aggregate_extents};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn known(sizes: &[u16]) -> Vec<ChildExtent> {
    sizes.iter().map(|s| ChildExtent::known(f64::from(*s))).collect()
}

#[quickcheck]
fn row_aggregation_is_order_independent(sizes: Vec<u16>, gap: u8) -> TestResult {
    if sizes.is_empty() {
        return TestResult::discard();
    }
    let mut reversed = sizes.clone();
    reversed.reverse();
    let mut rotated = sizes.clone();
    rotated.rotate_left(1);

    let gap = f64::from(gap);
    let forward = aggregate_extents(Axis::Row, Dimension::Width, gap, &known(&sizes));
    TestResult::from_bool(
        forward == aggregate_extents(Axis::Row, Dimension::Width, gap, &known(&reversed))
            && forward == aggregate_extents(Axis::Row, Dimension::Width, gap, &known(&rotated)),
    )
}

#[quickcheck]
fn removing_a_child_never_grows_the_row(sizes: Vec<u16>, gap: u8, index: usize) -> TestResult {
    if sizes.len() < 2 {
        return TestResult::discard();
    }
    let gap = f64::from(gap);
    let before = aggregate_extents(Axis::Row, Dimension::Width, gap, &known(&sizes));

    let mut fewer = sizes;
    let _ = fewer.remove(index % fewer.len());
    let after = aggregate_extents(Axis::Row, Dimension::Width, gap, &known(&fewer));

    match (before, after) {
        (Some(before), Some(after)) => TestResult::from_bool(after <= before),
        _ => TestResult::failed(),
    }
}

#[quickcheck]
fn column_width_is_the_widest_non_fill_child(sizes: Vec<u16>, fill_at: usize) -> TestResult {
    if sizes.is_empty() {
        return TestResult::discard();
    }
    let mut extents = known(&sizes);
    extents.insert(fill_at % (extents.len() + 1), ChildExtent::fill(Some(f64::from(u16::MAX) + 1.0)));

    let widest = sizes.iter().copied().max().map(f64::from);
    TestResult::from_bool(
        aggregate_extents(Axis::Column, Dimension::Width, 12.0, &extents) == widest,
    )
}

#[test]
fn test_column_skips_fill() {
    let children = [
        ChildExtent::known(50.0),
        ChildExtent::fill(None),
        ChildExtent::known(80.0),
    ];
    assert_eq!(
        aggregate_extents(Axis::Column, Dimension::Width, 0.0, &children),
        Some(80.0)
    );
}

#[test]
fn test_row_sums_with_gaps() {
    assert_eq!(
        aggregate_extents(Axis::Row, Dimension::Width, 10.0, &known(&[40, 60])),
        Some(110.0)
    );
}

#[test]
fn test_height_mirrors_width() {
    // A column stacks heights and compares widths.
    assert_eq!(
        aggregate_extents(Axis::Column, Dimension::Height, 5.0, &known(&[20, 30, 10])),
        Some(70.0)
    );
    assert_eq!(
        aggregate_extents(Axis::Row, Dimension::Height, 5.0, &known(&[20, 30, 10])),
        Some(30.0)
    );
}

#[test]
fn test_unknown_or_empty_is_none() {
    assert_eq!(aggregate_extents(Axis::Row, Dimension::Width, 0.0, &[]), None);
    assert_eq!(
        aggregate_extents(
            Axis::Row,
            Dimension::Width,
            0.0,
            &[ChildExtent::known(10.0), ChildExtent::unknown()]
        ),
        None
    );
    assert_eq!(
        aggregate_extents(Axis::Row, Dimension::Width, 0.0, &[ChildExtent::known(f64::INFINITY)]),
        None
    );
}
