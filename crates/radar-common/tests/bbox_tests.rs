//! Tests for BoundingBox operations.

use radar_common::bbox::BoundingBox;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-86.0, 8.0, -82.6, 11.3);
    assert_eq!(bbox.min_x, -86.0);
    assert_eq!(bbox.min_y, 8.0);
    assert_eq!(bbox.max_x, -82.6);
    assert_eq!(bbox.max_y, 11.3);
}

#[test]
fn test_from_extent_normalizes_swapped_bounds() {
    let bbox = BoundingBox::from_extent([-82.6, -86.0, 11.3, 8.0]);
    assert_eq!(bbox.min_x, -86.0);
    assert_eq!(bbox.max_x, -82.6);
    assert_eq!(bbox.min_y, 8.0);
    assert_eq!(bbox.max_y, 11.3);
}

#[test]
fn test_enclosing_skips_non_finite() {
    let points = vec![(1.0, 2.0), (f64::NAN, 5.0), (-3.0, 4.0), (2.0, f64::INFINITY)];
    let bbox = BoundingBox::enclosing(points).unwrap();
    assert_eq!(bbox, BoundingBox::new(-3.0, 2.0, 1.0, 4.0));
}

#[test]
fn test_enclosing_empty() {
    assert!(BoundingBox::enclosing(Vec::new()).is_none());
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_dimensions_and_center() {
    let bbox = BoundingBox::from_extent([-85.0, -83.2, 9.3, 10.8]);
    assert!((bbox.width() - 1.8).abs() < 1e-9);
    assert!((bbox.height() - 1.5).abs() < 1e-9);
    let (cx, cy) = bbox.center();
    assert!((cx - (-84.1)).abs() < 1e-9);
    assert!((cy - 10.05).abs() < 1e-9);
}

#[test]
fn test_regional_inside_national() {
    let national = BoundingBox::from_extent([-86.0, -82.6, 8.0, 11.3]);
    let regional = BoundingBox::from_extent([-85.0, -83.2, 9.3, 10.8]);
    assert!(national.intersects(&regional));
    assert!(national.contains_point(regional.min_x, regional.min_y));
    assert!(national.contains_point(regional.max_x, regional.max_y));
}

#[test]
fn test_disjoint_boxes() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(2.0, 2.0, 3.0, 3.0);
    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));
}

#[test]
fn test_contains_point_edges_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(!bbox.contains_point(10.1, 5.0));
}

// ============================================================================
// Serialization tests
// ============================================================================

#[test]
fn test_yaml_extent_roundtrip() {
    let bbox: BoundingBox = serde_yaml::from_str("[-86, -82.6, 8, 11.3]").unwrap();
    assert_eq!(bbox, BoundingBox::from_extent([-86.0, -82.6, 8.0, 11.3]));

    let yaml = serde_yaml::to_string(&bbox).unwrap();
    let back: BoundingBox = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, bbox);
}
