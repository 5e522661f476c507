//! End-to-end overlay scenarios (S1-S6 and the set-theoretic laws),
//! exercised through the public `overlay()` entry point only.

use planar_overlay::{overlay, Coordinate, Geometry, GeometryFactory, LineString, OverlayOp, Point, Polygon};

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
    Geometry::Polygon(Polygon::new(
        LineString(vec![c(x0, y0), c(x1, y0), c(x1, y1), c(x0, y1), c(x0, y0)]),
        Vec::new(),
    ))
}

fn factory() -> GeometryFactory {
    GeometryFactory::default()
}

fn polygon_area(g: &Geometry) -> f64 {
    match g {
        Geometry::Polygon(p) => p.exterior.signed_area().abs() - p.interiors.iter().map(|r| r.signed_area().abs()).sum::<f64>(),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| polygon_area(&Geometry::Polygon(p.clone()))).sum(),
        Geometry::GeometryCollection(gc) => gc.0.iter().map(polygon_area).sum(),
        _ => 0.0,
    }
}

#[test]
fn s1_adjacent_squares_union_merges_into_one_rectangle() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(1.0, 0.0, 2.0, 1.0);
    let result = overlay(&a, &b, OverlayOp::Union, &factory()).unwrap();
    assert!((polygon_area(&result) - 2.0).abs() < 1e-9);
}

#[test]
fn s1_adjacent_squares_intersection_is_the_shared_edge() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(1.0, 0.0, 2.0, 1.0);
    let result = overlay(&a, &b, OverlayOp::Intersection, &factory()).unwrap();
    match result {
        Geometry::LineString(ls) => {
            assert!(ls.0.contains(&c(1.0, 0.0)));
            assert!(ls.0.contains(&c(1.0, 1.0)));
        }
        Geometry::GeometryCollection(gc) if gc.0.is_empty() => panic!("expected a shared-edge line, got empty"),
        other => panic!("expected a LineString along x=1, got {:?}", other),
    }
}

#[test]
fn s1_adjacent_squares_difference_keeps_the_first_square() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(1.0, 0.0, 2.0, 1.0);
    let result = overlay(&a, &b, OverlayOp::Difference, &factory()).unwrap();
    assert!((polygon_area(&result) - 1.0).abs() < 1e-9);
}

#[test]
fn s1_adjacent_squares_sym_difference_is_both_squares() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(1.0, 0.0, 2.0, 1.0);
    let result = overlay(&a, &b, OverlayOp::SymDifference, &factory()).unwrap();
    assert!((polygon_area(&result) - 2.0).abs() < 1e-9);
}

#[test]
fn s2_concentric_squares_difference_produces_a_hole() {
    let big = square(0.0, 0.0, 10.0, 10.0);
    let small = square(2.0, 2.0, 8.0, 8.0);
    let result = overlay(&big, &small, OverlayOp::Difference, &factory()).unwrap();
    match result {
        Geometry::Polygon(p) => {
            assert_eq!(p.interiors.len(), 1);
            assert!((polygon_area(&Geometry::Polygon(p)) - (100.0 - 36.0)).abs() < 1e-9);
        }
        other => panic!("expected a single polygon with one hole, got {:?}", other),
    }
}

#[test]
fn s2_concentric_squares_intersection_is_the_small_square() {
    let big = square(0.0, 0.0, 10.0, 10.0);
    let small = square(2.0, 2.0, 8.0, 8.0);
    let result = overlay(&big, &small, OverlayOp::Intersection, &factory()).unwrap();
    assert!((polygon_area(&result) - 36.0).abs() < 1e-9);
}

#[test]
fn s2_concentric_squares_union_is_the_big_square() {
    let big = square(0.0, 0.0, 10.0, 10.0);
    let small = square(2.0, 2.0, 8.0, 8.0);
    let result = overlay(&big, &small, OverlayOp::Union, &factory()).unwrap();
    assert!((polygon_area(&result) - 100.0).abs() < 1e-9);
}

#[test]
fn s3_crossing_linestrings_intersect_at_their_midpoint() {
    let a = Geometry::LineString(LineString(vec![c(0.0, 0.0), c(10.0, 10.0)]));
    let b = Geometry::LineString(LineString(vec![c(0.0, 10.0), c(10.0, 0.0)]));
    let result = overlay(&a, &b, OverlayOp::Intersection, &factory()).unwrap();
    match result {
        Geometry::Point(p) => assert_eq!(p.0, c(5.0, 5.0)),
        other => panic!("expected Point(5,5), got {:?}", other),
    }
}

#[test]
fn s3_crossing_linestrings_union_splits_into_four_segments() {
    let a = Geometry::LineString(LineString(vec![c(0.0, 0.0), c(10.0, 10.0)]));
    let b = Geometry::LineString(LineString(vec![c(0.0, 10.0), c(10.0, 0.0)]));
    let result = overlay(&a, &b, OverlayOp::Union, &factory()).unwrap();
    let segment_count = match result {
        Geometry::MultiLineString(mls) => mls.0.len(),
        Geometry::LineString(_) => 1,
        other => panic!("expected a multi-linestring, got {:?}", other),
    };
    assert_eq!(segment_count, 4);
}

#[test]
fn s4_point_inside_polygon_intersection_is_the_point() {
    let point = Geometry::Point(Point(c(5.0, 5.0)));
    let poly = square(0.0, 0.0, 10.0, 10.0);
    let result = overlay(&point, &poly, OverlayOp::Intersection, &factory()).unwrap();
    match result {
        Geometry::Point(p) => assert_eq!(p.0, c(5.0, 5.0)),
        other => panic!("expected Point(5,5), got {:?}", other),
    }
}

#[test]
fn s4_point_inside_polygon_difference_is_empty() {
    let point = Geometry::Point(Point(c(5.0, 5.0)));
    let poly = square(0.0, 0.0, 10.0, 10.0);
    let result = overlay(&point, &poly, OverlayOp::Difference, &factory()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn s5_disjoint_polygons_intersection_is_empty() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(2.0, 2.0, 3.0, 3.0);
    let result = overlay(&a, &b, OverlayOp::Intersection, &factory()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn s5_disjoint_polygons_union_contains_both() {
    let a = square(0.0, 0.0, 1.0, 1.0);
    let b = square(2.0, 2.0, 3.0, 3.0);
    let result = overlay(&a, &b, OverlayOp::Union, &factory()).unwrap();
    assert!((polygon_area(&result) - 2.0).abs() < 1e-9);
}

#[test]
fn idempotence_union_of_a_geometry_with_itself_is_itself() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let result = overlay(&a, &a, OverlayOp::Union, &factory()).unwrap();
    assert!((polygon_area(&result) - 100.0).abs() < 1e-9);
}

#[test]
fn idempotence_difference_of_a_geometry_with_itself_is_empty() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let result = overlay(&a, &a, OverlayOp::Difference, &factory()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn empty_absorption_union_with_empty_collection_is_unchanged() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let empty = Geometry::GeometryCollection(planar_overlay::GeometryCollection(Vec::new()));
    let result = overlay(&a, &empty, OverlayOp::Union, &factory()).unwrap();
    assert!((polygon_area(&result) - 100.0).abs() < 1e-9);
}

#[test]
fn empty_absorption_intersection_with_empty_collection_is_empty() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let empty = Geometry::GeometryCollection(planar_overlay::GeometryCollection(Vec::new()));
    let result = overlay(&a, &empty, OverlayOp::Intersection, &factory()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn difference_and_intersection_partition_the_first_argument() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let b = square(5.0, 5.0, 15.0, 15.0);
    let diff_area = polygon_area(&overlay(&a, &b, OverlayOp::Difference, &factory()).unwrap());
    let inter_area = polygon_area(&overlay(&a, &b, OverlayOp::Intersection, &factory()).unwrap());
    assert!((diff_area + inter_area - 100.0).abs() < 1e-9);
}

#[test]
fn self_union_convenience_matches_overlay_union_with_itself() {
    let a = square(0.0, 0.0, 10.0, 10.0);
    let direct = overlay(&a, &a, OverlayOp::Union, &factory()).unwrap();
    let via_method = a.self_union(&factory()).unwrap();
    assert!((polygon_area(&direct) - polygon_area(&via_method)).abs() < 1e-9);
}
