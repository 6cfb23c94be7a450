//! Property-based tests comparing the octree traversal with brute force.
//!
//! Run with: cargo test -p octree-intersect --test ground_truth

use std::collections::BTreeSet;

use nalgebra::Point3;
use octree_intersect::{are_intersecting, Intersector, IntersectorConfig, Shape, GEOMETRY_EPSILON};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Three vertices clustered around a random base point.
fn arb_vertices(world: f64, size: f64) -> impl Strategy<Value = [Point3<f64>; 3]> {
    (
        prop::array::uniform3(-world..world),
        prop::array::uniform3(prop::array::uniform3(-size..size)),
    )
        .prop_map(|(base, offsets)| {
            offsets.map(|[dx, dy, dz]| Point3::new(base[0] + dx, base[1] + dy, base[2] + dz))
        })
}

/// Vertices on a coarse lattice, so that many shapes touch splitting planes
/// exactly and many vertex triples degenerate into points or segments.
fn arb_lattice_vertices() -> impl Strategy<Value = [Point3<f64>; 3]> {
    prop::array::uniform3(prop::array::uniform3(-4i32..=4)).prop_map(|vertices| {
        vertices.map(|[x, y, z]| Point3::new(f64::from(x) * 0.5, f64::from(y) * 0.5, f64::from(z) * 0.5))
    })
}

fn into_shapes(vertices: Vec<[Point3<f64>; 3]>) -> Vec<Shape> {
    vertices
        .into_iter()
        .enumerate()
        .map(|(index, vertices)| Shape::from_vertices(index, vertices, GEOMETRY_EPSILON))
        .collect()
}

fn arb_scattered_shapes() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(arb_vertices(20.0, 3.0), 1..120).prop_map(into_shapes)
}

fn arb_lattice_shapes() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(arb_lattice_vertices(), 1..80).prop_map(into_shapes)
}

// =============================================================================
// Helpers
// =============================================================================

fn brute_force(shapes: &[Shape]) -> BTreeSet<(usize, usize)> {
    let mut expected = BTreeSet::new();
    for (i, a) in shapes.iter().enumerate() {
        for b in &shapes[i + 1..] {
            if are_intersecting(a, b) {
                expected.insert((a.index(), b.index()));
            }
        }
    }
    expected
}

fn check_against_brute_force(shapes: Vec<Shape>, config: &IntersectorConfig) -> Result<(), TestCaseError> {
    let expected = brute_force(&shapes);
    let count = shapes.len();

    let mut intersector = Intersector::with_config(shapes, config)
        .map_err(|e| TestCaseError::fail(format!("build failed: {e}")))?;
    prop_assert_eq!(intersector.octree().shape_count(), count);

    let pairs = intersector.intersect_all().to_vec();
    let normalized: BTreeSet<(usize, usize)> = pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();

    prop_assert!(pairs.iter().all(|&(a, b)| a != b), "self pair in {:?}", pairs);
    prop_assert_eq!(normalized.len(), pairs.len(), "duplicate pair in {:?}", pairs);
    prop_assert_eq!(normalized, expected);
    Ok(())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_scattered_matches_brute_force(shapes in arb_scattered_shapes()) {
        check_against_brute_force(shapes, &IntersectorConfig::default())?;
    }

    #[test]
    fn proptest_lattice_matches_brute_force(shapes in arb_lattice_shapes()) {
        check_against_brute_force(shapes, &IntersectorConfig::default())?;
    }

    #[test]
    fn proptest_any_height_matches_brute_force(
        shapes in arb_scattered_shapes(),
        max_height in 1usize..=6,
    ) {
        let config = IntersectorConfig { max_height, ..IntersectorConfig::default() };
        check_against_brute_force(shapes, &config)?;
    }

    #[test]
    fn proptest_every_shape_is_stored_once(shapes in arb_lattice_shapes()) {
        let count = shapes.len();
        let intersector = Intersector::new(shapes).unwrap();
        let mut seen: Vec<usize> = intersector
            .octree()
            .nodes()
            .iter()
            .flat_map(|node| node.shapes().iter().map(Shape::index))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn proptest_descended_shapes_fit_their_node(shapes in arb_scattered_shapes()) {
        let intersector = Intersector::new(shapes).unwrap();
        // The root keeps whatever fits nowhere else
        for node in &intersector.octree().nodes()[1..] {
            for shape in node.shapes() {
                prop_assert!(node.contains(shape.bounding_volume()));
            }
        }
    }
}
