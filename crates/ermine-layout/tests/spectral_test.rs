use ermine_layout::{Edge, Error, Point, SpectralLayout, SpectralOptions};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn in_unit_square(p: &Point) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

#[test]
fn same_input_same_points() {
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5)];
    let a = SpectralLayout::new(6, edges).calculate().unwrap();
    let b = SpectralLayout::new(6, edges).calculate().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 6);
}

#[test]
fn zero_edges_still_place_every_node() {
    for n in 0..8 {
        let points = SpectralLayout::new(n, Vec::<Edge>::new()).calculate().unwrap();
        assert_eq!(points.len(), n);
        assert!(points.iter().all(in_unit_square));
    }
}

#[test]
fn tiny_graphs_have_fixed_placements() {
    let one = SpectralLayout::new(1, Vec::<Edge>::new()).calculate().unwrap();
    assert_eq!(one, vec![Point::new(0.5, 0.5)]);

    let two = SpectralLayout::new(2, [(0, 1)]).calculate().unwrap();
    assert_eq!(two, vec![Point::new(0.0, 0.5), Point::new(1.0, 0.5)]);
}

#[test]
fn star_leaves_of_a_bipartite_hub_do_not_overlap() {
    // two hubs, each leaf linked to both: every leaf is structurally equivalent
    let mut edges = Vec::new();
    for leaf in 2..8 {
        edges.push((0, leaf));
        edges.push((1, leaf));
    }
    let points = SpectralLayout::new(8, edges).calculate().unwrap();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            assert!(a != b, "{a:?} appears twice");
        }
        assert!(in_unit_square(a));
    }
}

#[test]
fn out_of_range_edge_is_rejected() {
    let err = SpectralLayout::new(3, [(0, 1), (2, 3)]).calculate().unwrap_err();
    assert_eq!(
        err,
        Error::EdgeOutOfRange {
            edge: 1,
            from: 2,
            to: 3,
            node_count: 3,
        }
    );
}

#[test]
fn self_loops_and_parallel_edges_do_not_break_the_embedding() {
    let edges = [(0, 0), (0, 1), (0, 1), (1, 2), (2, 3), (3, 3)];
    let points = SpectralLayout::new(4, edges).calculate().unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(in_unit_square));
}

#[test]
fn seed_is_part_of_the_input() {
    let edges: Vec<(usize, usize)> = (0..9).map(|i| (i, i + 1)).collect();
    let layout = SpectralLayout::new(10, edges.clone()).with_options(SpectralOptions {
        random_seed: 42,
        ..Default::default()
    });
    assert_eq!(layout.calculate().unwrap(), layout.calculate().unwrap());
    assert_eq!(layout.node_count(), 10);
    assert_eq!(layout.edges().len(), edges.len());
}

// ===================
// Property Test Functions
// ===================

/// Every point lies in the unit square and there is exactly one per node.
fn check_points_are_normalized(n: usize, raw: Vec<(usize, usize)>) -> Result<(), TestCaseError> {
    let edges: Vec<(usize, usize)> = raw.into_iter().map(|(a, b)| (a % n, b % n)).collect();
    let points = SpectralLayout::new(n, edges)
        .calculate()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    prop_assert_eq!(points.len(), n);
    for p in &points {
        prop_assert!(in_unit_square(p), "{:?}", p);
    }
    Ok(())
}

/// Structurally equivalent nodes still get distinct points.
fn check_points_are_distinct(n: usize, raw: Vec<(usize, usize)>) -> Result<(), TestCaseError> {
    let edges: Vec<(usize, usize)> = raw.into_iter().map(|(a, b)| (a % n, b % n)).collect();
    let points = SpectralLayout::new(n, edges)
        .calculate()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            let same = (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9;
            prop_assert!(!same, "nodes {} and {} share {:?}", i, j, a);
        }
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn points_are_normalized(
        n in 1usize..30,
        raw in prop::collection::vec((0usize..30, 0usize..30), 0..60),
    ) {
        check_points_are_normalized(n, raw)?;
    }

    #[test]
    fn points_are_distinct(
        n in 3usize..40,
        raw in prop::collection::vec((0usize..40, 0usize..40), 0..80),
    ) {
        check_points_are_distinct(n, raw)?;
    }
}
