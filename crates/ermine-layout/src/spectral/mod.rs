//! Spectral placement: a global 2-D embedding computed from graph structure alone.
//!
//! The embedding is non-iterative in the force-directed sense (no convergence risk) and
//! reflects global connectivity, which makes it a good seed for local refinement. Output
//! coordinates are normalized to the unit square, one point per input node, in input order.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Point;
use crate::graph::{Edge, undirected_adjacency, validate_edges};
use crate::rng::XorShift64Star;

mod pivot;

const SPREAD_EPSILON: f64 = 1e-9;
/// Radius, in unit-square coordinates, of the circle coincident points are spread on.
const COINCIDENT_RADIUS: f64 = 0.04;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpectralOptions {
    /// Seed for pivot selection and power-iteration start vectors. Same seed, same layout.
    pub random_seed: u64,
    /// Maximum number of pivots used by the sampled decomposition.
    pub sample_size: usize,
    /// Relative tolerance at which power iteration stops.
    pub tolerance: f64,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            sample_size: 25,
            tolerance: 1e-7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpectralLayout {
    node_count: usize,
    edges: Vec<Edge>,
    options: SpectralOptions,
}

impl SpectralLayout {
    pub fn new<I, E>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self {
            node_count,
            edges: edges.into_iter().map(Into::into).collect(),
            options: SpectralOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SpectralOptions) -> Self {
        self.options = options;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// One point per node, in node order, both coordinates in `[0, 1]`.
    ///
    /// Only fails when an edge references a node index outside `0..node_count`.
    pub fn calculate(&self) -> Result<Vec<Point>> {
        validate_edges(self.node_count, &self.edges)?;

        let start = crate::timing_enabled().then(std::time::Instant::now);
        let points = match self.node_count {
            0 => Vec::new(),
            1 => vec![Point::new(0.5, 0.5)],
            2 => vec![Point::new(0.0, 0.5), Point::new(1.0, 0.5)],
            n => self.embed(n),
        };

        if let Some(s) = start {
            eprintln!(
                "[ermine-spectral-timing] total={:?} nodes={} edges={}",
                s.elapsed(),
                self.node_count,
                self.edges.len(),
            );
        }
        Ok(points)
    }

    fn embed(&self, n: usize) -> Vec<Point> {
        let mut rng = XorShift64Star::new(self.options.random_seed);
        let params = pivot::PivotParams {
            sample_size: self.options.sample_size.max(2),
            node_separation: 75.0,
            tolerance: self.options.tolerance,
        };

        let adjacency = undirected_adjacency(n, &self.edges);
        let normalized = pivot::embed(n, adjacency, &params, &mut rng)
            .and_then(|(x, y)| normalize(&x, &y));

        match normalized {
            Some(mut points) => {
                separate_coincident(&mut points, COINCIDENT_RADIUS);
                tracing::debug!(nodes = n, edges = self.edges.len(), "spectral embedding");
                points
            }
            None => {
                tracing::warn!(
                    nodes = n,
                    edges = self.edges.len(),
                    "degenerate spectral embedding; falling back to a circle"
                );
                circle(n)
            }
        }
    }
}

/// Min-max normalization per axis. An axis without spread collapses to `0.5`; an embedding
/// without spread on both axes, or with non-finite values, is rejected.
fn normalize(x: &[f64], y: &[f64]) -> Option<Vec<Point>> {
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let range = |v: &[f64]| {
        let min = v.iter().copied().fold(f64::INFINITY, f64::min);
        let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max - min)
    };
    let (min_x, span_x) = range(x);
    let (min_y, span_y) = range(y);
    if span_x < SPREAD_EPSILON && span_y < SPREAD_EPSILON {
        return None;
    }

    let scale = |v: f64, min: f64, span: f64| {
        if span < SPREAD_EPSILON {
            0.5
        } else {
            ((v - min) / span).clamp(0.0, 1.0)
        }
    };
    Some(
        x.iter()
            .zip(y)
            .map(|(&px, &py)| Point::new(scale(px, min_x, span_x), scale(py, min_y, span_y)))
            .collect(),
    )
}

fn coincident(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() < SPREAD_EPSILON && (a.y - b.y).abs() < SPREAD_EPSILON
}

/// Structurally equivalent nodes embed at the same point. Each such group is spread on a small
/// circle around its shared position, members in node order, pulled inward so the circle stays
/// inside the unit square.
fn separate_coincident(points: &mut [Point], radius: f64) {
    let n = points.len();
    let mut placed = vec![false; n];
    for i in 0..n {
        if placed[i] {
            continue;
        }
        let anchor = points[i];
        let group: Vec<usize> = (i..n)
            .filter(|&j| !placed[j] && coincident(&anchor, &points[j]))
            .collect();
        if group.len() < 2 {
            continue;
        }

        let cx = anchor.x.clamp(radius, 1.0 - radius);
        let cy = anchor.y.clamp(radius, 1.0 - radius);
        let m = group.len() as f64;
        for (k, &j) in group.iter().enumerate() {
            let angle = std::f64::consts::TAU * (k as f64) / m;
            points[j] = Point::new(cx + radius * angle.cos(), cy + radius * angle.sin());
            placed[j] = true;
        }
        tracing::trace!(node = i, size = group.len(), "spread coincident spectral points");
    }
}

fn circle(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (n as f64);
            Point::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect()
}
