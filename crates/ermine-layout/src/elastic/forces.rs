//! Pairwise force terms on top-left anchored boxes.
//!
//! Distances are measured between box borders (the point where the center-to-center segment
//! leaves each box), so large entities do not need a larger ideal length.

use crate::geometry::Body;

const MIN_REPULSION_DIST: f64 = 1.0;

pub(super) fn bodies_intersect(a: &Body, b: &Body) -> bool {
    a.left < b.left + b.width
        && a.left + a.width > b.left
        && a.top < b.top + b.height
        && a.top + a.height > b.top
}

/// Point on the border of `a` along the segment from its center towards the center of `b`.
fn clip_point_towards(a: &Body, b: &Body) -> (f64, f64) {
    let ax = a.center_x();
    let ay = a.center_y();
    let dx = b.center_x() - ax;
    let dy = b.center_y() - ay;

    if dx == 0.0 && dy == 0.0 {
        return (ax, ay);
    }

    let mut t_x = f64::INFINITY;
    let mut t_y = f64::INFINITY;
    if dx != 0.0 {
        t_x = ((a.width / 2.0) / dx.abs()).max(0.0);
    }
    if dy != 0.0 {
        t_y = ((a.height / 2.0) / dy.abs()).max(0.0);
    }
    let t = t_x.min(t_y);
    (ax + t * dx, ay + t * dy)
}

/// Spring force on `a` (apply the negation to `b`), pulling towards `ideal_length`.
pub(super) fn spring_force(a: &Body, b: &Body, stiffness: f64, ideal_length: f64) -> (f64, f64) {
    if bodies_intersect(a, b) {
        return (0.0, 0.0);
    }
    let (ax, ay) = clip_point_towards(a, b);
    let (bx, by) = clip_point_towards(b, a);
    let lx = bx - ax;
    let ly = by - ay;
    let len = (lx * lx + ly * ly).sqrt();
    if len < 1e-9 {
        return (0.0, 0.0);
    }
    let force = stiffness * (len - ideal_length);
    (force * lx / len, force * ly / len)
}

/// Repulsion on `a` (apply the negation to `b`). Overlapping boxes are pushed apart by their
/// overlap instead of an inverse-square term.
pub(super) fn repulsion_force(a: &Body, b: &Body, repulsion: f64) -> (f64, f64) {
    if bodies_intersect(a, b) {
        let (ox, oy) = separation_amount(a, b);
        return (ox, oy);
    }

    let (ax, ay) = clip_point_towards(a, b);
    let (bx, by) = clip_point_towards(b, a);
    let mut dx = bx - ax;
    let mut dy = by - ay;
    if dx.abs() < MIN_REPULSION_DIST {
        dx = dx.signum() * MIN_REPULSION_DIST;
    }
    if dy.abs() < MIN_REPULSION_DIST {
        dy = dy.signum() * MIN_REPULSION_DIST;
    }

    let dist_sq = dx * dx + dy * dy;
    let dist = dist_sq.sqrt();
    if dist == 0.0 {
        return (0.0, 0.0);
    }
    let force = repulsion / dist_sq;
    (-force * dx / dist, -force * dy / dist)
}

/// Half of the minimal translation that resolves the overlap, directed away from `b`.
fn separation_amount(a: &Body, b: &Body) -> (f64, f64) {
    let (dir_x, dir_y) = directions_for_overlap(a, b);

    let overlap_x = (a.left + a.width).min(b.left + b.width) - a.left.max(b.left);
    let overlap_y = (a.top + a.height).min(b.top + b.height) - a.top.max(b.top);

    let mut slope = ((b.center_y() - a.center_y()) / (b.center_x() - a.center_x())).abs();
    if b.center_y() == a.center_y() && b.center_x() == a.center_x() {
        slope = 1.0;
    }

    let mut move_by_y = slope * overlap_x;
    let mut move_by_x = overlap_y / slope;
    if overlap_x < move_by_x {
        move_by_x = overlap_x;
    } else {
        move_by_y = overlap_y;
    }

    (dir_x * (move_by_x / 2.0), dir_y * (move_by_y / 2.0))
}

/// Coincident centers resolve to `a` moving right/down, which keeps the outcome deterministic.
fn directions_for_overlap(a: &Body, b: &Body) -> (f64, f64) {
    let dir_x = if a.center_x() < b.center_x() {
        -1.0
    } else {
        1.0
    };
    let dir_y = if a.center_y() < b.center_y() {
        -1.0
    } else {
        1.0
    };
    (dir_x, dir_y)
}
