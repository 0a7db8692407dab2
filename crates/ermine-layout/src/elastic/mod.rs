//! Elastic relaxation: bounded force-directed refinement of already-positioned bodies.
//!
//! Connected pairs (as answered by the caller's predicate) are joined by springs, every pair
//! within `repulsion_range` repels, and displacement is scaled by a temperature that decays by
//! `damping` after each iteration. Bodies are constrained to the host region after every step,
//! so the result never leaves the host no matter how the iteration ends.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geometry::{Body, Rect};

mod forces;
mod options;

pub use options::{Boundary, ElasticLayoutOptions};

/// What happened during [`ElasticLayout::initialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelaxationStats {
    pub iterations: usize,
    /// `false` when the iteration bound was reached first. That is still a normal result.
    pub converged: bool,
}

pub struct ElasticLayout<'a, F>
where
    F: Fn(usize, usize) -> bool,
{
    options: ElasticLayoutOptions,
    host: Rect,
    bodies: &'a mut [Body],
    is_connected: F,
}

impl<'a, F> ElasticLayout<'a, F>
where
    F: Fn(usize, usize) -> bool,
{
    /// `is_connected(i, j)` is asked about body indices; a pair is connected when either
    /// direction answers `true`.
    pub fn new(
        options: ElasticLayoutOptions,
        host: Rect,
        bodies: &'a mut [Body],
        is_connected: F,
    ) -> Result<Self> {
        options.validate()?;
        validate_host(&host)?;
        validate_bodies(bodies)?;
        Ok(Self {
            options,
            host,
            bodies,
            is_connected,
        })
    }

    pub fn options(&self) -> &ElasticLayoutOptions {
        &self.options
    }

    pub fn host(&self) -> Rect {
        self.host
    }

    pub fn bodies(&self) -> &[Body] {
        self.bodies
    }

    /// Runs the relaxation, moving the bodies in place.
    pub fn initialize(&mut self) -> RelaxationStats {
        let start = crate::timing_enabled().then(std::time::Instant::now);
        let opts = &self.options;
        let area = self.host.inset(opts.padding);
        let n = self.bodies.len();

        for body in self.bodies.iter_mut() {
            constrain(body, &area, Boundary::Clamp);
        }

        let mut springs: Vec<(usize, usize)> = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.is_connected)(i, j) || (self.is_connected)(j, i) {
                    springs.push((i, j));
                }
            }
        }

        let mut stats = RelaxationStats {
            iterations: 0,
            converged: n == 0,
        };
        let mut temperature = 1.0;
        let mut forces: Vec<(f64, f64)> = vec![(0.0, 0.0); n];

        while !stats.converged && stats.iterations < opts.max_iterations {
            forces.fill((0.0, 0.0));

            for &(i, j) in &springs {
                let (fx, fy) = forces::spring_force(
                    &self.bodies[i],
                    &self.bodies[j],
                    opts.spring_stiffness,
                    opts.ideal_length,
                );
                forces[i].0 += fx;
                forces[i].1 += fy;
                forces[j].0 -= fx;
                forces[j].1 -= fy;
            }

            let range_sq = opts.repulsion_range * opts.repulsion_range;
            for i in 0..n {
                for j in (i + 1)..n {
                    let a = &self.bodies[i];
                    let b = &self.bodies[j];
                    let dx = b.center_x() - a.center_x();
                    let dy = b.center_y() - a.center_y();
                    if dx * dx + dy * dy > range_sq && !forces::bodies_intersect(a, b) {
                        continue;
                    }
                    let (fx, fy) = forces::repulsion_force(a, b, opts.repulsion);
                    forces[i].0 += fx;
                    forces[i].1 += fy;
                    forces[j].0 -= fx;
                    forces[j].1 -= fy;
                }
            }

            let mut total = 0.0;
            for (body, &(fx, fy)) in self.bodies.iter_mut().zip(&forces) {
                let before = body.position();
                body.move_by(
                    step(fx, temperature, opts.max_displacement),
                    step(fy, temperature, opts.max_displacement),
                );
                constrain(body, &area, opts.boundary);
                let after = body.position();
                total += ((after.x - before.x).powi(2) + (after.y - before.y).powi(2)).sqrt();
            }

            stats.iterations += 1;
            temperature *= opts.damping;
            if total / (n as f64) < opts.convergence_threshold {
                stats.converged = true;
            }
        }

        tracing::debug!(
            bodies = n,
            springs = springs.len(),
            iterations = stats.iterations,
            converged = stats.converged,
            "elastic relaxation"
        );
        if let Some(s) = start {
            eprintln!(
                "[ermine-elastic-timing] total={:?} bodies={} springs={} iterations={} converged={}",
                s.elapsed(),
                n,
                springs.len(),
                stats.iterations,
                stats.converged,
            );
        }
        stats
    }
}

/// The host region must have finite coordinates and a finite, non-negative size.
pub fn validate_host(host: &Rect) -> Result<()> {
    let fields = [
        ("host.x", host.x, true),
        ("host.y", host.y, true),
        ("host.width", host.width, false),
        ("host.height", host.height, false),
    ];
    for (name, value, signed) in fields {
        if !value.is_finite() || (!signed && value < 0.0) {
            return Err(Error::InvalidOption {
                name,
                value,
                expected: if signed {
                    "a finite coordinate"
                } else {
                    "a finite, non-negative length"
                },
            });
        }
    }
    Ok(())
}

fn validate_bodies(bodies: &[Body]) -> Result<()> {
    for body in bodies {
        for (name, value) in [("body.width", body.width), ("body.height", body.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption {
                    name,
                    value,
                    expected: "a finite, non-negative length",
                });
            }
        }
    }
    Ok(())
}

fn step(force: f64, temperature: f64, cap: f64) -> f64 {
    let d = force * temperature;
    if d.is_finite() { d.clamp(-cap, cap) } else { 0.0 }
}

/// Brings `body` back inside `area`. A body wider (taller) than the area is pinned to its left
/// (top) edge on that axis.
fn constrain(body: &mut Body, area: &Rect, boundary: Boundary) {
    body.left = constrain_axis(body.left, body.width, area.x, area.width, boundary);
    body.top = constrain_axis(body.top, body.height, area.y, area.height, boundary);
}

fn constrain_axis(pos: f64, len: f64, min: f64, span: f64, boundary: Boundary) -> f64 {
    let max = min + span - len;
    if !pos.is_finite() || !max.is_finite() || max <= min {
        return min;
    }
    let pos = match boundary {
        Boundary::Clamp => pos,
        Boundary::Reflect if pos < min => min + (min - pos),
        Boundary::Reflect if pos > max => max - (pos - max),
        Boundary::Reflect => pos,
    };
    pos.clamp(min, max)
}
