use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a body that would leave the host region is brought back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Stop at the wall.
    #[default]
    Clamp,
    /// Mirror the overshoot back into the region, then clamp.
    Reflect,
}

/// Relaxation configuration.
///
/// Every field has a documented range (see [`ElasticLayoutOptions::validate`]); within those
/// ranges relaxation always terminates and never moves a body outside the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElasticLayoutOptions {
    /// Spring force per pixel of stretch. `(0, 10]`.
    pub spring_stiffness: f64,
    /// Rest length of a spring, in pixels. `(0, 10000]`.
    pub ideal_length: f64,
    /// Repulsion numerator (`repulsion / distance²`). `[0, 1e7]`.
    pub repulsion: f64,
    /// Pairs whose centers are farther apart do not repel. `(0, 1e5]`.
    pub repulsion_range: f64,
    /// Temperature multiplier applied after every iteration. `(0, 1)`.
    pub damping: f64,
    /// Iteration bound. `[0, 100000]`.
    pub max_iterations: usize,
    /// Per-axis displacement cap per iteration, in pixels. `(0, 10000]`.
    pub max_displacement: f64,
    /// Mean per-body displacement (pixels) under which relaxation stops early. `[0, 10000]`.
    pub convergence_threshold: f64,
    pub boundary: Boundary,
    /// Inset applied to the host region before constraining. `[0, 10000]`.
    pub padding: f64,
}

impl Default for ElasticLayoutOptions {
    fn default() -> Self {
        Self {
            spring_stiffness: 0.45,
            ideal_length: 120.0,
            repulsion: 4500.0,
            repulsion_range: 400.0,
            damping: 0.95,
            max_iterations: 500,
            max_displacement: 50.0,
            convergence_threshold: 0.5,
            boundary: Boundary::Clamp,
            padding: 0.0,
        }
    }
}

impl ElasticLayoutOptions {
    pub const MAX_ITERATIONS_LIMIT: usize = 100_000;

    pub fn validate(&self) -> Result<()> {
        check(
            "springStiffness",
            self.spring_stiffness,
            |v| v > 0.0 && v <= 10.0,
            "a value in (0, 10]",
        )?;
        check(
            "idealLength",
            self.ideal_length,
            |v| v > 0.0 && v <= 10_000.0,
            "a value in (0, 10000]",
        )?;
        check(
            "repulsion",
            self.repulsion,
            |v| (0.0..=1e7).contains(&v),
            "a value in [0, 1e7]",
        )?;
        check(
            "repulsionRange",
            self.repulsion_range,
            |v| v > 0.0 && v <= 1e5,
            "a value in (0, 1e5]",
        )?;
        check(
            "damping",
            self.damping,
            |v| v > 0.0 && v < 1.0,
            "a value in (0, 1)",
        )?;
        check(
            "maxIterations",
            self.max_iterations as f64,
            |v| v <= Self::MAX_ITERATIONS_LIMIT as f64,
            "a value in [0, 100000]",
        )?;
        check(
            "maxDisplacement",
            self.max_displacement,
            |v| v > 0.0 && v <= 10_000.0,
            "a value in (0, 10000]",
        )?;
        check(
            "convergenceThreshold",
            self.convergence_threshold,
            |v| (0.0..=10_000.0).contains(&v),
            "a value in [0, 10000]",
        )?;
        check(
            "padding",
            self.padding,
            |v| (0.0..=10_000.0).contains(&v),
            "a value in [0, 10000]",
        )?;
        Ok(())
    }
}

fn check(
    name: &'static str,
    value: f64,
    ok: impl Fn(f64) -> bool,
    expected: &'static str,
) -> Result<()> {
    // NaN fails every range predicate.
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(Error::InvalidOption {
            name,
            value,
            expected,
        })
    }
}
