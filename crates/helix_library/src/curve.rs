//! Gate response curves (transfer functions).

use serde::{Deserialize, Serialize};

/// A gate's measured response curve, mapping summed input activity (RPU) to
/// output promoter activity (RPU).
///
/// Repressors use the Hill form; sensors and reporters use the linear form
/// (sensors with the identity curve, reporters with a unit-conversion slope).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// A repressor Hill function, monotonically decreasing for `k`, `n` > 0:
    /// `y = ymin + (ymax - ymin) / (1 + (x / k)^n)`.
    Hill {
        /// Output activity at zero input.
        ymax: f64,
        /// Output activity at saturating input.
        ymin: f64,
        /// Repression threshold (input activity at the half-maximal point).
        k: f64,
        /// Hill coefficient (cooperativity).
        n: f64,
    },
    /// A linear response `y = slope * x + offset`.
    Linear {
        /// The slope.
        slope: f64,
        /// The intercept.
        offset: f64,
    },
}

impl Curve {
    /// The identity curve used by input sensors.
    pub fn identity() -> Self {
        Curve::Linear {
            slope: 1.0,
            offset: 0.0,
        }
    }

    /// A pure unit conversion, used by output reporters.
    pub fn unit_conversion(slope: f64) -> Self {
        Curve::Linear { slope, offset: 0.0 }
    }

    /// Evaluates the curve at the given input activity.
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            Curve::Hill { ymax, ymin, k, n } => ymin + (ymax - ymin) / (1.0 + (x / k).powf(n)),
            Curve::Linear { slope, offset } => slope * x + offset,
        }
    }
}
