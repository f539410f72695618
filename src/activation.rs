//! Activation functions for unit outputs.
//!
//! Every function is a stateless variant of the [`Activation`] enum and is
//! resolved once when a trainer or selection strategy is set up, never
//! re-derived per call.
//!
//! ## Derivative semantics
//!
//! The derivative argument convention varies per variant and is preserved
//! exactly rather than unified:
//!
//! - [`Activation::Sigmoid`] and [`Activation::Tanh`] differentiate from the
//!   RAW input.
//! - [`FastActivation::Sigmoid`] differentiates from the ACTIVATED value
//!   (`y * (1 - y)`), while [`FastActivation::Tanh`] stays raw-input-based.
//!
//! `Threshold`, `Relu` and `Identity` have no derivative at all; asking for
//! one is a caller contract violation and panics.

/// A stateless activation function, applied as `activate(status + bias)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Step at zero: `1.0` for positive input, `-1.0` otherwise.
    Threshold,
    /// Rectified linear: `max(0, x)`.
    Relu,
    /// Pass-through.
    Identity,
    /// Logistic sigmoid, range `[0, 1]`.
    Sigmoid,
    /// Hyperbolic tangent, range `[-1, 1]`.
    Tanh,
}

impl Activation {
    /// Applies the activation to `x`.
    #[must_use]
    pub fn activate(self, x: f64) -> f64 {
        match self {
            Self::Threshold => {
                if x > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Relu => {
                if x >= 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Self::Identity => x,
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
        }
    }

    /// Slope of the activation at raw input `x`.
    ///
    /// # Panics
    /// `Threshold`, `Relu` and `Identity` define no derivative; calling this
    /// on them is a contract violation, not a recoverable error.
    #[must_use]
    pub fn derivative(self, x: f64) -> f64 {
        match self {
            Self::Sigmoid => {
                let y = self.activate(x);
                y * (1.0 - y)
            }
            Self::Tanh => 1.0 - x.tanh().powi(2),
            other => panic!("activation {other:?} has no defined derivative"),
        }
    }

    /// Lower bound of the activation's output range.
    ///
    /// # Panics
    /// Only `Sigmoid` and `Tanh` declare a range.
    #[must_use]
    pub fn range_min(self) -> f64 {
        match self {
            Self::Sigmoid => 0.0,
            Self::Tanh => -1.0,
            other => panic!("activation {other:?} declares no output range"),
        }
    }

    /// Upper bound of the activation's output range.
    ///
    /// # Panics
    /// Only `Sigmoid` and `Tanh` declare a range.
    #[must_use]
    pub fn range_max(self) -> f64 {
        match self {
            Self::Sigmoid | Self::Tanh => 1.0,
            other => panic!("activation {other:?} declares no output range"),
        }
    }
}

/// Single-precision fast-math activations for the accelerated path.
///
/// Functionally equivalent to the `f64` family but not bit-exact with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastActivation {
    /// Logistic sigmoid, range `[0, 1]`.
    Sigmoid,
    /// Saturating hyperbolic tangent, range `[-1, 1]`.
    Tanh,
}

impl FastActivation {
    /// Applies the activation to `x`.
    ///
    /// `Tanh` saturates to `±1` once `|x| > 50`.
    #[must_use]
    pub fn activate(self, x: f32) -> f32 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => {
                if x.abs() > 50.0 {
                    1.0f32.copysign(x)
                } else {
                    x.tanh()
                }
            }
        }
    }

    /// Slope of the activation.
    ///
    /// `Sigmoid` expects the ACTIVATED value (`y * (1 - y)`); `Tanh` expects
    /// the raw input. The asymmetry is intentional and load-bearing for
    /// parity with the reference formulas.
    #[must_use]
    pub fn derivative(self, x: f32) -> f32 {
        match self {
            Self::Sigmoid => x * (1.0 - x),
            Self::Tanh => 1.0 - self.activate(x).powi(2),
        }
    }

    /// Lower bound of the activation's output range.
    #[must_use]
    pub fn range_min(self) -> f32 {
        match self {
            Self::Sigmoid => 0.0,
            Self::Tanh => -1.0,
        }
    }

    /// Upper bound of the activation's output range.
    #[must_use]
    pub fn range_max(self) -> f32 {
        1.0
    }
}
