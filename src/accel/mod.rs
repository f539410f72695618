//! Data-parallel variants of the backpropagation steps.
//!
//! The hidden step fans out one task per unit. Independence holds because
//! each unit exclusively owns its weight vector and bias, so the schedule
//! is race-free without locking; the call returns only after every task has
//! completed and no partial result is ever observed. A worker panic aborts
//! the whole operation; there is no cancellation and no partial-failure
//! recovery.
//!
//! Built with the `parallel` feature the per-unit loop runs on rayon's
//! fork-join pool; without it the module compiles to a behaviorally
//! identical sequential loop.
//!
//! ## Divergence from the scalar path
//!
//! [`Backpropagation::output_step`] computes the raw difference
//! `target[i] - output_i` with NO derivative factor, unlike
//! [`crate::backprop::Backpropagation::output_step`], and it scores units
//! from the activated output rather than the raw status. Whether that is
//! deliberate is unresolved; the divergence is surfaced here rather than
//! silently removed. The hidden step shares the scalar formula exactly.

pub mod conv;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::{debug, trace};

use crate::activation::Activation;
use crate::unit::{Layer, Unit};

/// Data-parallel backpropagation trainer with a fixed learning rate.
///
/// Operates on one layer at a time; the caller owns the backward walk, as
/// with the scalar trainer.
#[derive(Debug, Clone, Copy)]
pub struct Backpropagation {
    rate: f64,
    activation: Activation,
}

impl Backpropagation {
    /// Creates an accelerated trainer.
    #[must_use]
    pub fn new(activation: Activation, rate: f64) -> Self {
        debug!("accelerated backpropagation set up: rate {rate}");
        Self { rate, activation }
    }

    /// Output-layer step, raw-difference form.
    ///
    /// For every output unit `i`: `delta[i] = target[i] - output_i` (the
    /// derivative term is omitted here — see the module docs) and
    /// `bias_i += rate * delta[i]`. Sequential in every build; only the
    /// hidden step fans out.
    pub fn output_step(&self, layer: &mut Layer, target: &[f64]) -> Vec<f64> {
        trace!("accelerated output step over {} units", layer.len());
        layer
            .iter_mut()
            .zip(target)
            .map(|(unit, &t)| {
                let delta = t - unit.output(self.activation);
                unit.bias += self.rate * delta;
                delta
            })
            .collect()
    }

    /// Hidden-layer step, one independent task per unit.
    ///
    /// Applies the exact scalar hidden-step formula (weight update from the
    /// pre-update status, propagation over the just-updated weights, then
    /// the derivative-weighted delta and bias update) to every unit of
    /// `layer`, in parallel when the `parallel` feature is enabled.
    /// Returns `new_delta` in unit order.
    pub fn hidden_step(&self, layer: &mut Layer, delta: &[f64]) -> Vec<f64> {
        trace!("accelerated hidden step over {} units", layer.len());
        let rate = self.rate;
        let activation = self.activation;
        let step = move |unit: &mut Unit| -> f64 {
            let status = unit.status();
            for (weight, &d) in unit.weights.iter_mut().zip(delta) {
                *weight += rate * d * status;
            }
            let propagation: f64 = unit
                .weights
                .iter()
                .zip(delta)
                .map(|(&weight, &d)| weight * d)
                .sum();
            let unit_delta = activation.derivative(status) * propagation;
            unit.bias += rate * unit_delta;
            unit_delta
        };

        #[cfg(feature = "parallel")]
        {
            layer.units_mut().par_iter_mut().map(step).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            layer.units_mut().iter_mut().map(step).collect()
        }
    }
}
