//! Single-layer supervised error correction.
//!
//! Distinct from multi-layer backpropagation: one delta-producing bias step
//! on a layer, plus one weight step across a single connection hop. The two
//! topology rules use deliberately different formulas (the fixed rule has
//! no derivative term and the opposite sign convention); they are preserved
//! as-is, never unified.

use log::{debug, trace};

use crate::activation::Activation;
use crate::network::Topology;
use crate::unit::Layer;

/// Single-layer error-correction trainer with a fixed learning rate.
///
/// The update rule is resolved once at construction from the network's
/// topology tag.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCorrection {
    rate: f64,
    activation: Activation,
    rule: Topology,
}

impl ErrorCorrection {
    /// Creates a trainer applying the rule selected by `rule` (pass the
    /// owning network's [`Topology`](crate::network::Topology) tag).
    #[must_use]
    pub fn new(rule: Topology, activation: Activation, rate: f64) -> Self {
        debug!("error correction set up: rule {rule:?}, rate {rate}");
        Self {
            rate,
            activation,
            rule,
        }
    }

    /// Computes the layer's delta vector and adjusts biases.
    ///
    /// Fixed rule: `delta[i] = status_i - target[i]`, no derivative term.
    /// Variable rule: `delta[i] = derivative(status_i + bias_i) *
    /// (target[i] - (status_i + bias_i))`. Both subtract `rate * delta[i]`
    /// from the bias.
    ///
    /// `target` length must equal the layer length (caller guarantee).
    pub fn output_step(&self, layer: &mut Layer, target: &[f64]) -> Vec<f64> {
        trace!("error-correction output step over {} units", layer.len());
        match self.rule {
            Topology::Fixed => layer
                .iter_mut()
                .zip(target)
                .map(|(unit, &t)| {
                    let delta = unit.status() - t;
                    unit.bias -= self.rate * delta;
                    delta
                })
                .collect(),
            Topology::Variable => layer
                .iter_mut()
                .zip(target)
                .map(|(unit, &t)| {
                    let out = unit.status() + unit.bias;
                    let delta = self.activation.derivative(out) * (t - out);
                    unit.bias -= self.rate * delta;
                    delta
                })
                .collect(),
        }
    }

    /// Input-side weight update for one connection hop.
    ///
    /// For every unit of `layer` and every downstream connection `i`:
    /// `weights[i] -= rate * delta[i] * status`. No bias change, no delta
    /// returned; this is not a backward pass.
    ///
    /// `delta` is the downstream layer's delta vector (caller guarantee:
    /// its length equals each unit's weight count).
    pub fn weight_step(&self, layer: &mut Layer, delta: &[f64]) {
        trace!("error-correction weight step over {} units", layer.len());
        for unit in layer.iter_mut() {
            let status = unit.status();
            for (weight, &d) in unit.weights.iter_mut().zip(delta) {
                *weight -= self.rate * d * status;
            }
        }
    }
}
