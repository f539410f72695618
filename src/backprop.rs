//! Multi-layer supervised backpropagation.
//!
//! One trainer drives both topology tags through a single code path; the
//! tag only decides where the layer-count precondition is enforced. The
//! caller owns the walk: take the output-layer delta from
//! [`Backpropagation::output_step`], then feed each
//! [`Backpropagation::hidden_step`]'s returned delta into the next step
//! further upstream.
//!
//! ```rust
//! use neurite::activation::Activation;
//! use neurite::backprop::Backpropagation;
//! use neurite::network::Network;
//!
//! let mut net = Network::fixed(&[2, 2, 1]);
//! let bp = Backpropagation::new(&net, Activation::Sigmoid, 0.5).unwrap();
//!
//! net.forward(&[1.0, 0.0], Activation::Sigmoid);
//! let mut delta = bp.output_step(&mut net, &[1.0]);
//! for layer in (0..net.num_layers() - 1).rev() {
//!     delta = bp.hidden_step(&mut net, layer, &[1.0], &delta);
//! }
//! ```

use log::{debug, trace};

use crate::activation::Activation;
use crate::network::{Network, NetworkError, Topology};

/// Multi-layer backpropagation trainer with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Backpropagation {
    rate: f64,
    activation: Activation,
    topology: Topology,
}

impl Backpropagation {
    /// Creates a trainer for `network`.
    ///
    /// Backpropagation needs at least 3 layers. For a fixed-shape network
    /// that precondition is rejected here, when the shape is known; for a
    /// variable-shape network it is re-checked at the start of every step,
    /// since the caller may reshape the network between calls.
    pub fn new(
        network: &Network,
        activation: Activation,
        rate: f64,
    ) -> Result<Self, NetworkError> {
        let topology = network.topology();
        if topology == Topology::Fixed && network.num_layers() < 3 {
            return Err(NetworkError::TooFewLayers {
                found: network.num_layers(),
            });
        }
        debug!("backpropagation set up: topology {topology:?}, rate {rate}");
        Ok(Self {
            rate,
            activation,
            topology,
        })
    }

    fn check_depth(&self, network: &Network) {
        if self.topology == Topology::Variable {
            assert!(
                network.num_layers() >= 3,
                "backpropagation requires at least 3 layers, network has {}",
                network.num_layers()
            );
        }
    }

    /// Output-layer step: computes the output delta and adjusts biases.
    ///
    /// For every output unit `i`:
    /// `delta[i] = derivative(status_i) * (target[i] - activate(status_i))`
    /// and `bias_i += rate * delta[i]`. Returns the delta vector (length =
    /// output layer size) to seed the backward walk.
    ///
    /// `target` length must equal the output layer's length (caller
    /// guarantee).
    ///
    /// # Panics
    /// Panics if a variable-shape network has fewer than 3 layers.
    pub fn output_step(&self, network: &mut Network, target: &[f64]) -> Vec<f64> {
        self.check_depth(network);
        trace!("backpropagation output step");
        let layer = network.output_layer_mut();
        layer
            .iter_mut()
            .zip(target)
            .map(|(unit, &t)| {
                let out = unit.status();
                let delta =
                    self.activation.derivative(out) * (t - self.activation.activate(out));
                unit.bias += self.rate * delta;
                delta
            })
            .collect()
    }

    /// Hidden-layer step: propagates `delta` one layer upstream.
    ///
    /// For every unit `j` of the layer at `layer_index`, in order:
    ///
    /// 1. every downstream weight gets `+= rate * delta[i] * status_j`,
    ///    with the pre-update status of `j`;
    /// 2. `propagation = Σ weights[j][i] * delta[i]` over the weights just
    ///    updated in step 1 — not their pre-update values. This ordering
    ///    departs from the textbook derivation but is kept for numeric
    ///    parity with the reference behavior;
    /// 3. `new_delta[j] = derivative(status_j) * propagation` and
    ///    `bias_j += rate * new_delta[j]`.
    ///
    /// `target` is accepted for interface symmetry with the output step and
    /// is unused. Returns `new_delta` (length = that layer's size) for the
    /// next step further upstream.
    ///
    /// # Panics
    /// Panics if a variable-shape network has fewer than 3 layers, or if
    /// `layer_index` is out of bounds.
    pub fn hidden_step(
        &self,
        network: &mut Network,
        layer_index: usize,
        _target: &[f64],
        delta: &[f64],
    ) -> Vec<f64> {
        self.check_depth(network);
        trace!("backpropagation hidden step on layer {layer_index}");
        let layer = network.layer_mut(layer_index);
        let mut new_delta = Vec::with_capacity(layer.len());
        for unit in layer.iter_mut() {
            let status = unit.status();
            for (weight, &d) in unit.weights.iter_mut().zip(delta) {
                *weight += self.rate * d * status;
            }
            let propagation: f64 = unit
                .weights
                .iter()
                .zip(delta)
                .map(|(&weight, &d)| weight * d)
                .sum();
            let unit_delta = self.activation.derivative(status) * propagation;
            unit.bias += self.rate * unit_delta;
            new_delta.push(unit_delta);
        }
        new_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_shape_depth_checked_at_construction() {
        let net = Network::fixed(&[2, 1]);
        let err = Backpropagation::new(&net, Activation::Sigmoid, 0.1).unwrap_err();
        assert_eq!(err, NetworkError::TooFewLayers { found: 2 });
    }

    #[test]
    fn variable_shape_depth_deferred_to_steps() {
        let net = Network::variable(&[2, 1]);
        assert!(Backpropagation::new(&net, Activation::Sigmoid, 0.1).is_ok());
    }

    #[test]
    #[should_panic(expected = "at least 3 layers")]
    fn variable_shape_depth_checked_per_call() {
        let mut net = Network::variable(&[2, 1]);
        let bp = Backpropagation::new(&net, Activation::Sigmoid, 0.1).unwrap();
        bp.output_step(&mut net, &[0.0]);
    }
}
