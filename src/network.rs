//! Networks: ordered layers plus the topology tag.
//!
//! The tag records whether the shape was known when the network was built
//! ([`Topology::Fixed`]) or only at run time ([`Topology::Variable`]). It
//! exists purely for dispatch: fixed-shape networks get their layer-count
//! preconditions checked when a trainer is constructed, variable-shape
//! networks at the start of every training call.

use log::debug;
use thiserror::Error;

use crate::activation::Activation;
use crate::unit::Layer;

/// Whether the network shape was known at build time or only at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Shape fixed when the network was built.
    Fixed,
    /// Shape only known (and mutable) at run time.
    Variable,
}

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Backpropagation needs an input layer, at least one hidden layer and
    /// an output layer.
    #[error("backpropagation requires at least 3 layers, network has {found}")]
    TooFewLayers {
        /// Layer count of the offending network.
        found: usize,
    },
}

/// An ordered sequence of [`Layer`]s tagged with its [`Topology`].
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
    topology: Topology,
}

impl Network {
    /// Builds a fixed-shape network with the given layer sizes.
    ///
    /// Each unit's weight vector is sized to the next layer; the output
    /// layer's units carry no weights.
    #[must_use]
    pub fn fixed(sizes: &[usize]) -> Self {
        Self::with_topology(sizes, Topology::Fixed)
    }

    /// Builds a variable-shape network with the given initial layer sizes.
    #[must_use]
    pub fn variable(sizes: &[usize]) -> Self {
        Self::with_topology(sizes, Topology::Variable)
    }

    fn with_topology(sizes: &[usize], topology: Topology) -> Self {
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, &len)| {
                let fan_out = sizes.get(i + 1).copied().unwrap_or(0);
                Layer::new(len, fan_out)
            })
            .collect();
        debug!("built {topology:?} network with layer sizes {sizes:?}");
        Self { layers, topology }
    }

    /// The topology tag.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of layers.
    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// The layers as a slice.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The layers as a mutable slice.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// The layer at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    /// The layer at `index`, mutably.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn layer_mut(&mut self, index: usize) -> &mut Layer {
        &mut self.layers[index]
    }

    /// The output (last) layer.
    ///
    /// # Panics
    /// Panics on an empty network.
    #[must_use]
    pub fn output_layer(&self) -> &Layer {
        self.layers.last().expect("network has no layers")
    }

    /// The output (last) layer, mutably.
    ///
    /// # Panics
    /// Panics on an empty network.
    pub fn output_layer_mut(&mut self) -> &mut Layer {
        self.layers.last_mut().expect("network has no layers")
    }

    /// Appends a layer to a variable-shape network.
    ///
    /// # Panics
    /// Panics on a fixed-shape network; its shape is sealed at build time.
    pub fn push_layer(&mut self, layer: Layer) {
        assert_eq!(
            self.topology,
            Topology::Variable,
            "fixed-shape networks cannot grow"
        );
        self.layers.push(layer);
    }

    /// Runs a forward pass, caching every unit's pre-activation sum.
    ///
    /// Input-layer statuses are set straight from `input`; each subsequent
    /// unit's status is the weighted sum of the upstream layer's activated
    /// outputs. Returns the output layer's activated values.
    ///
    /// # Panics
    /// Panics if `input` length differs from the input layer's length.
    pub fn forward(&mut self, input: &[f64], act: Activation) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.layers[0].len(),
            "input length does not match the input layer"
        );
        for (unit, &x) in self.layers[0].iter_mut().zip(input) {
            unit.set_status(x);
        }
        for l in 1..self.layers.len() {
            let (upstream, rest) = self.layers.split_at_mut(l);
            let upstream = &upstream[l - 1];
            let current = &mut rest[0];
            let outputs: Vec<f64> = upstream.iter().map(|u| u.output(act)).collect();
            for (i, unit) in current.iter_mut().enumerate() {
                let sum = upstream
                    .iter()
                    .zip(&outputs)
                    .map(|(u, &out)| out * u.weights[i])
                    .sum();
                unit.set_status(sum);
            }
        }
        self.output_layer().iter().map(|u| u.output(act)).collect()
    }
}
