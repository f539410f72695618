//! Convolutional variant of the accelerated backpropagation steps.
//!
//! Generalizes the per-unit updates to 2-D feature maps in single
//! precision. Each [`MapUnit`] owns one square map of cached pre-activation
//! samples, one bias for the whole map, and one fixed-size [`Kernel`] per
//! downstream feature map. The hidden step fans out one task per input
//! map unit, mirroring the dense accelerated path.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::trace;

use crate::activation::FastActivation;

/// A square 2-D value grid in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    side: usize,
    /// Samples, `side * side` of them, row-major.
    pub data: Vec<f32>,
}

impl FeatureMap {
    /// Creates a zeroed `side x side` map.
    #[must_use]
    pub fn new(side: usize) -> Self {
        Self {
            side,
            data: vec![0.0; side * side],
        }
    }

    /// Wraps existing samples.
    ///
    /// # Panics
    /// Panics if `data` is not `side * side` long.
    #[must_use]
    pub fn from_data(side: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), side * side, "feature map shape mismatch");
        Self { side, data }
    }

    /// Edge length of the map.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// The sample at (`row`, `col`).
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.side + col]
    }
}

/// A square convolution kernel for one (input-feature, output-feature)
/// pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    /// Weights, `size * size` of them, row-major.
    pub weights: Vec<f32>,
}

impl Kernel {
    /// Creates a zeroed `size x size` kernel.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            weights: vec![0.0; size * size],
        }
    }

    /// Edge length of the kernel.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The weight at (`row`, `col`).
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }

    fn at_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        &mut self.weights[row * self.size + col]
    }
}

/// One feature map playing the role a [`Unit`](crate::unit::Unit) plays in
/// the dense paths: cached pre-activation samples, a single bias for the
/// whole map, and one kernel per downstream feature map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapUnit {
    /// Additive bias, shared by the whole map.
    pub bias: f32,
    /// Cached pre-activation samples.
    pub map: FeatureMap,
    /// One kernel per downstream feature map.
    pub kernels: Vec<Kernel>,
}

impl MapUnit {
    /// Creates a zeroed map unit with `fan_out` kernels of edge
    /// `kernel_size`.
    #[must_use]
    pub fn new(side: usize, kernel_size: usize, fan_out: usize) -> Self {
        Self {
            bias: 0.0,
            map: FeatureMap::new(side),
            kernels: (0..fan_out).map(|_| Kernel::new(kernel_size)).collect(),
        }
    }
}

/// Convolutional backpropagation trainer over feature-map layers.
#[derive(Debug, Clone, Copy)]
pub struct ConvolutionBackpropagation {
    rate: f32,
    activation: FastActivation,
}

impl ConvolutionBackpropagation {
    /// Creates a convolutional trainer with a fixed learning rate.
    #[must_use]
    pub fn new(activation: FastActivation, rate: f32) -> Self {
        Self { rate, activation }
    }

    /// Output step over feature maps, raw-difference form.
    ///
    /// Per output map `i` and pixel `p`:
    /// `delta[i][p] = target[i][p] - activate(map_i[p])`, then ONE bias
    /// update per feature map, summed over the whole map rather than per
    /// pixel: `bias_i += rate * Σ_p delta[i][p]`.
    ///
    /// `target[i]` must match map `i`'s extent (caller guarantee).
    pub fn output_step(&self, layer: &mut [MapUnit], target: &[FeatureMap]) -> Vec<FeatureMap> {
        trace!("convolution output step over {} maps", layer.len());
        layer
            .iter_mut()
            .zip(target)
            .map(|(unit, target_map)| {
                let data: Vec<f32> = unit
                    .map
                    .data
                    .iter()
                    .zip(&target_map.data)
                    .map(|(&sample, &t)| t - self.activation.activate(sample))
                    .collect();
                unit.bias += self.rate * data.iter().sum::<f32>();
                FeatureMap::from_data(target_map.side(), data)
            })
            .collect()
    }

    /// Hidden step over feature maps, one task per input map unit.
    ///
    /// For each input unit, each output feature `i`, each spatial offset
    /// `p` of `delta[i]` and each in-kernel offset `(k, l)`: sample the
    /// input map's pre-activation at the displaced position plus bias,
    /// update the kernel weight `+= rate * delta[i][p] * activate(sample)`,
    /// and accumulate the derivative-weighted propagated contribution
    /// `weight * delta[i][p] * derivative(sample)` into the unit's new
    /// delta. The unit's single bias then gets `+= rate * new_delta`.
    ///
    /// Valid-correlation geometry: every input map's side must be at least
    /// `delta side + kernel size - 1` (caller guarantee).
    pub fn hidden_step(&self, layer: &mut [MapUnit], delta: &[FeatureMap]) -> Vec<f32> {
        trace!("convolution hidden step over {} maps", layer.len());
        let rate = self.rate;
        let activation = self.activation;
        let step = move |unit: &mut MapUnit| -> f32 {
            let mut propagation = 0.0f32;
            let bias = unit.bias;
            for (delta_map, kernel) in delta.iter().zip(&mut unit.kernels) {
                debug_assert!(
                    unit.map.side() + 1 >= delta_map.side() + kernel.size(),
                    "input map too small for delta extent and kernel"
                );
                for (p, &d) in delta_map.data.iter().enumerate() {
                    let row = p / delta_map.side();
                    let col = p % delta_map.side();
                    for k in 0..kernel.size() {
                        for l in 0..kernel.size() {
                            let sample = unit.map.at(row + k, col + l) + bias;
                            let weight = kernel.at_mut(k, l);
                            *weight += rate * d * activation.activate(sample);
                            propagation += *weight * d * activation.derivative(sample);
                        }
                    }
                }
            }
            unit.bias += rate * propagation;
            propagation
        };

        #[cfg(feature = "parallel")]
        {
            layer.par_iter_mut().map(step).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            layer.iter_mut().map(step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_indexing_is_row_major() {
        let mut kernel = Kernel::new(2);
        kernel.weights = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(kernel.at(0, 1), 2.0);
        assert_eq!(kernel.at(1, 0), 3.0);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn feature_map_rejects_bad_extent() {
        let _ = FeatureMap::from_data(2, vec![0.0; 3]);
    }
}
