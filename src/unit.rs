//! Neuron units and the layers that hold them.
//!
//! A [`Unit`] owns its input-side state: a bias, one weight per downstream
//! connection, and the cached pre-activation sum (`status`) written by the
//! most recent forward pass. A [`Layer`] is an ordered run of units.
//!
//! Update algorithms and the elite scan are written against the
//! [`LayerAccess`] capability (length plus indexed unit access), which both
//! [`Layer`] and plain `[Unit]` slices provide, so fixed- and variable-shape
//! networks share a single code path.

use core::ops::{Index, IndexMut};

use crate::activation::Activation;

/// A neuron: bias, downstream weights and the cached pre-activation sum.
///
/// `weights.len()` must equal the size of the layer this unit feeds into;
/// that consistency is a caller guarantee, never re-validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Additive bias applied on top of `status`.
    pub bias: f64,
    /// One weight per unit in the downstream layer.
    pub weights: Vec<f64>,
    status: f64,
}

impl Unit {
    /// Creates a zeroed unit with `fan_out` downstream weights.
    #[must_use]
    pub fn new(fan_out: usize) -> Self {
        Self {
            bias: 0.0,
            weights: vec![0.0; fan_out],
            status: 0.0,
        }
    }

    /// The cached pre-activation sum.
    #[must_use]
    pub fn status(&self) -> f64 {
        self.status
    }

    /// Caches a new pre-activation sum.
    pub fn set_status(&mut self, status: f64) {
        self.status = status;
    }

    /// The activated output: `act.activate(status + bias)`.
    #[must_use]
    pub fn output(&self, act: Activation) -> f64 {
        act.activate(self.status + self.bias)
    }
}

/// An ordered sequence of [`Unit`]s.
///
/// One concrete container serves both topology tags; whether a layer's
/// length was fixed at build time or chosen at run time is tracked by the
/// owning [`Network`](crate::network::Network), purely for dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    units: Vec<Unit>,
}

impl Layer {
    /// Creates `len` zeroed units, each with `fan_out` downstream weights.
    #[must_use]
    pub fn new(len: usize, fan_out: usize) -> Self {
        Self {
            units: (0..len).map(|_| Unit::new(fan_out)).collect(),
        }
    }

    /// Number of units in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the layer holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The units as a slice.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The units as a mutable slice.
    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Appends a unit (variable-shape layers grow at run time).
    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Iterates over the units.
    pub fn iter(&self) -> core::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    /// Iterates mutably over the units.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Unit> {
        self.units.iter_mut()
    }
}

impl Index<usize> for Layer {
    type Output = Unit;

    fn index(&self, i: usize) -> &Unit {
        &self.units[i]
    }
}

impl IndexMut<usize> for Layer {
    fn index_mut(&mut self, i: usize) -> &mut Unit {
        &mut self.units[i]
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Unit;
    type IntoIter = core::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

impl<'a> IntoIterator for &'a mut Layer {
    type Item = &'a mut Unit;
    type IntoIter = core::slice::IterMut<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter_mut()
    }
}

/// The layer capability the selection and update algorithms are written
/// against: a length and indexed unit access.
///
/// Implemented by [`Layer`] and by `[Unit]`, so ordered-container and
/// extent-based access share one scan and agree bit-for-bit.
pub trait LayerAccess {
    /// Number of units.
    fn len(&self) -> usize;

    /// The unit at `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    fn unit(&self, i: usize) -> &Unit;

    /// Whether there are no units.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LayerAccess for Layer {
    fn len(&self) -> usize {
        self.units.len()
    }

    fn unit(&self, i: usize) -> &Unit {
        &self.units[i]
    }
}

impl LayerAccess for [Unit] {
    fn len(&self) -> usize {
        <[Unit]>::len(self)
    }

    fn unit(&self, i: usize) -> &Unit {
        &self[i]
    }
}
