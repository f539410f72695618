//! Per-layer output selection strategies.
//!
//! A selection strategy maps raw per-unit state to the externally observed
//! layer output. Instances are constructed per evaluation, borrow the layer
//! for that evaluation only, and carry no other state.
//!
//! Two strategies exist: [`NoSelection`] passes every unit's activated
//! output through unchanged; [`EliteSelection`] is winner-take-all, showing
//! only the single highest-scoring unit and suppressing the rest to the
//! activation's declared range minimum.

use crate::activation::Activation;
use crate::unit::LayerAccess;

/// Which strategy to apply, chosen once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Identity pass-through.
    NoSelection,
    /// Winner-take-all.
    Elite,
}

impl SelectionKind {
    /// Evaluates a layer under this strategy.
    pub fn evaluate<L: LayerAccess + ?Sized>(self, layer: &L, act: Activation) -> LayerView<'_, L> {
        match self {
            Self::NoSelection => LayerView::Pass(NoSelection::new(layer, act)),
            Self::Elite => LayerView::Elite(EliteSelection::new(layer, act)),
        }
    }
}

/// One evaluation of a layer under a chosen [`SelectionKind`].
#[derive(Debug)]
pub enum LayerView<'a, L: ?Sized> {
    /// Pass-through view.
    Pass(NoSelection<'a, L>),
    /// Winner-take-all view.
    Elite(EliteSelection<'a, L>),
}

impl<L: LayerAccess + ?Sized> LayerView<'_, L> {
    /// The observed output of the unit at `i`.
    #[must_use]
    pub fn output(&self, i: usize) -> f64 {
        match self {
            Self::Pass(view) => view.output(i),
            Self::Elite(view) => view.output(i),
        }
    }
}

/// Identity pass-through: index `i` yields `activate(status_i + bias_i)`.
#[derive(Debug)]
pub struct NoSelection<'a, L: ?Sized> {
    layer: &'a L,
    activation: Activation,
}

impl<'a, L: LayerAccess + ?Sized> NoSelection<'a, L> {
    /// Borrows `layer` for one evaluation.
    pub fn new(layer: &'a L, activation: Activation) -> Self {
        Self { layer, activation }
    }

    /// The activated output of the unit at `i`.
    #[must_use]
    pub fn output(&self, i: usize) -> f64 {
        self.layer.unit(i).output(self.activation)
    }
}

/// Winner-take-all: only the highest-scoring unit is observable.
///
/// Construction scans the layer once, scoring each unit as `status + bias`
/// and recording the index of the strict maximum. The comparison is a
/// strict greater-than, so on ties the lowest index wins and later equal
/// scores never replace an earlier maximum.
#[derive(Debug)]
pub struct EliteSelection<'a, L: ?Sized> {
    layer: &'a L,
    activation: Activation,
    winner: usize,
}

impl<'a, L: LayerAccess + ?Sized> EliteSelection<'a, L> {
    /// Scans `layer` and records the winning index.
    ///
    /// # Panics
    /// Panics on an empty layer.
    pub fn new(layer: &'a L, activation: Activation) -> Self {
        let mut winner = 0;
        let mut max = layer.unit(0).status() + layer.unit(0).bias;
        for i in 1..layer.len() {
            let score = layer.unit(i).status() + layer.unit(i).bias;
            if score > max {
                winner = i;
                max = score;
            }
        }
        Self {
            layer,
            activation,
            winner,
        }
    }

    /// Index of the recorded winner.
    #[must_use]
    pub fn winner(&self) -> usize {
        self.winner
    }

    /// The activated output at the winning index, the activation's range
    /// minimum everywhere else.
    #[must_use]
    pub fn output(&self, i: usize) -> f64 {
        if i == self.winner {
            self.layer.unit(i).output(self.activation)
        } else {
            self.activation.range_min()
        }
    }
}
