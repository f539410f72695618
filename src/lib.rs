//! neurite: a minimal neural-network training engine in Rust.
//!
//! Neuron units, activation functions, per-layer output-selection
//! strategies, and two supervised update algorithms — single-layer error
//! correction and full multi-layer backpropagation — with an optional
//! data-parallel execution path and a convolutional variant.
//!
//! # Features
//!
//! - Fixed-shape and variable-shape networks behind one topology tag and a
//!   single shared algorithm path.
//! - Winner-take-all (elite) and pass-through output selection.
//! - `parallel` feature: rayon-backed per-unit fan-out for the accelerated
//!   steps, with a behaviorally identical sequential fallback.
//!
//! # Goals
//!
//! - Keep the training-step algebra explicit and auditable; no autograd
//!   graph, no optimizer zoo.
//! - Leave layer/unit ownership with the caller; trainers hold a learning
//!   rate and an activation, never a layer borrow beyond one call.
//!
//! # Modules
//!
//! - [`activation`] — activate/derivative pairs and the fast-math family.
//! - [`unit`] — units, layers and the shared layer-access capability.
//! - [`network`] — layer containers, topology tags, construction errors.
//! - [`selection`] — pass-through and elite output selection.
//! - [`correction`] — single-layer error correction.
//! - [`backprop`] — multi-layer backpropagation.
//! - [`accel`] — data-parallel and convolutional variants.
//! - [`approx`] — float comparison helpers for tests.
//!
//! # Example
//!
//! ```rust
//! use neurite::activation::Activation;
//! use neurite::backprop::Backpropagation;
//! use neurite::network::Network;
//!
//! let mut net = Network::fixed(&[2, 2, 1]);
//! let bp = Backpropagation::new(&net, Activation::Sigmoid, 0.5).unwrap();
//!
//! // One training step on one example: forward, then walk backward.
//! net.forward(&[1.0, 0.0], Activation::Sigmoid);
//! let target = [1.0];
//! let mut delta = bp.output_step(&mut net, &target);
//! for layer in (0..net.num_layers() - 1).rev() {
//!     delta = bp.hidden_step(&mut net, layer, &target, &delta);
//! }
//! ```

pub mod accel;
pub mod activation;
pub mod approx;
pub mod backprop;
pub mod correction;
pub mod network;
pub mod selection;
pub mod unit;
