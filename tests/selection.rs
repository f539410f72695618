use neurite::activation::Activation;
use neurite::approx::{F64_MAX_ERROR, approx_eq};
use neurite::selection::{EliteSelection, NoSelection, SelectionKind};
use neurite::unit::Layer;

fn layer_with_scores(scores: &[f64]) -> Layer {
    let mut layer = Layer::new(scores.len(), 0);
    for (i, &score) in scores.iter().enumerate() {
        layer[i].set_status(score);
    }
    layer
}

#[test]
fn no_selection_passes_every_unit_through() {
    let mut layer = layer_with_scores(&[-1.0, 0.0, 2.5]);
    layer[2].bias = 0.5;
    let view = NoSelection::new(&layer, Activation::Sigmoid);
    for i in 0..layer.len() {
        assert_eq!(view.output(i), layer[i].output(Activation::Sigmoid));
    }
}

#[test]
fn elite_shows_only_the_maximal_unit() {
    let layer = layer_with_scores(&[0.1, 3.0, -2.0, 1.5]);
    let view = EliteSelection::new(&layer, Activation::Sigmoid);
    assert_eq!(view.winner(), 1);
    for i in 0..layer.len() {
        if i == 1 {
            assert_eq!(view.output(i), layer[i].output(Activation::Sigmoid));
        } else {
            assert_eq!(view.output(i), Activation::Sigmoid.range_min());
        }
    }
}

#[test]
fn elite_scores_status_plus_bias() {
    // unit 0 has the larger status, unit 1 wins on status + bias
    let mut layer = layer_with_scores(&[1.0, 0.5]);
    layer[1].bias = 1.0;
    let view = EliteSelection::new(&layer, Activation::Tanh);
    assert_eq!(view.winner(), 1);
    assert_eq!(view.output(0), -1.0);
}

#[test]
fn elite_ties_break_toward_the_lowest_index() {
    let layer = layer_with_scores(&[0.5, 2.0, 2.0, 2.0]);
    let view = EliteSelection::new(&layer, Activation::Sigmoid);
    assert_eq!(view.winner(), 1);
}

#[test]
fn elite_single_unit_layer() {
    let layer = layer_with_scores(&[-4.0]);
    let view = EliteSelection::new(&layer, Activation::Tanh);
    assert_eq!(view.winner(), 0);
    assert!(approx_eq(
        view.output(0),
        (-4.0f64).tanh(),
        F64_MAX_ERROR
    ));
}

#[test]
fn ordered_container_and_slice_scans_agree() {
    let patterns: [&[f64]; 4] = [
        &[0.0, 0.0, 0.0],
        &[1.0, -1.0, 1.0],
        &[-3.0, -2.0, -1.0],
        &[5.0, 5.0, 4.0],
    ];
    for scores in patterns {
        let layer = layer_with_scores(scores);
        let by_layer = EliteSelection::new(&layer, Activation::Sigmoid);
        let by_slice = EliteSelection::new(layer.units(), Activation::Sigmoid);
        assert_eq!(by_layer.winner(), by_slice.winner(), "scores {scores:?}");
        for i in 0..scores.len() {
            assert_eq!(by_layer.output(i), by_slice.output(i));
        }
    }
}

#[test]
fn selection_kind_resolves_once_at_setup() {
    let layer = layer_with_scores(&[0.0, 1.0]);
    let pass = SelectionKind::NoSelection.evaluate(&layer, Activation::Sigmoid);
    let elite = SelectionKind::Elite.evaluate(&layer, Activation::Sigmoid);
    assert_eq!(pass.output(0), layer[0].output(Activation::Sigmoid));
    assert_eq!(elite.output(0), Activation::Sigmoid.range_min());
    assert_eq!(elite.output(1), layer[1].output(Activation::Sigmoid));
}
