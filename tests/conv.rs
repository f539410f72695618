use neurite::accel::conv::{ConvolutionBackpropagation, FeatureMap, MapUnit};
use neurite::activation::FastActivation;
use neurite::approx::{F32_MAX_ERROR, approx_eq_f32};

#[test]
fn conv_output_step_sums_the_bias_over_the_whole_map() {
    // pre-activations all 0: activate = 0.5, delta = 0.5 everywhere,
    // bias += rate * sum = 0.1 * 4 * 0.5 = 0.2
    let mut layer = vec![MapUnit::new(2, 1, 0)];
    let target = vec![FeatureMap::from_data(2, vec![1.0; 4])];
    let conv = ConvolutionBackpropagation::new(FastActivation::Sigmoid, 0.1);

    let delta = conv.output_step(&mut layer, &target);
    assert_eq!(delta.len(), 1);
    assert!(delta[0].data.iter().all(|&d| approx_eq_f32(d, 0.5, F32_MAX_ERROR)));
    assert!(approx_eq_f32(layer[0].bias, 0.2, F32_MAX_ERROR));
}

#[test]
fn conv_output_step_is_per_pixel_raw_difference() {
    let mut layer = vec![MapUnit::new(1, 1, 0)];
    layer[0].map.data[0] = 0.3;
    let target = vec![FeatureMap::from_data(1, vec![0.25])];
    let conv = ConvolutionBackpropagation::new(FastActivation::Tanh, 1.0);

    let delta = conv.output_step(&mut layer, &target);
    let expected = 0.25 - 0.3f32.tanh();
    assert!(approx_eq_f32(delta[0].data[0], expected, F32_MAX_ERROR));
}

#[test]
fn conv_hidden_step_single_sample_by_hand() {
    // 1x1 delta map and 1x1 kernel collapse the loops so the ordering is
    // checkable: the propagated contribution must use the updated weight.
    let act = FastActivation::Tanh;
    let rate = 0.5f32;
    let mut layer = vec![MapUnit::new(1, 1, 1)];
    layer[0].map.data[0] = 0.3;
    layer[0].kernels[0].weights[0] = 0.2;
    let delta = vec![FeatureMap::from_data(1, vec![0.4])];

    let conv = ConvolutionBackpropagation::new(act, rate);
    let new_delta = conv.hidden_step(&mut layer, &delta);

    let sample = 0.3f32; // map value plus zero bias
    let updated_weight = 0.2 + rate * 0.4 * act.activate(sample);
    assert!(approx_eq_f32(
        layer[0].kernels[0].weights[0],
        updated_weight,
        F32_MAX_ERROR
    ));

    let propagation = updated_weight * 0.4 * act.derivative(sample);
    assert!(approx_eq_f32(new_delta[0], propagation, F32_MAX_ERROR));
    assert!(approx_eq_f32(layer[0].bias, rate * propagation, F32_MAX_ERROR));
}

#[test]
fn conv_hidden_step_is_deterministic() {
    let build = || {
        let mut unit = MapUnit::new(3, 2, 2);
        for (i, sample) in unit.map.data.iter_mut().enumerate() {
            *sample = (i as f32) * 0.1 - 0.4;
        }
        unit.bias = 0.05;
        for (k, kernel) in unit.kernels.iter_mut().enumerate() {
            for (i, weight) in kernel.weights.iter_mut().enumerate() {
                *weight = 0.01 * (i as f32 + 1.0) * (k as f32 + 1.0);
            }
        }
        vec![unit.clone(), unit]
    };
    let delta = vec![
        FeatureMap::from_data(2, vec![0.1, -0.2, 0.3, 0.0]),
        FeatureMap::from_data(2, vec![-0.1, 0.2, 0.0, 0.4]),
    ];

    let conv = ConvolutionBackpropagation::new(FastActivation::Sigmoid, 0.2);
    let mut first = build();
    let mut second = build();
    let out_first = conv.hidden_step(&mut first, &delta);
    let out_second = conv.hidden_step(&mut second, &delta);

    assert_eq!(out_first, out_second);
    assert_eq!(first, second);
    assert_eq!(out_first.len(), 2);
    // both units start identical, so their deltas must agree too
    assert_eq!(out_first[0], out_first[1]);
}
