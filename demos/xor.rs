use neurite::activation::Activation;
use neurite::backprop::Backpropagation;
use neurite::network::Network;
use rand::{Rng, SeedableRng, rngs::StdRng};

const INPUTS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
const TARGETS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut net = Network::fixed(&[2, 3, 1]);
    for layer in net.layers_mut() {
        for unit in layer.iter_mut() {
            for weight in &mut unit.weights {
                *weight = rng.random_range(-1.0..1.0);
            }
        }
    }

    let act = Activation::Sigmoid;
    let bp = Backpropagation::new(&net, act, 0.5).expect("2-3-1 is deep enough");

    println!("training 2-3-1 on XOR...");

    for epoch in 0..=4000 {
        let mut squared_error = 0.0;
        for (input, &t) in INPUTS.iter().zip(&TARGETS) {
            let out = net.forward(input, act);
            squared_error += (out[0] - t).powi(2);

            let target = [t];
            let mut delta = bp.output_step(&mut net, &target);
            for layer in (0..net.num_layers() - 1).rev() {
                delta = bp.hidden_step(&mut net, layer, &target, &delta);
            }
        }

        if epoch % 400 == 0 {
            println!("epoch {epoch:>5}: squared error {squared_error:.6}");
        }
    }

    println!();
    for (input, &t) in INPUTS.iter().zip(&TARGETS) {
        let out = net.forward(input, act);
        println!(
            "{:?} -> {:.4} (target {})",
            input, out[0], t
        );
    }
}
