//! Deterministic fixture traces shaped like optimizer output.
//!
//! These only exist so the demo binary and the tests have something to plot.
//! The state contracts toward zero under bounded uniform perturbations. The
//! cost is the squared state. The best columns follow the lowest cost seen.

use ndarray::{Array2, Array3};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::results::{Field, Results, FIELD_COUNT};

/// Algorithm keys the demo binary generates.
pub const DEMO_ALGORITHMS: [&str; 2] = ["RW", "GD"];

const PERTURBATION: f64 = 0.4;

/// One trace array per key, each `[runs, iterations, FIELD_COUNT]`.
pub fn synthetic_results(keys: &[&str], runs: usize, iterations: usize, seed: u64) -> Results {
    keys.iter()
        .enumerate()
        .map(|(k, key)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
            // Later keys settle faster so the demo panels look different.
            let contraction = (0.99 - 0.03 * k as f64).max(0.5);
            let trace = synthetic_trace(runs, iterations, contraction, &mut rng);
            (key.to_string(), trace)
        })
        .collect()
}

pub fn synthetic_trace(runs: usize, iterations: usize, contraction: f64, rng: &mut StdRng) -> Array3<f64> {
    let mut data = Array3::<f64>::zeros((runs, iterations, FIELD_COUNT));

    for run in 0..runs {
        let steps = ndarray::Array1::random_using(iterations, Uniform::new(-PERTURBATION, PERTURBATION), rng);
        let mut state: f64 = rng.gen_range(-5.0..5.0);
        let mut best_state = state;
        let mut best_cost = f64::INFINITY;

        for (i, step) in steps.iter().enumerate() {
            if i > 0 {
                state = contraction * state + step;
            }
            let cost = state * state;
            if cost <= best_cost {
                best_cost = cost;
                best_state = state;
            }

            data[[run, i, Field::Iteration.index()]] = i as f64;
            data[[run, i, Field::CurrentState.index()]] = state;
            data[[run, i, Field::BestState.index()]] = best_state;
            data[[run, i, Field::CurrentCost.index()]] = cost;
            data[[run, i, Field::BestCost.index()]] = best_cost;
        }
    }

    data
}

/// Bumpy bowl sampled on a `resolution` x `resolution` grid over `extent` in both axes.
pub fn cost_surface(resolution: usize, extent: (f64, f64)) -> Array2<f64> {
    let span = extent.1 - extent.0;
    let step = if resolution > 1 {
        span / (resolution - 1) as f64
    } else {
        0.0
    };
    Array2::from_shape_fn((resolution, resolution), |(r, c)| {
        let x = extent.0 + c as f64 * step;
        let y = extent.0 + r as f64 * step;
        x * x + y * y + 2.0 * (3.0 * x).sin() * (3.0 * y).cos()
    })
}
