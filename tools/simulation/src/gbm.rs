//! Geometric Brownian motion price paths
//!
//! Standard-normal shocks come from a Box-Muller transform over the seeded
//! uniform generator, so a given seed always produces the same path.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Simulate a geometric Brownian price path
///
/// `s0` initial price, `mu` drift, `sigma` volatility, `horizon` in years,
/// `steps` number of increments.
pub fn geo_brownian(
    s0: f64,
    mu: f64,
    sigma: f64,
    horizon: f64,
    steps: usize,
    seed: u64,
) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dt = horizon / steps as f64;
    let drift = (mu - 0.5 * sigma * sigma) * dt;
    let diffusion = sigma * dt.sqrt();

    let mut path = Vec::with_capacity(steps);
    let mut price = s0;
    for _ in 0..steps {
        price *= (drift + diffusion * standard_normal(&mut rng)).exp();
        path.push(price);
    }
    path
}

/// One standard-normal sample via Box-Muller
fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
