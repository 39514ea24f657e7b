//! Uniform random sampling for the Monte Carlo integrator.
//!
//! There is no process-wide generator: every render worker owns a `Sampler`
//! of its own, seeded from the render seed and the worker's index, so workers
//! never contend for (or race on) shared generator state and a render is
//! reproducible for a given seed and worker count.

use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::vec3::{unit_vector, Vec3};

/// Mixed into the render seed once per worker index so that neighbouring
/// workers don't draw correlated streams.
const WORKER_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Sampler {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The sampler for render worker number `worker`.
    pub fn for_worker(seed: u64, worker: usize) -> Self {
        Sampler::new(seed ^ (worker as u64 + 1).wrapping_mul(WORKER_STRIDE))
    }

    /// A uniform double in `[0,1)`.
    pub fn random_double(&mut self) -> f64 {
        self.rng.gen()
    }

    /// A uniform double in `[min,max)`.
    pub fn random_double_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.random_double()
    }

    /// A vector whose lanes are drawn independently from `[min,max)`.
    pub fn random_vector(&mut self, min: f64, max: f64) -> Vec3 {
        min + (max - min) * self.rng.gen::<Vec3>()
    }

    /// A direction drawn uniformly from the unit sphere.
    ///
    /// Points are rejection-sampled from the unit ball before normalizing;
    /// normalizing points from the enclosing cube would favour its diagonals.
    pub fn random_unit_vector(&mut self) -> Vec3 {
        loop {
            let v = self.random_vector(-1., 1.);
            let len2 = v.squared_length();
            if len2 > 1e-12 && len2 < 1. {
                return unit_vector(v);
            }
        }
    }

    /// A point in the unit disk, uniform by area, as `(radius, theta)`.
    pub fn random_polar_in_unit_disk(&mut self) -> (f64, f64) {
        let theta = self.random_double() * 2. * std::f64::consts::PI;
        let radius = self.random_double().sqrt();
        (radius, theta)
    }
}
