/*
Copyright (c) 2015, Intel Corporation
Copyright (c) 2025, Christian Asch

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions
are met:

* Redistributions of source code must retain the above copyright
      notice, this list of conditions and the following disclaimer.
* Redistributions in binary form must reproduce the above
      copyright notice, this list of conditions and the following
      disclaimer in the documentation and/or other materials provided
      with the distribution.
* Neither the name of Intel Corporation nor the names of its
      contributors may be used to endorse or promote products
      derived from this software without specific prior written
      permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
"AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS
FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE
COPYRIGHT OWNER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT,
INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING,
BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT
LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN
ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
POSSIBILITY OF SUCH DAMAGE.
*/

//! Utilities shared by the Rust kernels: a reproducible random source
//! and wall-clock helpers.

use std::time::{Duration, Instant};

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1442695040888963407;
const LCG_SEED: u64 = 27182818285;

/// 64-bit linear congruential generator.
///
/// Every kernel owns its own instance, so two initializations with the same
/// seed produce the same sequence no matter what else ran in the process.
#[derive(Debug, Clone)]
pub struct RandomDraw {
    lcg_seed: u64,
}

impl Default for RandomDraw {
    fn default() -> Self {
        RandomDraw { lcg_seed: LCG_SEED }
    }
}

impl RandomDraw {
    pub fn new(seed: u64) -> Self {
        let mut draw = RandomDraw::default();
        draw.lcg_init(seed);
        draw
    }

    /// Restart the sequence. The seed is mixed with the default state so
    /// that small seeds do not produce a run of tiny first values.
    pub fn lcg_init(&mut self, seed: u64) {
        self.lcg_seed = LCG_SEED ^ seed.wrapping_mul(LCG_A);
    }

    /// Uniform draw in `[0, 1)` built from the top 53 bits of the state.
    pub fn uniform(&mut self) -> f64 {
        self.lcg_seed = self.lcg_seed.wrapping_mul(LCG_A).wrapping_add(LCG_C);
        (self.lcg_seed >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Duration in seconds, computed the way the kernels report their timings.
pub fn seconds(dt: Duration) -> f64 {
    let dtt: u64 = dt.as_secs() * 1_000_000_000 + dt.subsec_nanos() as u64;
    dtt as f64 * 1.0e-9
}

/// Seconds elapsed since `t0`.
pub fn wtime_since(t0: Instant) -> f64 {
    seconds(t0.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomDraw::new(71594);
        let mut b = RandomDraw::new(71594);
        for _ in 0..100 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RandomDraw::new(1);
        let mut b = RandomDraw::new(2);
        let same = (0..16)
            .filter(|_| a.uniform().to_bits() == b.uniform().to_bits())
            .count();
        assert!(same < 16);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut draw = RandomDraw::new(42);
        for _ in 0..10_000 {
            let u = draw.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn reinit_restarts_sequence() {
        let mut draw = RandomDraw::new(7);
        let first: Vec<u64> = (0..4).map(|_| draw.uniform().to_bits()).collect();
        draw.lcg_init(7);
        let again: Vec<u64> = (0..4).map(|_| draw.uniform().to_bits()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn seconds_matches_nanos() {
        let dt = Duration::new(2, 500_000_000);
        assert!((seconds(dt) - 2.5).abs() < 1e-12);
    }
}
