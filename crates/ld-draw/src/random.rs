//! Random sources and winner selection
//!
//! Selection goes through [`RandomSource`] so that tests can inject a seeded
//! generator while production draws use OS entropy.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ld_stage::{Participant, RowIndex};

use crate::error::DrawError;
use crate::participant::ParticipantSet;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on empty range");
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Reproducible source for tests and replays
pub type SeededSource = RngSource<ChaCha8Rng>;

/// Non-deterministic source for live draws
pub type EntropySource = RngSource<StdRng>;

impl SeededSource {
    pub fn seeded(seed: u64) -> Self {
        RngSource(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl EntropySource {
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_os_rng())
    }
}

/// Winner selection over a participant set
///
/// Stateless: everything it needs is passed per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl RandomSelector {
    /// Uniform pick over `participants \ excluded`
    pub fn select_one<'a>(
        participants: &'a ParticipantSet,
        excluded: &BTreeSet<RowIndex>,
        rng: &mut dyn RandomSource,
    ) -> Result<&'a Participant, DrawError> {
        let eligible: Vec<&Participant> = participants
            .iter()
            .filter(|p| !excluded.contains(&p.row))
            .collect();

        if eligible.is_empty() {
            return Err(DrawError::ExhaustedPool);
        }

        Ok(eligible[rng.index(eligible.len())])
    }

    /// Pick `n` participants
    ///
    /// Without replacement every result is distinct by identity and outside
    /// `excluded`; requesting more than are eligible fails up front. With
    /// replacement each pick is an independent uniform draw over the whole
    /// set and `excluded` is ignored.
    pub fn select_many(
        participants: &ParticipantSet,
        n: usize,
        excluded: &BTreeSet<RowIndex>,
        with_replacement: bool,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Participant>, DrawError> {
        if participants.is_empty() {
            return Err(DrawError::NoParticipants);
        }

        if with_replacement {
            let all = participants.as_slice();
            return Ok((0..n).map(|_| all[rng.index(all.len())].clone()).collect());
        }

        let mut pool: Vec<&Participant> = participants
            .iter()
            .filter(|p| !excluded.contains(&p.row))
            .collect();

        if n > pool.len() {
            return Err(DrawError::InsufficientParticipants {
                requested: n,
                available: pool.len(),
            });
        }

        // Partial Fisher-Yates: the first n slots end up as the sample
        for i in 0..n {
            let j = i + rng.index(pool.len() - i);
            pool.swap(i, j);
        }

        Ok(pool.into_iter().take(n).cloned().collect())
    }
}
