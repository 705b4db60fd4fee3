//! A direct rendition of the Feistel shuffle from `ethereum/research`, used as the benchmark of
//! correctness for `Optimized`.
use crate::params::{cycle_walk, DomainParams};
use safe_arith::SafeArith;
use shuffle_hashing::feistel_round;
use shuffle_types::{check_index, Deshuffle, Error, Seed, Shuffle, U256};

/// Reference Feistel strategy. Recomputes every round function input from scratch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reference;

impl Shuffle for Reference {
    fn shuffle(&self, index: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error> {
        check_index(index, domain)?;
        let params = DomainParams::new(domain, rounds)?;

        cycle_walk(index, &params, |x| {
            let (mut left, mut right) = params.split(x)?;
            for round in 0..rounds {
                let next_right = left
                    .safe_add(feistel_round(round, right, &seed, domain)?)?
                    .safe_rem(params.side)?;
                left = right;
                right = next_right;
            }
            params.join(left, right)
        })
    }
}

impl Deshuffle for Reference {
    fn deshuffle(
        &self,
        shuffled: U256,
        domain: U256,
        seed: Seed,
        rounds: u8,
    ) -> Result<U256, Error> {
        check_index(shuffled, domain)?;
        let params = DomainParams::new(domain, rounds)?;

        cycle_walk(shuffled, &params, |x| {
            let (mut left, mut right) = params.split(x)?;
            for round in (0..rounds).rev() {
                let mixed = feistel_round(round, left, &seed, domain)?.safe_rem(params.side)?;
                let prev_left = right
                    .safe_add(params.side)?
                    .safe_sub(mixed)?
                    .safe_rem(params.side)?;
                right = left;
                left = prev_left;
            }
            params.join(left, right)
        })
    }
}
