use crate::check_domain;
use safe_arith::SafeArith;
use shuffle_hashing::{swap_or_not_decision, swap_or_not_pivot};
use shuffle_types::{Error, Seed, Shuffle, U256};
use std::cmp::max;

/// Reference swap-or-not strategy, a line-by-line rendition of Ethereum's
/// `compute_shuffled_index` with Keccak-256 in place of SHA-256.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reference;

impl Shuffle for Reference {
    fn shuffle(&self, index: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error> {
        check_domain(index, domain)?;

        let mut index = index;
        for round in 0..rounds {
            let pivot = swap_or_not_pivot(round, &seed, domain)?;
            let flip = pivot
                .safe_add(domain)?
                .safe_sub(index)?
                .safe_rem(domain)?;
            let position = max(index, flip);
            if swap_or_not_decision(round, position, &seed)? {
                index = flip;
            }
        }
        Ok(index)
    }
}
