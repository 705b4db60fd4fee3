use crate::check_domain;
use shuffle_hashing::SwapOrNotRoundHasher;
use shuffle_types::{Error, Seed, Shuffle, U256};

/// Optimized swap-or-not strategy.
///
/// Once the domain is validated every value fits in a `u64`, so rounds run on native integers
/// with a hash preimage that already holds the seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Optimized;

impl Shuffle for Optimized {
    fn shuffle(&self, index: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error> {
        check_domain(index, domain)?;
        let list_size = domain.as_u64();
        let mut index = index.as_u64();

        let mut hasher = SwapOrNotRoundHasher::new(&seed);
        for round in 0..rounds {
            hasher.set_round(round);
            let pivot = hasher.pivot(list_size)?;
            // `pivot` and `index` are both below `list_size`, so neither branch wraps.
            let flip = if pivot >= index {
                pivot - index
            } else {
                pivot + list_size - index
            };
            let position = index.max(flip);
            if hasher.decision(position)? {
                index = flip;
            }
        }
        Ok(U256::from(index))
    }
}
