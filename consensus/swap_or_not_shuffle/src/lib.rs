//! Provides swap-or-not shuffling functions matching Ethereum's `compute_shuffled_index`, keyed
//! with Keccak-256.
//!
//! See the phase 0 beacon chain `compute_shuffled_index` for the published algorithm, and
//! "An Enciphering Scheme Based on a Card Shuffle" by Hoang, Morris and Rogaway for the
//! construction.
//!
//! The functions exported by this crate:
//!
//! - `swap_or_not_shuffle`: given a single index, computes the index resulting from a shuffle.
//! - `swap_or_not_shuffle_optimized`: identical results, computed with native integers.
//! - `shuffle_list`: computes the entire permutation. Runs in less time than it takes to run
//!   `swap_or_not_shuffle` on each index.
//!
//! In general, use `swap_or_not_shuffle_optimized` to calculate the shuffling of a small subset
//! of a much larger domain.
mod optimized;
mod reference;
mod shuffle_list;

pub use optimized::Optimized;
pub use reference::Reference;
pub use shuffle_list::{inverse_shuffle_list, shuffle_list};
pub use shuffle_types::{Error, Seed, Shuffle, U256};

use safe_arith::SafeArith;
use shuffle_types::check_index;

/// The largest domain which can be shuffled.
///
/// The decision hash encodes `position / 256` in 4 bytes, so positions below `2^40` are the
/// only ones which hash unambiguously.
pub const MAX_SWAP_OR_NOT_DOMAIN: u64 = 1 << 40;

/// Checks `0 < domain <= MAX_SWAP_OR_NOT_DOMAIN` and `index < domain`.
pub fn check_domain(index: U256, domain: U256) -> Result<(), Error> {
    if domain.is_zero() {
        return Err(Error::InvalidDomain);
    }
    if domain > U256::from(MAX_SWAP_OR_NOT_DOMAIN) {
        return Err(Error::ModulusOutOfBounds { domain });
    }
    check_index(index, domain)
}

/// Returns `ceil(6 * log2(domain))`, the round count suggested for a well-mixed shuffle.
///
/// Computed exactly as `ceil(log2(domain^6))`.
pub fn recommended_rounds(domain: U256) -> Result<u8, Error> {
    check_domain(U256::zero(), domain)?;
    let sixth_power = domain.safe_pow(6)?;
    if sixth_power == U256::one() {
        return Ok(0);
    }
    let bits = sixth_power.safe_sub(U256::one())?.bits();
    u8::try_from(bits).map_err(|_| Error::DomainOverflow)
}

/// Returns `p(index)` in a pseudorandom permutation `p` of `0..domain` with `seed` as entropy.
///
/// Returns an error if `domain == 0`, `domain > MAX_SWAP_OR_NOT_DOMAIN` or `index >= domain`.
pub fn swap_or_not_shuffle(
    index: U256,
    domain: U256,
    seed: Seed,
    rounds: u8,
) -> Result<U256, Error> {
    Reference.shuffle(index, domain, seed, rounds)
}

/// Identical to `swap_or_not_shuffle`, but faster.
pub fn swap_or_not_shuffle_optimized(
    index: U256,
    domain: U256,
    seed: Seed,
    rounds: u8,
) -> Result<U256, Error> {
    Optimized.shuffle(index, domain, seed, rounds)
}
