//! Provides a seeded, invertible pseudorandom permutation of `[0, domain)` built on a Feistel
//! network, matching the `feistel_shuffle.py` algorithm from `ethereum/research`.
//!
//! The index is laid out on the smallest `h * h` square covering the domain and split into a
//! `(row, column)` pair. Each round replaces the pair with
//! `(column, (row + f(round, column)) % h)`, where `f` is the Keccak-256 round function from
//! `shuffle_hashing`. Results that land outside the domain are fed back in ("cycle walking")
//! until one lands inside.
//!
//! Two strategies implement the same permutation:
//!
//! - `Reference`: straightforward, recomputes every round input.
//! - `Optimized`: derives all per-call state once. `PreparedFeistel` exposes that state for
//!   shuffling many indices of one permutation.
//!
//! Unlike the swap-or-not shuffle, the permutation can be inverted with `feistel_deshuffle`.
mod optimized;
mod params;
mod reference;

pub use optimized::{Optimized, PreparedFeistel};
pub use params::DomainParams;
pub use reference::Reference;
pub use shuffle_types::{Deshuffle, Error, Seed, Shuffle, U256};

use shuffle_types::list_size;

/// Returns the position of `x` after shuffling `[0, domain)`.
///
/// Returns an error if `domain == 0`, `x >= domain`, or if `domain` is too large to run
/// `rounds` rounds in 256-bit arithmetic.
pub fn feistel_shuffle(x: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error> {
    Reference.shuffle(x, domain, seed, rounds)
}

/// Identical to `feistel_shuffle`, but faster.
pub fn feistel_shuffle_optimized(
    x: U256,
    domain: U256,
    seed: Seed,
    rounds: u8,
) -> Result<U256, Error> {
    Optimized.shuffle(x, domain, seed, rounds)
}

/// Returns the `x` for which `feistel_shuffle(x, domain, seed, rounds) == x_prime`.
pub fn feistel_deshuffle(
    x_prime: U256,
    domain: U256,
    seed: Seed,
    rounds: u8,
) -> Result<U256, Error> {
    Reference.deshuffle(x_prime, domain, seed, rounds)
}

/// Identical to `feistel_deshuffle`, but faster.
pub fn feistel_deshuffle_optimized(
    x_prime: U256,
    domain: U256,
    seed: Seed,
    rounds: u8,
) -> Result<U256, Error> {
    Optimized.deshuffle(x_prime, domain, seed, rounds)
}

/// Returns `[feistel_shuffle(0), .., feistel_shuffle(domain - 1)]`.
///
/// `domain` may not exceed `shuffle_types::MAX_LIST_SIZE`.
pub fn shuffle_list(domain: U256, seed: Seed, rounds: u8) -> Result<Vec<U256>, Error> {
    let size = list_size(domain)?;
    let mut prepared = PreparedFeistel::new(domain, seed, rounds)?;
    (0..size).map(|i| prepared.shuffle(U256::from(i))).collect()
}

/// Returns `[feistel_deshuffle(0), .., feistel_deshuffle(domain - 1)]`.
///
/// `domain` may not exceed `shuffle_types::MAX_LIST_SIZE`.
pub fn deshuffle_list(domain: U256, seed: Seed, rounds: u8) -> Result<Vec<U256>, Error> {
    let size = list_size(domain)?;
    let mut prepared = PreparedFeistel::new(domain, seed, rounds)?;
    (0..size).map(|i| prepared.deshuffle(U256::from(i))).collect()
}
