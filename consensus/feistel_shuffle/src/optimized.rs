use crate::params::{cycle_walk, DomainParams};
use log::debug;
use safe_arith::SafeArith;
use shuffle_hashing::FeistelRoundHasher;
use shuffle_types::{check_index, Deshuffle, Error, Seed, Shuffle, U256};

/// Optimized Feistel strategy.
///
/// Derives the square domain and every `domain^round` divisor once per call and reuses a hash
/// preimage that already holds the seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Optimized;

impl Shuffle for Optimized {
    fn shuffle(&self, index: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error> {
        check_index(index, domain)?;
        PreparedFeistel::new(domain, seed, rounds)?.shuffle(index)
    }
}

impl Deshuffle for Optimized {
    fn deshuffle(
        &self,
        shuffled: U256,
        domain: U256,
        seed: Seed,
        rounds: u8,
    ) -> Result<U256, Error> {
        check_index(shuffled, domain)?;
        PreparedFeistel::new(domain, seed, rounds)?.deshuffle(shuffled)
    }
}

/// A Feistel permutation with all per-call state derived up front, so that many indices of the
/// same permutation can be computed without repeating that work.
#[derive(Clone)]
pub struct PreparedFeistel {
    params: DomainParams,
    /// `divisors[i] == domain^i`.
    divisors: Vec<U256>,
    hasher: FeistelRoundHasher,
}

impl PreparedFeistel {
    pub fn new(domain: U256, seed: Seed, rounds: u8) -> Result<Self, Error> {
        let params = DomainParams::new(domain, rounds)?;

        let mut divisors = Vec::with_capacity(usize::from(rounds));
        let mut divisor = U256::one();
        for round in 0..rounds {
            divisors.push(divisor);
            if round + 1 < rounds {
                divisor.safe_mul_assign(domain)?;
            }
        }

        debug!(
            "Prepared Feistel shuffle: domain {}, side {}, rounds {}",
            domain, params.side, rounds
        );

        Ok(Self {
            params,
            divisors,
            hasher: FeistelRoundHasher::new(&seed),
        })
    }

    pub fn domain(&self) -> U256 {
        self.params.domain
    }

    /// Returns the shuffled position of `index`. `index` must be inside the domain.
    pub fn shuffle(&mut self, index: U256) -> Result<U256, Error> {
        check_index(index, self.params.domain)?;
        if self.is_identity() {
            return Ok(index);
        }

        let params = &self.params;
        let divisors = &self.divisors;
        let hasher = &mut self.hasher;
        cycle_walk(index, params, |x| {
            let (mut left, mut right) = params.split(x)?;
            for divisor in divisors.iter() {
                let mixed = hasher.round(right, *divisor, params.domain)?;
                let next_right = left.safe_add(mixed)?.safe_rem(params.side)?;
                left = right;
                right = next_right;
            }
            params.join(left, right)
        })
    }

    /// Returns the index which `shuffle` maps to `shuffled`.
    pub fn deshuffle(&mut self, shuffled: U256) -> Result<U256, Error> {
        check_index(shuffled, self.params.domain)?;
        if self.is_identity() {
            return Ok(shuffled);
        }

        let params = &self.params;
        let divisors = &self.divisors;
        let hasher = &mut self.hasher;
        cycle_walk(shuffled, params, |x| {
            let (mut left, mut right) = params.split(x)?;
            for divisor in divisors.iter().rev() {
                let mixed = hasher
                    .round(left, *divisor, params.domain)?
                    .safe_rem(params.side)?;
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

    /// A single-element domain or a zero-round network leaves every index in place.
    fn is_identity(&self) -> bool {
        self.params.domain == U256::one() || self.divisors.is_empty()
    }
}
