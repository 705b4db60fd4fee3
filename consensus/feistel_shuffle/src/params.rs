use log::trace;
use safe_arith::{SafeArith, SafeSqrt};
use shuffle_types::{Error, U256};

/// Parameters of the square domain which a Feistel shuffle of `[0, domain)` runs on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainParams {
    /// The domain being permuted.
    pub domain: U256,
    /// `h`, the side of the smallest square `>= domain`.
    pub side: U256,
    /// `h * h`.
    pub square: U256,
    /// The most Feistel applications a single cycle walk may take.
    pub max_walk: U256,
}

impl DomainParams {
    /// Derives the square domain for `domain`, checking that every intermediate value of a
    /// `rounds`-round shuffle fits in 256 bits.
    ///
    /// The round function divides by up to `domain^(rounds - 1)`, so that power must fit. The
    /// Feistel addition `left + f(right)` is bounded by `side + domain`, which must fit too.
    pub fn new(domain: U256, rounds: u8) -> Result<Self, Error> {
        if domain.is_zero() {
            return Err(Error::InvalidDomain);
        }

        let square = domain.safe_next_perfect_square()?;
        let side = square.safe_isqrt()?;

        if let Some(max_round) = rounds.checked_sub(1) {
            domain.safe_pow(u32::from(max_round))?;
        }
        domain.safe_add(side)?;

        // Each walk lands on a distinct point of `[domain, square)` before it may leave it.
        let max_walk = square.safe_sub(domain)?.safe_add(U256::one())?;

        Ok(Self {
            domain,
            side,
            square,
            max_walk,
        })
    }

    /// Splits `x` into its `(row, column)` coordinates on the square.
    pub fn split(&self, x: U256) -> Result<(U256, U256), Error> {
        Ok((x.safe_div(self.side)?, x.safe_rem(self.side)?))
    }

    /// Inverse of `split`.
    pub fn join(&self, row: U256, column: U256) -> Result<U256, Error> {
        Ok(row.safe_mul(self.side)?.safe_add(column)?)
    }
}

/// Repeatedly applies `step` to `start` until the result lies inside `[0, params.domain)`.
///
/// `step` must be a bijection on `[0, params.square)`; if it is not, the walk may fail with
/// `Error::CycleWalkExhausted` after `params.max_walk` applications.
pub fn cycle_walk<F>(start: U256, params: &DomainParams, mut step: F) -> Result<U256, Error>
where
    F: FnMut(U256) -> Result<U256, Error>,
{
    let mut x = start;
    let mut walks = U256::zero();

    while walks < params.max_walk {
        x = step(x)?;
        if x < params.domain {
            return Ok(x);
        }
        walks.safe_add_assign(U256::one())?;
        trace!(
            "Feistel output {} outside domain {}, walking again (walk {})",
            x,
            params.domain,
            walks
        );
    }

    Err(Error::CycleWalkExhausted {
        domain: params.domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_domains() {
        let params = DomainParams::new(U256::one(), 4).unwrap();
        assert_eq!(params.side, U256::one());
        assert_eq!(params.square, U256::one());
        assert_eq!(params.max_walk, U256::one());

        let params = DomainParams::new(U256::from(5), 4).unwrap();
        assert_eq!(params.side, U256::from(3));
        assert_eq!(params.square, U256::from(9));
        assert_eq!(params.max_walk, U256::from(5));

        let params = DomainParams::new(U256::from(96_722), 4).unwrap();
        assert_eq!(params.side, U256::from(312));
    }

    #[test]
    fn zero_domain() {
        assert_eq!(DomainParams::new(U256::zero(), 4), Err(Error::InvalidDomain));
    }

    #[test]
    fn overflow_guard_tracks_rounds() {
        let two_pow_128 = U256::one() << 128;

        assert!(DomainParams::new(two_pow_128 - 1, 3).is_ok());
        assert_eq!(
            DomainParams::new(two_pow_128, 3),
            Err(Error::DomainOverflow)
        );
        assert_eq!(
            DomainParams::new(two_pow_128 + 1, 3),
            Err(Error::DomainOverflow)
        );

        // Fewer rounds allow larger domains.
        assert!(DomainParams::new(two_pow_128, 2).is_ok());
        assert!(DomainParams::new(two_pow_128, 0).is_ok());
        // The square itself must fit.
        assert_eq!(DomainParams::new(U256::MAX, 1), Err(Error::DomainOverflow));
    }

    #[test]
    fn split_and_join() {
        let params = DomainParams::new(U256::from(100), 4).unwrap();
        let (row, column) = params.split(U256::from(57)).unwrap();
        assert_eq!((row, column), (U256::from(5), U256::from(7)));
        assert_eq!(params.join(row, column), Ok(U256::from(57)));
    }

    #[test]
    fn walk_stops_inside_domain() {
        let params = DomainParams::new(U256::from(7), 4).unwrap();
        // 7 -> 8 -> 0
        let step = |x: U256| Ok((x + 1) % params.square);
        assert_eq!(cycle_walk(U256::from(7), &params, step), Ok(U256::zero()));
    }

    #[test]
    fn walk_exhausts_for_non_bijective_step() {
        let params = DomainParams::new(U256::from(7), 4).unwrap();
        let mut calls = 0u64;
        let result = cycle_walk(U256::zero(), &params, |_| {
            calls += 1;
            Ok(U256::from(8))
        });
        assert_eq!(
            result,
            Err(Error::CycleWalkExhausted {
                domain: U256::from(7)
            })
        );
        assert_eq!(U256::from(calls), params.max_walk);
    }
}
