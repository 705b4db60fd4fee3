//! Types shared by the shuffling engines.
//!
//! Every engine implements the same contract twice: a `Reference` strategy that follows the
//! published algorithm line-by-line and an `Optimized` strategy that must return identical
//! results for every valid input. The `Shuffle` and `Deshuffle` traits are that contract.
use safe_arith::ArithError;
use std::fmt;

pub use ethereum_types::{H256, U256};

/// The 32-byte key of a permutation instance.
pub type Seed = H256;

/// The largest domain accepted by the whole-list helpers.
pub const MAX_LIST_SIZE: u64 = 1 << 24;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The domain was zero.
    InvalidDomain,
    /// The index was not inside `[0, domain)`.
    IndexOutOfRange { index: U256, domain: U256 },
    /// The domain (or a value derived from it and the round count) does not fit in 256 bits.
    DomainOverflow,
    /// The domain is too large for the swap-or-not round function inputs.
    ModulusOutOfBounds { domain: U256 },
    /// Cycle walking exceeded its bound. Only possible if a Feistel step is not a bijection.
    CycleWalkExhausted { domain: U256 },
    /// A whole-list shuffle was requested for a domain larger than `MAX_LIST_SIZE`.
    ListTooLarge { domain: U256 },
}

impl From<ArithError> for Error {
    fn from(_: ArithError) -> Self {
        Error::DomainOverflow
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDomain => write!(f, "modulus must be > 0"),
            Error::IndexOutOfRange { index, domain } => {
                write!(f, "x too large: {} >= {}", index, domain)
            }
            Error::DomainOverflow => write!(f, "domain overflows 256-bit arithmetic"),
            Error::ModulusOutOfBounds { domain } => {
                write!(f, "x too large or modulus OOB: {}", domain)
            }
            Error::CycleWalkExhausted { domain } => {
                write!(f, "cycle walk exhausted for domain {}", domain)
            }
            Error::ListTooLarge { domain } => write!(
                f,
                "list of {} elements exceeds maximum of {}",
                domain, MAX_LIST_SIZE
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A forward pseudorandom permutation of `[0, domain)`.
pub trait Shuffle {
    /// Returns the position of `index` after shuffling `[0, domain)` with `seed`.
    fn shuffle(&self, index: U256, domain: U256, seed: Seed, rounds: u8) -> Result<U256, Error>;
}

/// A permutation which can also be inverted.
pub trait Deshuffle: Shuffle {
    /// Returns the index which `shuffle` maps to `shuffled`.
    fn deshuffle(
        &self,
        shuffled: U256,
        domain: U256,
        seed: Seed,
        rounds: u8,
    ) -> Result<U256, Error>;
}

/// Checks `domain > 0` and `index < domain`.
pub fn check_index(index: U256, domain: U256) -> Result<(), Error> {
    if domain.is_zero() {
        Err(Error::InvalidDomain)
    } else if index >= domain {
        Err(Error::IndexOutOfRange { index, domain })
    } else {
        Ok(())
    }
}

/// Returns `domain` as a list length if it is within `MAX_LIST_SIZE`.
pub fn list_size(domain: U256) -> Result<usize, Error> {
    if domain.is_zero() {
        return Err(Error::InvalidDomain);
    }
    if domain > U256::from(MAX_LIST_SIZE) {
        return Err(Error::ListTooLarge { domain });
    }
    Ok(domain.as_usize())
}

/// Interprets a big-endian integer of up to 32 bytes as a seed, left-padding with zeros.
///
/// Returns `None` if `bytes` is longer than 32 bytes.
pub fn seed_from_be_bytes(bytes: &[u8]) -> Option<Seed> {
    if bytes.len() > 32 {
        return None;
    }
    let mut seed = [0; 32];
    seed[32 - bytes.len()..].copy_from_slice(bytes);
    Some(Seed::from(seed))
}
