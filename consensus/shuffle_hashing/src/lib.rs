//! Keccak-256 round functions for the Feistel and swap-or-not shuffles.
//!
//! Each round function comes in two forms which always agree:
//!
//! - a one-shot free function (`feistel_round`, `swap_or_not_pivot`, `swap_or_not_decision`)
//!   which builds its hash preimage from scratch on every call;
//! - a buffered hasher (`FeistelRoundHasher`, `SwapOrNotRoundHasher`) which writes the seed
//!   into its preimage once and then only overwrites the bytes that change between calls.
use ethereum_types::{H256, U256};
use safe_arith::{ArithError, SafeArith};
use tiny_keccak::{Hasher, Keccak};

const WORD_SIZE: usize = 32;
const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const SWAP_OR_NOT_PREIMAGE_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;
const FEISTEL_PREIMAGE_SIZE: usize = WORD_SIZE + SEED_SIZE;

/// Returns the Keccak-256 digest of `input`.
pub fn keccak256(input: &[u8]) -> H256 {
    let mut keccak = Keccak::v256();
    keccak.update(input);
    let mut out = [0; 32];
    keccak.finalize(&mut out);
    H256::from(out)
}

fn u256_to_word(value: U256) -> [u8; WORD_SIZE] {
    let mut word = [0; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

/// The Feistel round function.
///
/// `(keccak256(input ‖ seed) / modulus^round) % modulus`, with the digest read as a big-endian
/// integer and `input` encoded as a 32-byte big-endian word.
///
/// Fails if `modulus^round` overflows or `modulus` is zero.
pub fn feistel_round(
    round: u8,
    input: U256,
    seed: &H256,
    modulus: U256,
) -> Result<U256, ArithError> {
    let mut preimage = Vec::with_capacity(FEISTEL_PREIMAGE_SIZE);
    preimage.extend_from_slice(&u256_to_word(input));
    preimage.extend_from_slice(seed.as_bytes());
    let digest = U256::from_big_endian(keccak256(&preimage).as_bytes());

    let divisor = modulus.safe_pow(u32::from(round))?;
    digest.safe_div(divisor)?.safe_rem(modulus)
}

/// Buffered form of `feistel_round`.
///
/// The caller supplies `modulus^round` directly, so that it may be computed once and reused
/// across every walk of a single shuffle.
#[derive(Clone)]
pub struct FeistelRoundHasher {
    preimage: [u8; FEISTEL_PREIMAGE_SIZE],
}

impl FeistelRoundHasher {
    pub fn new(seed: &H256) -> Self {
        let mut preimage = [0; FEISTEL_PREIMAGE_SIZE];
        preimage[WORD_SIZE..].copy_from_slice(seed.as_bytes());
        Self { preimage }
    }

    /// Returns `keccak256(input ‖ seed)` as an integer.
    pub fn digest(&mut self, input: U256) -> U256 {
        input.to_big_endian(&mut self.preimage[..WORD_SIZE]);
        U256::from_big_endian(keccak256(&self.preimage).as_bytes())
    }

    /// Returns `(digest(input) / divisor) % modulus`.
    pub fn round(
        &mut self,
        input: U256,
        divisor: U256,
        modulus: U256,
    ) -> Result<U256, ArithError> {
        self.digest(input).safe_div(divisor)?.safe_rem(modulus)
    }
}

/// The swap-or-not pivot for `round`: the first 8 bytes of `keccak256(seed ‖ round)`, read as a
/// big-endian integer, modulo `modulus`.
pub fn swap_or_not_pivot(round: u8, seed: &H256, modulus: U256) -> Result<U256, ArithError> {
    let mut preimage = Vec::with_capacity(PIVOT_VIEW_SIZE);
    preimage.extend_from_slice(seed.as_bytes());
    preimage.push(round);
    let digest = keccak256(&preimage);

    U256::from_big_endian(&digest.as_bytes()[0..8]).safe_rem(modulus)
}

/// The swap-or-not decision bit for the pair whose canonical member is `position`.
///
/// `position` selects one bit from `keccak256(seed ‖ round ‖ uint32(position / 256))`. Fails with
/// `ArithError::Overflow` if `position / 256` does not fit the 4-byte window, rather than
/// truncating it.
pub fn swap_or_not_decision(round: u8, position: U256, seed: &H256) -> Result<bool, ArithError> {
    let window = position.safe_shr(8)?;
    if window > U256::from(u32::MAX) {
        return Err(ArithError::Overflow);
    }

    let mut preimage = Vec::with_capacity(SWAP_OR_NOT_PREIMAGE_SIZE);
    preimage.extend_from_slice(seed.as_bytes());
    preimage.push(round);
    preimage.extend_from_slice(&(window.low_u32()).to_be_bytes());
    let source = keccak256(&preimage);

    let byte = source.as_bytes()[(position.low_u32() as usize % 256) / 8];
    let bit = (byte >> (position.low_u32() % 8)) % 2;
    Ok(bit == 1)
}

/// Buffered form of the swap-or-not round function, working on `u64` positions.
#[derive(Clone)]
pub struct SwapOrNotRoundHasher {
    preimage: [u8; SWAP_OR_NOT_PREIMAGE_SIZE],
}

impl SwapOrNotRoundHasher {
    pub fn new(seed: &H256) -> Self {
        let mut preimage = [0; SWAP_OR_NOT_PREIMAGE_SIZE];
        preimage[..SEED_SIZE].copy_from_slice(seed.as_bytes());
        Self { preimage }
    }

    /// Sets the round used by subsequent calls to `pivot` and `decision`.
    pub fn set_round(&mut self, round: u8) {
        self.preimage[SEED_SIZE] = round;
    }

    /// Equivalent to `swap_or_not_pivot` for the current round.
    ///
    /// `modulus` must be non-zero.
    pub fn pivot(&self, modulus: u64) -> Result<u64, ArithError> {
        let digest = keccak256(&self.preimage[..PIVOT_VIEW_SIZE]);
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&digest.as_bytes()[0..8]);
        u64::from_be_bytes(bytes).safe_rem(modulus)
    }

    /// Equivalent to `swap_or_not_decision` for the current round.
    pub fn decision(&mut self, position: u64) -> Result<bool, ArithError> {
        let window = u32::try_from(position >> 8).map_err(|_| ArithError::Overflow)?;
        self.preimage[PIVOT_VIEW_SIZE..].copy_from_slice(&window.to_be_bytes());
        let source = keccak256(&self.preimage);

        let byte = source.as_bytes()[((position & 0xff) >> 3) as usize];
        Ok((byte >> (position & 0x07)) & 0x01 == 1)
    }
}
