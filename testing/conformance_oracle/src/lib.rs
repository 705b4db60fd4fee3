//! Arbitrary-precision renditions of the Feistel and swap-or-not permutations.
//!
//! Every function here is a direct transcription of the published algorithm over `BigUint`,
//! with no precomputation and no fixed-width arithmetic. The production crates are tested
//! against these functions.
//!
//! Inputs the algorithms are undefined for (an empty domain, an index outside of it, or a
//! swap-or-not position which does not fit the 4-byte hash window) yield `None`.

use num_bigint_dig::BigUint;
use tiny_keccak::{Hasher, Keccak};

pub const SEED_BYTES: usize = 32;

fn keccak256(preimage: &[u8]) -> [u8; 32] {
    let mut keccak = Keccak::v256();
    keccak.update(preimage);
    let mut output = [0; 32];
    keccak.finalize(&mut output);
    output
}

fn to_bytes_be_padded(value: &BigUint, len: usize) -> Option<Vec<u8>> {
    let bytes = value.to_bytes_be();
    if bytes.len() > len {
        return None;
    }
    let mut out = vec![0; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Some(out)
}

fn pow(base: &BigUint, exponent: u32) -> BigUint {
    (0..exponent).fold(BigUint::from(1u32), |acc, _| acc * base)
}

fn isqrt(n: &BigUint) -> BigUint {
    let zero = BigUint::from(0u32);
    if *n == zero {
        return zero;
    }
    let mut x = n.clone();
    let mut y = (&x + BigUint::from(1u32)) >> 1usize;
    while y < x {
        x = y;
        y = (&x + n / &x) >> 1usize;
    }
    x
}

fn next_perfect_square(n: &BigUint) -> BigUint {
    let root = isqrt(n);
    if &root * &root == *n {
        return n.clone();
    }
    let next = root + BigUint::from(1u32);
    &next * &next
}

/// `(keccak(x || seed) / modulus^round) % modulus`, with `x` as a 32-byte big-endian word.
pub fn feistel_round_value(
    x: &BigUint,
    round: u8,
    seed: &[u8; SEED_BYTES],
    modulus: &BigUint,
) -> Option<BigUint> {
    let mut preimage = to_bytes_be_padded(x, 32)?;
    preimage.extend_from_slice(seed);
    let digest = BigUint::from_bytes_be(&keccak256(&preimage));
    Some((digest / pow(modulus, u32::from(round))) % modulus)
}

/// Returns the Feistel-permuted position of `x` in `0..modulus`.
pub fn feistel_permuted_index(
    x: &BigUint,
    modulus: &BigUint,
    seed: &[u8; SEED_BYTES],
    rounds: u8,
) -> Option<BigUint> {
    if *modulus == BigUint::from(0u32) || x >= modulus {
        return None;
    }
    let h = isqrt(&next_perfect_square(modulus));
    let mut x = x.clone();
    loop {
        let mut left = &x / &h;
        let mut right = &x % &h;
        for round in 0..rounds {
            let new_right = (&left + feistel_round_value(&right, round, seed, modulus)?) % &h;
            left = right;
            right = new_right;
        }
        x = left * &h + right;
        if x < *modulus {
            return Some(x);
        }
    }
}

/// Returns `[feistel_permuted_index(0), .., feistel_permuted_index(modulus - 1)]`.
pub fn feistel_permuted_list(
    modulus: u64,
    seed: &[u8; SEED_BYTES],
    rounds: u8,
) -> Option<Vec<BigUint>> {
    let m = BigUint::from(modulus);
    (0..modulus)
        .map(|x| feistel_permuted_index(&BigUint::from(x), &m, seed, rounds))
        .collect()
}

/// Returns `p(index)` for the swap-or-not permutation `p` of `0..list_size`, as defined by
/// `compute_shuffled_index` with Keccak-256.
pub fn swap_or_not_permuted_index(
    index: &BigUint,
    list_size: &BigUint,
    seed: &[u8; SEED_BYTES],
    rounds: u8,
) -> Option<BigUint> {
    if *list_size == BigUint::from(0u32) || index >= list_size {
        return None;
    }
    let mut index = index.clone();
    for round in 0..rounds {
        let mut pivot_preimage = seed.to_vec();
        pivot_preimage.push(round);
        let pivot = BigUint::from_bytes_be(&keccak256(&pivot_preimage)[0..8]) % list_size;

        let flip = (pivot + list_size - &index) % list_size;
        let position = if index > flip {
            index.clone()
        } else {
            flip.clone()
        };

        let mut source_preimage = pivot_preimage;
        source_preimage.extend_from_slice(&to_bytes_be_padded(
            &(&position / BigUint::from(256u32)),
            4,
        )?);
        let source = keccak256(&source_preimage);

        let within_window = (&position % BigUint::from(256u32)).to_bytes_be();
        let offset = within_window.last().copied().unwrap_or(0);
        let byte = source[usize::from(offset / 8)];
        if (byte >> (offset % 8)) & 1 == 1 {
            index = flip;
        }
    }
    Some(index)
}

/// Returns `[swap_or_not_permuted_index(0), .., swap_or_not_permuted_index(list_size - 1)]`.
pub fn swap_or_not_permuted_list(
    list_size: u64,
    seed: &[u8; SEED_BYTES],
    rounds: u8,
) -> Option<Vec<BigUint>> {
    let n = BigUint::from(list_size);
    (0..list_size)
        .map(|x| swap_or_not_permuted_index(&BigUint::from(x), &n, seed, rounds))
        .collect()
}
