use log::debug;
use shuffle_hashing::keccak256;
use shuffle_types::{list_size, Error, Seed, U256};

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const TOTAL_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;

/// Returns `[swap_or_not_shuffle(0), .., swap_or_not_shuffle(domain - 1)]`.
///
/// Computes the whole permutation in one pass of `rounds * domain / 256` hashes, rather than
/// the `2 * rounds * domain` it takes to run `swap_or_not_shuffle` on every index.
///
/// `domain` may not exceed `shuffle_types::MAX_LIST_SIZE`.
pub fn shuffle_list(domain: U256, seed: Seed, rounds: u8) -> Result<Vec<U256>, Error> {
    let size = list_size(domain)?;
    let list = shuffle_in_place((0..size).collect(), rounds, &seed, false);
    Ok(list.into_iter().map(U256::from).collect())
}

/// Returns the inverse permutation of `shuffle_list`, i.e. the list `l` such that
/// `l[swap_or_not_shuffle(i)] == i` for every `i`.
pub fn inverse_shuffle_list(domain: U256, seed: Seed, rounds: u8) -> Result<Vec<U256>, Error> {
    let size = list_size(domain)?;
    let list = shuffle_in_place((0..size).collect(), rounds, &seed, true);
    Ok(list.into_iter().map(U256::from).collect())
}

/// Applies every round of the swap-or-not network to the positions of `input`.
///
/// Credits to [@protolambda](https://github.com/protolambda) for defining this algorithm.
///
/// Shuffles if `forwards == true`, otherwise un-shuffles. Moving elements forwards sends the
/// element at `i` to `swap_or_not_shuffle(i)`; moving them backwards gathers
/// `input[swap_or_not_shuffle(i)]` into position `i`.
///
/// `input` may be no longer than `shuffle_types::MAX_LIST_SIZE`.
fn shuffle_in_place(
    mut input: Vec<usize>,
    rounds: u8,
    seed: &Seed,
    forwards: bool,
) -> Vec<usize> {
    let list_size = input.len();
    if list_size == 0 || rounds == 0 {
        return input;
    }
    debug!(
        "Shuffling list: size {}, rounds {}, forwards {}",
        list_size, rounds, forwards
    );

    let mut buf = [0; TOTAL_SIZE];
    buf[..SEED_SIZE].copy_from_slice(seed.as_bytes());

    let mut r = if forwards { 0 } else { rounds - 1 };

    loop {
        buf[SEED_SIZE] = r;

        let pivot =
            bytes_to_int64(&keccak256(&buf[0..PIVOT_VIEW_SIZE]).0[0..8]) as usize % list_size;

        let mirror = (pivot + 1) >> 1;

        set_window(&mut buf, pivot >> 8);
        let mut source = keccak256(&buf).0;
        let mut byte_v = source[(pivot & 0xff) >> 3];

        for i in 0..mirror {
            let j = pivot - i;

            if j & 0xff == 0xff {
                set_window(&mut buf, j >> 8);
                source = keccak256(&buf).0;
            }

            if j & 0x07 == 0x07 {
                byte_v = source[(j & 0xff) >> 3];
            }
            let bit_v = (byte_v >> (j & 0x07)) & 0x01;

            if bit_v == 1 {
                input.swap(i, j);
            }
        }

        let mirror = (pivot + list_size + 1) >> 1;
        let end = list_size - 1;

        set_window(&mut buf, end >> 8);
        let mut source = keccak256(&buf).0;
        let mut byte_v = source[(end & 0xff) >> 3];

        for (loop_iter, i) in ((pivot + 1)..mirror).enumerate() {
            let j = end - loop_iter;

            if j & 0xff == 0xff {
                set_window(&mut buf, j >> 8);
                source = keccak256(&buf).0;
            }

            if j & 0x07 == 0x07 {
                byte_v = source[(j & 0xff) >> 3];
            }
            let bit_v = (byte_v >> (j & 0x07)) & 0x01;

            if bit_v == 1 {
                input.swap(i, j);
            }
        }

        if forwards {
            r += 1;
            if r == rounds {
                break;
            }
        } else {
            if r == 0 {
                break;
            }
            r -= 1;
        }
    }

    input
}

/// Writes the big-endian position window into the tail of the hash preimage.
///
/// Lists are at most `2^24` long, so the window always fits in 4 bytes.
fn set_window(buf: &mut [u8; TOTAL_SIZE], window: usize) {
    buf[PIVOT_VIEW_SIZE..].copy_from_slice(&(window as u32).to_be_bytes());
}

fn bytes_to_int64(slice: &[u8]) -> u64 {
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&slice[0..8]);
    u64::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_error_for_zero_length_list() {
        assert_eq!(
            shuffle_list(U256::zero(), Seed::repeat_byte(42), 90),
            Err(Error::InvalidDomain)
        );
    }

    #[test]
    fn zero_rounds_is_identity() {
        let list = shuffle_list(U256::from(20), Seed::repeat_byte(42), 0).unwrap();
        assert_eq!(list, (0..20u64).map(U256::from).collect::<Vec<_>>());
    }

    #[test]
    fn forwards_undoes_backwards() {
        let seed = Seed::repeat_byte(7);
        let input: Vec<usize> = (0..1000).collect();
        let shuffled = shuffle_in_place(input.clone(), 40, &seed, false);
        assert_ne!(shuffled, input);
        assert_eq!(shuffle_in_place(shuffled, 40, &seed, true), input);
    }
}
