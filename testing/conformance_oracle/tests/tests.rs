use conformance_oracle::{
    feistel_permuted_index, feistel_permuted_list, swap_or_not_permuted_index,
    swap_or_not_permuted_list,
};
use ethereum_types::U256;
use num_bigint_dig::BigUint;
use shuffle_types::Seed;

const SEEDS: [&str; 3] = [
    "3f2b5f0c1b0e46e6a1d3c9f8b27a4e5d6c7b8a9f0e1d2c3b4a5968778695a4b3",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff01",
];

fn seeds() -> impl Iterator<Item = ([u8; 32], Seed)> {
    SEEDS.iter().map(|s| {
        let bytes = hex::decode(s).unwrap();
        let mut array = [0; 32];
        array.copy_from_slice(&bytes);
        (array, Seed::from(array))
    })
}

fn to_big(value: U256) -> BigUint {
    let mut bytes = [0; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

fn to_big_list(values: Vec<U256>) -> Vec<BigUint> {
    values.into_iter().map(to_big).collect()
}

#[test]
fn feistel_lists_match_oracle() {
    for (raw, seed) in seeds() {
        for domain in (1..=40u64).chain([100, 257, 1000]) {
            for rounds in [0, 1, 3, 4, 7] {
                let expected = feistel_permuted_list(domain, &raw, rounds).unwrap();
                let d = U256::from(domain);
                assert_eq!(
                    to_big_list(feistel_shuffle::shuffle_list(d, seed, rounds).unwrap()),
                    expected,
                    "domain {} rounds {}",
                    domain,
                    rounds
                );
                let per_index = (0..domain)
                    .map(|x| feistel_shuffle::feistel_shuffle(x.into(), d, seed, rounds))
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap();
                assert_eq!(to_big_list(per_index), expected);
            }
        }
    }
}

#[test]
fn feistel_inverse_matches_oracle() {
    for (raw, seed) in seeds() {
        let domain = 333u64;
        let forward = feistel_permuted_list(domain, &raw, 4).unwrap();
        let inverse = feistel_shuffle::deshuffle_list(U256::from(domain), seed, 4).unwrap();
        for (x, shuffled) in forward.iter().enumerate() {
            let position = shuffled.to_bytes_be().iter().fold(0usize, |acc, b| {
                (acc << 8) | usize::from(*b)
            });
            assert_eq!(to_big(inverse[position]), BigUint::from(x as u64));
        }
    }
}

#[test]
fn feistel_wide_domain_matches_oracle() {
    let domain = U256::from(u128::MAX);
    for (raw, seed) in seeds() {
        for x in [0u128, 1, 14_351, u128::MAX / 3, u128::MAX - 1] {
            let expected =
                feistel_permuted_index(&BigUint::from(x), &to_big(domain), &raw, 3).unwrap();
            let shuffled =
                feistel_shuffle::feistel_shuffle_optimized(x.into(), domain, seed, 3).unwrap();
            assert_eq!(to_big(shuffled), expected);
            assert_eq!(
                feistel_shuffle::feistel_deshuffle_optimized(shuffled, domain, seed, 3),
                Ok(U256::from(x))
            );
        }
    }
}

#[test]
fn swap_or_not_lists_match_oracle() {
    for (raw, seed) in seeds() {
        for domain in (1..=40u64).chain([100, 257, 1000]) {
            for rounds in [0, 1, 10, 40] {
                let expected = swap_or_not_permuted_list(domain, &raw, rounds).unwrap();
                let d = U256::from(domain);
                assert_eq!(
                    to_big_list(swap_or_not_shuffle::shuffle_list(d, seed, rounds).unwrap()),
                    expected,
                    "domain {} rounds {}",
                    domain,
                    rounds
                );
                let per_index = (0..domain)
                    .map(|x| {
                        swap_or_not_shuffle::swap_or_not_shuffle_optimized(
                            x.into(),
                            d,
                            seed,
                            rounds,
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap();
                assert_eq!(to_big_list(per_index), expected);
            }
        }
    }
}

#[test]
fn swap_or_not_largest_domain_matches_oracle() {
    let domain = U256::from(swap_or_not_shuffle::MAX_SWAP_OR_NOT_DOMAIN);
    let rounds = swap_or_not_shuffle::recommended_rounds(domain).unwrap();
    for (raw, seed) in seeds() {
        for x in [0u64, 255, 256, 123_456_789, (1 << 40) - 1] {
            let expected =
                swap_or_not_permuted_index(&BigUint::from(x), &to_big(domain), &raw, rounds)
                    .unwrap();
            let reference =
                swap_or_not_shuffle::swap_or_not_shuffle(x.into(), domain, seed, rounds).unwrap();
            let optimized =
                swap_or_not_shuffle::swap_or_not_shuffle_optimized(x.into(), domain, seed, rounds)
                    .unwrap();
            assert_eq!(to_big(reference), expected);
            assert_eq!(reference, optimized);
        }
    }
}
