use crate::parse::{format_list, parse_seed, parse_u256};
use clap::ArgMatches;
use feistel_shuffle::{
    deshuffle_list, feistel_deshuffle, feistel_deshuffle_optimized, feistel_shuffle,
    feistel_shuffle_optimized,
};
use log::info;
use shuffle_types::{list_size, Error, Seed, U256};
use swap_or_not_shuffle::{
    recommended_rounds, swap_or_not_shuffle, swap_or_not_shuffle_optimized,
};

pub const FEISTEL: &str = "feistel";
pub const FEISTEL_INVERSE: &str = "feistel-inverse";
pub const SWAP_OR_NOT: &str = "swap-or-not";

/// The permutation a subcommand evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permutation {
    Feistel,
    FeistelInverse,
    SwapOrNot,
}

impl Permutation {
    pub fn from_subcommand(name: &str) -> Option<Self> {
        match name {
            FEISTEL => Some(Permutation::Feistel),
            FEISTEL_INVERSE => Some(Permutation::FeistelInverse),
            SWAP_OR_NOT => Some(Permutation::SwapOrNot),
            _ => None,
        }
    }

    /// Evaluates the permutation at a single index.
    pub fn at(
        self,
        index: U256,
        domain: U256,
        seed: Seed,
        rounds: u8,
        reference: bool,
    ) -> Result<U256, Error> {
        match (self, reference) {
            (Permutation::Feistel, true) => feistel_shuffle(index, domain, seed, rounds),
            (Permutation::Feistel, false) => feistel_shuffle_optimized(index, domain, seed, rounds),
            (Permutation::FeistelInverse, true) => feistel_deshuffle(index, domain, seed, rounds),
            (Permutation::FeistelInverse, false) => {
                feistel_deshuffle_optimized(index, domain, seed, rounds)
            }
            (Permutation::SwapOrNot, true) => swap_or_not_shuffle(index, domain, seed, rounds),
            (Permutation::SwapOrNot, false) => {
                swap_or_not_shuffle_optimized(index, domain, seed, rounds)
            }
        }
    }

    /// Evaluates the permutation at every index of the domain.
    ///
    /// The reference variants are evaluated index by index; the others use the whole-list
    /// algorithms.
    pub fn list(
        self,
        domain: U256,
        seed: Seed,
        rounds: u8,
        reference: bool,
    ) -> Result<Vec<U256>, Error> {
        if reference {
            let size = list_size(domain)?;
            return (0..size)
                .map(|i| self.at(U256::from(i), domain, seed, rounds, true))
                .collect();
        }
        match self {
            Permutation::Feistel => feistel_shuffle::shuffle_list(domain, seed, rounds),
            Permutation::FeistelInverse => deshuffle_list(domain, seed, rounds),
            Permutation::SwapOrNot => swap_or_not_shuffle::shuffle_list(domain, seed, rounds),
        }
    }
}

/// Runs a permutation subcommand, returning the line to print.
pub fn run(
    permutation: Permutation,
    matches: &ArgMatches,
    reference: bool,
) -> Result<String, String> {
    let domain = required(matches, "modulus").and_then(|s| parse_u256(&s))?;
    let seed = required(matches, "seed").and_then(|s| parse_seed(&s))?;
    let rounds = match matches.get_one::<String>("rounds") {
        Some(rounds) => rounds
            .parse::<u8>()
            .map_err(|e| format!("Invalid rounds {:?}: {}", rounds, e))?,
        None if permutation == Permutation::SwapOrNot => {
            recommended_rounds(domain).map_err(|e| e.to_string())?
        }
        None => return Err("--rounds is required".to_string()),
    };

    info!("Permutation: {:?}", permutation);
    info!("Modulus: {}", domain);
    info!("Seed: {:?}", seed);
    info!("Rounds: {}", rounds);
    if reference {
        info!("Using reference variant");
    }

    match matches.get_one::<String>("index") {
        Some(index) => {
            let index = parse_u256(index)?;
            permutation
                .at(index, domain, seed, rounds, reference)
                .map(|value| value.to_string())
                .map_err(|e| e.to_string())
        }
        None => permutation
            .list(domain, seed, rounds, reference)
            .map(|list| format_list(&list))
            .map_err(|e| e.to_string()),
    }
}

fn required(matches: &ArgMatches, name: &str) -> Result<String, String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("--{} is required", name))
}
