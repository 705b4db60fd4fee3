mod parse;
mod permute;

use clap::{Arg, ArgAction, Command};
use permute::{Permutation, FEISTEL, FEISTEL_INVERSE, SWAP_OR_NOT};
use std::process;

fn permutation_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("modulus")
                .long("modulus")
                .short('n')
                .value_name("N")
                .action(ArgAction::Set)
                .required(true)
                .help("Size of the domain being permuted."),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .value_name("SEED")
                .action(ArgAction::Set)
                .required(true)
                .help("Decimal integer or 0x-prefixed big-endian hex, at most 32 bytes."),
        )
        .arg(
            Arg::new("rounds")
                .long("rounds")
                .short('r')
                .value_name("ROUNDS")
                .action(ArgAction::Set)
                .help("Number of rounds, 0 to 255."),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .short('x')
                .value_name("X")
                .action(ArgAction::Set)
                .help("Index to permute. Prints the whole permutation when omitted."),
        )
}

fn cli_app() -> Command {
    Command::new("shuffle-cli")
        .version(clap::crate_version!())
        .about("Evaluates seeded Feistel and swap-or-not permutations.")
        .subcommand_required(true)
        .arg(
            Arg::new("reference")
                .long("reference")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Use the reference variant instead of the optimized one."),
        )
        .subcommand(permutation_args(
            Command::new(FEISTEL)
                .about("Maps X to its position under the Feistel permutation.")
                .after_help("--rounds is required."),
        ))
        .subcommand(permutation_args(
            Command::new(FEISTEL_INVERSE)
                .about("Maps a Feistel-permuted position back to X.")
                .after_help("--rounds is required."),
        ))
        .subcommand(permutation_args(
            Command::new(SWAP_OR_NOT)
                .about("Maps X to its position under the swap-or-not permutation.")
                .after_help("--rounds defaults to ceil(6 * log2(N))."),
        ))
}

fn run(args: Vec<String>) -> Result<String, String> {
    let matches = cli_app().try_get_matches_from(args).map_err(|e| e.to_string())?;
    let reference = matches.get_flag("reference");

    match matches.subcommand() {
        Some((name, sub_matches)) => {
            let permutation = Permutation::from_subcommand(name)
                .ok_or_else(|| format!("Unknown subcommand {}", name))?;
            permute::run(permutation, sub_matches, reference)
                .map_err(|e| format!("Failed to run {}: {}", name, e))
        }
        None => Err("Subcommand required".to_string()),
    }
}

fn main() {
    env_logger::init();

    match run(std::env::args().collect()) {
        Ok(output) => {
            println!("{}", output);
            process::exit(0)
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1)
        }
    }
}
