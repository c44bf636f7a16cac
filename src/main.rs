mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};

use chomsky::error_handling::{Error, Location};
use chomsky::{generator, normalize, parser, Matcher};

// Sampling gives up on a word after this many failed derivations
const SAMPLE_ATTEMPTS: u32 = 16;

fn verdict(derivable: bool) -> &'static str {
    if derivable { "Yes" } else { "No" }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = cli::Cli::parse();

    let input = match &cli.file {
        Some(path) => parser::parse_file(path),
        None => parser::parse_stdin(),
    };
    let input = match input {
        Ok(input) => input,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };
    info!("read {} rules and {} words", input.grammar.rules.len(), input.words.len());

    let normal = match normalize(&input.grammar) {
        Ok(normal) => normal,
        Err(error) => {
            let location = Location::whole(cli.file.as_deref().unwrap_or(Path::new("<stdin>")));
            eprintln!("{}", Error::new(location, error));
            return ExitCode::FAILURE;
        }
    };
    info!("normalized into {} rules", normal.rules.len());

    if cli.cnf {
        print!("{}", normal);
    }

    let matcher = Matcher::new(&normal);
    for word in &input.words {
        println!("{}", verdict(matcher.derivable(word)));
    }

    if let Some(amount) = cli.sample {
        let mut rng = rand::thread_rng();
        for _ in 0..amount {
            let word = (0..SAMPLE_ATTEMPTS)
                .find_map(|_| generator::sample(&input.grammar, &mut rng, cli.depth).ok());
            match word {
                Some(word) => println!("{}: {}", word, verdict(matcher.derivable(&word))),
                None => warn!("gave up sampling a word after {} attempts", SAMPLE_ATTEMPTS),
            }
        }
    }

    ExitCode::SUCCESS
}
