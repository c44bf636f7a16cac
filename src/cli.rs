use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar and the words (default: standard input)
    pub file: Option<PathBuf>,

    /// Print the grammar in Chomsky normal form before the answers
    #[arg(long)]
    pub cnf: bool,

    /// Also test this many words sampled from the grammar
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub sample: Option<u32>,

    /// Deepest derivation tried while sampling
    #[arg(short, long, value_name = "DEPTH", default_value_t = 32)]
    pub depth: usize
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::parse_from(["chomsky", "grammar.txt", "--cnf", "-n", "5"]);
        assert_eq!(cli.file, Some(PathBuf::from("grammar.txt")));
        assert!(cli.cnf);
        assert_eq!(cli.sample, Some(5));
        assert_eq!(cli.depth, 32);

        let cli = Cli::parse_from(["chomsky"]);
        assert_eq!(cli.file, None);
        assert!(!cli.cnf);
    }
}
