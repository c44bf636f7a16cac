/*
    This module samples random words from a grammar
*/

use rand::prelude::*;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::ErrorType;

#[derive(Debug, PartialEq)]
pub enum GenerateError {
    // A nonterminal has no rules to expand with
    UndefinedNonterminal(String),
    // Expansion nested deeper than allowed
    DepthExceeded,
}

impl ErrorType for GenerateError {}

impl Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::UndefinedNonterminal(nonterminal) => write!(f, "No rules for nonterminal `{}`", nonterminal),
            GenerateError::DepthExceeded => write!(f, "Derivation nested too deeply"),
        }
    }
}

pub type GenResult = Result<String, GenerateError>;

// Samples a word by expanding the start symbol with uniformly chosen rules
pub fn sample(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    let mut word = String::new();
    generate_nonterminal(&grammar.start, grammar, rng, max_depth, &mut word)?;
    Ok(word)
}

fn generate_nonterminal(nonterminal: &str, grammar: &Grammar, rng: &mut impl Rng, depth: usize, word: &mut String) -> Result<(), GenerateError> {
    if depth == 0 {
        return Err(GenerateError::DepthExceeded);
    }

    // Sorted so a seeded rng picks the same rules on every run
    let mut rules: Vec<&Rule> = grammar.rules_of(nonterminal).collect();
    rules.sort();

    let rule = rules
        .choose(rng)
        .ok_or_else(|| GenerateError::UndefinedNonterminal(nonterminal.to_owned()))?;

    for symbol in rule.product() {
        match symbol {
            Symbol::Nonterminal(name) => generate_nonterminal(name, grammar, rng, depth - 1, word)?,
            Symbol::Terminal(c) => word.push(*c),
        }
    }

    Ok(())
}
