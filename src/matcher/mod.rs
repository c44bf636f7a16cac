/*
    This module decides membership of words with the CYK algorithm
*/

use std::collections::HashMap;

use log::trace;

use crate::grammar::*;

// T[nonterminal][left][right]: the nonterminal derives word[left..right)
struct Table {
    values: Vec<bool>,
    width: usize,
}

impl Table {
    fn new(nonterminals: usize, length: usize) -> Self {
        let width = length + 1;
        Table {
            values: vec![false; nonterminals * width * width],
            width,
        }
    }

    fn index(&self, nonterminal: usize, left: usize, right: usize) -> usize {
        (nonterminal * self.width + left) * self.width + right
    }

    fn get(&self, nonterminal: usize, left: usize, right: usize) -> bool {
        self.values[self.index(nonterminal, left, right)]
    }

    fn set(&mut self, nonterminal: usize, left: usize, right: usize) {
        let index = self.index(nonterminal, left, right);
        self.values[index] = true;
    }
}

/// Membership tests against one fixed grammar in Chomsky normal form.
///
/// Rules are indexed once up front; every call to [`Matcher::derivable`]
/// allocates its own table, so a `Matcher` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    nonterminals: usize,
    start: Option<usize>,
    accepts_empty: bool,
    terminal_rules: Vec<(usize, char)>,
    binary_rules: Vec<(usize, usize, usize)>,
}

impl Matcher {
    pub fn new(grammar: &Grammar) -> Self {
        let mut indexes: HashMap<&str, usize> = HashMap::new();
        for rule in &grammar.rules {
            let next = indexes.len();
            indexes.entry(rule.nonterminal()).or_insert(next);
        }

        // A nonterminal without rules derives nothing and needs no row
        let terminal_rules = grammar.rules.iter()
            .filter_map(|rule| Some((indexes[rule.nonterminal()], rule.as_terminal()?)))
            .collect();
        let binary_rules = grammar.rules.iter()
            .filter_map(|rule| {
                let (left, right) = rule.as_binary()?;
                Some((indexes[rule.nonterminal()], *indexes.get(left)?, *indexes.get(right)?))
            })
            .collect();

        Matcher {
            nonterminals: indexes.len(),
            start: indexes.get(grammar.start.as_str()).copied(),
            accepts_empty: grammar.has_rule(&Rule::epsilon(grammar.start.clone())),
            terminal_rules,
            binary_rules,
        }
    }

    pub fn derivable(&self, word: &str) -> bool {
        let word: Vec<char> = word.chars().collect();
        let length = word.len();

        if length == 0 {
            return self.accepts_empty;
        }
        let Some(start) = self.start else {
            return false;
        };

        let mut table = Table::new(self.nonterminals, length);

        for (position, c) in word.iter().enumerate() {
            for &(nonterminal, terminal) in &self.terminal_rules {
                if terminal == *c {
                    table.set(nonterminal, position, position + 1);
                }
            }
        }

        for span in 2..=length {
            for left in 0..=length - span {
                let right = left + span;
                for &(nonterminal, first, second) in &self.binary_rules {
                    if table.get(nonterminal, left, right) {
                        continue;
                    }
                    if (left + 1..right).any(|k| table.get(first, left, k) && table.get(second, k, right)) {
                        table.set(nonterminal, left, right);
                    }
                }
            }
        }

        let result = table.get(start, 0, length);
        trace!("`{}` derivable: {}", word.iter().collect::<String>(), result);
        result
    }
}

/// Is `word` derivable from `grammar`, which must be in Chomsky normal form?
pub fn derivable(grammar: &Grammar, word: &str) -> bool {
    Matcher::new(grammar).derivable(word)
}
