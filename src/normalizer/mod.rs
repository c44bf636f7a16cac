/*
    This module rewrites grammars into Chomsky normal form
*/

mod chain;
mod nullable;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use log::debug;

use crate::error_handling::ErrorType;
use crate::grammar::*;

// Every variant is a bug in the normalizer, never a problem with the grammar
#[derive(Debug, PartialEq)]
pub enum NormalizeError {
    // A rule longer than two symbols survived length reduction
    RuleTooLong(Rule),
    // An epsilon rule scheduled for deletion was already gone
    MissingEpsilonRule(Rule),
    // The epsilon rule of the fake start was scheduled for deletion
    FakeStartDeletion(Rule),
    // A rule that is not in Chomsky normal form survived every pass
    NotChomskyNormal(Rule),
}

impl ErrorType for NormalizeError {}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::RuleTooLong(rule) => write!(f, "Rule `{}` is longer than two symbols after length reduction", rule),
            NormalizeError::MissingEpsilonRule(rule) => write!(f, "Epsilon rule `{}` vanished before it could be deleted", rule),
            NormalizeError::FakeStartDeletion(rule) => write!(f, "Tried to delete fake start rule `{}`", rule),
            NormalizeError::NotChomskyNormal(rule) => write!(f, "Rule `{}` is not in Chomsky normal form", rule),
        }?;
        write!(f, " (this is a problem with chomsky, not the grammar)")
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Mints nonterminal names that collide with nothing already in use.
#[derive(Debug, Default)]
pub struct NameGenerator {
    count: usize,
    taken: HashSet<String>,
}

impl NameGenerator {
    pub fn avoiding<'a>(taken: impl IntoIterator<Item = &'a str>) -> Self {
        NameGenerator {
            count: 0,
            taken: taken.into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn next_name(&mut self) -> String {
        loop {
            self.count += 1;
            let name = format!("{{{}}}", self.count);
            if !self.taken.contains(&name) {
                return name;
            }
        }
    }
}

/// One normalization run. Owns the grammar it rewrites and the name
/// generator, so minted names are unique within the run.
pub struct Normalizer {
    grammar: Grammar,
    names: NameGenerator,
}

impl Normalizer {
    pub fn new(grammar: Grammar) -> Self {
        let names = NameGenerator::avoiding(grammar.rule_names());
        Normalizer { grammar, names }
    }

    pub fn run(mut self) -> Result<Grammar> {
        debug!("normalizing {} rules, start `{}`", self.grammar.rules.len(), self.grammar.start);

        self.isolate_terminals();
        debug!("after terminal isolation: {} rules", self.grammar.rules.len());

        self.reduce_length();
        debug!("after length reduction: {} rules", self.grammar.rules.len());

        nullable::eliminate(&mut self.grammar)?;
        debug!("after epsilon elimination: {} rules, start `{}`", self.grammar.rules.len(), self.grammar.start);

        chain::eliminate(&mut self.grammar);
        debug!("after chain elimination: {} rules", self.grammar.rules.len());

        check_chomsky_form(&self.grammar)?;
        Ok(self.grammar)
    }

    // Replaces terminals inside rules longer than one symbol with a minted
    // nonterminal deriving just that terminal
    fn isolate_terminals(&mut self) {
        let mut minted: HashMap<char, String> = HashMap::new();
        let mut rules = HashSet::with_capacity(self.grammar.rules.len());

        for rule in self.grammar.rules.drain() {
            if rule.len() <= 1 {
                rules.insert(rule);
                continue;
            }

            let product = rule.product().iter().map(|symbol| match symbol {
                Symbol::Terminal(c) => {
                    let name = minted.entry(*c).or_insert_with(|| self.names.next_name());
                    Symbol::nonterminal(name.clone())
                }
                Symbol::Nonterminal(_) => symbol.clone(),
            }).collect();
            rules.insert(Rule::new(rule.nonterminal(), product));
        }

        for (terminal, name) in minted {
            rules.insert(Rule::new(name, vec![Symbol::Terminal(terminal)]));
        }
        self.grammar.rules = rules;
    }

    // A -> X0 X1 ... Xk  becomes  A -> X0 Y1, Y1 -> X1 Y2, ..., Y(k-1) -> X(k-1) Xk
    fn reduce_length(&mut self) {
        let mut rules = HashSet::with_capacity(self.grammar.rules.len());

        for rule in self.grammar.rules.drain() {
            if rule.len() <= 2 {
                rules.insert(rule);
                continue;
            }

            let product = rule.product();
            let mut lhs = rule.nonterminal().to_owned();
            for symbol in &product[..product.len() - 2] {
                let next = self.names.next_name();
                rules.insert(Rule::new(lhs, vec![symbol.clone(), Symbol::nonterminal(next.clone())]));
                lhs = next;
            }
            rules.insert(Rule::new(lhs, product[product.len() - 2..].to_vec()));
        }

        self.grammar.rules = rules;
    }
}

/// Returns an equivalent grammar in Chomsky normal form. The only epsilon
/// rule that can remain is `FAKE_START -> ε`.
pub fn normalize(grammar: &Grammar) -> Result<Grammar> {
    Normalizer::new(grammar.clone()).run()
}

pub fn is_chomsky_normal(rule: &Rule, start: &str) -> bool {
    rule.as_terminal().is_some()
        || rule.as_binary().is_some()
        || (rule.is_epsilon() && rule.nonterminal() == FAKE_START && start == FAKE_START)
}

fn check_chomsky_form(grammar: &Grammar) -> Result<()> {
    match grammar.rules.iter().find(|rule| !is_chomsky_normal(rule, &grammar.start)) {
        Some(rule) => Err(NormalizeError::NotChomskyNormal(rule.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar(start: char, rules: &[(char, &str)]) -> Grammar {
        let mut grammar = Grammar::with_start(start);
        for (nonterminal, product) in rules {
            grammar.add_nonterminal(*nonterminal);
            for c in product.chars() {
                if is_nonterminal(c) {
                    grammar.add_nonterminal(c);
                } else {
                    grammar.add_terminal(c);
                }
            }
            grammar.add_rule(Rule::from_chars(*nonterminal, product));
        }
        grammar
    }

    fn assert_chomsky_normal(grammar: &Grammar) {
        for rule in &grammar.rules {
            assert!(is_chomsky_normal(rule, &grammar.start), "`{}` is not in CNF", rule);
        }
    }

    #[test]
    fn names_are_fresh() {
        let mut names = NameGenerator::avoiding(["{1}", "{3}"]);
        assert_eq!(names.next_name(), "{2}");
        assert_eq!(names.next_name(), "{4}");
        assert_eq!(names.next_name(), "{5}");
    }

    #[test]
    fn isolate_terminals_leaves_lone_terminals() {
        let mut normalizer = Normalizer::new(grammar('S', &[('S', "aSb"), ('S', "a"), ('S', "")]));
        normalizer.isolate_terminals();
        let rules = &normalizer.grammar.rules;

        assert!(rules.contains(&Rule::from_chars('S', "a")));
        assert!(rules.contains(&Rule::from_chars('S', "")));
        // one minted nonterminal per terminal, plus the three original rules
        assert_eq!(rules.len(), 5);
        let long = rules.iter().find(|rule| rule.len() == 3).unwrap();
        assert!(long.product().iter().all(|symbol| !symbol.is_terminal()));
    }

    #[test]
    fn reduce_length_chains_left_to_right() {
        let mut normalizer = Normalizer::new(grammar('S', &[('S', "ABCD"), ('S', "AB")]));
        normalizer.reduce_length();
        let rules = &normalizer.grammar.rules;

        assert_eq!(rules.len(), 4);
        assert!(rules.iter().all(|rule| rule.len() <= 2));
        assert!(rules.contains(&Rule::from_chars('S', "AB")));
        assert!(rules.contains(&Rule::new("S", vec![Symbol::nonterminal("A"), Symbol::nonterminal("{1}")])));
        assert!(rules.contains(&Rule::new("{1}", vec![Symbol::nonterminal("B"), Symbol::nonterminal("{2}")])));
        assert!(rules.contains(&Rule::new("{2}", vec![Symbol::nonterminal("C"), Symbol::nonterminal("D")])));
    }

    #[test]
    fn normalized_rules_are_chomsky_normal() {
        let grammars = vec![
            grammar('S', &[('S', "AB"), ('A', "a"), ('B', "b")]),
            grammar('S', &[('S', "")]),
            grammar('S', &[('S', "ABC"), ('A', "a"), ('B', "b"), ('C', "c")]),
            grammar('S', &[('S', "A"), ('A', "B"), ('B', "a")]),
            grammar('S', &[('S', "AB"), ('A', "a"), ('A', ""), ('B', "b")]),
            grammar('S', &[('S', "(S)S"), ('S', "")]),
            grammar('E', &[('E', "E+T"), ('E', "T"), ('T', "T*F"), ('T', "F"), ('F', "(E)"), ('F', "1")]),
            grammar('A', &[('A', "B"), ('B', "C"), ('C', "A"), ('C', "c"), ('B', "bB")]),
        ];
        for grammar in grammars {
            let normal = normalize(&grammar).unwrap();
            assert_chomsky_normal(&normal);
        }
    }

    #[test]
    fn nullable_start_gets_fake_start() {
        let normal = normalize(&grammar('S', &[('S', "aS"), ('S', "")])).unwrap();
        assert_eq!(normal.start, FAKE_START);
        assert!(normal.has_rule(&Rule::epsilon(FAKE_START)));
        assert_eq!(normal.rules.iter().filter(|rule| rule.is_epsilon()).count(), 1);
    }

    #[test]
    fn renormalizing_keeps_shape() {
        let once = normalize(&grammar('S', &[('S', "aSb"), ('S', ""), ('S', "SS")])).unwrap();
        let twice = normalize(&once).unwrap();
        assert_chomsky_normal(&twice);
        assert_eq!(twice.start, FAKE_START);
    }

    #[test]
    fn unit_cycle_terminates() {
        let normal = normalize(&grammar('A', &[('A', "B"), ('B', "A"), ('B', "b")])).unwrap();
        assert!(normal.rules.iter().all(|rule| rule.as_unit().is_none()));
        assert!(normal.has_rule(&Rule::from_chars('A', "b")));
    }

    #[test]
    fn input_grammar_is_untouched() {
        let original = grammar('S', &[('S', "ABC"), ('A', "a"), ('B', ""), ('C', "c")]);
        let copy = original.clone();
        normalize(&original).unwrap();
        assert_eq!(original, copy);
    }

    #[test]
    fn error_message_blames_normalizer() {
        let error = NormalizeError::RuleTooLong(Rule::from_chars('S', "ABC"));
        assert!(error.to_string().contains("S -> A B C"));
        assert!(error.to_string().contains("not the grammar"));
    }
}
