/*
    This module is for storing grammars and their rules
*/

use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

// Start symbol introduced when the real start symbol can derive the empty word.
// Never a member of the ordinary alphabet.
pub const FAKE_START: &str = "S_FAKE";

pub fn is_nonterminal(c: char) -> bool {
    c.is_ascii_uppercase()
}

pub fn is_terminal(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '[' | ']')
}

// The base unit in a grammar rule. Nonterminals are names rather than chars
// because normalization mints names outside the single letter alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(String),
}

impl Symbol {
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::Nonterminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(name) => Some(name),
            Symbol::Terminal(_) => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        if is_nonterminal(c) {
            Symbol::Nonterminal(c.to_string())
        } else {
            Symbol::Terminal(c)
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

/// A single production `nonterminal -> product`. Equality and hashing are
/// structural, so a `HashSet<Rule>` never holds the same production twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    nonterminal: String,
    product: Vec<Symbol>,
}

impl Rule {
    pub fn new(nonterminal: impl Into<String>, product: Vec<Symbol>) -> Self {
        Rule {
            nonterminal: nonterminal.into(),
            product,
        }
    }

    /// Builds a rule from the compact one-char-per-symbol notation, e.g.
    /// `Rule::from_chars('S', "aSb")`. Only names from the original alphabet
    /// can be written this way.
    pub fn from_chars(nonterminal: char, product: &str) -> Self {
        Rule::new(nonterminal.to_string(), product.chars().map(Symbol::from).collect())
    }

    pub fn epsilon(nonterminal: impl Into<String>) -> Self {
        Rule::new(nonterminal, Vec::new())
    }

    pub fn nonterminal(&self) -> &str {
        &self.nonterminal
    }

    pub fn product(&self) -> &[Symbol] {
        &self.product
    }

    pub fn len(&self) -> usize {
        self.product.len()
    }

    pub fn is_epsilon(&self) -> bool {
        self.product.is_empty()
    }

    // `A -> a`
    pub fn as_terminal(&self) -> Option<char> {
        match self.product.as_slice() {
            [Symbol::Terminal(c)] => Some(*c),
            _ => None,
        }
    }

    // `A -> B`
    pub fn as_unit(&self) -> Option<&str> {
        match self.product.as_slice() {
            [Symbol::Nonterminal(name)] => Some(name),
            _ => None,
        }
    }

    // `A -> B C`
    pub fn as_binary(&self) -> Option<(&str, &str)> {
        match self.product.as_slice() {
            [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] => Some((left, right)),
            _ => None,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "{} -> ε", self.nonterminal)
        } else {
            write!(f, "{} -> {}", self.nonterminal, self.product.iter().join(" "))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub start: String,
    pub nonterminals: HashSet<char>,
    pub terminals: HashSet<char>,
    pub rules: HashSet<Rule>,
}

impl Grammar {
    pub fn new(
        start: char,
        nonterminals: HashSet<char>,
        terminals: HashSet<char>,
        rules: HashSet<Rule>,
    ) -> Self {
        Grammar {
            start: start.to_string(),
            nonterminals,
            terminals,
            rules,
        }
    }

    // Starts an empty grammar that is filled in with the `add_*` methods
    pub fn with_start(start: char) -> Self {
        let mut grammar = Grammar::new(start, HashSet::new(), HashSet::new(), HashSet::new());
        grammar.nonterminals.insert(start);
        grammar
    }

    pub fn add_nonterminal(&mut self, nonterminal: char) -> &mut Self {
        self.nonterminals.insert(nonterminal);
        self
    }

    pub fn add_terminal(&mut self, terminal: char) -> &mut Self {
        self.terminals.insert(terminal);
        self
    }

    pub fn add_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.insert(rule);
        self
    }

    pub fn rules_of<'a>(&'a self, nonterminal: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.nonterminal() == nonterminal)
    }

    pub fn has_rule(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    // Every nonterminal name used by a rule, minted ones included
    pub fn rule_names(&self) -> HashSet<&str> {
        self.rules
            .iter()
            .flat_map(|rule| {
                std::iter::once(rule.nonterminal())
                    .chain(rule.product().iter().filter_map(Symbol::as_nonterminal))
            })
            .collect()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        for rule in self.rules.iter().sorted() {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_chars() {
        for c in ['A', 'S', 'Z'] {
            assert!(is_nonterminal(c));
            assert!(!is_terminal(c));
        }
        for c in ['a', 'z', '0', '9', '+', '-', '*', '/', '(', ')', '[', ']'] {
            assert!(is_terminal(c));
            assert!(!is_nonterminal(c));
        }
        for c in ['&', ' ', '{', 'é'] {
            assert!(!is_terminal(c));
            assert!(!is_nonterminal(c));
        }
    }

    #[test]
    fn rule_from_chars() {
        let rule = Rule::from_chars('S', "aSb");
        assert_eq!(rule.nonterminal(), "S");
        assert_eq!(rule.product(), &[
            Symbol::Terminal('a'),
            Symbol::nonterminal("S"),
            Symbol::Terminal('b')
        ]);
        assert!(Rule::from_chars('S', "").is_epsilon());
    }

    #[test]
    fn rule_shapes() {
        assert_eq!(Rule::from_chars('A', "a").as_terminal(), Some('a'));
        assert_eq!(Rule::from_chars('A', "B").as_unit(), Some("B"));
        assert_eq!(Rule::from_chars('A', "BC").as_binary(), Some(("B", "C")));
        assert_eq!(Rule::from_chars('A', "aC").as_binary(), None);
        assert_eq!(Rule::from_chars('A', "B").as_terminal(), None);
    }

    #[test]
    fn rules_compare_structurally() {
        let mut rules = HashSet::new();
        rules.insert(Rule::from_chars('S', "AB"));
        rules.insert(Rule::new("S", vec![Symbol::nonterminal("A"), Symbol::nonterminal("B")]));
        assert_eq!(rules.len(), 1);
        assert_ne!(Rule::from_chars('S', "AB"), Rule::from_chars('S', "BA"));
    }

    #[test]
    fn rule_display() {
        assert_eq!(Rule::from_chars('S', "aB").to_string(), "S -> a B");
        assert_eq!(Rule::epsilon(FAKE_START).to_string(), "S_FAKE -> ε");
    }

    #[test]
    fn build_incrementally() {
        let mut grammar = Grammar::with_start('S');
        grammar
            .add_nonterminal('A')
            .add_terminal('a')
            .add_rule(Rule::from_chars('S', "A"))
            .add_rule(Rule::from_chars('A', "a"));

        let explicit = Grammar::new(
            'S',
            HashSet::from(['S', 'A']),
            HashSet::from(['a']),
            HashSet::from([Rule::from_chars('S', "A"), Rule::from_chars('A', "a")])
        );
        assert_eq!(grammar, explicit);
        assert_eq!(grammar.rules_of("A").count(), 1);
        assert_eq!(grammar.rule_names(), HashSet::from(["S", "A"]));
    }
}
