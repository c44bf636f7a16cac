use std::collections::HashSet;

use super::lexer::Token;
use super::ReadErrorType::UndeclaredSymbol;
use super::{FileResult, Location, ReadError, ReadErrors};

// A lexed rule line, before its symbols are checked against the alphabets
#[derive(PartialEq, Debug)]
pub struct RuleLine {
    pub nonterminal: char,
    pub body: Vec<Token>,
    pub location: Location
}

fn get_rule_undeclared_symbols(rule: &RuleLine, nonterminals: &HashSet<char>, terminals: &HashSet<char>) -> ReadErrors {
    // The defined nonterminal first, then every body symbol missing from the
    // alphabet of its kind
    std::iter::once(Token::Nonterminal(rule.nonterminal))
        .chain(rule.body.iter().copied())
        .filter(|token| match token {
            Token::Nonterminal(c) => !nonterminals.contains(c),
            Token::Terminal(c) => !terminals.contains(c)
        })
        .map(|token| ReadError {
            location: rule.location.to_owned(),
            error: UndeclaredSymbol(token.symbol())
        })
        .collect()
}

pub fn verify_rules(rules: &[RuleLine], nonterminals: &HashSet<char>, terminals: &HashSet<char>) -> FileResult<()> {
    let errors: ReadErrors = rules.iter()
        .flat_map(|rule| get_rule_undeclared_symbols(rule, nonterminals, terminals))
        .collect();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn rule_line(nonterminal: char, body: Vec<Token>, line: usize) -> RuleLine {
        RuleLine {
            nonterminal,
            body,
            location: Location::at(Path::new("g.txt"), line)
        }
    }

    #[test]
    fn declared_rules_pass() {
        let rules = vec![
            rule_line('S', vec![Token::Nonterminal('A'), Token::Terminal('a')], 1),
            rule_line('A', vec![], 2)
        ];
        assert_eq!(verify_rules(&rules, &HashSet::from(['S', 'A']), &HashSet::from(['a'])), Ok(()));
    }

    #[test]
    fn undeclared_symbols_are_all_reported() {
        let rules = vec![
            rule_line('S', vec![Token::Nonterminal('B'), Token::Terminal('b')], 3),
            rule_line('C', vec![Token::Terminal('a')], 4)
        ];
        let errors = verify_rules(&rules, &HashSet::from(['S']), &HashSet::from(['a'])).unwrap_err();

        assert_eq!(errors, vec![
            ReadError::new(Location::at(Path::new("g.txt"), 3), UndeclaredSymbol('B')),
            ReadError::new(Location::at(Path::new("g.txt"), 3), UndeclaredSymbol('b')),
            ReadError::new(Location::at(Path::new("g.txt"), 4), UndeclaredSymbol('C'))
        ]);
    }
}
