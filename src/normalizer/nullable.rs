use std::collections::HashSet;

use log::trace;

use super::{NormalizeError, Result};
use crate::grammar::*;

// Least fixed point of "every symbol of some product is nullable"
pub fn nullable_nonterminals(rules: &HashSet<Rule>) -> HashSet<String> {
    let mut nullable: HashSet<String> = HashSet::new();

    let mut changed = true;
    while changed {
        changed = false;
        for rule in rules {
            if nullable.contains(rule.nonterminal()) {
                continue;
            }
            let all_nullable = rule.product().iter().all(|symbol| match symbol {
                Symbol::Nonterminal(name) => nullable.contains(name),
                Symbol::Terminal(_) => false,
            });
            if all_nullable {
                trace!("`{}` is nullable through `{}`", rule.nonterminal(), rule);
                nullable.insert(rule.nonterminal().to_owned());
                changed = true;
            }
        }
    }

    nullable
}

// Removes every epsilon rule, adding the shortened variants of binary rules
// with a nullable side. Expects products of at most two symbols.
pub fn eliminate(grammar: &mut Grammar) -> Result<()> {
    if let Some(rule) = grammar.rules.iter().find(|rule| rule.len() > 2) {
        return Err(NormalizeError::RuleTooLong(rule.clone()));
    }

    let nullable = nullable_nonterminals(&grammar.rules);
    let start_was_fake = grammar.start == FAKE_START;

    let mut new_rules = grammar.rules.clone();
    for rule in &grammar.rules {
        if let [first, second] = rule.product() {
            if first.as_nonterminal().is_some_and(|name| nullable.contains(name)) {
                new_rules.insert(Rule::new(rule.nonterminal(), vec![second.clone()]));
            }
            if second.as_nonterminal().is_some_and(|name| nullable.contains(name)) {
                new_rules.insert(Rule::new(rule.nonterminal(), vec![first.clone()]));
            }
        }
    }

    if nullable.contains(&grammar.start) && !start_was_fake {
        new_rules.insert(Rule::epsilon(FAKE_START));
        new_rules.insert(Rule::new(FAKE_START, vec![Symbol::nonterminal(grammar.start.clone())]));
        grammar.start = FAKE_START.to_owned();
    }

    // A fake start that is already the start keeps its epsilon rule
    let doomed = grammar.rules.iter()
        .filter(|rule| rule.is_epsilon())
        .filter(|rule| !(start_was_fake && rule.nonterminal() == FAKE_START));
    for rule in doomed {
        if rule.nonterminal() == FAKE_START {
            return Err(NormalizeError::FakeStartDeletion(rule.clone()));
        }
        if !new_rules.remove(rule) {
            return Err(NormalizeError::MissingEpsilonRule(rule.clone()));
        }
    }

    grammar.rules = new_rules;
    Ok(())
}
