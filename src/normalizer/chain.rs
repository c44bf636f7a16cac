use std::collections::HashSet;

use log::trace;

use crate::grammar::*;

// Repeatedly replaces a unit rule `A -> B` with copies of B's rules. A removed
// unit rule is never added back, which bounds the loop by the number of
// nonterminal pairs even on unit cycles.
pub fn eliminate(grammar: &mut Grammar) {
    let mut removed: HashSet<Rule> = HashSet::new();

    while let Some(unit) = grammar.rules.iter().filter(|rule| rule.as_unit().is_some()).min().cloned() {
        let lhs = unit.nonterminal();
        let target = unit.as_unit().unwrap_or_default();

        let inherited: Vec<Rule> = grammar.rules_of(target)
            .filter(|rule| rule.as_unit() != Some(lhs))
            .map(|rule| Rule::new(lhs, rule.product().to_vec()))
            .filter(|rule| !removed.contains(rule))
            .collect();

        trace!("replacing `{}` with {} inherited rules", unit, inherited.len());
        grammar.rules.remove(&unit);
        grammar.rules.extend(inherited);
        removed.insert(unit);
    }
}
