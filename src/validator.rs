use std::collections::HashSet;

use crate::error::GrammarError;
use crate::grammar::{Grammar, Symbol, PARSE_ROOT};

/// Checks that every phrase symbol reachable from the parse root has at
/// least one rule.
pub fn validate(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut validator = Validator {
        grammar,
        visited: HashSet::new(),
    };
    validator.visit(PARSE_ROOT)
}

struct Validator<'g> {
    grammar: &'g Grammar,
    // (head, position among the head's rules); each rule is expanded once,
    // which is what stops the walk on cyclic grammars
    visited: HashSet<(Symbol, usize)>,
}

impl<'g> Validator<'g> {
    fn visit(&mut self, symbol: Symbol) -> Result<(), GrammarError> {
        if !symbol.is_phrase() {
            return Ok(());
        }

        let rules = self.grammar.rules_with_head(symbol);
        if rules.is_empty() {
            return Err(GrammarError::MissingSymbol {
                symbol,
                name: self.grammar.category_name(symbol).to_string(),
            });
        }

        for (index, rule) in rules.iter().enumerate() {
            if !self.visited.insert((symbol, index)) {
                continue;
            }
            for &child in rule.body() {
                self.visit(child)?;
            }
        }
        Ok(())
    }
}
