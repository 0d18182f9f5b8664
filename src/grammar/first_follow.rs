use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::trace;

use super::{error::GrammarError, symbol::Symbol, Grammar, MAX_FOLLOW_PASSES};

/// FIRST and FOLLOW sets of every non-terminal, in grammar order.
///
/// FIRST sets may hold `Epsilon`; FOLLOW sets never do, and the start
/// symbol's always holds `EndMarker`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstFollow {
    pub first: IndexMap<String, BTreeSet<Symbol>>,
    pub follow: IndexMap<String, BTreeSet<Symbol>>,
}

impl FirstFollow {
    fn new(grammar: &Grammar) -> Self {
        let empty = || {
            grammar
                .non_terminal_iter()
                .map(|nt| (nt.clone(), BTreeSet::new()))
                .collect()
        };
        Self {
            first: empty(),
            follow: empty(),
        }
    }

    pub fn first_of_symbol(&self, symbol: &Symbol) -> BTreeSet<Symbol> {
        match symbol {
            Symbol::NonTerminal(name) => self.first.get(name).cloned().unwrap_or_default(),
            other => BTreeSet::from([other.clone()]),
        }
    }

    /// FIRST of a symbol string. Scanning stops at the first symbol that
    /// cannot derive the empty string; `Epsilon` is included only when none
    /// does, which makes the empty string's FIRST `{Epsilon}`.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<Symbol> {
        let mut result = BTreeSet::new();
        for symbol in symbols {
            let mut first = self.first_of_symbol(symbol);
            let nullable = first.remove(&Symbol::Epsilon);
            result.extend(first);
            if !nullable {
                return result;
            }
        }
        result.insert(Symbol::Epsilon);
        result
    }

    pub fn is_nullable(&self, name: &str) -> bool {
        self.first
            .get(name)
            .map_or(false, |first| first.contains(&Symbol::Epsilon))
    }
}

impl Grammar {
    pub fn calculate_first_follow(&self) -> Result<FirstFollow, GrammarError> {
        self.calculate_first_follow_within(MAX_FOLLOW_PASSES)
    }

    /// Like [`Grammar::calculate_first_follow`] with a custom ceiling on
    /// FOLLOW passes.
    pub fn calculate_first_follow_within(
        &self,
        max_follow_passes: usize,
    ) -> Result<FirstFollow, GrammarError> {
        let mut sets = FirstFollow::new(self);
        self.calculate_first(&mut sets);
        self.calculate_follow(&mut sets, max_follow_passes)?;
        Ok(sets)
    }

    fn calculate_first(&self, sets: &mut FirstFollow) {
        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for (left, productions) in self.rule_iter() {
                let first = productions
                    .iter()
                    .fold(BTreeSet::new(), |mut first, production| {
                        first.extend(sets.first_of_sequence(production.symbols()));
                        first
                    });

                let current = &mut sets.first[left];
                let before = current.len();
                current.extend(first);
                if current.len() > before {
                    changed = true;
                }
            }
        }
        trace!("FIRST sets settled after {} passes", passes);
    }

    fn calculate_follow(
        &self,
        sets: &mut FirstFollow,
        max_passes: usize,
    ) -> Result<(), GrammarError> {
        let start = match &self.start_symbol {
            Some(start) => start,
            None => return Ok(()),
        };
        if let Some(follow) = sets.follow.get_mut(start) {
            follow.insert(Symbol::EndMarker);
        }

        let mut passes = 0;
        let mut changed = true;
        while changed {
            if passes == max_passes {
                return Err(GrammarError::NonConvergent { passes });
            }
            passes += 1;
            changed = false;

            for (left, productions) in self.rule_iter() {
                for production in productions {
                    let symbols = production.symbols();
                    for (i, symbol) in symbols.iter().enumerate() {
                        let b = match symbol.non_terminal() {
                            Some(b) if sets.follow.contains_key(b) => b,
                            _ => continue,
                        };

                        let mut addition = sets.first_of_sequence(&symbols[i + 1..]);
                        if addition.remove(&Symbol::Epsilon) {
                            addition.extend(sets.follow[left].iter().cloned());
                        }

                        let follow = &mut sets.follow[b];
                        let before = follow.len();
                        follow.extend(addition);
                        if follow.len() > before {
                            changed = true;
                        }
                    }
                }
            }
        }
        trace!("FOLLOW sets settled after {} passes", passes);

        Ok(())
    }
}
