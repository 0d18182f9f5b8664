use std::collections::VecDeque;

use indexmap::IndexMap;
use log::debug;

use super::{
    grammar::NameAllocator,
    symbol::{Production, Symbol},
    Grammar,
};

/// Length of the longest symbol prefix shared by every production.
fn common_prefix_len(productions: &[Production]) -> usize {
    let (first, rest) = match productions.split_first() {
        Some(split) => split,
        None => return 0,
    };
    let first = first.body();
    rest.iter().fold(first.len(), |len, production| {
        first
            .iter()
            .zip(production.body())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    })
}

impl Grammar {
    /// Factors common prefixes out of alternatives, minting names from a
    /// fresh [`NameAllocator`].
    pub fn left_factor(&mut self) {
        self.left_factor_with(&mut NameAllocator::new());
    }

    /// Works through a queue seeded with the current non-terminals. Each
    /// group of alternatives sharing a leading symbol becomes
    /// `prefix A'`, and `A'` is queued so its suffixes get factored too.
    pub fn left_factor_with(&mut self, names: &mut NameAllocator) {
        let mut queue: VecDeque<String> = self.non_terminal_iter().cloned().collect();

        while let Some(current) = queue.pop_front() {
            let productions = self.productions(&current);
            if productions.len() <= 1 {
                continue;
            }

            let mut groups: IndexMap<&Symbol, Vec<Production>> = IndexMap::new();
            for production in productions {
                groups
                    .entry(production.leading())
                    .or_default()
                    .push(production.clone());
            }
            if groups.len() == productions.len() {
                continue;
            }
            let groups: Vec<(Symbol, Vec<Production>)> = groups
                .into_iter()
                .map(|(leading, members)| (leading.clone(), members))
                .collect();

            let mut rewritten = Vec::new();
            for (leading, members) in groups {
                // ϵ alternatives are never factored
                if members.len() <= 1 || leading == Symbol::Epsilon {
                    rewritten.extend(members);
                    continue;
                }

                let len = common_prefix_len(&members);
                if len == 0 {
                    rewritten.extend(members);
                    continue;
                }

                let prime = names.fresh(self);
                let prefix = Production::new(members[0].body()[..len].to_vec());
                let suffixes = members.iter().map(|p| p.suffix(len)).collect();

                debug!(
                    "factored {} out of {} alternatives of {} into {}",
                    prefix,
                    members.len(),
                    current,
                    prime
                );
                rewritten.push(prefix.append(Symbol::NonTerminal(prime.clone())));
                self.set_productions(&prime, suffixes);
                queue.push_back(prime);
            }

            self.set_productions(&current, rewritten);
        }
    }
}
