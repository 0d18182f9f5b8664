use log::debug;

use super::{
    grammar::NameAllocator,
    symbol::{Production, Symbol},
    Grammar,
};

impl Grammar {
    /// Removes direct and indirect left recursion, minting names from a
    /// fresh [`NameAllocator`].
    pub fn eliminate_left_recursion(&mut self) {
        self.eliminate_left_recursion_with(&mut NameAllocator::new());
    }

    /// Orders non-terminals by name as A1..An. Each Ai first has leading
    /// references to earlier Aj expanded, then loses its direct recursion.
    /// Minted non-terminals join the end of the order.
    pub fn eliminate_left_recursion_with(&mut self, names: &mut NameAllocator) {
        let mut order: Vec<String> = self.non_terminal_iter().cloned().collect();
        order.sort();

        let mut i = 0;
        while i < order.len() {
            for j in 0..i {
                self.substitute_leading(&order[i], &order[j]);
            }
            if let Some(prime) = self.eliminate_direct_left_recursion(&order[i], names) {
                order.push(prime);
            }
            i += 1;
        }
    }

    /// Rewrites every `left -> inner γ` into `left -> β γ` for each
    /// alternative β of `inner`. Expansions go after the untouched
    /// alternatives.
    fn substitute_leading(&mut self, left: &str, inner: &str) {
        let productions = self.productions(left);
        if !productions.iter().any(|p| p.starts_with_non_terminal(inner)) {
            return;
        }

        let expansions = self.productions(inner);
        let (leading, untouched): (Vec<&Production>, Vec<&Production>) = productions
            .iter()
            .partition(|p| p.starts_with_non_terminal(inner));
        let mut rewritten: Vec<Production> = untouched.into_iter().cloned().collect();
        for production in leading {
            let gamma = production.suffix(1);
            rewritten.extend(expansions.iter().map(|beta| beta.concat(&gamma)));
        }

        debug!("substituted {} into {}: {} alternatives", inner, left, rewritten.len());
        self.set_productions(left, rewritten);
    }

    /// `A -> Aα | β` becomes `A -> βA'` and `A' -> αA' | ϵ`. Returns the
    /// name of A' if one was needed.
    fn eliminate_direct_left_recursion(
        &mut self,
        left: &str,
        names: &mut NameAllocator,
    ) -> Option<String> {
        let mut recursive: Vec<Production> = Vec::new();
        let mut others: Vec<Production> = Vec::new();
        for production in self.productions(left) {
            if production.starts_with_non_terminal(left) {
                let alpha = production.suffix(1);
                // `A -> A` derives nothing new
                if !alpha.is_epsilon() {
                    recursive.push(alpha);
                }
            } else {
                others.push(production.clone());
            }
        }

        if recursive.is_empty() {
            if others.len() != self.productions(left).len() {
                self.set_productions(left, others);
            }
            return None;
        }

        let prime = names.fresh(self);
        let prime_symbol = Symbol::NonTerminal(prime.clone());

        let new_left = others
            .iter()
            .map(|beta| beta.append(prime_symbol.clone()))
            .collect();
        let new_prime = recursive
            .iter()
            .map(|alpha| alpha.append(prime_symbol.clone()))
            .chain(std::iter::once(Production::epsilon()))
            .collect();

        debug!("eliminated direct left recursion on {} via {}", left, prime);
        self.set_productions(left, new_left);
        self.set_productions(&prime, new_prime);
        Some(prime)
    }
}
