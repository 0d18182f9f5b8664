use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::{debug, warn};

use super::{
    error::GrammarError,
    symbol::{Symbol, Tokenizer},
    Grammar, END_KEYWORD,
};

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        Self::parse_with(grammar, &Tokenizer::default())
    }

    /// Reads one `A->alpha|beta` rule per line. Alternatives are kept as
    /// text until every left side is known, then tokenized.
    pub fn parse_with(grammar: &str, tokenizer: &Tokenizer) -> Result<Self, GrammarError> {
        let mut raw_productions: IndexMap<String, Vec<&str>> = IndexMap::new();

        for (i, line) in grammar.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.eq_ignore_ascii_case(END_KEYWORD) {
                continue;
            }

            let (left, rights) = line.split_once("->").ok_or_else(|| {
                GrammarError::MalformedRule {
                    line: i + 1,
                    text: line.to_string(),
                }
            })?;

            let left = left.trim();
            let mut chars = left.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => {}
                _ => {
                    return Err(GrammarError::InvalidNonTerminal {
                        line: i + 1,
                        lhs: left.to_string(),
                    })
                }
            }

            let alternatives = raw_productions.entry(left.to_string()).or_default();
            for right in rights.split('|').map(str::trim) {
                if right.is_empty() {
                    return Err(GrammarError::EmptyAlternative {
                        line: i + 1,
                        text: line.to_string(),
                    });
                }
                alternatives.push(right);
            }
        }

        let mut g = Self::new();
        let mut undefined: BTreeSet<String> = BTreeSet::new();
        for (left, rights) in &raw_productions {
            for right in rights {
                let production = tokenizer.tokenize(right, |s| raw_productions.contains_key(s));
                undefined.extend(production.symbols().iter().filter_map(|s| match s {
                    Symbol::Terminal(t) if t.len() == 1 && t.chars().all(|c| c.is_ascii_uppercase()) => {
                        Some(t.clone())
                    }
                    _ => None,
                }));
                g.add_production(left, production);
            }
        }

        for name in &undefined {
            warn!("`{}` has no rule, treating it as a terminal", name);
        }
        debug!(
            "parsed {} non-terminals, start symbol {:?}",
            g.rules.len(),
            g.start_symbol
        );

        Ok(g)
    }
}
