use indexmap::IndexMap;
use log::warn;

use super::{symbol::Production, FRESH_PREFIX};

/// Non-terminal name to alternatives, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    pub rules: IndexMap<String, Vec<Production>>,
    pub start_symbol: Option<String>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    pub fn rule_iter(&self) -> impl Iterator<Item = (&String, &Vec<Production>)> {
        self.rules.iter()
    }

    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn productions(&self, name: &str) -> &[Production] {
        self.rules.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends an alternative, registering `left` on first sight. The first
    /// non-terminal ever added becomes the start symbol.
    pub fn add_production(&mut self, left: &str, right: Production) {
        if self.start_symbol.is_none() {
            self.start_symbol = Some(left.to_string());
        }
        self.rules.entry(left.to_string()).or_default().push(right);
    }

    /// Replaces the alternatives of `left`, keeping its position if it
    /// already exists and appending it otherwise.
    pub fn set_productions(&mut self, left: &str, rights: Vec<Production>) {
        if self.start_symbol.is_none() {
            self.start_symbol = Some(left.to_string());
        }
        self.rules.insert(left.to_string(), rights);
    }

    /// Whether `name` already shows up in the printed form of some
    /// alternative, e.g. `X1` in `S -> X1` where `X` is a non-terminal
    /// and `1` a terminal.
    pub fn renders_name(&self, name: &str) -> bool {
        self.rules
            .values()
            .flatten()
            .any(|production| production.to_string().contains(name))
    }
}

/// Mints `X1`, `X2`, ... for non-terminals introduced by a rewrite.
///
/// Owned by the caller of a transformation, so separate runs never share a
/// counter. Names already taken in the grammar are skipped.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    counter: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, grammar: &Grammar) -> String {
        loop {
            self.counter += 1;
            let name = format!("{}{}", FRESH_PREFIX, self.counter);
            if !grammar.is_non_terminal(&name) {
                if grammar.renders_name(&name) {
                    warn!("`{}` also reads as existing symbols, output may be ambiguous", name);
                }
                return name;
            }
        }
    }
}
