use std::fmt;

use super::{END_MARK, EPSILON, EPSILON_ALIASES};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    NonTerminal(String),
    Terminal(String),
    Epsilon,
    /// Only ever found in FOLLOW sets.
    EndMarker,
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerminal(name) | Symbol::Terminal(name) => name.as_str(),
            Symbol::Epsilon => EPSILON,
            Symbol::EndMarker => END_MARK,
        }
    }

    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_non_terminal_named(&self, name: &str) -> bool {
        self.non_terminal() == Some(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A right-hand side.
///
/// Always normalized: `Epsilon` is never mixed with other symbols and the
/// empty sequence is stored as `[Epsilon]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        let symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|s| *s != Symbol::Epsilon)
            .collect();
        if symbols.is_empty() {
            Self::epsilon()
        } else {
            Self(symbols)
        }
    }

    pub fn epsilon() -> Self {
        Self(vec![Symbol::Epsilon])
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.len() == 1 && self.0[0] == Symbol::Epsilon
    }

    /// The symbols as stored, `[Epsilon]` for the empty production.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// The symbols that actually get derived, empty for the empty production.
    pub fn body(&self) -> &[Symbol] {
        if self.is_epsilon() {
            &[]
        } else {
            &self.0
        }
    }

    pub fn leading(&self) -> &Symbol {
        &self.0[0]
    }

    pub fn starts_with_non_terminal(&self, name: &str) -> bool {
        self.leading().is_non_terminal_named(name)
    }

    /// Everything after the first `n` symbols of the body.
    pub fn suffix(&self, n: usize) -> Self {
        Self::new(self.body().iter().skip(n).cloned().collect())
    }

    pub fn concat(&self, other: &Production) -> Self {
        Self::new(self.body().iter().chain(other.body()).cloned().collect())
    }

    pub fn append(&self, symbol: Symbol) -> Self {
        Self::new(self.body().iter().cloned().chain(Some(symbol)).collect())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

pub fn is_epsilon_literal(text: &str) -> bool {
    EPSILON_ALIASES.contains(&text)
}

/// Splits alternative text into symbols.
///
/// Without declared terminals every character is its own symbol. Declared
/// terminals are matched longest-first before falling back to a single
/// character, so `id` can be one terminal instead of `i`,`d`.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    terminals: Vec<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terminals<I, S>(terminals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terminals: Vec<String> = terminals
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        terminals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terminals.dedup();
        Self { terminals }
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// `is_defined` answers whether an uppercase letter names a rule of the
    /// grammar; undefined ones become terminals.
    pub fn tokenize<F>(&self, alternative: &str, is_defined: F) -> Production
    where
        F: Fn(&str) -> bool,
    {
        if is_epsilon_literal(alternative) {
            return Production::epsilon();
        }

        let mut symbols = Vec::new();
        let mut rest = alternative;
        while let Some(c) = rest.chars().next() {
            if let Some(t) = self.terminals.iter().find(|t| rest.starts_with(t.as_str())) {
                symbols.push(Symbol::Terminal(t.clone()));
                rest = &rest[t.len()..];
                continue;
            }

            let (head, tail) = rest.split_at(c.len_utf8());
            rest = tail;
            if c.is_whitespace() {
                continue;
            }
            symbols.push(if is_epsilon_literal(head) {
                Symbol::Epsilon
            } else if c.is_ascii_uppercase() && is_defined(head) {
                Symbol::NonTerminal(head.to_string())
            } else {
                Symbol::Terminal(head.to_string())
            });
        }
        Production::new(symbols)
    }
}
