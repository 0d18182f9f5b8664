use crowbook_text_processing::escape;
use serde::Serialize;

use super::{first_follow::FirstFollow, symbol::Symbol, Grammar, EPSILON};

/// For math mode (`array`).
fn tex(s: &str) -> String {
    escape::tex(s).replace(EPSILON, "\\epsilon")
}

/// For text mode (`tabular`).
fn tex_text(s: &str) -> String {
    escape::tex(s).replace(EPSILON, "$\\epsilon$")
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        format!(
            "{} -> {}",
            self.left,
            self.rights
                .iter()
                .map(|right| right.concat())
                .collect::<Vec<_>>()
                .join(" | ")
        )
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        let left = if and_sign {
            format!("{} & \\rightarrow &", tex(self.left))
        } else {
            format!("{} \\rightarrow ", tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| right.iter().map(|s| tex(s)).collect::<Vec<_>>().join(" \\ "))
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    /// One `A -> α | β` line per non-terminal.
    pub fn to_plaintext(&self) -> String {
        self.productions
            .iter()
            .map(|p| p.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|p| p.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .rule_iter()
            .map(|(left, rights)| ProductionOutput {
                left: left.as_str(),
                rights: rights
                    .iter()
                    .map(|right| right.symbols().iter().map(Symbol::name).collect())
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[derive(Debug, Clone, Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    productions: Vec<String>,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter().map(|s| tex_text(s)).collect::<Vec<_>>().join(r"\ ")
        }

        format!(
            "{} & {} & {} & {}",
            tex_text(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut lines = vec!["Productions:".to_string()];
        lines.extend(
            self.data
                .iter()
                .map(|nt| format!("{} -> {}", nt.name, nt.productions.join(" | "))),
        );

        lines.push(String::new());
        lines.push("FIRST sets:".to_string());
        lines.extend(
            self.data
                .iter()
                .map(|nt| format!("FIRST({}) = {{ {} }}", nt.name, nt.first.join(", "))),
        );

        lines.push(String::new());
        lines.push("FOLLOW sets:".to_string());
        lines.extend(
            self.data
                .iter()
                .map(|nt| format!("FOLLOW({}) = {{ {} }}", nt.name, nt.follow.join(", "))),
        );

        lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    /// Sets are listed sorted by their rendered text.
    pub fn to_non_terminal_output_vec<'a>(
        &'a self,
        sets: &'a FirstFollow,
    ) -> NonTerminalOutputVec<'a> {
        let sorted = |set: Option<&'a std::collections::BTreeSet<Symbol>>| {
            let mut names: Vec<&'a str> = set
                .into_iter()
                .flatten()
                .map(Symbol::name)
                .collect();
            names.sort_unstable();
            names.dedup();
            names
        };

        let data = self
            .rule_iter()
            .map(|(name, productions)| NonTerminalOutput {
                name: name.as_str(),
                productions: productions.iter().map(|p| p.to_string()).collect(),
                nullable: sets.is_nullable(name),
                first: sorted(sets.first.get(name)),
                follow: sorted(sets.follow.get(name)),
            })
            .collect();
        NonTerminalOutputVec { data }
    }
}
