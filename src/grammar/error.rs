use thiserror::Error;

/// Everything that can go wrong between grammar text and a result.
///
/// Parse failures carry the 1-based line number of the offending rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Line {line}: missing \"->\" in `{text}`")]
    MalformedRule { line: usize, text: String },

    #[error("Line {line}: left side must be a single uppercase letter (A-Z), found `{lhs}`")]
    InvalidNonTerminal { line: usize, lhs: String },

    #[error("Line {line}: empty alternative in `{text}`")]
    EmptyAlternative { line: usize, text: String },

    #[error("FOLLOW sets did not converge within {passes} passes")]
    NonConvergent { passes: usize },
}
