pub mod eliminate_left_recursion;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod left_factoring;
pub mod parse;
pub mod pretty_print;
pub mod symbol;
pub use error::GrammarError;
pub use first_follow::FirstFollow;
pub use grammar::{Grammar, NameAllocator};
pub use symbol::{Production, Symbol, Tokenizer};

pub const EPSILON: &str = "ϵ";
pub const EPSILON_ALIASES: [&str; 3] = ["ϵ", "eps", "ε"];
pub const END_MARK: &str = "$";
pub const END_KEYWORD: &str = "END";
pub const FRESH_PREFIX: &str = "X";
pub const MAX_FOLLOW_PASSES: usize = 1000;
