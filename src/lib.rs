extern crate wasm_bindgen;

use serde_json::json;
use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{FirstFollow, Grammar, GrammarError, NameAllocator, Production, Symbol, Tokenizer};

fn error_to_json(e: impl std::fmt::Display) -> String {
    json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    let result = crate::Grammar::parse(grammar).and_then(|g| {
        let sets = g.calculate_first_follow()?;
        Ok((g, sets))
    });
    match result {
        Ok((g, sets)) => g
            .to_non_terminal_output_vec(&sets)
            .to_json()
            .unwrap_or_else(error_to_json),
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn eliminate_left_recursion_to_text(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(mut g) => {
            g.eliminate_left_recursion();
            g.to_production_output_vec().to_plaintext()
        }
        Err(e) => format!("Error: {}", e),
    }
}

#[wasm_bindgen]
pub fn left_factor_to_text(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(mut g) => {
            g.left_factor();
            g.to_production_output_vec().to_plaintext()
        }
        Err(e) => format!("Error: {}", e),
    }
}




#[cfg(test)]
mod left_recursion_tests {
    use crate::test_util::{alternatives, assert_no_direct_left_recursion};
    use crate::{Grammar, NameAllocator};

    #[test]
    fn direct() {
        let mut g = Grammar::parse("E->E+T|T").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "E"), vec!["TX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["+TX1", "ϵ"]);
        assert_no_direct_left_recursion(&g);
    }

    #[test]
    fn expression_grammar() {
        let mut g = Grammar::parse("E->E+T|T\nT->T*F|F\nF->(E)|i").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(g.non_terminal_iter().collect::<Vec<_>>(), vec!["E", "T", "F", "X1", "X2"]);
        assert_eq!(alternatives(&g, "E"), vec!["TX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["+TX1", "ϵ"]);
        // F sorts before T, so T's leading F gets expanded first
        assert_eq!(alternatives(&g, "T"), vec!["(E)X2", "iX2"]);
        assert_eq!(alternatives(&g, "X2"), vec!["*FX2", "ϵ"]);
        assert_eq!(alternatives(&g, "F"), vec!["(E)", "i"]);
        assert_no_direct_left_recursion(&g);
    }

    #[test]
    fn indirect() {
        let mut g = Grammar::parse("A->Bc|d\nB->Ab|e").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "A"), vec!["Bc", "d"]);
        assert_eq!(alternatives(&g, "B"), vec!["eX1", "dbX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["cbX1", "ϵ"]);
        assert_no_direct_left_recursion(&g);
    }

    #[test]
    fn epsilon_base_case() {
        let mut g = Grammar::parse("S->Sa|ϵ").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "S"), vec!["X1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["aX1", "ϵ"]);
    }

    #[test]
    fn substitution_of_epsilon() {
        let mut g = Grammar::parse("B->Aa\nA->b|ϵ").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "B"), vec!["ba", "a"]);
    }

    #[test]
    fn expansions_follow_untouched_alternatives() {
        let mut g = Grammar::parse("B->Ab|c\nA->a|d").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "B"), vec!["c", "ab", "db"]);
    }

    #[test]
    fn trivial_cycle_is_dropped() {
        let mut g = Grammar::parse("S->S|a").unwrap();
        g.eliminate_left_recursion();

        assert_eq!(alternatives(&g, "S"), vec!["a"]);
        assert_eq!(g.rules.len(), 1);
    }

    #[test]
    fn untouched_without_recursion() {
        let mut g = Grammar::parse("S->aA\nA->b").unwrap();
        let before = g.clone();
        g.eliminate_left_recursion();
        assert_eq!(g, before);
    }

    #[test]
    fn counter_restarts_each_run() {
        for _ in 0..2 {
            let mut g = Grammar::parse("E->E+T|T").unwrap();
            g.eliminate_left_recursion();
            assert!(g.is_non_terminal("X1"));
            assert!(!g.is_non_terminal("X2"));
        }
    }

    #[test]
    fn shared_allocator_skips_taken_names() {
        let mut names = NameAllocator::new();
        let mut g = Grammar::parse("E->E+T|T\nT->T*i|i").unwrap();
        g.eliminate_left_recursion_with(&mut names);
        assert_eq!(names.fresh(&g), "X3");

        let mut fresh = NameAllocator::new();
        assert_eq!(fresh.fresh(&g), "X3");
    }
}

#[cfg(test)]
mod left_factoring_tests {
    use crate::test_util::alternatives;
    use crate::{Grammar, NameAllocator};

    #[test]
    fn simple() {
        let mut g = Grammar::parse("A->aB|aC|b").unwrap();
        g.left_factor();

        assert_eq!(alternatives(&g, "A"), vec!["aX1", "b"]);
        assert_eq!(alternatives(&g, "X1"), vec!["B", "C"]);
    }

    #[test]
    fn longest_prefix_and_exact_match() {
        let mut g = Grammar::parse("S->abc|abd|ab|x").unwrap();
        g.left_factor();

        assert_eq!(alternatives(&g, "S"), vec!["abX1", "x"]);
        assert_eq!(alternatives(&g, "X1"), vec!["c", "d", "ϵ"]);
    }

    #[test]
    fn nested_factoring_through_queue() {
        let mut g = Grammar::parse("S->abc|abd|aef").unwrap();
        g.left_factor();

        assert_eq!(alternatives(&g, "S"), vec!["aX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["bX2", "ef"]);
        assert_eq!(alternatives(&g, "X2"), vec!["c", "d"]);
    }

    #[test]
    fn textbook_if_statement() {
        let mut g = Grammar::parse("S->iEtS|iEtSeS|a\nE->b").unwrap();
        g.left_factor();

        assert_eq!(alternatives(&g, "S"), vec!["iEtSX1", "a"]);
        assert_eq!(alternatives(&g, "X1"), vec!["ϵ", "eS"]);
        assert_eq!(alternatives(&g, "E"), vec!["b"]);
    }

    #[test]
    fn epsilon_is_never_factored() {
        let mut g = Grammar::parse("S->ϵ|ϵ|a").unwrap();
        let before = g.clone();
        g.left_factor();
        assert_eq!(g, before);
    }

    #[test]
    fn idempotent() {
        for text in ["A->aB|aC|b", "S->abc|abd|aef|ab|ab", "S->iEtS|iEtSeS|a\nE->b"] {
            let mut g = Grammar::parse(text).unwrap();
            let mut names = NameAllocator::new();
            g.left_factor_with(&mut names);
            let once = g.clone();
            g.left_factor_with(&mut names);
            assert_eq!(g, once, "{}", text);
        }
    }

    #[test]
    fn minted_name_that_reads_as_existing_symbols() {
        let mut g = Grammar::parse("S->X1|Xa\nX->b").unwrap();
        assert!(g.renders_name("X1"));
        assert!(!g.renders_name("X2"));

        g.left_factor();
        assert_eq!(alternatives(&g, "S"), vec!["XX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["1", "a"]);
        assert_eq!(
            g.productions("S")[0].symbols()[1],
            crate::Symbol::NonTerminal("X1".to_string())
        );
    }

    #[test]
    fn duplicates_collapse() {
        let mut g = Grammar::parse("S->ab|ab").unwrap();
        g.left_factor();

        assert_eq!(alternatives(&g, "S"), vec!["abX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["ϵ", "ϵ"]);
    }

    #[test]
    fn after_left_recursion() {
        let mut names = NameAllocator::new();
        let mut g = Grammar::parse("E->E+T|E-T|T\nT->i").unwrap();
        g.eliminate_left_recursion_with(&mut names);
        g.left_factor_with(&mut names);

        assert_eq!(alternatives(&g, "E"), vec!["TX1"]);
        assert_eq!(alternatives(&g, "X1"), vec!["+TX1", "-TX1", "ϵ"]);
    }
}
