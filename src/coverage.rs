//! Expansion keys and the reachable-expansion ceiling of a grammar.

use crate::error::ErrorRepr;
use crate::{nonterminals, DerivationTree, Error, Grammar};

use fxhash::FxHashSet;

/// A set of expansion keys, see [`expansion_key`].
pub type ExpansionSet = FxHashSet<String>;

/// The right-hand side of an expansion key.
#[derive(Debug, Clone, Copy)]
pub enum Expansion<'a> {
    /// A production as written in the grammar.
    Text(&'a str),
    /// The children of an already expanded node, keyed by their terminal text.
    Tree(&'a [DerivationTree]),
}

/// Returns the key `"SYMBOL -> EXPANSION"` identifying one coverage unit.
///
/// For [`Expansion::Tree`] the expansion text is the terminal text of the node
/// `(symbol, children)`, so a childless node is keyed by `symbol` itself.
pub fn expansion_key(symbol: &str, expansion: Expansion<'_>) -> String {
    let mut key = String::with_capacity(symbol.len() + 4);
    key.push_str(symbol);
    key.push_str(" -> ");
    match expansion {
        Expansion::Text(production) => key.push_str(production),
        Expansion::Tree([]) => key.push_str(symbol),
        Expansion::Tree(children) => {
            for child in children {
                child.write_terminals(&mut key);
            }
        }
    }
    key
}

/// Result of [`reachable_expansions`].
#[derive(Debug, Clone, Default)]
pub struct Reachable<'a> {
    /// Every expansion key reachable within the depth limit.
    pub expansions: ExpansionSet,
    /// Every symbol the traversal expanded.
    pub symbols_seen: FxHashSet<&'a str>,
}

impl Reachable<'_> {
    /// Fails if some symbol of `grammar` was never seen by the traversal,
    /// i.e. is not reachable from where the traversal started.
    pub fn ensure_connected(&self, grammar: &Grammar) -> Result<(), Error> {
        let missing: Vec<String> = grammar
            .symbols()
            .filter(|s| !self.symbols_seen.contains(s))
            .map(String::from)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error(ErrorRepr::Disconnected(missing)))
        }
    }
}

/// Returns every expansion reachable from `symbol` within `max_depth` levels
/// (`None` for no limit), independent of any random choice.
///
/// The traversal is depth first and never expands a symbol twice: once a symbol is
/// seen, later references to it are skipped. This guarantees termination on cyclic
/// grammars, at the price of under-counting expansions that are only reachable
/// through a second visit within a tighter depth limit.
///
/// # Errors
/// Fails if a reachable nonterminal reference is not defined by `grammar`.
pub fn reachable_expansions<'a>(
    grammar: &'a Grammar,
    symbol: &'a str,
    max_depth: Option<usize>,
) -> Result<Reachable<'a>, Error> {
    let mut symbols_seen = FxHashSet::default();
    let expansions = collect(grammar, symbol, max_depth, &mut symbols_seen)?;
    Ok(Reachable {
        expansions,
        symbols_seen,
    })
}

/// Returns every expansion reachable from `start_symbol`, see [`reachable_expansions`].
///
/// # Errors
/// Besides undefined references, fails if some symbol of `grammar` is not reachable
/// from `start_symbol` within `max_depth`.
pub fn max_expansion_coverage(
    grammar: &Grammar,
    start_symbol: &str,
    max_depth: Option<usize>,
) -> Result<ExpansionSet, Error> {
    let reachable = reachable_expansions(grammar, start_symbol, max_depth)?;
    reachable.ensure_connected(grammar)?;
    Ok(reachable.expansions)
}

fn collect<'a>(
    grammar: &'a Grammar,
    symbol: &'a str,
    max_depth: Option<usize>,
    symbols_seen: &mut FxHashSet<&'a str>,
) -> Result<ExpansionSet, Error> {
    if max_depth == Some(0) {
        return Ok(ExpansionSet::default());
    }

    symbols_seen.insert(symbol);

    let productions = grammar
        .get(symbol)
        .ok_or_else(|| Error(ErrorRepr::UndefinedSymbol(symbol.to_string())))?;
    let next_depth = max_depth.map(|d| d - 1);

    let mut expansions = ExpansionSet::default();
    for production in productions {
        expansions.insert(expansion_key(symbol, Expansion::Text(production)));
        for nonterminal in nonterminals(production) {
            if !symbols_seen.contains(nonterminal) {
                expansions.extend(collect(grammar, nonterminal, next_depth, symbols_seen)?);
            }
        }
    }
    Ok(expansions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: ExpansionSet) -> Vec<String> {
        let mut v: Vec<_> = set.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn keys() {
        assert_eq!(
            expansion_key("<start>", Expansion::Text("<digit><digit>")),
            "<start> -> <digit><digit>"
        );
        assert_eq!(expansion_key("<e>", Expansion::Text("")), "<e> -> ");

        let children = [
            DerivationTree::new("<digit>", vec![DerivationTree::leaf("4")]),
            DerivationTree::leaf("+"),
            DerivationTree::new("<digit>", vec![DerivationTree::leaf("2")]),
        ];
        assert_eq!(
            expansion_key("<sum>", Expansion::Tree(&children)),
            "<sum> -> 4+2"
        );
        assert_eq!(expansion_key("<x>", Expansion::Tree(&[])), "<x> -> <x>");
    }

    #[test]
    fn acyclic_is_complete() {
        let grammar: Grammar = r#"{
            "<start>": ["<a>", "<b>"],
            "<a>": ["x", "y"],
            "<b>": ["z"],
        }"#
        .parse()
        .unwrap();

        let reachable = reachable_expansions(&grammar, "<start>", None).unwrap();
        assert_eq!(reachable.symbols_seen.len(), grammar.len());
        assert!(reachable.ensure_connected(&grammar).is_ok());
        assert_eq!(
            sorted(reachable.expansions),
            [
                "<a> -> x",
                "<a> -> y",
                "<b> -> z",
                "<start> -> <a>",
                "<start> -> <b>"
            ]
        );
    }

    #[test]
    fn cycles_terminate() {
        let grammar: Grammar = r#"{
            "<start>": ["<a>"],
            "<a>": ["<start>", "done"],
        }"#
        .parse()
        .unwrap();

        for depth in [Some(5), None] {
            let cov = max_expansion_coverage(&grammar, "<start>", depth).unwrap();
            assert_eq!(
                sorted(cov),
                ["<a> -> <start>", "<a> -> done", "<start> -> <a>"]
            );
        }

        let grammar: Grammar = r#"{"<x>": ["a<x>", "<x><x>", ""]}"#.parse().unwrap();
        let cov = max_expansion_coverage(&grammar, "<x>", None).unwrap();
        assert_eq!(cov.len(), 3);
    }

    #[test]
    fn depth_limits_reach() {
        let grammar: Grammar = r#"{
            "<one>": ["1", "<two>"],
            "<two>": ["2", "<three>"],
            "<three>": ["3"],
        }"#
        .parse()
        .unwrap();

        assert!(reachable_expansions(&grammar, "<one>", Some(0))
            .unwrap()
            .expansions
            .is_empty());
        assert_eq!(
            sorted(reachable_expansions(&grammar, "<one>", Some(1)).unwrap().expansions),
            ["<one> -> 1", "<one> -> <two>"]
        );
        assert_eq!(
            reachable_expansions(&grammar, "<one>", Some(2)).unwrap().expansions.len(),
            4
        );
        assert_eq!(
            max_expansion_coverage(&grammar, "<one>", Some(3)).unwrap().len(),
            5
        );

        // <three> is never seen within 2 levels
        let err = max_expansion_coverage(&grammar, "<one>", Some(2)).unwrap_err();
        assert_eq!(err, Error(ErrorRepr::Disconnected(vec!["<three>".into()])));
    }

    #[test]
    fn seen_symbols_are_not_revisited() {
        // <b> is first reached at depth 3 through <a>, which hides `<c> -> c`.
        let grammar: Grammar = r#"{
            "<start>": ["<a><b>"],
            "<a>": ["<b>"],
            "<b>": ["<c>"],
            "<c>": ["c"],
        }"#
        .parse()
        .unwrap();

        let reachable = reachable_expansions(&grammar, "<start>", Some(3)).unwrap();
        assert_eq!(
            sorted(reachable.expansions),
            ["<a> -> <b>", "<b> -> <c>", "<start> -> <a><b>"]
        );
        assert!(!reachable.symbols_seen.contains("<c>"));
    }

    #[test]
    fn reports_disconnected() {
        let grammar: Grammar = r#"{
            "<start>": ["<a>"],
            "<a>": ["a"],
            "<island>": ["<other>"],
            "<other>": ["o"],
        }"#
        .parse()
        .unwrap();

        let err = max_expansion_coverage(&grammar, "<start>", None).unwrap_err();
        assert_eq!(
            err,
            Error(ErrorRepr::Disconnected(vec!["<island>".into(), "<other>".into()]))
        );

        // starting elsewhere skips the check
        let reachable = reachable_expansions(&grammar, "<island>", None).unwrap();
        assert_eq!(reachable.expansions.len(), 2);
    }

    #[test]
    fn reports_undefined() {
        let grammar: Grammar = r#"{"<start>": ["<a>", "<nowhere>"], "<a>": ["a"]}"#
            .parse()
            .unwrap();
        let err = max_expansion_coverage(&grammar, "<start>", None).unwrap_err();
        assert_eq!(err, Error(ErrorRepr::UndefinedSymbol("<nowhere>".into())));

        // a missing reference past the depth limit is never looked up
        let reachable = reachable_expansions(&grammar, "<start>", Some(1)).unwrap();
        assert_eq!(reachable.expansions.len(), 2);
    }
}
