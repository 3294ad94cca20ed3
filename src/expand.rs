use crate::error::ErrorRepr;
use crate::{Entropy, Error, Grammar, Tokens, Visitor};

/// Returns a resulting `Visitor` after randomly deriving `symbol` from `grammar`.
///
/// # Derivation
/// - A symbol at a `depth` greater than `max_depth` outputs nothing.
/// - A symbol that is not defined by `grammar` is terminal and output unchanged.
/// - Otherwise one of its productions is chosen uniformly by `entropy`, tokenized,
///   and every token is derived in order at `depth + 1`.
///
/// Because depth grows by one per nested production, derivation always terminates,
/// even for recursive grammars. For example, below `max_depth` of 3 yields
/// `"aaa"` at most.
/// ```text
/// { "<x>": ["a<x>", ""] }
/// ```
///
/// # Errors
/// Fails if a chosen symbol has no productions, or if `entropy` fails.
pub fn expand<V: Visitor, E: Entropy + ?Sized>(
    symbol: &str,
    grammar: &Grammar,
    depth: usize,
    max_depth: usize,
    entropy: &mut E,
) -> Result<V, Error> {
    let mut visitor = V::new();
    let mut to_write = vec![(symbol, depth)];
    // scratch space for the tokens of the current production
    let mut tokens: Vec<&str> = Vec::new();

    while let Some((symbol, depth)) = to_write.pop() {
        if depth > max_depth {
            visitor.visit_truncated(symbol);
            continue;
        }

        let Some(productions) = grammar.get(symbol) else {
            visitor.visit_terminal(symbol);
            continue;
        };

        if productions.is_empty() {
            return Err(Error(ErrorRepr::EmptyChoice(symbol.to_string())));
        }
        let production = productions[entropy.choose_index(productions.len())?].as_str();

        tokens.clear();
        tokens.extend(Tokens::new(production));
        visitor.visit_expansion(symbol, production, tokens.len());
        // reverse so that the stack pops tokens in order
        to_write.extend(tokens.iter().rev().map(|t| (*t, depth + 1)));
    }
    Ok(visitor)
}
