use crate::error::ErrorRepr;
use crate::{syntax, Error};

use fxhash::FxHashMap;
use std::{collections::HashSet, fmt, str::FromStr};

/// A context-free grammar: each symbol maps to its ordered list of productions.
///
/// Productions are plain strings in which nonterminal references are delimited by
/// `<` `>` (see [`crate::tokenize`]). Any symbol that is not a key of the grammar
/// is terminal text.
///
/// # Construction
/// - `from_str` parses the dictionary literal form, see [`Grammar::from_str`].
/// - `try_from` takes `(symbol, productions)` pairs directly.
///
/// Both reject duplicate symbol definitions. No other validation happens: references
/// to undefined symbols and symbols without productions are only noticed when
/// generation or coverage runs into them.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    symbols: Vec<String>,
    productions: Vec<Vec<String>>,

    // `index[symbol]` == position of `symbol` in `symbols` and `productions`
    index: FxHashMap<String, usize>,
}

impl Grammar {
    /// Returns the productions of `symbol`, or `None` if `symbol` is terminal.
    pub fn get(&self, symbol: &str) -> Option<&[String]> {
        self.index
            .get(symbol)
            .map(|&i| self.productions[i].as_slice())
    }

    /// Returns `true` if `symbol` is defined by this grammar.
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Defined symbols, in definition order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// `(symbol, productions)` pairs, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.symbols
            .iter()
            .zip(self.productions.iter())
            .map(|(s, p)| (s.as_str(), p.as_slice()))
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Prints the grammar in the same dictionary literal form that `from_str` reads.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(f, "{{")?;
        for (symbol, productions) in self.iter() {
            let mut line = String::from("    ");
            syntax::quote(symbol, &mut line);
            line.push_str(": [");
            for (i, p) in productions.iter().enumerate() {
                if i > 0 {
                    line.push_str(", ");
                }
                syntax::quote(p, &mut line);
            }
            line.push_str("],");
            writeln!(f, "{}", line)?;
        }
        write!(f, "}}")
    }
}

/// Parses a grammar written as a dictionary literal, optionally assigned to a name:
/// ```text
/// grammar = {
///     "<start>": ["<digit><digit>"],
///     "<digit>": ["0", "1"],
/// }
/// ```
impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules = syntax::dict::rules(s).map_err(|e| Error(ErrorRepr::Grammar(e)))?;
        Self::try_from(rules)
    }
}

impl TryFrom<Vec<(String, Vec<String>)>> for Grammar {
    type Error = Error;

    fn try_from(value: Vec<(String, Vec<String>)>) -> Result<Self, Self::Error> {
        let (symbols, productions): (Vec<String>, Vec<Vec<String>>) = value.into_iter().unzip();

        if let Some(dups) = find_duplicates(&symbols) {
            return Err(Error(ErrorRepr::DuplicateSymbols(dups)));
        }

        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        Ok(Self {
            symbols,
            productions,
            index,
        })
    }
}

fn find_duplicates(names: &[String]) -> Option<HashSet<String>> {
    let mut set: HashSet<String> = names.iter().cloned().collect();
    let dups: HashSet<String> = names.iter().filter(|&n| !set.remove(n)).cloned().collect();
    (!dups.is_empty()).then_some(dups)
}
