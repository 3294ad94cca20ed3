use crate::{
    coverage, expand, DerivationTree, Entropy, Error, ExpansionSet, Grammar, TreeBuilder, Visitor,
};

use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

/// Start symbol used unless [`Fuzzer::with_start_symbol`] says otherwise.
pub const DEFAULT_START_SYMBOL: &str = "<start>";

/// Derivation depth limit used unless [`Fuzzer::with_max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Generates strings from a grammar and tracks which of its expansions were covered.
///
/// The fuzzer owns two independent notions of coverage:
/// - [`Fuzzer::max_expansion_coverage`] computes the expansions *reachable* from a
///   symbol, the ceiling any amount of generation can cover.
/// - [`Fuzzer::expansion_coverage`] is the set of expansions the caller recorded
///   through [`Fuzzer::add_coverage`]. Generating never records anything by itself.
///
/// ```
/// use gramcov::{ExpansionSet, Fuzzer};
///
/// let grammar = r#"{"<start>": ["<digit><digit>"], "<digit>": ["0", "1"]}"#.parse().unwrap();
/// let mut fuzzer = Fuzzer::new(grammar);
///
/// let (input, used): (String, ExpansionSet) = fuzzer.fuzz_visit().unwrap();
/// assert_eq!(input.len(), 2);
/// fuzzer.add_coverage(used);
///
/// let ceiling = fuzzer.max_expansion_coverage(None, None).unwrap();
/// assert!(fuzzer.expansion_coverage().is_subset(&ceiling));
/// ```
#[derive(Debug)]
pub struct Fuzzer<E = StdRng> {
    grammar: Grammar,
    start_symbol: String,
    max_depth: usize,
    log: bool,
    entropy: E,
    covered_expansions: ExpansionSet,
}

impl Fuzzer<StdRng> {
    /// Returns a fuzzer for `grammar` with default settings, seeded by the OS.
    pub fn new(grammar: Grammar) -> Self {
        Self::with_entropy(grammar, StdRng::from_os_rng())
    }
}

impl<E: Entropy> Fuzzer<E> {
    /// Returns a fuzzer for `grammar` that draws its choices from `entropy`.
    pub fn with_entropy(grammar: Grammar, entropy: E) -> Self {
        Self {
            grammar,
            start_symbol: DEFAULT_START_SYMBOL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            log: false,
            entropy,
            covered_expansions: ExpansionSet::default(),
        }
    }

    pub fn with_start_symbol(mut self, start_symbol: impl Into<String>) -> Self {
        self.start_symbol = start_symbol.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Emits `debug` level `tracing` events for generated inputs and coverage queries.
    pub fn with_logging(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the expansions recorded so far, as `"SYMBOL -> EXPANSION"` keys.
    pub fn expansion_coverage(&self) -> &ExpansionSet {
        &self.covered_expansions
    }

    /// Forgets every recorded expansion.
    pub fn reset_coverage(&mut self) {
        self.covered_expansions.clear();
    }

    /// Records `keys` as covered, e.g. the [`ExpansionSet`] of a [`Fuzzer::fuzz_visit`].
    pub fn add_coverage(&mut self, keys: impl IntoIterator<Item = String>) {
        self.covered_expansions.extend(keys);
    }

    /// Returns every expansion reachable from `symbol` (default: the start symbol)
    /// within `max_depth` levels (default: unlimited).
    ///
    /// # Errors
    /// Fails if a reachable nonterminal is undefined. When starting at the start symbol,
    /// also fails if any symbol of the grammar is not reached.
    pub fn max_expansion_coverage(
        &self,
        symbol: Option<&str>,
        max_depth: Option<usize>,
    ) -> Result<ExpansionSet, Error> {
        let symbol = symbol.unwrap_or(&self.start_symbol);
        let reachable = coverage::reachable_expansions(&self.grammar, symbol, max_depth)?;

        if symbol == self.start_symbol {
            reachable.ensure_connected(&self.grammar)?;
        }

        if self.log {
            debug!(
                symbol,
                ?max_depth,
                expansions = reachable.expansions.len(),
                symbols = reachable.symbols_seen.len(),
                "computed maximum expansion coverage"
            );
        }
        Ok(reachable.expansions)
    }

    /// Returns a string generated from the start symbol.
    pub fn fuzz(&mut self) -> Result<String, Error> {
        self.fuzz_visit()
    }

    /// Returns a derivation tree generated from the start symbol.
    pub fn fuzz_tree(&mut self) -> Result<DerivationTree, Error> {
        self.fuzz_visit::<TreeBuilder>().map(TreeBuilder::into_tree)
    }

    /// Returns the resulting `Visitor` of a derivation from the start symbol.
    pub fn fuzz_visit<V: Visitor>(&mut self) -> Result<V, Error> {
        if !self.log {
            return expand(
                &self.start_symbol,
                &self.grammar,
                0,
                self.max_depth,
                &mut self.entropy,
            );
        }

        let (visitor, text): (V, String) = expand(
            &self.start_symbol,
            &self.grammar,
            0,
            self.max_depth,
            &mut self.entropy,
        )?;
        debug!(input = %text, "generated input");
        Ok(visitor)
    }
}
