#![allow(rustdoc::bare_urls)]
#![doc = include_str!("../README.md")]

mod coverage;
mod entropy;
mod error;
mod expand;
mod fuzzer;
mod grammar;
mod syntax;
mod token;
mod tree;
mod visitor;

pub use coverage::{
    expansion_key, max_expansion_coverage, reachable_expansions, Expansion, ExpansionSet,
    Reachable,
};
pub use entropy::Entropy;
pub use error::{Error, ErrorKind};
pub use expand::expand;
pub use fuzzer::{Fuzzer, DEFAULT_MAX_DEPTH, DEFAULT_START_SYMBOL};
pub use grammar::Grammar;
pub use token::{is_nonterminal, nonterminals, tokenize, Tokens};
pub use tree::{DerivationTree, TreeBuilder};
pub use visitor::Visitor;
