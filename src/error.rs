use std::collections::HashSet;
use std::fmt;

/// The type of error that can occur when building a grammar, generating from it,
/// or computing its expansion coverage.
#[derive(Debug, PartialEq)]
pub struct Error(pub(crate) ErrorRepr);

/// Broad category of an [`Error`], for callers that need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The grammar text could not be parsed.
    Syntax,
    /// A symbol is defined more than once.
    DuplicateSymbols,
    /// A nonterminal is referenced but never defined.
    UndefinedSymbol,
    /// A symbol has no productions to choose from.
    EmptyChoice,
    /// Some grammar symbols are not reachable from the start symbol.
    Disconnected,
    /// The randomness provider failed.
    Entropy,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            ErrorRepr::Grammar(_) => ErrorKind::Syntax,
            ErrorRepr::DuplicateSymbols(_) => ErrorKind::DuplicateSymbols,
            ErrorRepr::UndefinedSymbol(_) => ErrorKind::UndefinedSymbol,
            ErrorRepr::EmptyChoice(_) => ErrorKind::EmptyChoice,
            ErrorRepr::Disconnected(_) => ErrorKind::Disconnected,
            ErrorRepr::Entropy(_) => ErrorKind::Entropy,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            ErrorRepr::Grammar(e) => Some(e),
            ErrorRepr::Entropy(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ErrorRepr {
    Grammar(peg::error::ParseError<peg::str::LineCol>),
    DuplicateSymbols(HashSet<String>),
    UndefinedSymbol(String),
    EmptyChoice(String),
    // symbols never seen by a coverage traversal from the start symbol, in grammar order
    Disconnected(Vec<String>),
    Entropy(arbitrary::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorRepr::Grammar(e) => e.fmt(f),
            ErrorRepr::DuplicateSymbols(e) => write!(f, "Duplicate symbol definitions: {:?}", e),
            ErrorRepr::UndefinedSymbol(e) => write!(f, "Undefined symbol: {}", e),
            ErrorRepr::EmptyChoice(e) => write!(f, "No productions to choose from for {}", e),
            ErrorRepr::Disconnected(e) => {
                write!(f, "Symbols unreachable from the start symbol: {:?}", e)
            }
            ErrorRepr::Entropy(e) => e.fmt(f),
        }
    }
}
