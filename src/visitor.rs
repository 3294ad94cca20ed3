use crate::{expansion_key, Expansion, ExpansionSet};

/// Defines state that is built during [`crate::expand`].
///
/// Expansion is a pre-order, left to right traversal of the derivation: every
/// `visit_expansion` is followed by the visits of its `arity` tokens.
///
/// This is implemented for
/// - `String` to produce the generated text
/// - [`ExpansionSet`] to collect the expansions used, see [`crate::Fuzzer::add_coverage`]
/// - `u64` to produce an identifier of the derivation path
/// - [`crate::TreeBuilder`] to produce a [`crate::DerivationTree`]
/// - tuples of the above, to build several in one pass
pub trait Visitor {
    fn new() -> Self;
    /// `symbol` was expanded with `production`, which has `arity` tokens.
    fn visit_expansion(&mut self, _symbol: &str, _production: &str, _arity: usize) {}
    /// `text` is not defined by the grammar and is output unchanged.
    fn visit_terminal(&mut self, _text: &str) {}
    /// `symbol` was cut off by the depth limit and outputs nothing.
    fn visit_truncated(&mut self, _symbol: &str) {}
}

/// Returns the generated text.
impl Visitor for String {
    fn new() -> Self {
        Default::default()
    }
    fn visit_terminal(&mut self, text: &str) {
        self.push_str(text)
    }
}

/// Returns the expansion keys (`"<symbol> -> <production>"`) used by the derivation.
impl Visitor for ExpansionSet {
    fn new() -> Self {
        Default::default()
    }
    fn visit_expansion(&mut self, symbol: &str, production: &str, _arity: usize) {
        self.insert(expansion_key(symbol, Expansion::Text(production)));
    }
}

fn id_hash(val: &mut u64, rule_id: u64) {
    *val = fxhash::hash64(&(rule_id, *val));
}

/// Returns an identifier of the path taken during the traversal.
///
/// Two derivations share an identifier (barring hash collisions) iff they chose the
/// same productions in the same order and were truncated at the same places.
impl Visitor for u64 {
    fn new() -> Self {
        u64::MAX
    }
    fn visit_expansion(&mut self, symbol: &str, production: &str, _arity: usize) {
        id_hash(self, fxhash::hash64(&(0, symbol, production)))
    }
    fn visit_terminal(&mut self, _: &str) {
        id_hash(self, 1)
    }
    fn visit_truncated(&mut self, _: &str) {
        id_hash(self, 2)
    }
}

// Code is adapted from:
// <https://doc.rust-lang.org/src/core/tuple.rs.html#10>
// <https://doc.rust-lang.org/src/core/hash/mod.rs.html#879>
macro_rules! impl_visitor_tuple {
    () => (
        impl Visitor for () {
            #[inline]
            fn new() {}
        }
    );

    ( $($name:ident)+) => (
        #[allow(non_snake_case)]
        impl<$($name: Visitor),+> Visitor for ($($name,)+) {
            fn new() -> ($($name,)+) {
                ($({ let x: $name = Visitor::new(); x},)+)
            }

            fn visit_expansion(&mut self, symbol: &str, production: &str, arity: usize) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_expansion(symbol, production, arity);)+
            }
            fn visit_terminal(&mut self, text: &str) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_terminal(text);)+
            }
            fn visit_truncated(&mut self, symbol: &str) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_truncated(symbol);)+
            }
        }
    );
}

impl_visitor_tuple! {}
impl_visitor_tuple! { T }
impl_visitor_tuple! { T B }
impl_visitor_tuple! { T B C }
impl_visitor_tuple! { T B C D }
