use crate::Visitor;

/// A derivation tree: which productions were chosen while expanding a symbol.
///
/// A node with no children is a leaf and stands for terminal text. An expanded
/// nonterminal has one child per token of its chosen production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationTree {
    pub symbol: String,
    pub children: Vec<DerivationTree>,
}

impl DerivationTree {
    pub fn new(symbol: impl Into<String>, children: Vec<DerivationTree>) -> Self {
        Self {
            symbol: symbol.into(),
            children,
        }
    }

    pub fn leaf(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the concatenated text of every leaf under this node.
    pub fn all_terminals(&self) -> String {
        let mut out = String::new();
        self.write_terminals(&mut out);
        out
    }

    pub(crate) fn write_terminals(&self, out: &mut String) {
        if self.is_leaf() {
            out.push_str(&self.symbol);
        }
        for child in &self.children {
            child.write_terminals(out);
        }
    }
}

/// Builds a [`DerivationTree`] during [`crate::expand`].
///
/// So that [`DerivationTree::all_terminals`] equals the generated string:
/// - a nonterminal expanded with an empty production gets a single empty leaf
/// - a symbol cut off by the depth limit becomes an empty leaf
#[derive(Debug, Default)]
pub struct TreeBuilder {
    // partially built nodes and the number of children each one still expects
    open: Vec<(DerivationTree, usize)>,
    root: Option<DerivationTree>,
}

impl TreeBuilder {
    /// Returns the finished tree.
    ///
    /// A builder that saw no traversal yields an empty leaf.
    pub fn into_tree(self) -> DerivationTree {
        debug_assert!(self.open.is_empty());
        self.root.unwrap_or_else(|| DerivationTree::leaf(""))
    }

    /// Attaches a finished `node` to its parent, closing every parent it completes.
    fn close(&mut self, mut node: DerivationTree) {
        while let Some((parent, remaining)) = self.open.last_mut() {
            parent.children.push(node);
            *remaining -= 1;
            if *remaining > 0 {
                return;
            }
            match self.open.pop() {
                Some((parent, _)) => node = parent,
                None => return,
            }
        }
        self.root = Some(node);
    }
}

impl Visitor for TreeBuilder {
    fn new() -> Self {
        Default::default()
    }
    fn visit_expansion(&mut self, symbol: &str, _production: &str, arity: usize) {
        if arity == 0 {
            self.close(DerivationTree::new(symbol, vec![DerivationTree::leaf("")]));
        } else {
            let node = DerivationTree::new(symbol, Vec::with_capacity(arity));
            self.open.push((node, arity));
        }
    }
    fn visit_terminal(&mut self, text: &str) {
        self.close(DerivationTree::leaf(text));
    }
    fn visit_truncated(&mut self, _symbol: &str) {
        self.close(DerivationTree::leaf(""));
    }
}
