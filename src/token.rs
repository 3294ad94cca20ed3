//! Splitting productions into terminal and nonterminal tokens.

/// Iterator over the tokens of a production, see [`tokenize`].
///
/// Tokens borrow from the production and partition it: concatenating every token
/// reproduces the production exactly.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    production: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(production: &'a str) -> Self {
        Self { production, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.production[self.pos..];
        let bytes = rest.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        // A token that opens with `<` runs up to and including the next `>`,
        // unless another `<` starts a new token first.
        // Anything else runs up to the next `<` or through the next `>`.
        let skip = usize::from(bytes[0] == b'<');
        let len = match bytes[skip..].iter().position(|b| matches!(b, b'<' | b'>')) {
            Some(i) if bytes[skip + i] == b'>' => skip + i + 1,
            Some(i) => skip + i,
            None => bytes.len(),
        };

        self.pos += len;
        Some(&rest[..len])
    }
}

/// Splits `production` into an ordered sequence of tokens.
///
/// Nonterminal references keep their `<` `>` delimiters, e.g.
/// `tokenize("<a>foo<b>") == ["<a>", "foo", "<b>"]`.
/// A reference missing its closing `>` is emitted as-is when the production ends.
pub fn tokenize(production: &str) -> Vec<&str> {
    Tokens::new(production).collect()
}

/// Returns `true` if `token` is a nonterminal reference such as `<digit>`.
pub fn is_nonterminal(token: &str) -> bool {
    token.starts_with('<') && token.ends_with('>')
}

/// Returns the nonterminal references of `production`, in order.
pub fn nonterminals(production: &str) -> impl Iterator<Item = &str> {
    Tokens::new(production).filter(|t| is_nonterminal(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn splits_references() {
        assert_eq!(tokenize("<a>foo<b>"), ["<a>", "foo", "<b>"]);
        assert_eq!(tokenize("plain"), ["plain"]);
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("<digit><digit>"), ["<digit>", "<digit>"]);
        assert_eq!(tokenize("(<expr>)"), ["(", "<expr>", ")"]);
    }

    #[test]
    fn keeps_malformed_text() {
        assert_eq!(tokenize("a<b"), ["a", "<b"]);
        assert_eq!(tokenize("<a<b>"), ["<a", "<b>"]);
        assert_eq!(tokenize("a>b"), ["a>", "b"]);
        assert_eq!(tokenize(">"), [">"]);
        assert_eq!(tokenize("<<"), ["<", "<"]);
        assert_eq!(tokenize("<>"), ["<>"]);
        assert_eq!(tokenize("x <= y"), ["x ", "<= y"]);
    }

    #[test]
    fn classifies_tokens() {
        assert!(is_nonterminal("<a>"));
        assert!(is_nonterminal("<>"));
        assert!(!is_nonterminal("<a"));
        assert!(!is_nonterminal("a>"));
        assert!(!is_nonterminal("<"));
        assert!(!is_nonterminal(""));

        let found: Vec<_> = nonterminals("if <cond> then <stmt> else <stmt").collect();
        assert_eq!(found, ["<cond>", "<stmt>"]);
    }

    #[test]
    fn tokens_reconstruct_production() {
        const ALPHABET: &[char] = &['<', '>', 'a', 'b', ' ', 'é', '→'];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let len = rng.random_range(0..16);
            let production: String = (0..len)
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
                .collect();
            let tokens = tokenize(&production);
            assert!(tokens.iter().all(|t| !t.is_empty()));
            assert_eq!(tokens.concat(), production);
        }
    }
}
