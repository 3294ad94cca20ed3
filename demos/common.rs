use gramcov::{Fuzzer, Grammar};
use rand::{rngs::StdRng, SeedableRng};

/// Returns a fuzzer for `grammar`, seeded from `GRAMCOV_SEED` when it is set.
pub fn fuzzer(grammar: &str) -> Fuzzer {
    let grammar: Grammar = grammar.parse().unwrap();
    match std::env::var("GRAMCOV_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => Fuzzer::with_entropy(grammar, StdRng::seed_from_u64(seed)),
        None => Fuzzer::new(grammar),
    }
}

#[allow(dead_code)]
fn main() {}
