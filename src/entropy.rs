use crate::error::ErrorRepr;
use crate::Error;

use arbitrary::Unstructured;
use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// Source of the random choices made while expanding a grammar.
///
/// Implemented for
/// - [`Unstructured`](https://docs.rs/arbitrary/latest/arbitrary/struct.Unstructured.html), to drive generation from a fuzzer's raw bytes.
///   Once the bytes run out every choice is the first production.
/// - `StdRng`, for seeded, reproducible generation.
/// - `ThreadRng`.
pub trait Entropy {
    /// Returns an index drawn uniformly from `0..len`. `len` is never 0.
    fn choose_index(&mut self, len: usize) -> Result<usize, Error>;
}

impl Entropy for Unstructured<'_> {
    fn choose_index(&mut self, len: usize) -> Result<usize, Error> {
        Unstructured::choose_index(self, len).map_err(|e| Error(ErrorRepr::Entropy(e)))
    }
}

macro_rules! impl_entropy_for_rng {
    ($($rng:ty),* $(,)*) => (
        $(
            impl Entropy for $rng {
                fn choose_index(&mut self, len: usize) -> Result<usize, Error> {
                    Ok(self.random_range(0..len))
                }
            }
        )*
    )
}

impl_entropy_for_rng!(StdRng, ThreadRng);

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn choose_index(&mut self, len: usize) -> Result<usize, Error> {
        (**self).choose_index(len)
    }
}
