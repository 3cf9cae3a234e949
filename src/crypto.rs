// src/crypto.rs
use rand::rngs::OsRng;
use rand_core::RngCore;

/// A source of uniform random indices. Generation code takes this as an
/// argument so tests can substitute a deterministic source.
pub trait RandomSource {
    /// Return an integer in `[0, n)`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;
}

// A raw 32-bit draw reduced by modulo
fn reduce(raw: u32, n: usize) -> usize {
    debug_assert!(n > 0, "empty range");
    raw as usize % n
}

impl RandomSource for OsRng {
    fn below(&mut self, n: usize) -> usize {
        reduce(self.next_u32(), n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, n: usize) -> usize {
        (**self).below(n)
    }
}

/// Pick one element uniformly.
pub fn choose<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.below(items.len()))
    }
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
