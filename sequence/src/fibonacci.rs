//! Additive recurrence state and its finite, restartable iteration.

use std::iter::FusedIterator;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// The (previous, current) pair driving the recurrence.
///
/// Values are arbitrary precision, so the sequence never overflows no matter
/// how many terms are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibState {
    pub previous: BigUint,
    pub current: BigUint,
}

impl FibState {
    /// Seed state: (0, 1).
    pub fn new() -> Self {
        Self {
            previous: BigUint::zero(),
            current: BigUint::one(),
        }
    }

    /// Yield the value at the head of the state and the advanced state.
    ///
    /// `(p, c)` yields `p` and becomes `(c, p + c)`.
    pub fn step(self) -> (BigUint, FibState) {
        let next = &self.previous + &self.current;
        let value = self.previous;
        (
            value,
            FibState {
                previous: self.current,
                current: next,
            },
        )
    }
}

impl Default for FibState {
    fn default() -> Self {
        Self::new()
    }
}

/// The first `count` terms of the sequence.
///
/// Holds no iteration state: every call to [`Fibonacci::iter`] starts again
/// from the seed, so the same value always reproduces the same terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci {
    count: usize,
}

impl Fibonacci {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Fresh iterator over the terms.
    pub fn iter(&self) -> FibIter {
        FibIter {
            state: FibState::new(),
            remaining: self.count,
        }
    }
}

impl<'a> IntoIterator for &'a Fibonacci {
    type Item = BigUint;
    type IntoIter = FibIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator produced by [`Fibonacci::iter`].
#[derive(Debug, Clone)]
pub struct FibIter {
    state: FibState,
    remaining: usize,
}

impl Iterator for FibIter {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (value, next) = std::mem::take(&mut self.state).step();
        self.state = next;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for FibIter {}

impl FusedIterator for FibIter {}
