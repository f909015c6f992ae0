//! Demo sequence generator
//!
//! Produces the first N terms of the additive recurrence seeded with 0 and 1
//! (the Fibonacci sequence) and renders them the way the demo workspace
//! script prints them:
//!
//! ```text
//! Fibonacci sequence (first 10):
//! 0 1 1 2 3 5 8 13 21 34
//! ```
//!
//! # Usage
//!
//! ```bash
//! fib-demo
//! fib-demo --count 25
//! ```

pub mod fibonacci;
pub mod render;

pub use fibonacci::{FibIter, FibState, Fibonacci};
pub use render::{header, render, values_line, DEFAULT_COUNT};
