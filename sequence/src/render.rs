//! Console rendering of the demo output.

use crate::fibonacci::Fibonacci;

/// Terms printed when no count is given.
pub const DEFAULT_COUNT: usize = 10;

pub fn header(count: usize) -> String {
    format!("Fibonacci sequence (first {count}):")
}

/// Terms joined by single spaces. Empty for a count of zero.
pub fn values_line(sequence: &Fibonacci) -> String {
    sequence
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Both output lines, newline-terminated.
pub fn render(count: usize) -> String {
    let sequence = Fibonacci::new(count);
    format!("{}\n{}\n", header(sequence.count()), values_line(&sequence))
}
