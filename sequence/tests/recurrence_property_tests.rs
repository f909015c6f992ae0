//! Recurrence property tests — sweep counts and check the sequence
//! invariants hold for every one of them.
//!
//! Tests verify:
//! - Length equals the requested count
//! - Seeds are 0 and 1
//! - Every later term is the sum of the two before it
//! - Rendering the same count twice is byte-identical

use num_bigint::BigUint;
use sequence::{header, render, values_line, Fibonacci};

const MAX_COUNT: usize = 200;

#[test]
fn property_length_matches_count() {
    for n in 0..=MAX_COUNT {
        assert_eq!(Fibonacci::new(n).iter().count(), n, "count {}", n);
    }
}

#[test]
fn property_seeds_and_recurrence() {
    for n in 0..=MAX_COUNT {
        let seq: Vec<BigUint> = Fibonacci::new(n).iter().collect();
        if n >= 1 {
            assert_eq!(seq[0], BigUint::from(0u32));
        }
        if n >= 2 {
            assert_eq!(seq[1], BigUint::from(1u32));
        }
        for i in 2..seq.len() {
            assert_eq!(
                seq[i],
                &seq[i - 1] + &seq[i - 2],
                "recurrence broken at index {} for count {}",
                i,
                n
            );
        }
    }
}

#[test]
fn property_prefix_stable() {
    // A longer run starts with every shorter run.
    let long: Vec<BigUint> = Fibonacci::new(MAX_COUNT).iter().collect();
    for n in 0..MAX_COUNT {
        let short: Vec<BigUint> = Fibonacci::new(n).iter().collect();
        assert_eq!(short[..], long[..n]);
    }
}

#[test]
fn property_render_idempotent() {
    for n in [0, 1, 2, 10, 57, MAX_COUNT] {
        assert_eq!(render(n), render(n));
    }
}

#[test]
fn scenario_ten_terms() {
    let fib = Fibonacci::new(10);
    assert_eq!(header(10), "Fibonacci sequence (first 10):");
    assert_eq!(values_line(&fib), "0 1 1 2 3 5 8 13 21 34");
}
