//! Tests for the one-shot gate under contention.

use std::sync::{Arc, Barrier};
use std::thread;

use mimir::SingleEntryGate;

#[test]
fn single_caller_enters_once() {
    let gate = SingleEntryGate::new();
    assert!(gate.try_enter());
    for _ in 0..10 {
        assert!(!gate.try_enter());
    }
}

#[test]
fn exactly_one_winner_under_contention() {
    const THREADS: usize = 32;

    let gate = Arc::new(SingleEntryGate::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                gate.try_enter()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&won| won)
        .count();

    assert_eq!(winners, 1, "expected exactly one winner");
    assert!(!gate.try_enter(), "gate must stay entered afterwards");
}

#[test]
fn repeated_contention_rounds_never_reopen() {
    let gate = Arc::new(SingleEntryGate::new());
    assert!(gate.try_enter());

    for _ in 0..4 {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || gate.try_enter())
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap());
        }
    }
}
