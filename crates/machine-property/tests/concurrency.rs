//! Concurrency stress tests for shared values.
//!
//! Every value written here is a "pattern": `len_for(tag)` copies of one tag
//! byte. A torn read or write would show up as a value that is not a
//! pattern.

use std::cmp::Ordering;
use std::sync::{Arc, Barrier};
use std::thread;

use proptest::prelude::*;
use proptest::test_runner::{RngAlgorithm, TestRng};

use machine_property::{ByteValue, MutableByteValue, Permission, PropertySpec, Resolution};

const NUM_THREADS: usize = 8;
const OPS_PER_THREAD: usize = 5_000;
const NUM_SHARED: usize = 4;

/// Lengths cover empty, inline, and heap storage.
fn len_for(tag: u8) -> usize {
    (tag as usize * 37) % 256
}

fn pattern(tag: u8) -> Vec<u8> {
    vec![tag; len_for(tag)]
}

fn assert_pattern(bytes: &[u8]) {
    if let Some(&tag) = bytes.first() {
        assert_eq!(bytes.len(), len_for(tag), "length does not match tag {tag}");
        assert!(bytes.iter().all(|&b| b == tag), "mixed bytes in {bytes:?}");
    }
}

/// A reproducible generator per worker thread.
fn worker_rng(thread_id: usize) -> TestRng {
    let mut seed = [0u8; 32];
    seed[0] = thread_id as u8;
    TestRng::from_seed(RngAlgorithm::ChaCha, &seed)
}

fn below(rng: &mut TestRng, n: usize) -> usize {
    (rng.next_u64() % n as u64) as usize
}

fn shared_values() -> Arc<Vec<MutableByteValue>> {
    Arc::new(
        (0..NUM_SHARED)
            .map(|i| MutableByteValue::create(&pattern(i as u8 + 1)).unwrap())
            .collect(),
    )
}

/// Interleaved create/clone/compare/move on shared and private values
#[test]
fn test_interleaved_operations_keep_values_whole() {
    let shared = shared_values();
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let mut handles = vec![];
    for thread_id in 0..NUM_THREADS {
        let shared = Arc::clone(&shared);
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            let mut rng = worker_rng(thread_id);
            let private = MutableByteValue::empty();
            barrier.wait();

            for _ in 0..OPS_PER_THREAD {
                let a = &shared[below(&mut rng, NUM_SHARED)];
                let b = &shared[below(&mut rng, NUM_SHARED)];
                match below(&mut rng, 7) {
                    0 => a.set(&pattern(rng.next_u64() as u8)).unwrap(),
                    1 => {
                        let copy = a.try_clone().unwrap();
                        assert_pattern(&copy.bytes());
                    }
                    2 => {
                        // Other threads may change `a` or `b` between the two
                        // calls, so only same-instance results are fixed.
                        let eq = **a == **b;
                        let ord = (**a).cmp(&**b);
                        if std::ptr::eq(a, b) {
                            assert!(eq);
                            assert_eq!(ord, Ordering::Equal);
                        }
                    }
                    3 => {
                        let taken = a.take();
                        assert_pattern(&taken.bytes());
                        private.assign_from(&MutableByteValue::from(taken));
                    }
                    4 => a.assign_from(b),
                    5 => {
                        a.assign_from(&private);
                        assert!(private.is_empty());
                    }
                    _ => {
                        let fresh = ByteValue::create(&pattern(rng.next_u64() as u8)).unwrap();
                        assert_pattern(&fresh.bytes());
                    }
                }
                a.with_bytes(assert_pattern);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    for value in shared.iter() {
        assert_pattern(&value.bytes());
    }
}

/// Two threads comparing the same pair in opposite orders must not deadlock
#[test]
fn test_opposite_order_comparisons() {
    let shared = shared_values();
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = [(0usize, 1usize), (1, 0)]
        .into_iter()
        .map(|(x, y)| {
            let shared = Arc::clone(&shared);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    let _ = *shared[x] == *shared[y];
                    let _ = (*shared[x]).cmp(&*shared[y]);
                    shared[x].assign_from(&shared[y]);
                    shared[y].assign_from(&shared[x]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

/// Readers validating against a spec while a writer replaces the value
#[test]
fn test_validate_while_writing() {
    let spec = Arc::new(
        PropertySpec::create(Permission::ReadWrite, Resolution::X1, &[], &[], &[]).unwrap(),
    );
    let value = Arc::new(MutableByteValue::create(b"start").unwrap());
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let mut handles = vec![];
    for thread_id in 0..NUM_THREADS {
        let spec = Arc::clone(&spec);
        let value = Arc::clone(&value);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..OPS_PER_THREAD {
                if thread_id == 0 {
                    // Never empty, never over the string limit
                    value.set(&vec![b'x'; 1 + i % 192]).unwrap();
                } else {
                    assert!(spec.is_within_range(&value));
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ByteValue>();
    assert_send_sync::<MutableByteValue>();
    assert_send_sync::<PropertySpec>();
}
