//! Stress tests that push the collections through long operation sequences
//!
//! These tests perform large numbers of operations in various patterns to
//! catch edge cases and verify correctness under load.

use graph_collections::binary_heap::BinaryHeap;
use graph_collections::disjoint_set::ForestDisjointSet;
use graph_collections::fibonacci::FibonacciHeap;
use graph_collections::soft::SoftHeap;
use graph_collections::{DisjointSet, Heap, HeapError};

/// Deterministic pseudo-random sequence
fn scrambled(n: usize, seed: u64) -> Vec<i64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 36) as i64
        })
        .collect()
}

/// Massive numbers of pushes and pops
fn test_massive_operations<H: Heap<i64, i64> + Default>() {
    let mut heap = H::default();

    for i in (0..10_000).rev() {
        heap.push(i, i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Sawtooth workload: grow by two, shrink by one
fn test_sawtooth<H: Heap<usize, i64> + Default>() {
    let mut heap = H::default();
    let keys = scrambled(6000, 7);
    let mut popped = 0;

    for chunk in keys.chunks(2) {
        for &k in chunk {
            heap.push(k, 0);
        }
        assert!(heap.pop().is_some());
        popped += 1;
    }

    assert_eq!(heap.len(), keys.len() - popped);
    let rest: Vec<i64> = std::iter::from_fn(|| heap.pop().map(|(p, _)| p)).collect();
    assert!(rest.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn binary_massive_operations() {
    test_massive_operations::<BinaryHeap<i64, i64>>();
}

#[test]
fn fibonacci_massive_operations() {
    test_massive_operations::<FibonacciHeap<i64, i64>>();
}

#[test]
fn binary_sawtooth() {
    test_sawtooth::<BinaryHeap<i64, usize>>();
}

#[test]
fn fibonacci_sawtooth() {
    test_sawtooth::<FibonacciHeap<i64, usize>>();
}

#[test]
fn fibonacci_many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..5000).map(|i| heap.enqueue(100_000 + i, i)).collect();

    // build deep trees before decreasing
    assert_eq!(heap.dequeue(), Ok((100_000, 0)));
    for (i, handle) in handles.iter().enumerate().skip(1).rev() {
        assert_eq!(heap.change_key(*handle, i as i64), Ok(()));
    }
    assert!(heap.is_consistent());

    for i in 1..5000 {
        assert_eq!(heap.dequeue(), Ok((i, i)));
    }
    assert_eq!(heap.dequeue(), Err(HeapError::Empty));
}

#[test]
fn fibonacci_decrease_keys_interleaved_with_dequeues() {
    let keys = scrambled(3000, 11);
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = keys
        .iter()
        .enumerate()
        .map(|(i, &k)| heap.enqueue(k, i))
        .collect();
    let mut current: Vec<Option<i64>> = keys.iter().copied().map(Some).collect();

    for round in 0..1000 {
        let (p, i) = heap.dequeue().unwrap();
        assert_eq!(current[i], Some(p));
        current[i] = None;

        let target = (round * 7919) % keys.len();
        if let Some(old) = current[target] {
            let lowered = old - 1_000_000;
            heap.change_key(handles[target], lowered).unwrap();
            current[target] = Some(lowered);
            assert_eq!(heap.top().map(|(p, _)| *p).ok(), current.iter().flatten().min().copied());
        }
    }
    assert!(heap.is_consistent());

    let mut expected: Vec<i64> = current.into_iter().flatten().collect();
    expected.sort_unstable();
    assert_eq!(heap.drain().map(|(p, _)| p).collect::<Vec<_>>(), expected);
}

#[test]
fn fibonacci_merge_many() {
    let mut total = FibonacciHeap::new();
    let mut expected = Vec::new();

    for part in 0..20 {
        let mut heap = FibonacciHeap::new();
        for k in scrambled(200, part) {
            heap.enqueue(k, ());
            expected.push(k);
        }
        let (smallest, _) = heap.dequeue().unwrap();
        remove_one(&mut expected, smallest);
        total.merge(heap).unwrap();
        assert!(total.is_consistent());
    }

    expected.sort_unstable();
    assert_eq!(total.len(), expected.len());
    assert_eq!(total.drain().map(|(k, _)| k).collect::<Vec<_>>(), expected);
}

/// Removes one occurrence of `value`
fn remove_one(values: &mut Vec<i64>, value: i64) {
    if let Some(pos) = values.iter().position(|&v| v == value) {
        values.swap_remove(pos);
    }
}

#[test]
fn soft_heap_large_exact_drain() {
    // r = 16: 20 000 items never reach a corrupting rank
    let keys = scrambled(20_000, 3);
    let mut heap = SoftHeap::new(0.01, i64::MAX).unwrap();
    for &k in &keys {
        heap.add(k, ()).unwrap();
    }

    let mut sorted = keys;
    sorted.sort_unstable();
    assert_eq!(heap.drain().map(|(k, _)| k).collect::<Vec<_>>(), sorted);
}

#[test]
fn soft_heap_corruption_under_load() {
    let n = 20_000;
    let rate = 0.125;
    let keys = scrambled(n, 5);
    let mut heap = SoftHeap::new(rate, i64::MAX).unwrap();
    let mut inserted = 0usize;
    let mut drained = Vec::with_capacity(n);

    for (i, &k) in keys.iter().enumerate() {
        heap.add(k, i).unwrap();
        inserted += 1;
        if i % 4 == 3 {
            let (key, value) = heap.remove_minimum().unwrap();
            assert_eq!(keys[value], key);
            drained.push(key);
        }
        if i % 1000 == 999 {
            assert!(heap.corrupted_len() as f64 <= rate * inserted as f64);
        }
    }

    drained.extend(heap.drain().map(|(k, _)| k));
    drained.sort_unstable();
    let mut expected = keys;
    expected.sort_unstable();
    assert_eq!(drained, expected);
}

#[test]
fn disjoint_set_long_chain() {
    let n = 10_000;
    let mut sets: ForestDisjointSet<usize> = (0..n).collect();
    for i in 1..n {
        assert_eq!(sets.union(&(i - 1), &i), Ok(true));
    }
    assert_eq!(sets.set_count(), 1);

    let root = *sets.find_set(&0).unwrap();
    for i in (0..n).rev() {
        assert_eq!(sets.find_set(&i), Ok(&root));
    }
}

#[test]
fn disjoint_set_strided_unions() {
    let n = 4096;
    let mut sets: ForestDisjointSet<usize> = (0..n).collect();
    // join i and i + 8: eight residue classes remain
    for i in 0..n - 8 {
        sets.union(&i, &(i + 8)).unwrap();
    }
    assert_eq!(sets.set_count(), 8);
    for i in 0..n {
        assert_eq!(sets.are_in_same_set(&i, &(i % 8)), Ok(true));
        assert_eq!(sets.are_in_same_set(&i, &((i + 1) % 8)), Ok(false));
    }
}
