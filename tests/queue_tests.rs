//! Graph algorithms driven through the queue and disjoint-set contracts
//!
//! Each algorithm is written against `PriorityQueue` or `DisjointSet` only,
//! the way shortest-path and spanning-tree code consumes these collections.

use graph_collections::disjoint_set::ForestDisjointSet;
use graph_collections::queue::{BinaryQueue, FibonacciQueue};
use graph_collections::{DisjointSet, PriorityQueue};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Graph = Vec<Vec<(usize, u64)>>;
type Distances = Rc<RefCell<HashMap<usize, u64>>>;

const UNREACHABLE: u64 = u64::MAX;

/// Undirected weighted graph:
///
/// ```text
///   0 --4-- 1 --1-- 2
///   |     / |       |
///   1   2   5       3
///   | /     |       |
///   3 --8-- 4 --2-- 5      6 (isolated)
/// ```
fn sample_graph() -> (Graph, Vec<(usize, usize, u64)>) {
    let edges = vec![
        (0, 1, 4),
        (1, 2, 1),
        (0, 3, 1),
        (1, 3, 2),
        (1, 4, 5),
        (2, 5, 3),
        (3, 4, 8),
        (4, 5, 2),
    ];
    let mut graph = vec![Vec::new(); 7];
    for &(u, v, w) in &edges {
        graph[u].push((v, w));
        graph[v].push((u, w));
    }
    (graph, edges)
}

fn lookup(distances: &Distances) -> impl Fn(&usize) -> u64 {
    let distances = Rc::clone(distances);
    move |v: &usize| distances.borrow().get(v).copied().unwrap_or(UNREACHABLE)
}

/// Dijkstra over any queue whose distance function reads `distances`.
fn dijkstra<Q: PriorityQueue<usize>>(graph: &Graph, source: usize, distances: &Distances, queue: &mut Q) {
    distances.borrow_mut().insert(source, 0);
    queue.enqueue(source);

    while let Ok(u) = queue.dequeue() {
        let du = distances.borrow()[&u];
        for &(v, w) in &graph[u] {
            let candidate = du + w;
            let improves = distances
                .borrow()
                .get(&v)
                .map_or(true, |&dv| candidate < dv);
            if improves {
                distances.borrow_mut().insert(v, candidate);
                queue.update(v);
            }
        }
    }
}

fn expected_distances() -> Vec<Option<u64>> {
    vec![Some(0), Some(3), Some(4), Some(1), Some(8), Some(7), None]
}

fn collect(distances: &Distances, n: usize) -> Vec<Option<u64>> {
    (0..n).map(|v| distances.borrow().get(&v).copied()).collect()
}

#[test]
fn dijkstra_with_binary_queue() {
    let (graph, _) = sample_graph();
    let distances: Distances = Rc::default();
    let mut queue = BinaryQueue::new(lookup(&distances));

    dijkstra(&graph, 0, &distances, &mut queue);
    assert_eq!(collect(&distances, graph.len()), expected_distances());
    assert!(queue.is_empty());
}

#[test]
fn dijkstra_with_fibonacci_queue() {
    let (graph, _) = sample_graph();
    let distances: Distances = Rc::default();
    let mut queue = FibonacciQueue::with_vertices(0..graph.len(), lookup(&distances));

    dijkstra(&graph, 0, &distances, &mut queue);
    assert_eq!(collect(&distances, graph.len()), expected_distances());
    assert!(queue.is_empty());
    assert!(queue.is_known(&6));
}

#[test]
fn prim_with_fibonacci_queue() {
    let (graph, _) = sample_graph();
    let n = 6; // the connected component
    let keys: Distances = Rc::default();
    let mut queue = FibonacciQueue::with_vertices(0..n, lookup(&keys));
    let mut in_tree = vec![false; n];
    let mut total = 0;

    keys.borrow_mut().insert(0, 0);
    queue.enqueue(0);
    while let Ok(u) = queue.dequeue() {
        in_tree[u] = true;
        total += keys.borrow()[&u];
        for &(v, w) in &graph[u] {
            let lighter = keys.borrow().get(&v).map_or(true, |&k| w < k);
            if !in_tree[v] && lighter {
                keys.borrow_mut().insert(v, w);
                queue.update(v);
            }
        }
    }

    assert!(in_tree.iter().all(|&t| t));
    assert_eq!(total, 9);
}

#[test]
fn kruskal_with_forest_disjoint_set() {
    let (graph, mut edges) = sample_graph();
    edges.sort_by_key(|&(_, _, w)| w);

    let mut components: ForestDisjointSet<usize> = (0..graph.len()).collect();
    let mut tree = Vec::new();
    for (u, v, w) in edges {
        if components.union(&u, &v).unwrap() {
            tree.push((u, v, w));
        }
    }

    assert_eq!(tree.iter().map(|&(_, _, w)| w).sum::<u64>(), 9);
    assert_eq!(tree.len(), 5);
    assert_eq!(components.set_count(), 2);
    assert_eq!(components.are_in_same_set(&0, &5), Ok(true));
    assert_eq!(components.are_in_same_set(&0, &6), Ok(false));
}

#[test]
fn binary_queue_update_moves_vertex_forward() {
    let distances: Distances = Rc::new(RefCell::new(HashMap::from([(1, 10), (2, 20)])));
    let mut queue = BinaryQueue::new(lookup(&distances));
    queue.enqueue(1);
    queue.enqueue(2);

    distances.borrow_mut().insert(2, 5);
    queue.update(2);
    assert_eq!(queue.peek(), Ok(&2));
    assert_eq!(queue.to_vec().len(), 2);
}
