use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::map::{Edge, PlaceId, Waymap};

/// Find the route with the fewest edge traversals between `start` and `goal`
/// using breadth-first search.
///
/// Every edge counts as a single hop regardless of its weight fields. A
/// destination enters the parent map the first time it is discovered, so
/// parallel edges to the same place never enqueue it twice.
pub fn find_route_hops(map: &Waymap, start: PlaceId, goal: PlaceId) -> Option<Vec<PlaceId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<PlaceId, Option<PlaceId>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in map.neighbours(current) {
            let next = edge.target;
            if parents.contains_key(&next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Find the cheapest route between `start` and `goal` under the supplied
/// cost extractor, using Dijkstra's algorithm.
///
/// Returns the route and its accumulated cost, or `None` when the goal is
/// unreachable. Correct only for non-negative costs, which the map builder
/// enforces for the built-in weight fields.
///
/// Among equal-cost frontier entries the one with the smaller place
/// identifier is expanded first, which keeps repeated queries deterministic.
pub fn find_route_cheapest<F>(
    map: &Waymap,
    start: PlaceId,
    goal: PlaceId,
    cost: F,
) -> Option<(Vec<PlaceId>, f64)>
where
    F: Fn(&Edge) -> f64,
{
    if start == goal {
        return Some((vec![start], 0.0));
    }

    let mut best: HashMap<PlaceId, f64> = HashMap::new();
    let mut parents: HashMap<PlaceId, Option<PlaceId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let cost_so_far = entry.cost.0;
        match best.get(&entry.node) {
            // Stale entry: a cheaper route to this place was found after
            // this one was pushed.
            Some(recorded) if *recorded < cost_so_far => continue,
            Some(_) => {}
            None => continue,
        }

        if entry.node == goal {
            return Some((reconstruct_path(&parents, start, goal), cost_so_far));
        }

        for edge in map.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = cost_so_far + cost(edge);
            if next_cost < *best.get(&next).unwrap_or(&f64::INFINITY) {
                best.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<PlaceId, Option<PlaceId>>,
    start: PlaceId,
    goal: PlaceId,
) -> Vec<PlaceId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: PlaceId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: PlaceId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; ties go
        // to the smaller place identifier.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
