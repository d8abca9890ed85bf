use std::collections::{HashMap, VecDeque};

use citynav_core::Cell;

use crate::traits::Pather;

/// Number of unit steps on a shortest route from `start` to `goal`, by
/// breadth-first search.
///
/// Every edge counts as one step regardless of
/// [`WeightedPather::cost`](crate::WeightedPather::cost). Returns `None` if
/// `goal` cannot be reached. Visits cells lazily, so only the explored area
/// is allocated.
pub fn bfs_distance<P: Pather>(pather: &P, start: Cell, goal: Cell) -> Option<usize> {
    if start == goal {
        return Some(0);
    }

    let mut dist: HashMap<Cell, usize> = HashMap::new();
    let mut queue: VecDeque<Cell> = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);

    let mut nbuf = Vec::with_capacity(8);

    while let Some(c) = queue.pop_front() {
        let d = dist[&c];
        nbuf.clear();
        pather.neighbors(c, &mut nbuf);
        for &n in nbuf.iter() {
            if dist.contains_key(&n) {
                continue;
            }
            if n == goal {
                return Some(d + 1);
            }
            dist.insert(n, d + 1);
            queue.push_back(n);
        }
    }
    None
}
