use std::collections::HashMap;

use citynav_core::Cell;

/// Walk the predecessor chain back from `goal` and return the route in
/// forward order, without the start cell and ending at `goal`.
///
/// The start is the first cell found with no predecessor. If `goal` itself
/// has none, the route is empty.
pub fn reconstruct(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        // A chain longer than the map is a cycle; no start to stop at.
        if path.len() > came_from.len() {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.pop();
    path.reverse();
    path
}
