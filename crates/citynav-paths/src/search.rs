use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use citynav_core::Cell;

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Heap entry ordered by `f`, then by the order the cell joined the open set.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    seq: u64,
    cell: Cell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the earliest arrival.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Per-search bookkeeping for A*.
///
/// Scores live in maps keyed by cell and are filled lazily, so memory grows
/// with the visited area, not the grid. A missing g-score means +∞.
///
/// The open set is a heap with lazy deletion plus a membership map holding
/// each member's arrival number. A cell keeps its arrival number when its
/// score improves while open, and gets a fresh one if it rejoins after being
/// expanded. Selection never depends on hash-map iteration order.
pub(crate) struct SearchState {
    g_score: HashMap<Cell, u32>,
    f_score: HashMap<Cell, f64>,
    came_from: HashMap<Cell, Cell>,
    open: BinaryHeap<OpenEntry>,
    open_seq: HashMap<Cell, u64>,
    next_seq: u64,
    peak_open: usize,
}

impl SearchState {
    pub(crate) fn new(start: Cell, estimate: f64) -> Self {
        let mut st = Self {
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            came_from: HashMap::new(),
            open: BinaryHeap::new(),
            open_seq: HashMap::new(),
            next_seq: 0,
            peak_open: 0,
        };
        st.g_score.insert(start, 0);
        st.f_score.insert(start, estimate);
        st.open_insert(start, estimate);
        st
    }

    /// Best known cost from the start, `None` for +∞.
    #[inline]
    pub(crate) fn g(&self, c: Cell) -> Option<u32> {
        self.g_score.get(&c).copied()
    }

    pub(crate) fn open_len(&self) -> usize {
        self.open_seq.len()
    }

    pub(crate) fn peak_open(&self) -> usize {
        self.peak_open
    }

    pub(crate) fn came_from(&self) -> &HashMap<Cell, Cell> {
        &self.came_from
    }

    /// Remove and return the open cell with the lowest f-score, ties going
    /// to the earliest arrival.
    pub(crate) fn pop_best(&mut self) -> Option<Cell> {
        while let Some(entry) = self.open.pop() {
            if self.open_seq.get(&entry.cell) != Some(&entry.seq) {
                continue;
            }
            let current_f = self.f_score.get(&entry.cell).copied();
            if current_f.map(f64::to_bits) != Some(entry.f.to_bits()) {
                // Superseded by a later improvement.
                continue;
            }
            self.open_seq.remove(&entry.cell);
            return Some(entry.cell);
        }
        None
    }

    /// Record `from → to` if `tentative_g` beats the best known cost of
    /// `to`. Returns whether it did.
    pub(crate) fn relax(&mut self, from: Cell, to: Cell, tentative_g: u32, estimate: f64) -> bool {
        if self.g(to).is_some_and(|g| tentative_g >= g) {
            return false;
        }
        let f = f64::from(tentative_g) + estimate;
        self.came_from.insert(to, from);
        self.g_score.insert(to, tentative_g);
        self.f_score.insert(to, f);
        match self.open_seq.get(&to) {
            Some(&seq) => self.open.push(OpenEntry { f, seq, cell: to }),
            None => self.open_insert(to, f),
        }
        true
    }

    fn open_insert(&mut self, cell: Cell, f: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.open_seq.insert(cell, seq);
        self.open.push(OpenEntry { f, seq, cell });
        self.peak_open = self.peak_open.max(self.open_seq.len());
    }
}
