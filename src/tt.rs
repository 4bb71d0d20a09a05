//! Transposition table.
//!
//! A direct-mapped, fixed-capacity store keyed by Zobrist hash. One entry
//! per slot, no chaining; the replacement policy is depth-preferred: an
//! entry only ever gives way to a strictly deeper search result, whether
//! the new key matches or collides. The table lives for a whole game and is
//! cleared on `new`.

use chess::ChessMove;

/// Default number of slots; must be a power of two.
pub const DEFAULT_TT_CAPACITY: usize = 1 << 20;

/// How the stored score bounds the true value of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact minimax value within the searched window.
    Exact,
    /// Search failed low: the true score is at most this value.
    UpperBound,
    /// Search failed high: the true score is at least this value.
    LowerBound,
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    /// Remaining search depth when the entry was stored, not distance from
    /// the root.
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "transposition table capacity must be a power of two"
        );
        TranspositionTable {
            slots: vec![None; capacity],
            mask: capacity - 1,
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Look up `key`. Never returns an entry stored under a different key,
    /// so a colliding slot reads as a miss.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.slots[self.index(key)].filter(|entry| entry.key == key)
    }

    /// Store a search result. The write happens when the slot is empty or
    /// when `depth` strictly exceeds the resident entry's depth; otherwise
    /// the deeper resident survives, even across key collisions.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        score: i32,
        bound: Bound,
        best_move: Option<ChessMove>,
    ) {
        let idx = self.index(key);
        let replace = match &self.slots[idx] {
            None => true,
            Some(existing) => depth > existing.depth,
        };
        if replace {
            self.slots[idx] = Some(TTEntry {
                key,
                depth,
                score,
                bound,
                best_move,
            });
        }
    }

    /// Drop every entry (new game).
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(16);
        tt.store(42, 3, 150, Bound::Exact, None);
        let entry = tt.probe(42).expect("entry should be present");
        assert_eq!(entry.depth, 3);
        assert_eq!(entry.score, 150);
        assert_eq!(entry.bound, Bound::Exact);
    }

    #[test]
    fn probe_rejects_colliding_key() {
        let mut tt = TranspositionTable::new(2);
        // 2 and 4 both map to slot 0.
        tt.store(2, 1, 10, Bound::Exact, None);
        assert!(tt.probe(4).is_none());
    }

    #[test]
    fn deeper_store_replaces_same_key() {
        let mut tt = TranspositionTable::new(16);
        tt.store(7, 1, 10, Bound::Exact, None);
        tt.store(7, 2, 20, Bound::Exact, None);
        assert_eq!(tt.probe(7).expect("present").depth, 2);
    }

    #[test]
    fn shallower_store_keeps_resident_entry() {
        let mut tt = TranspositionTable::new(16);
        tt.store(7, 5, 10, Bound::Exact, None);
        tt.store(7, 2, 99, Bound::LowerBound, None);
        let entry = tt.probe(7).expect("present");
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 10);
    }

    #[test]
    fn collision_resolved_by_depth() {
        let mut tt = TranspositionTable::new(2);
        tt.store(2, 1, 10, Bound::Exact, None);
        // Equal depth under collision: first entry persists.
        tt.store(4, 1, 20, Bound::Exact, None);
        assert!(tt.probe(2).is_some());
        assert!(tt.probe(4).is_none());
        // Deeper store evicts across the collision.
        tt.store(4, 2, 20, Bound::Exact, None);
        assert!(tt.probe(2).is_none());
        assert!(tt.probe(4).is_some());
    }

    #[test]
    fn clear_empties_the_table() {
        let mut tt = TranspositionTable::new(16);
        tt.store(1, 1, 0, Bound::Exact, None);
        tt.clear();
        assert!(tt.probe(1).is_none());
    }
}
