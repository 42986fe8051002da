//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped (`key % capacity`) with depth-preferred replacement: a slot
//! is overwritten only by an entry searched at least as deep.

use log::debug;

use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    /// Fail-high: the true score is at least `score`.
    LowerBound,
    /// Fail-low: the true score is at most `score`.
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    /// `-1` marks an empty slot.
    pub depth: i16,
    pub score: i32,
    pub node_type: NodeType,
    pub best_move: Option<ChessMove>,
}

impl TTEntry {
    pub const EMPTY: TTEntry = TTEntry {
        key: 0,
        depth: -1,
        score: 0,
        node_type: NodeType::Exact,
        best_move: None,
    };
}

/// Result of a successful probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTHit {
    pub score: i32,
    pub node_type: NodeType,
    pub best_move: Option<ChessMove>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    stats: TTStats,
}

impl TranspositionTable {
    /// Table sized to `size_mb` megabytes (at least one).
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let count = (bytes / std::mem::size_of::<TTEntry>()).max(1);
        debug!("transposition table: {size_mb} MB, {count} entries");
        Self::with_capacity(count)
    }

    pub fn with_capacity(count: usize) -> Self {
        Self {
            entries: vec![TTEntry::EMPTY; count.max(1)],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Hit only when the stored key matches and was searched to at least `depth`.
    pub fn probe(&mut self, key: u64, depth: i16) -> Option<TTHit> {
        self.stats.probes += 1;
        let entry = self.entries[self.idx(key)];
        if entry.depth < 0 || entry.key != key || entry.depth < depth {
            return None;
        }
        self.stats.hits += 1;
        Some(TTHit {
            score: entry.score,
            node_type: entry.node_type,
            best_move: entry.best_move,
        })
    }

    /// Remembered best move for `key`, regardless of stored depth.
    pub fn probe_move(&self, key: u64) -> Option<ChessMove> {
        let entry = &self.entries[self.idx(key)];
        if entry.depth >= 0 && entry.key == key {
            entry.best_move
        } else {
            None
        }
    }

    pub fn store(
        &mut self,
        key: u64,
        depth: i16,
        score: i32,
        node_type: NodeType,
        best_move: Option<ChessMove>,
    ) {
        let idx = self.idx(key);
        if depth < self.entries[idx].depth {
            return;
        }
        self.stats.stores += 1;
        self.entries[idx] = TTEntry {
            key,
            depth,
            score,
            node_type,
            best_move,
        };
    }
}
