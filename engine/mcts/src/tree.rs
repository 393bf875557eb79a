//! Memoised search statistics keyed by board identity.
//!
//! Positions reached through different move orders share one entry: the tree
//! is really a transposition table over canonical boards. Terminal results
//! are cached separately so `game_ended` is asked once per board.

use std::collections::HashMap;

use engine_core::BoardKey;

use crate::node::MctsNode;

/// Summary of a tree's contents, logged after every root search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Expanded boards
    pub expanded: usize,
    /// Boards with a cached `game_ended` result (terminal or not)
    pub ended_cached: usize,
    /// Boards whose cached result is terminal
    pub terminal: usize,
    /// Sum of N(s) over expanded boards
    pub total_visits: u64,
}

/// Search statistics for every board touched by one engine instance.
#[derive(Debug, Default)]
pub struct MctsTree {
    /// E(s): game result from the perspective of the player to move
    ended: HashMap<BoardKey, f32>,

    /// P(s), V(s), N(s), N(s,·), Q(s,·)
    nodes: HashMap<BoardKey, MctsNode>,
}

impl MctsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached E(s), computing and storing it on first access.
    pub fn ended_or_insert_with(&mut self, key: &BoardKey, f: impl FnOnce() -> f32) -> f32 {
        if let Some(&v) = self.ended.get(key) {
            return v;
        }
        let v = f();
        self.ended.insert(key.clone(), v);
        v
    }

    #[inline]
    pub fn get(&self, key: &BoardKey) -> Option<&MctsNode> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &BoardKey) -> Option<&mut MctsNode> {
        self.nodes.get_mut(key)
    }

    /// Store a freshly expanded node. Replaces nothing: expansion happens
    /// once per board.
    pub fn insert(&mut self, key: BoardKey, node: MctsNode) {
        debug_assert!(!self.nodes.contains_key(&key), "board expanded twice");
        self.nodes.insert(key, node);
    }

    /// Number of expanded boards.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all statistics.
    pub fn clear(&mut self) {
        self.ended.clear();
        self.nodes.clear();
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            expanded: self.nodes.len(),
            ended_cached: self.ended.len(),
            terminal: self.ended.values().filter(|&&v| v != 0.0).count(),
            total_visits: self.nodes.values().map(|n| n.visit_count as u64).sum(),
        }
    }
}
