//! Per-board search statistics.
//!
//! One [`MctsNode`] exists for every distinct canonical board that search has
//! expanded. It caches the masked prior `P(s)`, the legal-move mask `V(s)`,
//! the board visit count `N(s)` and one [`EdgeStats`] per action holding
//! `N(s,a)` and `Q(s,a)`.

use engine_core::ActionMask;

/// Guards `sqrt(N(s))` against collapsing to zero before the first backup.
pub const EPS: f32 = 1e-8;

/// Statistics for a single (board, action) edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeStats {
    /// Number of times this edge was traversed, N(s,a)
    pub visit_count: u32,

    /// Mean value of the edge from the parent's perspective, Q(s,a).
    /// Meaningless while `visit_count == 0`.
    pub mean_value: f32,
}

impl EdgeStats {
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visit_count > 0
    }

    /// Q(s,a) if the edge has been visited.
    #[inline]
    pub fn q(&self) -> Option<f32> {
        self.is_visited().then_some(self.mean_value)
    }

    /// Fold one more backed-up value into the running mean.
    #[inline]
    pub fn record(&mut self, value: f32) {
        if self.is_visited() {
            let n = self.visit_count as f32;
            self.mean_value = (n * self.mean_value + value) / (n + 1.0);
        } else {
            self.mean_value = value;
        }
        self.visit_count += 1;
    }
}

/// An expanded board in the search tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Prior over the action space after masking and renormalisation, P(s)
    pub prior: Vec<f32>,

    /// Legal actions at this board, V(s)
    pub valid: ActionMask,

    /// Number of selections made from this board, N(s)
    pub visit_count: u32,

    /// Edge statistics indexed by action
    pub edges: Vec<EdgeStats>,
}

impl MctsNode {
    /// Create a freshly expanded node with no visits.
    pub fn new(prior: Vec<f32>, valid: ActionMask) -> Self {
        let edges = vec![EdgeStats::default(); prior.len()];
        Self {
            prior,
            valid,
            visit_count: 0,
            edges,
        }
    }

    /// Calculate UCT score for selecting `action`.
    ///
    /// Visited edges: `Q(s,a) + c_puct * P(s,a) * sqrt(N(s)) / (1 + N(s,a))`.
    /// Unvisited edges: `c_puct * P(s,a) * sqrt(N(s) + EPS)`, i.e. Q taken as 0.
    #[inline]
    pub fn ucb_score(&self, action: usize, c_puct: f32) -> f32 {
        let edge = &self.edges[action];
        let prior = self.prior[action];
        let n = self.visit_count as f32;

        match edge.q() {
            Some(q) => q + c_puct * prior * n.sqrt() / (1.0 + edge.visit_count as f32),
            None => c_puct * prior * (n + EPS).sqrt(),
        }
    }

    /// Legal action with the highest UCT score.
    ///
    /// Scans actions in ascending order and keeps the first maximum, so ties
    /// go to the lowest index. Returns `None` only if nothing is legal.
    pub fn select_action(&self, c_puct: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for action in self.valid.iter_valid() {
            let score = self.ucb_score(action, c_puct);
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((action, score)),
            }
        }
        best.map(|(a, _)| a)
    }

    /// Back up a value through `action`.
    pub fn backup(&mut self, action: usize, value: f32) {
        self.edges[action].record(value);
        self.visit_count += 1;
    }

    /// Visit count per action, N(s,·).
    pub fn visit_counts(&self) -> Vec<u32> {
        self.edges.iter().map(|e| e.visit_count).collect()
    }

    /// Sum of edge visit counts. Equals `visit_count` by construction.
    pub fn total_edge_visits(&self) -> u32 {
        self.edges.iter().map(|e| e.visit_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(prior: Vec<f32>) -> MctsNode {
        let valid = ActionMask::from_fn(prior.len(), |a| prior[a] > 0.0);
        MctsNode::new(prior, valid)
    }

    #[test]
    fn test_edge_running_mean() {
        let mut edge = EdgeStats::default();
        assert_eq!(edge.q(), None);

        edge.record(1.0);
        assert_eq!(edge.q(), Some(1.0));

        edge.record(-1.0);
        edge.record(0.5);
        assert_eq!(edge.visit_count, 3);
        assert!((edge.mean_value - 0.5 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_ucb_score_unvisited_uses_eps() {
        let n = node(vec![0.5, 0.5]);
        // N(s) = 0: score = c * P * sqrt(EPS), small but non-zero
        let score = n.ucb_score(0, 1.0);
        assert!(score > 0.0);
        assert!((score - 0.5 * EPS.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_ucb_score_visited() {
        let mut n = node(vec![0.5, 0.5]);
        n.visit_count = 100;
        n.edges[0] = EdgeStats {
            visit_count: 9,
            mean_value: 0.2,
        };

        // 0.2 + 1.0 * 0.5 * 10 / 10
        let score = n.ucb_score(0, 1.0);
        assert!((score - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_select_action_prefers_prior_then_lowest_index() {
        let n = node(vec![0.2, 0.5, 0.3]);
        assert_eq!(n.select_action(1.0), Some(1));

        let tied = node(vec![0.25, 0.25, 0.25, 0.25]);
        assert_eq!(tied.select_action(1.0), Some(0));
    }

    #[test]
    fn test_select_action_skips_invalid() {
        let mut n = node(vec![0.9, 0.1]);
        n.valid = ActionMask::from(vec![false, true]);
        assert_eq!(n.select_action(1.0), Some(1));

        n.valid = ActionMask::none(2);
        assert_eq!(n.select_action(1.0), None);
    }

    #[test]
    fn test_select_action_negative_scores() {
        // A visited edge with a losing Q must still be selectable
        let mut n = node(vec![1.0]);
        n.visit_count = 1;
        n.edges[0] = EdgeStats {
            visit_count: 1,
            mean_value: -1.0,
        };
        assert_eq!(n.select_action(1.0), Some(0));
    }

    #[test]
    fn test_backup_counts() {
        let mut n = node(vec![0.5, 0.5]);
        n.backup(1, 1.0);
        n.backup(1, 0.0);
        n.backup(0, -1.0);

        assert_eq!(n.visit_count, 3);
        assert_eq!(n.visit_counts(), vec![1, 2]);
        assert_eq!(n.total_edge_visits(), n.visit_count);
        assert!((n.edges[1].mean_value - 0.5).abs() < 1e-6);
    }
}
