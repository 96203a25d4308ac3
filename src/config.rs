//! Engine tunables as a single immutable record.
//!
//! A [`UctConfig`] is handed to the engine at construction; nothing in the
//! search reads process-wide mutable state. `Default` carries the canonical
//! values; tests and the demo override individual fields with struct update
//! syntax.

/// Tunables for the UCT search.
#[derive(Copy, Clone, Debug)]
pub struct UctConfig {
    /// Starting value of a fresh tree node.
    pub initial_value: f32,
    /// Prior pseudo-visit count of a fresh node. Keeps the early mean
    /// defined and damped.
    pub initial_bias: f32,
    /// Bias above which a leaf is expanded on its next visit.
    pub mature_bias_threshold: f32,
    /// UCB exploration weight.
    pub explore_rate: f32,
    /// Descent path cap. Exceeding it is fatal.
    pub max_depth: usize,
    /// Node arena capacity. Exhausting it is fatal.
    pub max_nodes: usize,
    /// |mean| threshold beyond which the engine resigns at the root.
    pub resign_value: f32,
    /// Playouts per generated move.
    pub genmove_playouts: usize,
    /// Tree dump: minimum effective visits for a child to be printed.
    pub print_visit_threshold_base: f32,
    /// Tree dump: additional cutoff as a fraction of the parent's visits.
    pub print_visit_threshold_parent: f32,
}

impl Default for UctConfig {
    fn default() -> Self {
        let initial_bias = 1.0;
        Self {
            initial_value: 0.0,
            initial_bias,
            mature_bias_threshold: initial_bias + 100.0,
            explore_rate: 1.0,
            max_depth: 1000,
            max_nodes: 1_000_000,
            resign_value: 0.95,
            genmove_playouts: 50_000,
            print_visit_threshold_base: 500.0,
            print_visit_threshold_parent: 0.02,
        }
    }
}
