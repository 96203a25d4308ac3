//! The UCT search driver.
//!
//! [`UctEngine`] runs playouts against a borrowed base board. Each playout
//! descends the tree under UCB selection while mirroring the chosen moves
//! on a scratch board, expands mature leaves, rolls the rest of the game
//! out with the default policy, and backpropagates the result. Moves that
//! turn out to be illegal on the scratch board are discovered during the
//! descent; the offending node is deleted and that playout is abandoned
//! without an update.

use crate::board::{Board, MoveStatus, Player, Vertex};
use crate::config::UctConfig;
use crate::constants::{PASS_MOVE, RESIGN_MOVE};
use crate::playout::SimplePolicy;
use crate::stat::Stat;
use crate::tree::Tree;

/// The move generator.
pub struct UctEngine<'a> {
    base_board: &'a Board,
    tree: Tree,
    policy: SimplePolicy,
}

impl<'a> UctEngine<'a> {
    /// Create an engine searching from the current state of `base_board`.
    /// The board must not change for the lifetime of the engine.
    pub fn new(base_board: &'a Board, config: UctConfig) -> Self {
        Self::with_policy(base_board, config, SimplePolicy::new())
    }

    /// Like [`UctEngine::new`], with a caller-supplied rollout policy.
    /// A seeded policy makes the search deterministic.
    pub fn with_policy(base_board: &'a Board, config: UctConfig, policy: SimplePolicy) -> Self {
        Self {
            base_board,
            tree: Tree::new(config),
            policy,
        }
    }

    /// Populate the root with one child per strictly legal move for `pl`.
    ///
    /// Strict legality includes superko and is only ever paid here; inside
    /// playouts the cheap pseudo-legality check suffices. Pass is always
    /// legal, so the root list is never empty.
    pub fn seed_root(&mut self, pl: Player) {
        self.tree.history_reset();
        debug_assert!(self.tree.no_children(self.tree.root(), pl));

        let board = self.base_board;
        for v in board.empty_vertices().chain(std::iter::once(PASS_MOVE)) {
            if board.is_strict_legal(pl, v) {
                self.tree.expand_child(pl, v);
            }
        }
    }

    /// Run one playout starting with `first_player` to move.
    ///
    /// Returns the game result that was backpropagated (+1.0 for a Black
    /// win, -1.0 for a White win), or None if the playout was abandoned
    /// because the descent reached an illegal move. An abandoned playout
    /// deletes exactly the offending node and updates nothing else.
    pub fn playout(&mut self, scratch: &mut Board, first_player: Player) -> Option<f32> {
        scratch.load(self.base_board);
        self.tree.history_reset();

        let mut was_pass = [false; 2];
        let mut pl = first_player;

        loop {
            let cur = self.tree.current();
            if self.tree.no_children(cur, pl) {
                if self.tree.arena[cur].is_mature(self.tree.config.mature_bias_threshold) {
                    // Grow the frontier: every empty point plus pass becomes
                    // a child. Pseudo-legality is checked on the descent that
                    // follows, not here.
                    let empties: Vec<Vertex> = scratch.empty_vertices().collect();
                    for v in empties {
                        self.tree.expand_child(pl, v);
                    }
                    self.tree.expand_child(pl, PASS_MOVE);
                    debug_assert!(!self.tree.no_children(self.tree.current(), pl));
                    continue;
                }
                self.policy.run(scratch, pl);
                break;
            }

            self.tree.descend_uct(pl);
            let v = self.tree.arena[self.tree.current()].mv;

            if !scratch.is_pseudo_legal(pl, v) {
                self.tree.delete_current(pl);
                return None;
            }
            if scratch.play_legal(pl, v) != MoveStatus::Ok {
                self.tree.delete_current(pl);
                return None;
            }

            was_pass[pl.idx()] = v == PASS_MOVE;
            pl = pl.other();

            if was_pass[0] && was_pass[1] {
                break;
            }
        }

        // +1 for a Black win (index 0), -1 for a White win (index 1).
        let result = 1.0 - 2.0 * scratch.winner().idx() as f32;
        self.tree.backprop(result);
        Some(result)
    }

    /// Pick the root move after the playouts: the most-explored child,
    /// unless its mean is hopeless for the mover, in which case resign.
    fn choose_root_move(&self, pl: Player) -> Vertex {
        let best = self.tree.find_most_explored_child(self.tree.root(), pl);
        let value = self.tree.arena[best].value;
        let resign = match pl {
            Player::Black => value < -self.tree.config.resign_value,
            Player::White => value > self.tree.config.resign_value,
        };
        if resign {
            return RESIGN_MOVE;
        }
        self.tree.arena[best].mv
    }

    /// Generate a move for `pl`: seed the root, run the configured number
    /// of playouts, and return the most-explored root child (or the resign
    /// sentinel). The explored tree is dumped to stderr.
    pub fn genmove(&mut self, pl: Player) -> Vertex {
        self.seed_root(pl);

        let mut scratch = self.base_board.clone();
        let mut results = Stat::new();
        let mut abandoned = 0usize;
        for _ in 0..self.tree.config.genmove_playouts {
            match self.playout(&mut scratch, pl) {
                Some(result) => results.update(result),
                None => abandoned += 1,
            }
        }

        eprintln!("{}", self.tree);
        log::debug!(
            "genmove {}: {} playouts ({} abandoned), result {} +/- {:.3}, {} nodes",
            pl,
            self.tree.config.genmove_playouts,
            abandoned,
            results,
            results.std_err(),
            self.tree.arena.live_count()
        );

        self.choose_root_move(pl)
    }
}
