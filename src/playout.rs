//! Random rollout policy.
//!
//! Once a playout leaves the search tree, [`SimplePolicy`] finishes the game
//! for both players: uniformly random legal moves, never filling the mover's
//! own true eyes, until two consecutive passes or the game-length cap. The
//! search only looks at the final position's winner, never at the moves.

use crate::board::{Board, EMPTY, MoveStatus, Player, Vertex};
use crate::constants::{BOARD_IMAX, BOARD_IMIN, MAX_GAME_LEN, N, PASS_MOVE, W};

/// The default rollout policy. Owns its RNG so that a seeded policy makes
/// the whole search reproducible.
pub struct SimplePolicy {
    rng: fastrand::Rng,
}

impl SimplePolicy {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Play the game out on `board`, starting with `first_player`, until
    /// two consecutive passes or the length cap.
    pub fn run(&mut self, board: &mut Board, first_player: Player) {
        let mut pl = first_player;
        let mut passes = 0;

        while passes < 2 && board.move_count < MAX_GAME_LEN {
            match self.choose_move(board, pl) {
                Some(v) => {
                    board.play_legal(pl, v);
                    passes = 0;
                }
                None => {
                    board.play_legal(pl, PASS_MOVE);
                    passes += 1;
                }
            }
            pl = pl.other();
        }
    }

    /// Pick a random playable point for `pl`: empty, not the mover's own
    /// true eye, and accepted by the board. Returns None when nothing
    /// qualifies, which the caller turns into a pass.
    fn choose_move(&mut self, board: &Board, pl: Player) -> Option<Vertex> {
        // Start the scan at a random phase so low indices get no preference.
        let start = BOARD_IMIN + self.rng.usize(..N * W);
        let mut candidates = Vec::with_capacity(N * N);
        for v in (start..BOARD_IMAX).chain(BOARD_IMIN..start) {
            if board.color[v] == EMPTY && board.is_eye(v) != Some(pl) {
                candidates.push(v);
            }
        }

        // Some candidates are suicide or ko; probe until one sticks.
        let n = candidates.len();
        for i in 0..n {
            let j = i + self.rng.usize(..n - i);
            candidates.swap(i, j);

            let v = candidates[i];
            if !board.is_pseudo_legal(pl, v) {
                continue;
            }
            let mut probe = board.clone();
            if probe.play_legal(pl, v) == MoveStatus::Ok {
                return Some(v);
            }
        }

        None
    }
}

impl Default for SimplePolicy {
    fn default() -> Self {
        Self::new()
    }
}
