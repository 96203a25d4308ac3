//! UCT-Go: a Monte Carlo Tree Search Go engine.
//!
//! This crate implements move generation for Go using UCT (Upper Confidence
//! bounds applied to Trees). Each call to [`uct::UctEngine::genmove`] runs a
//! fixed number of simulated playouts: a descent through a growing search
//! tree under the UCB selection rule, followed by a random rollout to the
//! end of the game, followed by backpropagation of the result along the
//! descent path. The move returned is the most-explored child of the root.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and special vertices
//! - [`config`] - Engine tunables as an immutable record
//! - [`board`] - Board state, legality checks, captures, scoring
//! - [`stat`] - Running mean/variance estimator
//! - [`tree`] - Arena-backed search tree
//! - [`playout`] - Random rollout policy
//! - [`uct`] - The search driver
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use uct_go::board::{Board, Player, str_coord};
//! use uct_go::config::UctConfig;
//! use uct_go::uct::UctEngine;
//!
//! let board = Board::new();
//! let config = UctConfig {
//!     genmove_playouts: 100,
//!     ..UctConfig::default()
//! };
//!
//! let mut engine = UctEngine::new(&board, config);
//! let best = engine.genmove(Player::Black);
//! println!("Best move: {}", str_coord(best));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod gtp;
pub mod playout;
pub mod stat;
pub mod tree;
pub mod uct;
