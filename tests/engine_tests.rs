//! Integration tests for uct-go.
//!
//! These drive the engine through its public surface: board setup via move
//! sequences, full genmove calls, and the GTP-visible behaviors around
//! passing and resignation.

use uct_go::board::{Board, MoveStatus, Player, parse_coord, str_coord};
use uct_go::config::UctConfig;
use uct_go::constants::{N, PASS_MOVE, RESIGN_MOVE};
use uct_go::playout::SimplePolicy;
use uct_go::uct::UctEngine;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Apply a sequence of moves, alternating Black first. "pass" passes.
fn setup_position(moves: &[&str]) -> Board {
    let mut board = Board::new();
    let mut pl = Player::Black;
    for mv in moves {
        let v = parse_coord(mv);
        assert_eq!(
            board.play_legal(pl, v),
            MoveStatus::Ok,
            "setup move {} failed",
            mv
        );
        pl = pl.other();
    }
    board
}

fn search_config(playouts: usize) -> UctConfig {
    UctConfig {
        genmove_playouts: playouts,
        max_nodes: 50_000,
        ..UctConfig::default()
    }
}

// =============================================================================
// Board scenarios
// =============================================================================

#[test]
fn alternating_game_with_a_capture() {
    // Black builds around D4, White pushes in and is captured.
    let board = setup_position(&["C4", "D4", "D5", "E5", "D3", "H8", "E4", "H7", "F4"]);
    // The white D4/E4... group is gone once Black closes the net.
    assert_eq!(board.color[parse_coord("C4")], uct_go::board::BLACK);
    assert!(board.captures[Player::Black.idx()] + board.captures[Player::White.idx()] > 0);
}

#[test]
fn pass_exchange_keeps_the_board_stable() {
    let mut board = setup_position(&["E5", "C3"]);
    let hash = board.position_hash();
    board.play_legal(Player::Black, PASS_MOVE);
    board.play_legal(Player::White, PASS_MOVE);
    assert_eq!(board.position_hash(), hash);
    assert_eq!(board.move_count, 4);
}

// =============================================================================
// Engine scenarios
// =============================================================================

#[test]
fn genmove_on_an_open_board_is_legal_and_not_a_resignation() {
    let board = setup_position(&["E5", "C3", "G5"]);
    let mut engine = UctEngine::new(&board, search_config(400));
    let v = engine.genmove(Player::White);
    assert_ne!(v, RESIGN_MOVE);
    assert!(board.is_strict_legal(Player::White, v), "got {}", str_coord(v));
}

#[test]
fn genmove_never_retakes_a_barred_ko() {
    // Classic single-stone ko around E4/F4; Black has just captured, so
    // the immediate recapture at E4 is barred for White.
    let mut board = Board::new();
    for v in ["D4", "E5", "E3"] {
        board.play_legal(Player::Black, parse_coord(v));
    }
    for v in ["F5", "G4", "F3", "E4"] {
        board.play_legal(Player::White, parse_coord(v));
    }
    board.play_legal(Player::Black, parse_coord("F4"));
    assert_eq!(board.ko, parse_coord("E4"));

    let mut engine =
        UctEngine::with_policy(&board, search_config(200), SimplePolicy::with_seed(9));
    let v = engine.genmove(Player::White);
    assert_ne!(v, parse_coord("E4"));
}

#[test]
fn genmove_is_reproducible_with_a_seeded_policy() {
    let board = setup_position(&["D4", "F6"]);
    let config = search_config(300);
    let a = UctEngine::with_policy(&board, config, SimplePolicy::with_seed(77))
        .genmove(Player::Black);
    let b = UctEngine::with_policy(&board, config, SimplePolicy::with_seed(77))
        .genmove(Player::Black);
    assert_eq!(a, b);
    let c = UctEngine::with_policy(&board, config, SimplePolicy::with_seed(78))
        .genmove(Player::Black);
    // A different seed is allowed to agree, but the run must still finish
    // with a sane move.
    assert!(c == PASS_MOVE || board.is_strict_legal(Player::Black, c));
}

#[test]
fn hopeless_position_resigns() {
    // White owns the whole board except two eye points, one in each far
    // corner. Black has no legal stone and loses every playout.
    let mut board = Board::new();
    let empties: Vec<usize> = board.empty_vertices().collect();
    let eyes = [empties[0], *empties.last().unwrap()];
    for &v in &empties {
        if !eyes.contains(&v) {
            assert_eq!(board.play_legal(Player::White, v), MoveStatus::Ok);
        }
    }
    assert_eq!(board.empty_vertices().count(), 2);

    let mut engine =
        UctEngine::with_policy(&board, search_config(200), SimplePolicy::with_seed(5));
    let v = engine.genmove(Player::Black);
    assert_eq!(v, RESIGN_MOVE);
}

#[test]
fn search_tree_stays_within_its_arena() {
    // A tiny arena forces the point: the whole search must fit. Seeding
    // takes one node per legal move, and with few playouts per move no
    // expansion wave can overflow a few thousand slots.
    let board = Board::new();
    let config = UctConfig {
        genmove_playouts: 150,
        max_nodes: 4 * N * N,
        ..UctConfig::default()
    };
    let mut engine = UctEngine::with_policy(&board, config, SimplePolicy::with_seed(1));
    let v = engine.genmove(Player::Black);
    assert!(v == PASS_MOVE || board.is_strict_legal(Player::Black, v));
}
