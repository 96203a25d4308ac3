//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2, allowing the engine to be used
//! with graphical Go interfaces like Sabaki, GoGui, or Lizzie.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size (only the compiled-in size)
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a move for the given color

use std::io::{self, BufRead, Write};

use crate::board::{Board, MoveStatus, Player, parse_coord, str_coord};
use crate::config::UctConfig;
use crate::constants::{N, PASS_MOVE, RESIGN_MOVE};
use crate::uct::UctEngine;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "cputime",
    "genmove",
    "help",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Current game position
    board: Board,
    /// Player to move, tracked from the play/genmove commands
    to_move: Player,
    /// Search settings used for every genmove
    config: UctConfig,
    /// Start time for the cputime command
    start_time: std::time::Instant,
}

impl GtpEngine {
    /// Create a GTP engine with the default search settings.
    pub fn new() -> Self {
        Self::with_config(UctConfig::default())
    }

    pub fn with_config(config: UctConfig) -> Self {
        Self {
            board: Board::new(),
            to_move: Player::Black,
            config,
            start_time: std::time::Instant::now(),
        }
    }

    /// Turn indicator for the stderr prompt: ● for Black to play,
    /// ○ for White.
    fn turn_indicator(&self) -> &'static str {
        match self.to_move {
            Player::Black => "●",
            Player::White => "○",
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);

            // Board state goes to stderr after every command
            write!(stderr, "{}", self.board)?;

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            write!(stderr, "{} uct-go> ", self.turn_indicator())?;
            stderr.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let mut chars = trimmed.char_indices();

        if let Some((_, c)) = chars.next() {
            if c.is_ascii_digit() {
                let end = chars
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());

                if let Ok(id) = trimmed[..end].parse::<u32>() {
                    return (Some(id), trimmed[end..].trim());
                }
            }
        }

        (None, trimmed)
    }

    fn parse_player(s: &str) -> Option<Player> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Player::Black),
            "w" | "white" => Some(Player::White),
            _ => None,
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "uct-go".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" | "help" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {N} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.board.clear();
                self.to_move = Player::Black;
                (true, String::new())
            }

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<f32>() {
                    Ok(komi) => {
                        self.board.komi = komi;
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(pl) = Self::parse_player(args[0]) else {
                    return (false, "invalid color".to_string());
                };

                let v = parse_coord(args[1]);
                if v == RESIGN_MOVE {
                    return (false, "invalid vertex".to_string());
                }
                match self.board.play_legal(pl, v) {
                    MoveStatus::Ok => {
                        self.to_move = pl.other();
                        (true, String::new())
                    }
                    status => (false, format!("illegal move: {status}")),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Some(pl) = Self::parse_player(args[0]) else {
                    return (false, "invalid color".to_string());
                };

                // Answer an opponent pass with a pass once the game is
                // under way.
                if self.board.last == PASS_MOVE && self.board.move_count > 2 {
                    self.board.play_legal(pl, PASS_MOVE);
                    self.to_move = pl.other();
                    return (true, "pass".to_string());
                }

                let v = {
                    let mut engine = UctEngine::new(&self.board, self.config);
                    engine.genmove(pl)
                };

                if v == RESIGN_MOVE {
                    return (true, "resign".to_string());
                }

                self.board.play_legal(pl, v);
                self.to_move = pl.other();
                let reply = if v == PASS_MOVE {
                    "pass".to_string()
                } else {
                    str_coord(v)
                };
                (true, reply)
            }

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "cputime" => {
                let elapsed = self.start_time.elapsed().as_secs_f64();
                (true, format!("{:.3}", elapsed))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}
