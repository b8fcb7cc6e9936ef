//! Plays the automated policy against itself and prints each position
//!
//! Usage: selfplay [goat_level] [tiger_level] [max_plies]

use baghchal_core::game::{apply_move, check_terminal};
use baghchal_core::{AiLevel, GameState, MovePolicy, Piece, TieredPolicy};

fn parse_level(arg: Option<String>, default: AiLevel) -> AiLevel {
    match arg {
        None => default,
        Some(raw) => match raw.parse::<u8>().map_err(|e| e.to_string()).and_then(|n| {
            AiLevel::try_from(n).map_err(|e| e.to_string())
        }) {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Invalid level '{}': {}", raw, e);
                eprintln!("Usage: selfplay [goat_level] [tiger_level] [max_plies]");
                std::process::exit(1);
            }
        },
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let goat_level = parse_level(args.next(), AiLevel::Random);
    let tiger_level = parse_level(args.next(), AiLevel::CapturePreferring);
    let max_plies: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(200);

    println!("Goats: {} | Tigers: {}", goat_level, tiger_level);
    println!();

    let policy = TieredPolicy::new();
    let mut state = GameState::new();
    let mut ply = 0;

    while !state.is_game_over && ply < max_plies {
        let level = if state.current_turn == Piece::Goat {
            goat_level
        } else {
            tiger_level
        };

        let mv = match policy.select_move(&state, level) {
            Ok(mv) => mv,
            Err(e) => {
                println!("{} cannot move: {}", state.current_turn, e);
                break;
            }
        };

        if let Err(e) = apply_move(&mut state, mv) {
            eprintln!("Policy produced a rejected move {:?}: {}", mv, e);
            std::process::exit(1);
        }
        check_terminal(&mut state);
        ply += 1;

        println!(
            "{:>3}. {} {} -> {}{}",
            ply,
            mv.piece_type,
            mv.from,
            mv.to,
            state
                .last_move
                .and_then(|m| m.capture)
                .map(|c| format!(" x{}", c))
                .unwrap_or_default()
        );
        println!("{}", state.board);
    }

    println!(
        "Goats in hand: {} | Captured: {}",
        state.goats_in_hand, state.captured_goats
    );
    match state.winner {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("No winner after {} plies", ply),
    }
}
