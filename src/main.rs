use std::io;
use std::io::Write;

use board_game_traits::Color;

use morris::minmax::{self, Difficulty};
use morris::position::{Event, GameState, Move};

fn main() {
    init_logging();
    println!("play: Play against the engine");
    println!("aimatch: Watch two engine difficulties play each other");

    match read_line().trim() {
        "play" => play_human(),
        "aimatch" => ai_match(),
        s => println!("Unknown option \"{}\"", s),
    }
}

fn init_logging() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .chain(io::stderr())
        .apply()
        .unwrap();
}

fn read_line() -> String {
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input
}

fn choose_difficulty() -> Difficulty {
    loop {
        print!("Difficulty (easy/medium/hard): ");
        io::stdout().flush().unwrap();
        match read_line().trim() {
            "easy" => return Difficulty::EASY,
            "medium" => return Difficulty::MEDIUM,
            "hard" => return Difficulty::HARD,
            s => println!("Unknown difficulty \"{}\"", s),
        }
    }
}

fn print_events(game: &GameState) {
    for event in game.events() {
        match *event {
            Event::MillFormed { color, at } => println!("{} formed a mill at {}.", color, at),
            Event::Removed { color, at } => println!("{} stone at {} was removed.", color, at),
            Event::PhaseChanged { .. } => {
                println!("All stones are placed. Sliding phase begins.")
            }
            Event::GameOver { winner } => println!("{} has won the game!", winner),
            Event::Placed { .. } | Event::Slid { .. } => (),
        }
    }
}

/// Play a game against the engine through stdin. The human plays white.
/// Moves are entered as "d7" (place), "d7-d6" (slide) or "xd7" (remove).
fn play_human() {
    let difficulty = choose_difficulty();
    let mut game = GameState::start_position();
    loop {
        if game.winner().is_some() {
            println!("{:?}", game);
            break;
        }
        if game.side_to_move() == Color::White {
            println!("{:?}", game);
            print!("Your move (or undo/hint): ");
            io::stdout().flush().unwrap();
            let line = read_line();
            let input = line.trim();
            match input {
                "undo" => {
                    // Take back the engine's reply as well
                    if !(game.undo() && game.undo()) {
                        println!("Nothing to undo.");
                    }
                }
                "hint" => match minmax::hint(&game, Difficulty::MEDIUM) {
                    Some(mv) => println!("Try {}.", mv),
                    None => println!("No legal moves."),
                },
                _ => match Move::from_string(input) {
                    Ok(mv) => {
                        if game.apply_move(mv) {
                            print_events(&game);
                        } else {
                            println!("Illegal move {}.", mv);
                        }
                    }
                    Err(err) => println!("{}", err),
                },
            }
        } else {
            match minmax::choose_move(&game, difficulty) {
                Some(mv) => {
                    println!("Engine plays {}.", mv);
                    game.apply_move(mv);
                    print_events(&game);
                }
                None => break,
            }
        }
    }
}

fn ai_match() {
    let mut game = GameState::start_position();
    let mut plies = 0;
    while game.winner().is_none() && plies < 300 {
        let difficulty = match game.side_to_move() {
            Color::White => Difficulty::HARD,
            Color::Black => Difficulty::MEDIUM,
        };
        match minmax::choose_move(&game, difficulty) {
            Some(mv) => {
                print!("{} ", mv);
                io::stdout().flush().unwrap();
                game.apply_move(mv);
                plies += 1;
            }
            None => break,
        }
    }
    println!();
    println!("{:?}", game);
    match game.game_result() {
        Some(result) => println!("Result: {:?}", result),
        None => println!("No result after {} plies.", plies),
    }
}
