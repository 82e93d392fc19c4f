use clap::Parser;
use eight_puzzle_solver::engine::{Game, Move};
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::logging;
use eight_puzzle_solver::solver::{SearchConfig, Solver, Strategy};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the 8-puzzle in the terminal", long_about = None)]
struct Args {
    /// Seed of the starting scramble
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Random moves applied to the solved board
    #[clap(long, default_value_t = 20)]
    scramble: usize,
}

enum Command {
    Slide(Move),
    Undo,
    Hint,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "q" => Some(Command::Quit),
        "u" => Some(Command::Undo),
        "h" => Some(Command::Hint),
        "w" => Some(Command::Slide(Move::Up)),
        "a" => Some(Command::Slide(Move::Left)),
        "s" => Some(Command::Slide(Move::Down)),
        "d" => Some(Command::Slide(Move::Right)),
        other => other.parse::<Move>().ok().map(Command::Slide),
    }
}

fn show_hint(game: &Game) {
    let config = SearchConfig::new(Strategy::BestFirst).with_heuristic(Heuristic::Manhattan);
    let outcome = Solver::new(*game.goal(), config).solve(game.board());
    match outcome.moves() {
        Some([]) => println!("Already solved."),
        Some(moves) => println!(
            "Hint: move the blank {} ({} moves left with best play).",
            moves[0],
            moves.len()
        ),
        None => println!("No solution exists from this board."),
    }
}

fn main() {
    let args = Args::parse();
    logging::init(0);

    let mut game = Game::new_scrambled(args.seed, args.scramble);
    println!("Welcome to the 8-puzzle!");
    println!("Goal:\n{}", game.goal());

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.board());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Steps: {}", game.steps());
            println!("---------------------");
            break;
        }

        print!("Slide the blank (w/a/s/d or up/down/left/right), 'u' to undo, 'h' for a hint, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match parse_command(&input.trim().to_ascii_lowercase()) {
            Some(Command::Quit) => {
                println!("Thanks for playing!");
                break;
            }
            Some(Command::Undo) => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            Some(Command::Hint) => show_hint(&game),
            Some(Command::Slide(mv)) => {
                if !game.process_move(mv) {
                    println!("Invalid move: the blank cannot move {} from here.", mv);
                }
            }
            None => println!("Invalid input. Use w/a/s/d, a direction name, 'u', 'h' or 'q'."),
        }
    }
}
