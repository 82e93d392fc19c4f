use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use eight_puzzle_solver::engine::{Board, Move};
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::logging;
use eight_puzzle_solver::observer::{Deadline, NoopObserver, SearchObserver};
use eight_puzzle_solver::solver::{
    BestFirstOrder, SearchConfig, SearchOutcome, SearchStats, Solver, Strategy,
};
use eight_puzzle_solver::utils::{board_from_str, format_moves, puzzle_from_str};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Dfs,
    Bfs,
    Astar,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Astar => Strategy::BestFirst,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HeuristicArg {
    Misplaced,
    MisplacedWithBlank,
    Manhattan,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Misplaced => Heuristic::Misplaced,
            HeuristicArg::MisplacedWithBlank => Heuristic::MisplacedWithBlank,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve an 8-puzzle", long_about = None)]
struct Args {
    /// Start board, e.g. "123456708" or "1,2,3,4,5,6,7,_,8" (0, _ or . is the blank)
    #[clap(short, long, conflicts_with_all = ["puzzle_file", "scramble"])]
    start: Option<String>,

    /// Goal board (defaults to 123456780)
    #[clap(short, long)]
    goal: Option<String>,

    /// File holding a start board followed by a goal board
    #[clap(long, conflicts_with = "scramble")]
    puzzle_file: Option<PathBuf>,

    /// Start from the goal scrambled by this many random moves
    #[clap(long)]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    #[clap(long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,

    /// Heuristic used by the astar strategy
    #[clap(long, value_enum, default_value_t = HeuristicArg::Misplaced)]
    heuristic: HeuristicArg,

    /// Rank astar nodes by the heuristic alone, ignoring moves already made
    #[clap(long)]
    greedy: bool,

    /// Search even when the boards have different parity
    #[clap(long)]
    no_parity_check: bool,

    /// Give up after this many expansions
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Give up after this many milliseconds
    #[clap(long)]
    timeout_ms: Option<u64>,

    /// Print the board after every move of the solution
    #[clap(long)]
    replay: bool,

    /// Hide the progress spinner
    #[clap(long)]
    no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Drives an indicatif spinner from search expansions.
struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} [{elapsed_precise}] {msg}")
                .context("invalid progress template")?,
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(SpinnerObserver { bar })
    }
}

impl SearchObserver for SpinnerObserver {
    fn on_expand(&mut self, _board: &Board, stats: &SearchStats) {
        if stats.expanded % 1000 == 1 {
            self.bar.set_message(format!(
                "{} expanded, {} generated",
                stats.expanded, stats.generated
            ));
        }
    }
}

fn parse_board(text: &str, what: &str) -> Result<Board> {
    board_from_str(text).with_context(|| format!("Invalid {} board '{}'", what, text))
}

fn load_puzzle(args: &Args) -> Result<(Board, Board)> {
    if let Some(path) = &args.puzzle_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle file {}", path.display()))?;
        return puzzle_from_str(&content)
            .with_context(|| format!("Invalid puzzle file {}", path.display()));
    }

    let goal = match &args.goal {
        Some(text) => parse_board(text, "goal")?,
        None => Board::solved(),
    };

    if let Some(moves) = args.scramble {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        return Ok((goal.scrambled(&mut rng, moves), goal));
    }

    match &args.start {
        Some(text) => Ok((parse_board(text, "start")?, goal)),
        None => bail!("One of --start, --puzzle-file or --scramble is required"),
    }
}

fn build_config(args: &Args) -> SearchConfig {
    let mut config = SearchConfig::new(args.strategy.into())
        .with_heuristic(args.heuristic.into())
        .with_parity_check(!args.no_parity_check);
    if args.greedy {
        config = config.with_best_first_order(BestFirstOrder::HeuristicOnly);
    }
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    config
}

fn print_replay(start: &Board, moves: &[Move]) {
    let mut board = *start;
    for (i, &mv) in moves.iter().enumerate() {
        let moved_tile = board.blank_position();
        match board.apply_move(mv) {
            Some(next) => board = next,
            None => {
                eprintln!("Move {} ({}) is not legal here; stopping replay.", i + 1, mv);
                return;
            }
        }
        println!("Move {}: {}", i + 1, mv);
        println!("{}\n", board.to_string_with_highlight(Some(moved_tile)));
    }
}

fn run<O: SearchObserver>(
    solver: &Solver,
    start: &Board,
    mut observer: O,
    timeout_ms: Option<u64>,
) -> SearchOutcome {
    match timeout_ms {
        Some(ms) => {
            let mut deadline = Deadline::wrap(observer, Duration::from_millis(ms));
            solver.solve_with(start, &mut deadline)
        }
        None => solver.solve_with(start, &mut observer),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let (start, goal) = load_puzzle(&args)?;
    let config = build_config(&args);
    let solver = Solver::new(goal, config);

    println!("Start board:\n{}\n", start);
    println!("Goal board:\n{}\n", goal);
    println!("Searching with {} ({})...\n", config.strategy, config.heuristic);

    let spinner = if args.no_progress {
        None
    } else {
        Some(SpinnerObserver::new()?)
    };
    let bar = spinner.as_ref().map(|s| s.bar.clone());

    let outcome = match spinner {
        Some(spinner) => run(&solver, &start, spinner, args.timeout_ms),
        None => run(&solver, &start, NoopObserver, args.timeout_ms),
    };
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let stats = *outcome.stats();
    match outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}): {}", solution.moves.len(), format_moves(&solution.moves));
            if args.replay {
                println!();
                print_replay(&start, &solution.moves);
            }
        }
        SearchOutcome::NoSolution(_) => {
            println!("No solution: the goal cannot be reached from this start board.");
        }
        SearchOutcome::Cancelled(_) => {
            println!("Search cancelled before a solution was found.");
        }
    }
    println!(
        "Expanded: {}, generated: {}, peak frontier: {}",
        stats.expanded, stats.generated, stats.max_frontier
    );

    Ok(())
}
