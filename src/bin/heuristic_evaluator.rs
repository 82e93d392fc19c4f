use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::logging;
use eight_puzzle_solver::solver::{BestFirstOrder, SearchConfig, SearchOutcome, Solver, Strategy};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies on seeded scrambles", long_about = None)]
struct Args {
    /// Number of scrambled boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the solved board to build each scramble
    #[clap(short, long, default_value_t = 40)]
    moves: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    path_lengths: usize,
    expanded: usize,
    longer_than_optimal: usize,
}

fn configurations() -> Vec<(&'static str, SearchConfig)> {
    let astar = |h: Heuristic| SearchConfig::new(Strategy::BestFirst).with_heuristic(h);
    vec![
        ("DFS", SearchConfig::new(Strategy::DepthFirst)),
        ("BFS", SearchConfig::new(Strategy::BreadthFirst)),
        ("A* misplaced", astar(Heuristic::Misplaced)),
        ("A* misplaced+blank", astar(Heuristic::MisplacedWithBlank)),
        ("A* manhattan", astar(Heuristic::Manhattan)),
        (
            "Greedy manhattan",
            astar(Heuristic::Manhattan).with_best_first_order(BestFirstOrder::HeuristicOnly),
        ),
    ]
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let configs = configurations();
    let mut totals: Vec<Totals> = configs.iter().map(|_| Totals::default()).collect();
    let goal = Board::solved();

    println!("Starting strategy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let start = Board::new_scrambled_with_seed(current_seed, args.moves);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        println!("{}", start);

        // BFS is optimal, so its length is the reference for the others.
        let optimal = Solver::new(goal, SearchConfig::new(Strategy::BreadthFirst))
            .solve(&start)
            .moves()
            .map(|m| m.len());

        for ((name, config), total) in configs.iter().zip(totals.iter_mut()) {
            match Solver::new(goal, *config).solve(&start) {
                SearchOutcome::Solved(solution) => {
                    let length = solution.moves.len();
                    total.solved += 1;
                    total.path_lengths += length;
                    total.expanded += solution.stats.expanded;
                    if optimal.is_some_and(|best| length > best) {
                        total.longer_than_optimal += 1;
                    }
                    println!(
                        "  Strategy: {:<20} Moves: {:<6} Expanded: {}",
                        name, length, solution.stats.expanded
                    );
                }
                other => {
                    eprintln!(
                        "Warning: {} did not solve board {} (Seed: {}): {:?}",
                        name, board_idx, current_seed, other
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!(
        "Strategies evaluated: {}",
        configs
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<&str>>()
            .join(", ")
    );
    println!("\n--- Averages ---");

    let mut rows: Vec<(&str, f64, f64, usize)> = Vec::new();
    for ((name, _), total) in configs.iter().zip(totals.iter()) {
        if total.solved == 0 {
            println!("Strategy {}: No solutions recorded.", name);
            continue;
        }
        let solved = total.solved as f64;
        rows.push((
            *name,
            total.path_lengths as f64 / solved,
            total.expanded as f64 / solved,
            total.longer_than_optimal,
        ));
    }

    // Fewest expansions first
    rows.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    for (name, avg_moves, avg_expanded, suboptimal) in rows {
        println!(
            "Strategy {:<20}: Avg Moves = {:>8.2}, Avg Expanded = {:>10.1}, Longer than optimal = {}",
            name, avg_moves, avg_expanded, suboptimal
        );
    }
}
