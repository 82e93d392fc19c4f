//! State-space search over 8-puzzle boards.
//!
//! Depth-first, breadth-first and best-first search share one expansion loop
//! and differ only in how the frontier orders pending nodes. Every strategy
//! keeps a visited set and gives up when the frontier runs dry.
use crate::engine::{Board, Move, BOARD_SIZE};
use crate::error::Result;
use crate::heuristics::Heuristic;
use crate::observer::{NoopObserver, SearchObserver};
use crate::tree::{NodeId, SearchTree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;

/// Frontier discipline used by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Last in, first out. Finds some path, not necessarily a short one.
    DepthFirst,
    /// First in, first out. Always finds a path with the fewest moves.
    BreadthFirst,
    /// Lowest priority first, see [`BestFirstOrder`].
    BestFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::BestFirst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DepthFirst => "depth-first",
            Strategy::BreadthFirst => "breadth-first",
            Strategy::BestFirst => "best-first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How best-first search ranks a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BestFirstOrder {
    /// Moves taken so far plus the heuristic estimate (A*). Returns shortest
    /// paths when the heuristic is admissible.
    #[default]
    PathCostPlusHeuristic,
    /// The heuristic estimate alone (greedy). Usually expands fewer nodes
    /// but gives no length guarantee.
    HeuristicOnly,
}

/// Parameters of a search run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Only consulted by [`Strategy::BestFirst`].
    pub heuristic: Heuristic,
    pub best_first_order: BestFirstOrder,
    /// Reject start/goal pairs of different parity before searching.
    pub check_parity: bool,
    /// Stop with [`SearchOutcome::Cancelled`] after this many expansions.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::BestFirst,
            heuristic: Heuristic::default(),
            best_first_order: BestFirstOrder::default(),
            check_parity: true,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        SearchConfig {
            strategy,
            ..SearchConfig::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_best_first_order(mut self, order: BestFirstOrder) -> Self {
        self.best_first_order = order;
        self
    }

    pub fn with_parity_check(mut self, enabled: bool) -> Self {
        self.check_parity = enabled;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded (the goal node included).
    pub expanded: usize,
    /// Child nodes created and pushed onto the frontier.
    pub generated: usize,
    /// Largest number of pending nodes held at once.
    pub max_frontier: usize,
}

/// A path from the start board to the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves of the blank, in the order they must be applied to the start board.
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The goal cannot be reached from the start board.
    NoSolution(SearchStats),
    /// The observer asked to stop, or the expansion limit was reached.
    Cancelled(SearchStats),
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    /// The solution's moves, if the goal was reached.
    pub fn moves(&self) -> Option<&[Move]> {
        match self {
            SearchOutcome::Solved(solution) => Some(&solution.moves),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::NoSolution(stats) | SearchOutcome::Cancelled(stats) => stats,
        }
    }
}

/// Pending nodes, ordered according to the strategy.
enum Frontier {
    Stack(Vec<NodeId>),
    Queue(VecDeque<NodeId>),
    // (priority, insertion sequence, node). The sequence makes ties pop in
    // insertion order, so results do not depend on heap internals.
    Priority {
        heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
        next_seq: u64,
    },
}

impl Frontier {
    fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::DepthFirst => Frontier::Stack(Vec::new()),
            Strategy::BreadthFirst => Frontier::Queue(VecDeque::new()),
            Strategy::BestFirst => Frontier::Priority {
                heap: BinaryHeap::new(),
                next_seq: 0,
            },
        }
    }

    fn is_prioritized(&self) -> bool {
        matches!(self, Frontier::Priority { .. })
    }

    /// `priority` is ignored by the stack and queue disciplines.
    fn push(&mut self, id: NodeId, priority: u32) {
        match self {
            Frontier::Stack(stack) => stack.push(id),
            Frontier::Queue(queue) => queue.push_back(id),
            Frontier::Priority { heap, next_seq } => {
                heap.push(Reverse((priority, *next_seq, id)));
                *next_seq += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Priority { heap, .. } => heap.pop().map(|Reverse((_, _, id))| id),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }
}

/// Searches for a path to a fixed goal board.
///
/// All per-run state (node arena, frontier, visited set) is created inside
/// each `solve` call and dropped when it returns.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, Move};
/// use eight_puzzle_solver::solver::{SearchConfig, Solver, Strategy};
///
/// let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// let solver = Solver::new(Board::solved(), SearchConfig::new(Strategy::DepthFirst));
/// assert_eq!(solver.solve(&start).moves(), Some(&[Move::Right][..]));
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    goal: Board,
    config: SearchConfig,
}

impl Solver {
    pub fn new(goal: Board, config: SearchConfig) -> Self {
        Solver { goal, config }
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search without an observer.
    pub fn solve(&self, start: &Board) -> SearchOutcome {
        self.solve_with(start, &mut NoopObserver)
    }

    /// Runs the search, reporting each expansion to `observer` and stopping
    /// early if it asks to cancel.
    pub fn solve_with<O>(&self, start: &Board, observer: &mut O) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        let config = &self.config;
        let mut stats = SearchStats::default();

        log::debug!(
            "starting {} search (heuristic: {}, order: {:?})",
            config.strategy,
            config.heuristic,
            config.best_first_order
        );

        if config.check_parity && !start.is_reachable_from(&self.goal) {
            log::debug!(
                "start has {} inversions and goal has {}; parities differ",
                start.inversions(),
                self.goal.inversions()
            );
            return SearchOutcome::NoSolution(stats);
        }

        let mut tree = SearchTree::new();
        let mut visited: HashSet<Board> = HashSet::new();
        let mut frontier = Frontier::new(config.strategy);

        let root = tree.add_root(*start);
        let root_priority = self.priority(&frontier, start, 0);
        frontier.push(root, root_priority);
        stats.max_frontier = 1;

        while let Some(current) = frontier.pop() {
            if observer.should_cancel() {
                log::info!("search cancelled after {} expansions", stats.expanded);
                return SearchOutcome::Cancelled(stats);
            }
            if config.max_expansions.is_some_and(|limit| stats.expanded >= limit) {
                log::info!("expansion limit of {} reached", stats.expanded);
                return SearchOutcome::Cancelled(stats);
            }

            let node = tree.get(current);
            let board = node.board;
            let depth = node.depth;

            if visited.contains(&board) {
                continue;
            }

            stats.expanded += 1;
            observer.on_expand(&board, &stats);
            log::trace!("expanding {:?} at depth {}", board.cells(), depth);

            if board == self.goal {
                let moves = tree.reconstruct_path(current);
                log::info!(
                    "{} search found a {}-move solution ({} expanded, {} generated)",
                    config.strategy,
                    moves.len(),
                    stats.expanded,
                    stats.generated
                );
                return SearchOutcome::Solved(Solution { moves, stats });
            }

            visited.insert(board);

            for mv in board.valid_moves() {
                let Some(next) = board.apply_move(mv) else {
                    continue;
                };
                if visited.contains(&next) {
                    continue;
                }
                let child = tree.add_child(current, mv, next);
                let priority = self.priority(&frontier, &next, depth + 1);
                frontier.push(child, priority);
                stats.generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        log::info!(
            "{} search exhausted the frontier after {} expansions",
            config.strategy,
            stats.expanded
        );
        SearchOutcome::NoSolution(stats)
    }

    fn priority(&self, frontier: &Frontier, board: &Board, depth: u32) -> u32 {
        if !frontier.is_prioritized() {
            return 0;
        }
        let estimate = self.config.heuristic.score(board, &self.goal);
        match self.config.best_first_order {
            BestFirstOrder::PathCostPlusHeuristic => depth + estimate,
            BestFirstOrder::HeuristicOnly => estimate,
        }
    }
}

/// Solves with the default configuration for `strategy`.
pub fn solve(start: &Board, goal: &Board, strategy: Strategy) -> SearchOutcome {
    Solver::new(*goal, SearchConfig::new(strategy)).solve(start)
}

/// Validates two raw grids and solves between them.
///
/// # Errors
/// Returns the validation error of the first grid that is not a permutation
/// of 0-8; no search is started in that case.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::solver::{solve_grids, Strategy};
///
/// let outcome = solve_grids(
///     [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
///     [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
///     Strategy::BreadthFirst,
/// )
/// .unwrap();
/// assert_eq!(outcome.moves(), Some(&[][..]));
///
/// assert!(solve_grids([[1; 3]; 3], [[1, 2, 3], [4, 5, 6], [7, 8, 0]], Strategy::BestFirst).is_err());
/// ```
pub fn solve_grids(
    start: [[u8; BOARD_SIZE]; BOARD_SIZE],
    goal: [[u8; BOARD_SIZE]; BOARD_SIZE],
    strategy: Strategy,
) -> Result<SearchOutcome> {
    let start = Board::from_grid(start)?;
    let goal = Board::from_grid(goal)?;
    Ok(solve(&start, &goal, strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn board(grid: [[u8; 3]; 3]) -> Board {
        Board::from_grid(grid).unwrap()
    }

    // One of the two boards 31 moves away from the solved board.
    fn hardest() -> Board {
        board([[8, 6, 7], [2, 5, 4], [3, 0, 1]])
    }

    fn one_move_start() -> Board {
        board([[1, 2, 3], [4, 5, 6], [7, 0, 8]])
    }

    #[test]
    fn test_single_move_all_strategies() {
        for strategy in Strategy::ALL {
            let outcome = solve(&one_move_start(), &Board::solved(), strategy);
            assert_eq!(
                outcome.moves(),
                Some(&[Move::Right][..]),
                "{} should slide the blank right",
                strategy
            );
        }
    }

    #[test]
    fn test_start_equals_goal_all_strategies() {
        for strategy in Strategy::ALL {
            let outcome = solve(&Board::solved(), &Board::solved(), strategy);
            match outcome {
                SearchOutcome::Solved(solution) => {
                    assert!(solution.moves.is_empty());
                    assert_eq!(solution.stats.expanded, 1);
                    assert_eq!(solution.stats.generated, 0);
                }
                other => panic!("{} returned {:?}", strategy, other),
            }
        }
    }

    #[test]
    fn test_parity_mismatch_all_strategies() {
        let start = board([[1, 2, 3], [4, 5, 6], [8, 7, 0]]);
        for strategy in Strategy::ALL {
            let outcome = solve(&start, &Board::solved(), strategy);
            assert!(
                matches!(outcome, SearchOutcome::NoSolution(stats) if stats.expanded == 0),
                "{} should reject the pair up front",
                strategy
            );
        }
    }

    #[test]
    fn test_depth_first_pops_most_recent() {
        // From (2,1) the children are up, left, right; the stack pops right first.
        let solver = Solver::new(Board::solved(), SearchConfig::new(Strategy::DepthFirst));
        let outcome = solver.solve(&one_move_start());
        assert_eq!(outcome.stats().expanded, 2);
        assert_eq!(outcome.stats().generated, 3);
    }

    #[test]
    fn test_breadth_first_reports_start_first() {
        let start = board([[1, 2, 3], [4, 5, 6], [0, 7, 8]]);
        let mut expanded = Vec::new();
        let solver = Solver::new(Board::solved(), SearchConfig::new(Strategy::BreadthFirst));
        let outcome = solver.solve_with(&start, &mut |b: &Board| expanded.push(*b));
        assert_eq!(outcome.moves(), Some(&[Move::Right, Move::Right][..]));
        assert_eq!(expanded.first(), Some(&start));
        assert_eq!(expanded.last(), Some(&Board::solved()));
        assert_eq!(expanded.len(), outcome.stats().expanded);
    }

    #[test]
    fn test_best_first_tie_break_is_deterministic() {
        let start = Board::new_scrambled_with_seed(11, 40);
        let solver = Solver::new(
            Board::solved(),
            SearchConfig::new(Strategy::BestFirst).with_heuristic(Heuristic::MisplacedWithBlank),
        );
        let first = solver.solve(&start);
        let second = solver.solve(&start);
        assert!(first.is_solved());
        assert_eq!(first, second);
    }

    #[test]
    fn test_best_first_greedy_order_is_valid() {
        let start = Board::new_scrambled_with_seed(5, 30);
        let config = SearchConfig::new(Strategy::BestFirst)
            .with_best_first_order(BestFirstOrder::HeuristicOnly)
            .with_heuristic(Heuristic::Manhattan);
        let outcome = Solver::new(Board::solved(), config).solve(&start);
        let moves = outcome.moves().unwrap();
        assert_eq!(start.apply_moves(moves), Some(Board::solved()));
    }

    #[test]
    fn test_cancel_after_first_expansion() {
        struct CancelAfterFirst {
            expansions: usize,
        }
        impl SearchObserver for CancelAfterFirst {
            fn on_expand(&mut self, _board: &Board, _stats: &SearchStats) {
                self.expansions += 1;
            }
            fn should_cancel(&mut self) -> bool {
                self.expansions >= 1
            }
        }

        let start = hardest();
        for strategy in Strategy::ALL {
            let mut observer = CancelAfterFirst { expansions: 0 };
            let solver = Solver::new(Board::solved(), SearchConfig::new(strategy));
            let outcome = solver.solve_with(&start, &mut observer);
            assert!(
                matches!(outcome, SearchOutcome::Cancelled(stats) if stats.expanded == 1),
                "{} should report cancellation",
                strategy
            );
            assert_eq!(observer.expansions, 1);
        }
    }

    #[test]
    fn test_expansion_limit_cancels() {
        let start = hardest();
        let config = SearchConfig::new(Strategy::BreadthFirst).with_max_expansions(5);
        let outcome = Solver::new(Board::solved(), config).solve(&start);
        assert!(matches!(outcome, SearchOutcome::Cancelled(stats) if stats.expanded == 5));
    }

    #[test]
    fn test_solve_grids_rejects_invalid_board() {
        let result = solve_grids(
            [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
            [[1, 2, 3], [4, 5, 6], [7, 8, 9]],
            Strategy::BreadthFirst,
        );
        assert!(matches!(result, Err(Error::ValueOutOfRange { value: 9, .. })));
    }

    #[test]
    fn test_custom_goal() {
        let goal = board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let start = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let outcome = solve(&start, &goal, Strategy::BestFirst);
        assert_eq!(outcome.moves(), Some(&[Move::Left][..]));
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = SearchOutcome::Cancelled(SearchStats {
            expanded: 3,
            generated: 7,
            max_frontier: 5,
        });
        assert!(!outcome.is_solved());
        assert_eq!(outcome.moves(), None);
        assert_eq!(outcome.stats().generated, 7);
    }
}
