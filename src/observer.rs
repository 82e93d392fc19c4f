//! Observer port for search progress and cancellation.
//!
//! The solver calls into a [`SearchObserver`] once per iteration, right after
//! popping a node: first [`SearchObserver::should_cancel`], then (if the node
//! is about to be expanded) [`SearchObserver::on_expand`]. Rendering, progress
//! bars, deadlines and quit requests all live behind this trait, so the search
//! itself never touches an event source or a clock.
//!
//! Any `FnMut(&Board)` closure is an observer that never cancels:
//!
//! ```
//! use eight_puzzle_solver::engine::Board;
//! use eight_puzzle_solver::solver::{Solver, SearchConfig, Strategy};
//!
//! let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [0, 7, 8]]).unwrap();
//! let solver = Solver::new(Board::solved(), SearchConfig::new(Strategy::BreadthFirst));
//!
//! let mut seen = Vec::new();
//! let outcome = solver.solve_with(&start, &mut |board: &Board| seen.push(*board));
//! assert!(outcome.is_solved());
//! assert_eq!(seen[0], start);
//! ```

use crate::engine::Board;
use crate::solver::SearchStats;
use std::time::{Duration, Instant};

/// Receives one notification per node expansion and answers cancellation checks.
///
/// Implementations observe only: nothing they do changes which nodes the
/// search visits, apart from stopping it early through `should_cancel`.
pub trait SearchObserver {
    /// Called with each board as it is expanded, goal included.
    fn on_expand(&mut self, _board: &Board, _stats: &SearchStats) {}

    /// Polled once per iteration before the popped node is examined.
    fn should_cancel(&mut self) -> bool {
        false
    }
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

impl<F> SearchObserver for F
where
    F: FnMut(&Board),
{
    fn on_expand(&mut self, board: &Board, _stats: &SearchStats) {
        self(board)
    }
}

/// Cancels the search once a wall-clock budget has been spent.
///
/// Wraps another observer and forwards its notifications, so a deadline can
/// be combined with a progress display.
#[derive(Clone, Debug)]
pub struct Deadline<O = NoopObserver> {
    deadline: Instant,
    inner: O,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Deadline::wrap(NoopObserver, budget)
    }
}

impl<O> Deadline<O> {
    pub fn wrap(inner: O, budget: Duration) -> Self {
        Deadline {
            deadline: Instant::now() + budget,
            inner,
        }
    }
}

impl<O: SearchObserver> SearchObserver for Deadline<O> {
    fn on_expand(&mut self, board: &Board, stats: &SearchStats) {
        self.inner.on_expand(board, stats);
    }

    fn should_cancel(&mut self) -> bool {
        Instant::now() >= self.deadline || self.inner.should_cancel()
    }
}
