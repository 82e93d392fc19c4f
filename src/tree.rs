//! Arena of search nodes linked to their parents by index.

use crate::engine::{Board, Move};

/// Index of a node inside a [`SearchTree`].
pub type NodeId = usize;

/// One point of the search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub board: Board,
    /// The node this one was generated from, and the move applied to it.
    /// `None` only for the root.
    pub parent: Option<(NodeId, Move)>,
    /// Number of moves from the root.
    pub depth: u32,
}

/// Owns every node generated during one search run.
///
/// Nodes are only ever appended, and a node's parent always has a smaller
/// index, so the parent links cannot form a cycle.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { nodes: Vec::new() }
    }

    /// Adds a parentless node.
    pub fn add_root(&mut self, board: Board) -> NodeId {
        self.nodes.push(Node {
            board,
            parent: None,
            depth: 0,
        });
        self.nodes.len() - 1
    }

    /// Adds a node reached from `parent` by `mv`.
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this tree.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, board: Board) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            board,
            parent: Some((parent, mv)),
            depth,
        });
        self.nodes.len() - 1
    }

    /// # Panics
    /// Panics if `id` is not a node of this tree.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the moves leading from the root to `id`, first move first.
    ///
    /// The root itself yields an empty path.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Move};
    /// use eight_puzzle_solver::tree::SearchTree;
    ///
    /// let mut tree = SearchTree::new();
    /// let root = tree.add_root(Board::solved());
    /// let up = Board::solved().apply_move(Move::Up).unwrap();
    /// let child = tree.add_child(root, Move::Up, up);
    /// let left = up.apply_move(Move::Left).unwrap();
    /// let leaf = tree.add_child(child, Move::Left, left);
    ///
    /// assert_eq!(tree.reconstruct_path(leaf), vec![Move::Up, Move::Left]);
    /// assert!(tree.reconstruct_path(root).is_empty());
    /// ```
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.nodes[id].depth as usize);
        let mut current = id;
        while let Some((parent, mv)) = self.nodes[current].parent {
            moves.push(mv);
            current = parent;
        }
        moves.reverse();
        moves
    }
}
