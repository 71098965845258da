//! Decision tree over board positions with per-position action values
//!
//! Each node represents one reachable board configuration, identified
//! implicitly by the path of moves from the root. Nodes live in an arena
//! indexed by [`NodeId`], so children are plain index mappings and the
//! recursive TD backup needs no ownership gymnastics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    game::{Outcome, Seat},
    types::{BoardSize, Move},
};

/// Handle to a node in a [`GameTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    /// Action value for every move legal at this position.
    action_values: HashMap<Move, f64>,
    /// Children for the moves actually explored so far. Keys are always a
    /// subset of `action_values` keys.
    children: HashMap<Move, NodeId>,
}

impl Node {
    fn new(legal_moves: &[Move], initial_value: f64) -> Self {
        Node {
            action_values: legal_moves.iter().map(|&mv| (mv, initial_value)).collect(),
            children: HashMap::new(),
        }
    }
}

/// A decision tree for Connect Four moves with Q-learning action values.
///
/// The hyperparameters (`initial_value`, `reward`, `learning_rate`,
/// `discount`) are invariant across the whole tree; every child created by
/// [`GameTree::add_child`] inherits them. The tree only ever grows: nodes
/// are added lazily for positions visited during training and never
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTree {
    board_size: BoardSize,
    initial_value: f64,
    reward: f64,
    learning_rate: f64,
    discount: f64,
    nodes: Vec<Node>,
}

impl GameTree {
    /// Create a tree whose root covers the given legal-move set.
    ///
    /// Every legal move starts at `initial_value`. The caller is expected
    /// to have validated `reward > 0` and the `[0, 1]` ranges of
    /// `learning_rate` and `discount` (see [`crate::app::AgentConfig`]).
    pub fn new(
        board_size: BoardSize,
        initial_value: f64,
        reward: f64,
        learning_rate: f64,
        discount: f64,
        legal_moves: &[Move],
    ) -> Self {
        debug_assert!(reward > 0.0);
        debug_assert!((0.0..=1.0).contains(&learning_rate));
        debug_assert!((0.0..=1.0).contains(&discount));
        GameTree {
            board_size,
            initial_value,
            reward,
            learning_rate,
            discount,
            nodes: vec![Node::new(legal_moves, initial_value)],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Action values of the given node.
    pub fn action_values(&self, node: NodeId) -> &HashMap<Move, f64> {
        &self.nodes[node.0].action_values
    }

    /// The action value of one move, if the move is legal at this node.
    pub fn action_value(&self, node: NodeId, mv: Move) -> Option<f64> {
        self.nodes[node.0].action_values.get(&mv).copied()
    }

    /// Read-only view of the node's explored children.
    pub fn children(&self, node: NodeId) -> &HashMap<Move, NodeId> {
        &self.nodes[node.0].children
    }

    /// Look up the child reached by `mv`. A miss is not an error; it means
    /// the move has never been explored from this position.
    pub fn find_child(&self, node: NodeId, mv: Move) -> Option<NodeId> {
        self.nodes[node.0].children.get(&mv).copied()
    }

    /// Create the child reached by playing `mv`, seeding its action values
    /// over `legal_moves_after` (the legal-move set once `mv` is on the
    /// board). The child inherits every hyperparameter of this tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownAction`] if `mv` is not legal at this
    /// node and [`crate::Error::DuplicateChild`] if the child already
    /// exists. Callers check with [`GameTree::find_child`] first.
    pub fn add_child(
        &mut self,
        node: NodeId,
        mv: Move,
        legal_moves_after: &[Move],
    ) -> crate::Result<NodeId> {
        if !self.nodes[node.0].action_values.contains_key(&mv) {
            return Err(crate::Error::UnknownAction {
                row: mv.row,
                col: mv.col,
            });
        }
        if self.nodes[node.0].children.contains_key(&mv) {
            return Err(crate::Error::DuplicateChild {
                row: mv.row,
                col: mv.col,
            });
        }

        let child = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(legal_moves_after, self.initial_value));
        self.nodes[node.0].children.insert(mv, child);
        Ok(child)
    }

    /// Back up the outcome of one finished game through the recorded path.
    ///
    /// `moves` is the complete, duplicate-free move list of the game in
    /// play order; `start` is the node whose turn corresponds to
    /// `moves[start_index]` (the root at index 0 when the acting player
    /// opened the game, or the root's child for the opponent's opening move
    /// at index 1 otherwise). Updates proceed depth-first: the deepest
    /// position on the path is updated from the terminal outcome, and each
    /// ancestor is then updated toward `discount * max` over the action
    /// values two plies ahead. The bootstrap target is the best action at
    /// the next decision point, not the move actually played there
    /// (off-policy, Q-learning).
    ///
    /// Value updates always blend `new = (1 - alpha) * old + alpha * target`
    /// where the terminal target is `+reward` on a win for `acting`,
    /// `-reward` on a loss, and the old value itself on a draw.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyMoveSequence`] or
    /// [`crate::Error::UnknownAction`] if the path does not match the tree;
    /// both indicate a caller contract breach and leave the tree in
    /// whatever state the partial recursion produced.
    pub fn update_along_path(
        &mut self,
        start: NodeId,
        moves: &[Move],
        acting: Seat,
        outcome: Outcome,
        start_index: usize,
    ) -> crate::Result<()> {
        if moves.is_empty() || start_index >= moves.len() {
            return Err(crate::Error::EmptyMoveSequence);
        }
        self.update_recursive(start, moves, acting, outcome, start_index)
    }

    fn update_recursive(
        &mut self,
        node: NodeId,
        moves: &[Move],
        acting: Seat,
        outcome: Outcome,
        index: usize,
    ) -> crate::Result<()> {
        let mv = moves[index];
        let old = self
            .action_value(node, mv)
            .ok_or(crate::Error::UnknownAction {
                row: mv.row,
                col: mv.col,
            })?;

        // The bootstrap needs both this player's move and the opponent's
        // reply to exist as tree nodes; otherwise this is the last update
        // possible along the path.
        let grandchild = if index + 2 < moves.len() {
            self.find_child(node, mv)
                .and_then(|child| self.find_child(child, moves[index + 1]))
        } else {
            None
        };

        let target = match grandchild {
            Some(next) => {
                self.update_recursive(next, moves, acting, outcome, index + 2)?;
                let best = self.nodes[next.0]
                    .action_values
                    .values()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                self.discount * best
            }
            None => match outcome {
                Outcome::Win(winner) if winner == acting => self.reward,
                Outcome::Win(_) => -self.reward,
                Outcome::Draw => old,
            },
        };

        let new = (1.0 - self.learning_rate) * old + self.learning_rate * target;
        self.nodes[node.0].action_values.insert(mv, new);
        Ok(())
    }
}
