pub mod cache;
pub mod config;
pub mod error;
pub mod game_state;
pub mod node;
pub mod permutation;
pub mod solver;


use log::debug;
use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

pub use crate::cache::TreeCache;
pub use crate::error::{Error, Result, ValidationError};
pub use crate::game_state::{GameMove, GameState};
pub use crate::node::{GameLayer, GameNode, NodeId, Winning};
pub use crate::permutation::Permutation;
pub use crate::solver::{Continuation, Level, Solution, Solver};

use crate::error::ensure;

/// Provides the interface for solving a game with a `GameTree`.
///
/// Values are canonical positions: positions that only differ by a symmetry of the
/// game should be represented by a single value.
pub trait Impartial: Sized + Clone + Ord + Hash + Debug {
    type Move;

    /// Returns the size of the position. Every move strictly decreases it.
    fn get_size(&self) -> usize;

    /// Returns the canonical positions reachable with one move.
    fn get_moves(&self) -> Result<Vec<Self>>;

    /// Returns a move leading to `target`, which must be one of `get_moves()`.
    fn get_move_to(&self, target: &Self) -> Result<Self::Move>;
}

/// Every position reachable from a root, each labeled winning or losing for the
/// player to move.
///
/// Positions reachable along several paths share one node, so the structure is a DAG.
/// Nodes live in an arena and refer to their children by [`NodeId`]. The layer at
/// index `n` holds the nodes of size `n`, sorted, for binary-search lookup.
#[derive(Debug, Clone)]
pub struct GameTree<G>
where
    G: Impartial,
{
    nodes: Vec<GameNode<G>>,
    layers: Vec<GameLayer<G>>,
    root: NodeId,
}

impl<G> GameTree<G>
where
    G: Impartial,
{
    /// Builds the whole tree below `game` and labels every node by backward induction.
    pub fn new(game: G) -> Result<GameTree<G>> {
        let size = game.get_size();
        let mut tree = GameTree {
            nodes: vec![],
            layers: (0..=size).map(GameLayer::new).collect(),
            root: NodeId(0),
        };
        tree.root = tree.generate_node(game)?;

        ensure(
            tree.nodes.len() == tree.layers.iter().map(|l| l.len()).sum::<usize>(),
            || "node count differs from the layer sizes".to_string(),
        )?;
        ensure(tree.layers.iter().all(|l| l.is_strictly_sorted()), || {
            "layer out of order".to_string()
        })?;
        debug!(
            "built game tree for {:?} with {} nodes",
            tree.root().game(),
            tree.node_count()
        );
        Ok(tree)
    }

    /// Generates the node of `game` together with all nodes below it.
    /// The node enters its layer once its children and label are final.
    fn generate_node(&mut self, game: G) -> Result<NodeId> {
        let mut node = GameNode::new(game.clone());
        let mut losing_child_found = false;
        for successor in game.get_moves()? {
            let child = match self.find(&successor)? {
                Some(child) => child,
                None => self.generate_node(successor)?,
            };
            let child_winning = self.nodes[child.0].winning();
            ensure(child_winning != Winning::Unknown, || {
                format!("child of {:?} has no label", game)
            })?;
            if child_winning == Winning::Losing {
                losing_child_found = true;
            }
            node.add_child(child);
        }
        // a position without moves is lost for the player to move
        node.label(if losing_child_found {
            Winning::Winning
        } else {
            Winning::Losing
        });

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.layers[game.get_size()].insert(game, id);
        Ok(id)
    }

    /// Looks up the node of `game`.
    pub fn find(&self, game: &G) -> Result<Option<NodeId>> {
        let size = game.get_size();
        match self.layers.get(size) {
            Some(layer) => Ok(layer.find(game)),
            None => Err(Error::OutsideTree {
                size,
                root_size: self.total_count(),
            }),
        }
    }

    pub fn root(&self) -> &GameNode<G> {
        &self.nodes[self.root.0]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &GameNode<G> {
        &self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Size of the root.
    pub fn total_count(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn layer(&self, size: usize) -> Option<&GameLayer<G>> {
        self.layers.get(size)
    }

    /// Selects a move from the node `id` and returns it with the label of the node it leads to.
    ///
    /// From a winning node the move leads to a random losing child. From a losing node
    /// every child is winning, and the move leads to a random child one size smaller,
    /// which keeps the position as rich as possible.
    pub fn select_move<R: Rng>(
        &self,
        id: NodeId,
        rng: &mut R,
    ) -> Result<(G::Move, Winning)> {
        let node = self.node(id);
        let size = node.game().get_size();
        let candidates: Vec<NodeId> = match node.winning() {
            Winning::Winning => node
                .children()
                .iter()
                .copied()
                .filter(|&c| self.node(c).winning() == Winning::Losing)
                .collect(),
            Winning::Losing => {
                ensure(
                    node.children()
                        .iter()
                        .all(|&c| self.node(c).winning() == Winning::Winning),
                    || format!("losing node {:?} has a losing child", node.game()),
                )?;
                node.children()
                    .iter()
                    .copied()
                    .filter(|&c| self.node(c).game().get_size() + 1 == size)
                    .collect()
            }
            Winning::Unknown => {
                return Err(Error::Internal(format!(
                    "node {:?} has no label",
                    node.game()
                )))
            }
        };
        ensure(!candidates.is_empty(), || {
            format!("no move to select from {:?}", node.game())
        })?;

        let child = self.node(candidates[rng.random_range(0..candidates.len())]);
        let game_move = node.game().get_move_to(child.game())?;
        Ok((game_move, child.winning()))
    }
}
