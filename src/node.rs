use serde::{Deserialize, Serialize};
use sorted_vec::SortedVec;
use std::cmp::Ordering;
use std::fmt;

use crate::Impartial;

/// Index of a node in the arena of its [`crate::GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Whether the player about to move has a forced win under perfect play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winning {
    Unknown,
    Winning,
    Losing,
}

#[derive(Debug, Clone)]
pub struct GameNode<G>
where
    G: Impartial,
{
    game: G,
    winning: Winning,
    children: Vec<NodeId>,
}

impl<G> GameNode<G>
where
    G: Impartial,
{
    pub(crate) fn new(game: G) -> GameNode<G> {
        GameNode {
            game,
            winning: Winning::Unknown,
            children: vec![],
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn winning(&self) -> Winning {
        self.winning
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// The flag is set exactly once.
    pub(crate) fn label(&mut self, winning: Winning) {
        debug_assert_eq!(self.winning, Winning::Unknown);
        self.winning = winning;
    }
}

// Two nodes are the same node when their games are equal, whatever their labels or children.
impl<G: Impartial> PartialEq for GameNode<G> {
    fn eq(&self, other: &Self) -> bool {
        self.game == other.game
    }
}

impl<G: Impartial> Eq for GameNode<G> {}

impl<G: Impartial> PartialOrd for GameNode<G> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<G: Impartial> Ord for GameNode<G> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.game.cmp(&other.game)
    }
}

impl<G: Impartial + fmt::Display> fmt::Display for GameNode<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = match self.winning {
            Winning::Winning => '+',
            Winning::Losing => '-',
            Winning::Unknown => '0',
        };
        write!(f, "({}w{}c:{})", self.game, flag, self.children.len())
    }
}

/// Entry of a layer, ordered by game first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct LayerEntry<G: Impartial> {
    game: G,
    node: NodeId,
}

/// All nodes of one size, kept in ascending game order.
#[derive(Debug, Clone)]
pub struct GameLayer<G>
where
    G: Impartial,
{
    size: usize,
    entries: SortedVec<LayerEntry<G>>,
}

impl<G> GameLayer<G>
where
    G: Impartial,
{
    pub fn new(size: usize) -> GameLayer<G> {
        GameLayer {
            size,
            entries: SortedVec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, game: G, node: NodeId) {
        debug_assert_eq!(game.get_size(), self.size);
        self.entries.insert(LayerEntry { game, node });
    }

    /// Binary search for `game`.
    pub fn find(&self, game: &G) -> Option<NodeId> {
        self.entries
            .binary_search_by(|entry| entry.game.cmp(game))
            .ok()
            .map(|i| self.entries[i].node)
    }

    /// Games and their nodes in ascending game order.
    pub fn iter(&self) -> impl Iterator<Item = (&G, NodeId)> + '_ {
        self.entries.iter().map(|entry| (&entry.game, entry.node))
    }

    /// True iff every game is strictly smaller than the next one.
    pub fn is_strictly_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].game < w[1].game)
    }
}
