use dashmap::DashMap;
use log::info;
use std::sync::Arc;

use crate::error::Result;
use crate::{GameTree, Impartial};

/// Game trees keyed by their root, built on first request and shared afterwards.
///
/// Building one tree is single threaded; different roots may be built concurrently.
#[derive(Debug, Clone)]
pub struct TreeCache<G>
where
    G: Impartial,
{
    trees: Arc<DashMap<G, Arc<GameTree<G>>>>,
}

impl<G> TreeCache<G>
where
    G: Impartial,
{
    pub fn new() -> TreeCache<G> {
        TreeCache {
            trees: Arc::new(DashMap::new()),
        }
    }

    /// Returns the tree rooted at `root`, building it if no caller has done so yet.
    pub fn get_or_build(&self, root: &G) -> Result<Arc<GameTree<G>>> {
        if let Some(tree) = self.trees.get(root) {
            return Ok(Arc::clone(tree.value()));
        }
        // built outside the map lock; a concurrent builder of the same root loses the race
        let tree = Arc::new(GameTree::new(root.clone())?);
        info!(
            "built game tree for {:?}: {} nodes",
            root,
            tree.node_count()
        );
        let entry = self.trees.entry(root.clone()).or_insert(tree);
        Ok(Arc::clone(entry.value()))
    }

    pub fn get(&self, root: &G) -> Option<Arc<GameTree<G>>> {
        self.trees.get(root).map(|tree| Arc::clone(tree.value()))
    }

    /// Number of trees built so far.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl<G> Default for TreeCache<G>
where
    G: Impartial,
{
    fn default() -> Self {
        TreeCache::new()
    }
}
