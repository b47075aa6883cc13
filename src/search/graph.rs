use crate::error::PuzzleError;
use crate::path::{reconstruct_path, SolutionPath};
use crate::state::PuzzleState;
use std::collections::hash_map::{self, HashMap};

/// Search metadata recorded for one discovered state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    parent: Option<PuzzleState>,
    adjacent: Vec<PuzzleState>,
    depth: usize,
    heuristic: usize,
}

impl NodeData {
    pub fn root(heuristic: usize) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    pub fn child(parent: PuzzleState, depth: usize, heuristic: usize) -> Self {
        Self {
            parent: Some(parent),
            adjacent: Vec::with_capacity(4),
            depth,
            heuristic,
        }
    }

    /// State this node was first discovered from; `None` for the root.
    pub fn parent(&self) -> Option<&PuzzleState> {
        self.parent.as_ref()
    }

    pub fn adjacent(&self) -> &[PuzzleState] {
        &self.adjacent
    }

    /// Edges from the root along the discovering path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Manhattan-distance estimate toward the goal, zero without a goal.
    pub fn heuristic(&self) -> usize {
        self.heuristic
    }

    pub fn total_cost(&self) -> usize {
        self.depth + self.heuristic
    }

    pub(crate) fn add_adjacent(&mut self, state: &PuzzleState) {
        if !self.adjacent.contains(state) {
            self.adjacent.push(state.clone());
        }
    }
}

/// Every state discovered by one search run, keyed by state.
///
/// Entries are only ever added during a run; a failed or cancelled run
/// drops all nodes at once.
#[derive(Debug, Clone, Default)]
pub struct ExplorationGraph {
    nodes: HashMap<PuzzleState, NodeData>,
    start: Option<PuzzleState>,
    goal: Option<PuzzleState>,
}

impl ExplorationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<&PuzzleState> {
        self.start.as_ref()
    }

    pub fn goal(&self) -> Option<&PuzzleState> {
        self.goal.as_ref()
    }

    pub fn get(&self, state: &PuzzleState) -> Option<&NodeData> {
        self.nodes.get(state)
    }

    pub fn contains(&self, state: &PuzzleState) -> bool {
        self.nodes.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, PuzzleState, NodeData> {
        self.nodes.iter()
    }

    /// Each undirected adjacency exactly once.
    pub fn edges(&self) -> impl Iterator<Item = (&PuzzleState, &PuzzleState)> + '_ {
        self.nodes.iter().flat_map(|(state, node)| {
            node.adjacent
                .iter()
                .filter(move |other| state < *other)
                .map(move |other| (state, other))
        })
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.nodes.values().map(NodeData::depth).max()
    }

    /// Number of states at each depth, indexed by depth.
    pub fn depth_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_depth().map_or(0, |d| d + 1)];
        for node in self.nodes.values() {
            counts[node.depth] += 1;
        }
        counts
    }

    /// Root-to-`goal` moves along the recorded parent links.
    pub fn path_to(&self, goal: &PuzzleState) -> Result<SolutionPath, PuzzleError> {
        reconstruct_path(self, goal)
    }

    pub(crate) fn reset(&mut self, start: &PuzzleState, goal: Option<&PuzzleState>) {
        self.nodes.clear();
        self.start = Some(start.clone());
        self.goal = goal.cloned();
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.start = None;
        self.goal = None;
    }

    /// Drops every node but keeps the run's start and goal.
    pub(crate) fn discard_nodes(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn insert(&mut self, state: PuzzleState, node: NodeData) {
        self.nodes.insert(state, node);
    }

    pub(crate) fn get_mut(&mut self, state: &PuzzleState) -> Option<&mut NodeData> {
        self.nodes.get_mut(state)
    }
}

impl<'a> IntoIterator for &'a ExplorationGraph {
    type Item = (&'a PuzzleState, &'a NodeData);
    type IntoIter = hash_map::Iter<'a, PuzzleState, NodeData>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
