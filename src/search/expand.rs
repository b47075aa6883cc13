//! Graph-building steps shared by every search strategy.

use super::graph::{ExplorationGraph, NodeData};
use crate::direction::Direction;
use crate::state::PuzzleState;

pub(crate) enum Expansion {
    /// The move would leave the grid.
    Blocked,
    /// Already in the graph; only the adjacency was recorded.
    Known,
    /// Newly registered with the expanded state as parent.
    Discovered(PuzzleState),
}

fn heuristic(state: &PuzzleState, goal: Option<&PuzzleState>) -> usize {
    goal.map_or(0, |goal| state.manhattan_distance_to(goal))
}

/// Clears the graph and registers `start` as the depth-zero root.
pub(crate) fn register_root(
    graph: &mut ExplorationGraph,
    start: &PuzzleState,
    goal: Option<&PuzzleState>,
) -> NodeData {
    graph.reset(start, goal);
    let root = NodeData::root(heuristic(start, goal));
    graph.insert(start.clone(), root.clone());
    root
}

/// Metadata for a state first discovered from `parent`.
pub(crate) fn child_node(
    graph: &ExplorationGraph,
    parent: &PuzzleState,
    child: &PuzzleState,
    goal: Option<&PuzzleState>,
) -> NodeData {
    let depth = graph.get(parent).map_or(0, |node| node.depth() + 1);
    NodeData::child(parent.clone(), depth, heuristic(child, goal))
}

/// Records the `a`-`b` edge on both endpoints, skipping neighbours already listed.
pub(crate) fn add_bidirectional_adjacency(
    graph: &mut ExplorationGraph,
    a: &PuzzleState,
    b: &PuzzleState,
) {
    if let Some(node) = graph.get_mut(a) {
        node.add_adjacent(b);
    }
    if let Some(node) = graph.get_mut(b) {
        node.add_adjacent(a);
    }
}

/// Tries one move from `current`. The first discoverer of a state keeps
/// its parentage; later encounters only add an edge.
pub(crate) fn expand(
    graph: &mut ExplorationGraph,
    current: &PuzzleState,
    direction: Direction,
    goal: Option<&PuzzleState>,
) -> Expansion {
    let Some(next) = current.moved(direction) else {
        return Expansion::Blocked;
    };

    if graph.contains(&next) {
        add_bidirectional_adjacency(graph, current, &next);
        return Expansion::Known;
    }

    let node = child_node(graph, current, &next, goal);
    graph.insert(next.clone(), node);
    add_bidirectional_adjacency(graph, current, &next);
    Expansion::Discovered(next)
}
