use crate::direction::Direction;
use crate::error::PuzzleError;
use crate::search::ExplorationGraph;
use crate::state::PuzzleState;

/// A root-to-goal route through an exploration graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionPath {
    /// Empty-tile moves in playing order.
    pub moves: Vec<Direction>,
    /// Every state on the route, root first and goal last.
    pub states: Vec<PuzzleState>,
}

impl SolutionPath {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn start(&self) -> Option<&PuzzleState> {
        self.states.first()
    }

    pub fn goal(&self) -> Option<&PuzzleState> {
        self.states.last()
    }
}

/// Walks parent links from `goal` back to the root and returns the route in
/// root-to-goal order.
pub fn reconstruct_path(
    graph: &ExplorationGraph,
    goal: &PuzzleState,
) -> Result<SolutionPath, PuzzleError> {
    let mut node = graph.get(goal).ok_or(PuzzleError::NoPathFound)?;
    let mut current = goal;
    let mut moves = Vec::with_capacity(node.depth());
    let mut states = Vec::with_capacity(node.depth() + 1);
    states.push(goal.clone());

    while let Some(parent) = node.parent() {
        moves.push(parent.move_direction_to(current)?);
        states.push(parent.clone());
        node = graph.get(parent).ok_or(PuzzleError::NoPathFound)?;
        current = parent;
    }

    moves.reverse();
    states.reverse();
    Ok(SolutionPath { moves, states })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BreadthFirstSearch, SearchAlgorithm};

    #[test]
    fn missing_goal_is_no_path() {
        let graph = ExplorationGraph::new();
        assert_eq!(
            reconstruct_path(&graph, &PuzzleState::solved(3)),
            Err(PuzzleError::NoPathFound)
        );
    }

    #[test]
    fn path_to_root_is_empty() {
        let start = PuzzleState::solved(3);
        let mut bfs = BreadthFirstSearch::new();
        bfs.search(&start, Some(&start));
        let path = bfs.result().path_to(&start).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.states, vec![start]);
    }

    #[test]
    fn moves_and_states_line_up() {
        let start = PuzzleState::solved(3);
        let goal = start
            .moved(Direction::Up)
            .and_then(|s| s.moved(Direction::Up))
            .and_then(|s| s.moved(Direction::Left))
            .unwrap();
        let mut bfs = BreadthFirstSearch::new();
        bfs.search(&start, Some(&goal));
        let path = reconstruct_path(bfs.result(), &goal).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.start(), Some(&start));
        assert_eq!(path.goal(), Some(&goal));
        for (window, &dir) in path.states.windows(2).zip(&path.moves) {
            assert_eq!(window[0].moved(dir).as_ref(), Some(&window[1]));
        }
    }
}
