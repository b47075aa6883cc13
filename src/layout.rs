//! Hand-off point between an exploration graph and whatever places its
//! states in space.

use crate::error::PuzzleError;
use crate::search::ExplorationGraph;
use crate::state::PuzzleState;
use std::collections::HashMap;

/// Computes a coordinate for every state of a graph.
pub trait LayoutStrategy<P> {
    fn layout(&self, graph: &ExplorationGraph) -> HashMap<PuzzleState, P>;
}

/// Per-run mapping from states to coordinates.
///
/// Positions are written once per run by a [`LayoutStrategy`] and only read
/// afterwards; [`StatePositions::clear`] starts a new run.
#[derive(Debug, Clone)]
pub struct StatePositions<P> {
    positions: Option<HashMap<PuzzleState, P>>,
}

impl<P> Default for StatePositions<P> {
    fn default() -> Self {
        Self { positions: None }
    }
}

impl<P> StatePositions<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the positions for this run. Fails if they were already set.
    pub fn set_positions(&mut self, positions: HashMap<PuzzleState, P>) -> Result<(), PuzzleError> {
        if self.positions.is_some() {
            return Err(PuzzleError::InvalidOperation(
                "positions are already set for this run",
            ));
        }
        self.positions = Some(positions);
        Ok(())
    }

    /// Runs `strategy` over `graph` and stores the result.
    pub fn apply<S: LayoutStrategy<P>>(
        &mut self,
        strategy: &S,
        graph: &ExplorationGraph,
    ) -> Result<(), PuzzleError> {
        self.set_positions(strategy.layout(graph))
    }

    pub fn is_set(&self) -> bool {
        self.positions.is_some()
    }

    pub fn position(&self, state: &PuzzleState) -> Option<&P> {
        self.positions.as_ref()?.get(state)
    }

    pub fn len(&self) -> usize {
        self.positions.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.positions = None;
    }

    /// Endpoint coordinates of every graph edge whose two states both have
    /// a position.
    pub fn edge_positions<'a>(
        &'a self,
        graph: &'a ExplorationGraph,
    ) -> impl Iterator<Item = (&'a P, &'a P)> + 'a {
        graph
            .edges()
            .filter_map(move |(a, b)| Some((self.position(a)?, self.position(b)?)))
    }
}
