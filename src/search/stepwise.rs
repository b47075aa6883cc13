//! Resumable searches that expand exactly one frontier entry per call.

use super::expand::{self, Expansion};
use super::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use super::graph::{ExplorationGraph, NodeData};
use crate::error::PuzzleError;
use crate::notify::Notifier;
use crate::state::PuzzleState;
use log::trace;
use std::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    NotInitialized,
    Running,
    Completed,
}

/// Outcome of one expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// State popped from the frontier this step.
    pub expanded: PuzzleState,
    /// Its metadata after expansion, adjacency included.
    pub node: NodeData,
    /// States registered for the first time by this expansion.
    pub discovered: Vec<PuzzleState>,
}

/// A search driven one expansion at a time.
pub trait StepwiseSearchAlgorithm: Send {
    fn name(&self) -> &'static str;

    /// Resets the graph and frontier, seeds `start` and enters `Running`.
    fn initialize(&mut self, start: &PuzzleState, goal: Option<&PuzzleState>);

    /// Pops and expands one frontier entry. Fails with
    /// [`PuzzleError::InvalidOperation`] unless the search is running.
    fn step(&mut self) -> Result<StepResult, PuzzleError>;

    fn phase(&self) -> SearchPhase;

    fn is_completed(&self) -> bool {
        self.phase() == SearchPhase::Completed
    }

    /// Back to `NotInitialized`; `initialize` is needed before stepping again.
    fn reset(&mut self);

    fn result(&self) -> &ExplorationGraph;

    /// Receives every [`StepResult`] produced from now on.
    fn subscribe(&mut self) -> mpsc::Receiver<StepResult>;
}

impl<S: StepwiseSearchAlgorithm + ?Sized> StepwiseSearchAlgorithm for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self, start: &PuzzleState, goal: Option<&PuzzleState>) {
        (**self).initialize(start, goal);
    }

    fn step(&mut self) -> Result<StepResult, PuzzleError> {
        (**self).step()
    }

    fn phase(&self) -> SearchPhase {
        (**self).phase()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn result(&self) -> &ExplorationGraph {
        (**self).result()
    }

    fn subscribe(&mut self) -> mpsc::Receiver<StepResult> {
        (**self).subscribe()
    }
}

/// Stepwise engine parameterised by its frontier discipline.
#[derive(Debug, Default)]
pub struct StepwiseSearch<F> {
    graph: ExplorationGraph,
    frontier: F,
    goal: Option<PuzzleState>,
    phase: SearchPhase,
    notifier: Notifier<StepResult>,
}

pub type StepwiseBfs = StepwiseSearch<FifoFrontier>;
pub type StepwiseDfs = StepwiseSearch<LifoFrontier>;
pub type StepwiseAStar = StepwiseSearch<PriorityFrontier>;

impl<F: Frontier> StepwiseSearch<F> {
    pub fn new() -> Self {
        Self {
            graph: ExplorationGraph::new(),
            frontier: F::default(),
            goal: None,
            phase: SearchPhase::NotInitialized,
            notifier: Notifier::default(),
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn finish(&mut self, result: StepResult) -> StepResult {
        trace!(
            "{} step: depth {}, {} new, frontier {}",
            F::NAME,
            result.node.depth(),
            result.discovered.len(),
            self.frontier.len()
        );
        self.notifier.notify(&result);
        result
    }
}

impl<F: Frontier> StepwiseSearchAlgorithm for StepwiseSearch<F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn initialize(&mut self, start: &PuzzleState, goal: Option<&PuzzleState>) {
        self.frontier.clear();
        let root = expand::register_root(&mut self.graph, start, goal);
        self.frontier.push(start.clone(), &root);
        self.goal = goal.cloned();
        self.phase = SearchPhase::Running;
    }

    fn step(&mut self) -> Result<StepResult, PuzzleError> {
        if self.phase != SearchPhase::Running {
            return Err(PuzzleError::InvalidOperation(
                "step requires an initialized, running search",
            ));
        }
        let Some(current) = self.frontier.pop() else {
            self.phase = SearchPhase::Completed;
            return Err(PuzzleError::InvalidOperation("frontier is empty"));
        };

        if self.goal.as_ref() == Some(&current) {
            self.phase = SearchPhase::Completed;
            let node = self.graph.get(&current).cloned().unwrap_or_default();
            return Ok(self.finish(StepResult {
                expanded: current,
                node,
                discovered: Vec::new(),
            }));
        }

        let mut discovered = Vec::new();
        for direction in F::EXPANSION_ORDER {
            if let Expansion::Discovered(next) =
                expand::expand(&mut self.graph, &current, direction, self.goal.as_ref())
            {
                if let Some(node) = self.graph.get(&next) {
                    self.frontier.push(next.clone(), node);
                }
                discovered.push(next);
            }
        }

        if self.frontier.is_empty() {
            self.phase = SearchPhase::Completed;
        }

        let node = self.graph.get(&current).cloned().unwrap_or_default();
        Ok(self.finish(StepResult {
            expanded: current,
            node,
            discovered,
        }))
    }

    fn phase(&self) -> SearchPhase {
        self.phase
    }

    fn reset(&mut self) {
        self.graph.clear();
        self.frontier.clear();
        self.goal = None;
        self.phase = SearchPhase::NotInitialized;
    }

    fn result(&self) -> &ExplorationGraph {
        &self.graph
    }

    fn subscribe(&mut self) -> mpsc::Receiver<StepResult> {
        self.notifier.subscribe()
    }
}
