//! State-space search over puzzle layouts.
//!
//! Bulk strategies ([`BreadthFirstSearch`], [`DepthFirstSearch`],
//! [`AStarSearch`]) run a whole traversal in one call and leave an
//! [`ExplorationGraph`] behind. The stepwise engines in [`stepwise`] expand
//! one frontier entry per call instead.

mod expand;
pub mod frontier;
pub mod graph;
pub mod progress;
pub mod stepwise;
pub mod worker;

pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use graph::{ExplorationGraph, NodeData};
pub use progress::{CancelToken, ProgressCallback, SearchControl, SearchProgress};
pub use stepwise::{
    SearchPhase, StepResult, StepwiseAStar, StepwiseBfs, StepwiseDfs, StepwiseSearch,
    StepwiseSearchAlgorithm,
};
pub use worker::SearchTask;

use crate::state::{reachable_states, PuzzleState};
use expand::Expansion;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// How a bulk run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was discovered or popped; the graph holds what was needed.
    GoalReached,
    /// No goal was given and the whole reachability class was enumerated.
    Exhausted,
    /// The goal was never discovered; the graph was discarded.
    NoPathFound,
    /// Cancelled through the run's [`CancelToken`]; the graph was discarded.
    Cancelled,
}

impl SearchOutcome {
    /// The run left a usable graph behind.
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::GoalReached | SearchOutcome::Exhausted)
    }
}

/// A bulk search strategy that builds an [`ExplorationGraph`].
pub trait SearchAlgorithm: Send {
    fn name(&self) -> &'static str;

    /// Runs a search with cancellation and progress hooks. Any previous
    /// graph is replaced.
    fn search_with(
        &mut self,
        start: &PuzzleState,
        goal: Option<&PuzzleState>,
        control: &SearchControl,
    ) -> SearchOutcome;

    /// Runs a search to completion. Without a goal the whole reachability
    /// class of `start` is enumerated.
    fn search(&mut self, start: &PuzzleState, goal: Option<&PuzzleState>) -> SearchOutcome {
        self.search_with(start, goal, &SearchControl::default())
    }

    /// Graph of the last run.
    fn result(&self) -> &ExplorationGraph;

    /// Moves the search onto a worker thread. The graph becomes available
    /// again only through [`SearchTask::wait`].
    fn search_async(
        self,
        start: PuzzleState,
        goal: Option<PuzzleState>,
        control: SearchControl,
    ) -> SearchTask<Self>
    where
        Self: Sized + 'static,
    {
        SearchTask::spawn(self, start, goal, control)
    }
}

impl<A: SearchAlgorithm + ?Sized> SearchAlgorithm for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn search_with(
        &mut self,
        start: &PuzzleState,
        goal: Option<&PuzzleState>,
        control: &SearchControl,
    ) -> SearchOutcome {
        (**self).search_with(start, goal, control)
    }

    fn result(&self) -> &ExplorationGraph {
        (**self).result()
    }
}

/// Bulk search whose behaviour is fixed by its frontier discipline.
#[derive(Debug, Default)]
pub struct GraphSearch<F> {
    graph: ExplorationGraph,
    _frontier: PhantomData<fn() -> F>,
}

pub type BreadthFirstSearch = GraphSearch<FifoFrontier>;
pub type DepthFirstSearch = GraphSearch<LifoFrontier>;
pub type AStarSearch = GraphSearch<PriorityFrontier>;

impl<F: Frontier> GraphSearch<F> {
    pub fn new() -> Self {
        Self {
            graph: ExplorationGraph::new(),
            _frontier: PhantomData,
        }
    }

    pub fn into_result(self) -> ExplorationGraph {
        self.graph
    }
}

impl<F: Frontier> SearchAlgorithm for GraphSearch<F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn search_with(
        &mut self,
        start: &PuzzleState,
        goal: Option<&PuzzleState>,
        control: &SearchControl,
    ) -> SearchOutcome {
        debug!("{} search started (goal: {})", F::NAME, goal.is_some());
        let outcome = run::<F>(&mut self.graph, start, goal, control);
        debug!(
            "{} search finished: {:?}, {} states",
            F::NAME,
            outcome,
            self.graph.len()
        );
        outcome
    }

    fn result(&self) -> &ExplorationGraph {
        &self.graph
    }
}

fn run<F: Frontier>(
    graph: &mut ExplorationGraph,
    start: &PuzzleState,
    goal: Option<&PuzzleState>,
    control: &SearchControl,
) -> SearchOutcome {
    let mut frontier = F::default();
    let root = expand::register_root(graph, start, goal);
    frontier.push(start.clone(), &root);

    let max_estimate = control
        .max_estimate()
        .unwrap_or_else(|| reachable_states(start.size()));
    let mut progress = SearchProgress::new(max_estimate);

    let outcome = 'search: loop {
        if control.is_cancelled() {
            break SearchOutcome::Cancelled;
        }
        let Some(current) = frontier.pop() else {
            break if goal.is_some() {
                SearchOutcome::NoPathFound
            } else {
                SearchOutcome::Exhausted
            };
        };
        progress.increment();
        control.report(progress);

        if goal == Some(&current) {
            break SearchOutcome::GoalReached;
        }

        for direction in F::EXPANSION_ORDER {
            if let Expansion::Discovered(next) =
                expand::expand(graph, &current, direction, goal)
            {
                if goal == Some(&next) {
                    break 'search SearchOutcome::GoalReached;
                }
                if let Some(node) = graph.get(&next) {
                    frontier.push(next.clone(), node);
                }
            }
        }
    };

    match outcome {
        SearchOutcome::GoalReached | SearchOutcome::Exhausted => {
            progress.complete();
            control.report(progress);
        }
        SearchOutcome::NoPathFound => {
            warn!(
                "goal unreachable after {} states; discarding graph",
                graph.len()
            );
            graph.discard_nodes();
        }
        SearchOutcome::Cancelled => {
            info!("search cancelled after {} states", progress.explored);
            graph.discard_nodes();
        }
    }
    outcome
}

/// Selectable bulk/stepwise strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    #[default]
    AStar,
    Bfs,
    Dfs,
}

impl AlgorithmKind {
    pub fn build(self) -> Box<dyn SearchAlgorithm> {
        match self {
            AlgorithmKind::AStar => Box::new(AStarSearch::new()),
            AlgorithmKind::Bfs => Box::new(BreadthFirstSearch::new()),
            AlgorithmKind::Dfs => Box::new(DepthFirstSearch::new()),
        }
    }

    pub fn build_stepwise(self) -> Box<dyn StepwiseSearchAlgorithm> {
        match self {
            AlgorithmKind::AStar => Box::new(StepwiseAStar::new()),
            AlgorithmKind::Bfs => Box::new(StepwiseBfs::new()),
            AlgorithmKind::Dfs => Box::new(StepwiseDfs::new()),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(AlgorithmKind::AStar),
            "bfs" => Ok(AlgorithmKind::Bfs),
            "dfs" => Ok(AlgorithmKind::Dfs),
            other => Err(format!("unknown algorithm {other:?} (expected astar, bfs or dfs)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn state(values: &[u16]) -> PuzzleState {
        PuzzleState::from_values(values).unwrap()
    }

    #[test]
    fn full_bfs_on_2x2_enumerates_parity_class() {
        let mut bfs = BreadthFirstSearch::new();
        let outcome = bfs.search(&PuzzleState::solved(2), None);
        assert_eq!(outcome, SearchOutcome::Exhausted);
        let graph = bfs.result();
        assert_eq!(graph.len(), 12);
        // The 2x2 state graph is a single 12-cycle.
        assert!(graph.iter().all(|(_, node)| node.adjacent().len() == 2));
        assert_eq!(graph.edges().count(), 12);
        assert_eq!(graph.max_depth(), Some(6));
    }

    #[test]
    fn bfs_root_expansion_follows_direction_order() {
        let start = state(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let mut bfs = BreadthFirstSearch::new();
        bfs.search(&start, None);
        let root = bfs.result().get(&start).unwrap();
        let expected: Vec<_> = [Direction::Right, Direction::Up, Direction::Left, Direction::Down]
            .into_iter()
            .map(|d| start.moved(d).unwrap())
            .collect();
        assert_eq!(root.adjacent(), expected.as_slice());
    }

    #[test]
    fn dfs_first_child_is_pushed_last() {
        let start = state(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let mut dfs = DepthFirstSearch::new();
        dfs.search(&start, None);
        let graph = dfs.result();
        // Right is pushed last, popped first, so it is expanded first and
        // reaches depth 2 states before any sibling does.
        let right = start.moved(Direction::Right).unwrap();
        let right_up = right.moved(Direction::Up).unwrap();
        assert_eq!(graph.get(&right_up).unwrap().parent(), Some(&right));
        assert_eq!(graph.len(), reachable_states(3));
    }

    #[test]
    fn goal_search_stops_at_discovery() {
        let start = state(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let goal = PuzzleState::solved(3);
        let mut bfs = BreadthFirstSearch::new();
        assert_eq!(bfs.search(&start, Some(&goal)), SearchOutcome::GoalReached);
        let graph = bfs.result();
        assert!(graph.contains(&goal));
        assert_eq!(graph.get(&goal).unwrap().depth(), 1);
        // Right was tried first and hit the goal immediately.
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn unreachable_goal_discards_graph() {
        let start = PuzzleState::solved(2);
        let goal = state(&[2, 1, 3, 0]);
        for mut algorithm in [
            AlgorithmKind::Bfs.build(),
            AlgorithmKind::Dfs.build(),
            AlgorithmKind::AStar.build(),
        ] {
            assert_eq!(
                algorithm.search(&start, Some(&goal)),
                SearchOutcome::NoPathFound
            );
            assert!(algorithm.result().is_empty());
        }
    }

    #[test]
    fn astar_records_heuristic_costs() {
        let goal = PuzzleState::solved(3);
        let start = goal
            .moved(Direction::Up)
            .and_then(|s| s.moved(Direction::Left))
            .unwrap();
        let mut astar = AStarSearch::new();
        assert_eq!(astar.search(&start, Some(&goal)), SearchOutcome::GoalReached);
        let graph = astar.result();
        let root = graph.get(&start).unwrap();
        assert_eq!(root.heuristic(), 2);
        assert_eq!(root.total_cost(), 2);
        assert_eq!(graph.get(&goal).unwrap().depth(), 2);
    }

    #[test]
    fn cancelled_search_discards_graph() {
        let control = SearchControl::new();
        control.cancel_token().cancel();
        let mut bfs = BreadthFirstSearch::new();
        assert_eq!(
            bfs.search_with(&PuzzleState::solved(3), None, &control),
            SearchOutcome::Cancelled
        );
        assert!(bfs.result().is_empty());
    }

    #[test]
    fn cancelling_mid_run_discards_partial_graph() {
        for kind in [AlgorithmKind::Bfs, AlgorithmKind::Dfs, AlgorithmKind::AStar] {
            let token = CancelToken::new();
            let trigger = token.clone();
            let pops = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&pops);
            let control = SearchControl::new()
                .with_cancel_token(token)
                .with_progress(Box::new(move |p| {
                    counter.store(p.explored, Ordering::Relaxed);
                    if p.explored == 100 {
                        trigger.cancel();
                    }
                }));

            let mut algorithm = kind.build();
            let outcome = algorithm.search_with(&PuzzleState::solved(3), None, &control);
            assert_eq!(outcome, SearchOutcome::Cancelled, "{}", kind);
            assert!(algorithm.result().is_empty(), "{}", kind);
            assert_eq!(pops.load(Ordering::Relaxed), 100, "{}", kind);
        }
    }

    #[test]
    fn progress_reports_each_pop_and_completion() {
        let reports = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let (r, l) = (Arc::clone(&reports), Arc::clone(&last));
        let control = SearchControl::new().with_progress(Box::new(move |p| {
            r.fetch_add(1, Ordering::Relaxed);
            l.store(p.explored, Ordering::Relaxed);
        }));
        let mut bfs = BreadthFirstSearch::new();
        bfs.search_with(&PuzzleState::solved(2), None, &control);
        assert_eq!(reports.load(Ordering::Relaxed), 12 + 1);
        assert_eq!(last.load(Ordering::Relaxed), 12);
    }

    #[test]
    fn algorithm_kind_parses() {
        assert_eq!("BFS".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Bfs));
        assert_eq!("astar".parse::<AlgorithmKind>(), Ok(AlgorithmKind::AStar));
        assert!("greedy".parse::<AlgorithmKind>().is_err());
        assert_eq!(AlgorithmKind::Dfs.to_string(), "dfs");
        assert_eq!(AlgorithmKind::Dfs.build().name(), "depth-first");
    }
}
