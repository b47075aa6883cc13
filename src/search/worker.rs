use super::progress::{CancelToken, SearchControl};
use super::{SearchAlgorithm, SearchOutcome};
use crate::error::PuzzleError;
use crate::state::PuzzleState;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Handle to a bulk search running on a worker thread.
///
/// The algorithm (and so its graph) is owned by the worker until the run
/// finishes and is handed back only by [`SearchTask::wait`]. Dropping the
/// handle cancels the run.
#[derive(Debug)]
pub struct SearchTask<A> {
    cancel: CancelToken,
    rx: mpsc::Receiver<(A, SearchOutcome)>,
    join: Option<JoinHandle<()>>,
}

impl<A: SearchAlgorithm + 'static> SearchTask<A> {
    pub(crate) fn spawn(
        mut algorithm: A,
        start: PuzzleState,
        goal: Option<PuzzleState>,
        control: SearchControl,
    ) -> Self {
        let cancel = control.cancel_token().clone();
        let (tx, rx) = mpsc::channel();
        let join = thread::spawn(move || {
            let outcome = algorithm.search_with(&start, goal.as_ref(), &control);
            let _ = tx.send((algorithm, outcome));
        });
        Self {
            cancel,
            rx,
            join: Some(join),
        }
    }

    /// Asks the worker to stop at its next frontier pop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Blocks until the worker is done and returns the algorithm with its
    /// graph and the outcome.
    pub fn wait(mut self) -> Result<(A, SearchOutcome), PuzzleError> {
        let result = self
            .rx
            .recv()
            .map_err(|_| PuzzleError::InvalidOperation("search worker exited without a result"));
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        result
    }
}

impl<A> Drop for SearchTask<A> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BreadthFirstSearch, DepthFirstSearch, SearchProgress};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn async_search_matches_sync_result() {
        let start = PuzzleState::solved(2);
        let task = BreadthFirstSearch::new().search_async(start.clone(), None, SearchControl::new());
        let (bfs, outcome) = task.wait().unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);

        let mut sync = BreadthFirstSearch::new();
        sync.search(&start, None);
        assert_eq!(bfs.result().len(), sync.result().len());
    }

    #[test]
    fn cancellation_before_start_discards_graph() {
        let token = CancelToken::new();
        token.cancel();
        let control = SearchControl::new().with_cancel_token(token);
        let task = BreadthFirstSearch::new().search_async(PuzzleState::solved(3), None, control);
        let (bfs, outcome) = task.wait().unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert!(bfs.result().is_empty());
    }

    #[test]
    fn progress_is_monotonic() {
        let seen: Arc<Mutex<Vec<SearchProgress>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let control = SearchControl::new()
            .with_progress(Box::new(move |p| sink.lock().unwrap().push(p)));
        let task = BreadthFirstSearch::new().search_async(PuzzleState::solved(2), None, control);
        task.wait().unwrap();

        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0].explored <= w[1].explored));
        assert_eq!(seen.last().map(|p| p.rate()), Some(1.0));
    }

    #[test]
    fn cancelling_mid_run_discards_partial_graph() {
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

        let task = DepthFirstSearch::new().search_async(PuzzleState::solved(3), None, control);
        let (dfs, outcome) = task.wait().unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert!(dfs.result().is_empty());
        // The flag is checked before the next pop, so nothing ran past it.
        assert_eq!(pops.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn dropping_the_handle_cancels_the_worker() {
        let token = CancelToken::new();
        let control = SearchControl::new().with_cancel_token(token.clone());
        let task = BreadthFirstSearch::new().search_async(PuzzleState::solved(3), None, control);
        drop(task);
        assert!(token.is_cancelled());
    }
}
