use crate::direction::Direction;
use crate::notify::Notifier;
use crate::state::PuzzleState;
use log::{trace, warn};
use std::collections::VecDeque;
use std::sync::mpsc;

pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// A reversible edit applied to the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Slide the empty tile one cell.
    Move(Direction),
}

impl Command {
    fn apply(&self, state: &PuzzleState) -> Option<PuzzleState> {
        match self {
            Command::Move(direction) => state.moved(*direction),
        }
    }

    fn invert(&self, state: &PuzzleState) -> Option<PuzzleState> {
        match self {
            Command::Move(direction) => state.moved(direction.opposite()),
        }
    }
}

/// Bounded undo stack plus redo stack. Recording a new command clears redo;
/// once the undo stack is full the oldest entry falls off.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Command>,
    redo: Vec<Command>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    fn record(&mut self, command: Command) {
        self.redo.clear();
        self.undo.push_back(command);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

/// Mutable holder of the current puzzle state with undo/redo over moves.
///
/// Every change of the current state is pushed to subscribers; nothing
/// outside the session mutates it.
#[derive(Debug)]
pub struct Puzzle {
    state: PuzzleState,
    history: History,
    notifier: Notifier<PuzzleState>,
}

impl Puzzle {
    pub fn new(state: PuzzleState) -> Self {
        Self::with_history_limit(state, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(state: PuzzleState, limit: usize) -> Self {
        Self {
            state,
            history: History::new(limit),
            notifier: Notifier::default(),
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn has_undo(&self) -> bool {
        !self.history.undo.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.history.redo.is_empty()
    }

    /// Receives every state the session moves to from now on.
    pub fn subscribe(&mut self) -> mpsc::Receiver<PuzzleState> {
        self.notifier.subscribe()
    }

    /// Slides the empty tile; returns `false` and changes nothing when the
    /// move would leave the grid.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let command = Command::Move(direction);
        let Some(next) = command.apply(&self.state) else {
            return false;
        };
        trace!("move {direction}");
        self.history.record(command);
        self.replace(next);
        true
    }

    /// Reverts the last command; `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.undo.pop_back() else {
            return false;
        };
        match command.invert(&self.state) {
            Some(previous) => {
                trace!("undo {command:?}");
                self.history.redo.push(command);
                self.replace(previous);
                true
            }
            None => {
                warn!("discarding {command:?}: it cannot be inverted from the current state");
                false
            }
        }
    }

    /// Re-applies the last undone command; `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.history.redo.pop() else {
            return false;
        };
        match command.apply(&self.state) {
            Some(next) => {
                trace!("redo {command:?}");
                self.history.undo.push_back(command);
                self.replace(next);
                true
            }
            None => {
                warn!("discarding {command:?}: it cannot be replayed from the current state");
                false
            }
        }
    }

    /// Jumps to `state` directly and forgets all history.
    pub fn set_state(&mut self, state: PuzzleState) {
        self.history.clear();
        self.replace(state);
    }

    /// Independent session at the current state with empty history.
    pub fn fork(&self) -> Puzzle {
        Puzzle::with_history_limit(self.state.clone(), self.history.limit)
    }

    /// States along the undo history, oldest first, ending with the current one.
    pub fn visited_route(&self) -> Vec<PuzzleState> {
        let mut route = vec![self.state.clone()];
        let mut cursor = self.state.clone();
        for command in self.history.undo.iter().rev() {
            match command.invert(&cursor) {
                Some(previous) => {
                    route.push(previous.clone());
                    cursor = previous;
                }
                None => break,
            }
        }
        route.reverse();
        route
    }

    fn replace(&mut self, state: PuzzleState) {
        self.state = state;
        self.notifier.notify(&self.state);
    }
}
