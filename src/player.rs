//! Forward/back/reset playback over a solution or a stepwise search.

use crate::direction::Direction;
use crate::error::PuzzleError;
use crate::notify::Notifier;
use crate::search::{StepResult, StepwiseSearchAlgorithm};
use crate::session::Puzzle;
use crate::state::PuzzleState;
use std::collections::VecDeque;
use std::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

/// What a [`Player`] advances, rewinds and resets.
pub trait PlaybackDriver {
    fn can_step_forward(&self) -> bool;
    fn can_step_back(&self) -> bool;
    fn step_forward(&mut self) -> Result<(), PuzzleError>;
    fn step_back(&mut self) -> Result<(), PuzzleError>;
    fn reset(&mut self) -> Result<(), PuzzleError>;
}

/// Playback state machine over a driver.
///
/// `play` only resumes from `Paused` and `pause` only interrupts `Playing`.
/// A forward step that exhausts the driver completes playback; a backward
/// step out of `Completed` lands in `Paused`.
#[derive(Debug)]
pub struct Player<D> {
    driver: D,
    state: PlaybackState,
    notifier: Notifier<PlaybackState>,
}

impl<D: PlaybackDriver> Player<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            state: PlaybackState::Idle,
            notifier: Notifier::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<PlaybackState> {
        self.notifier.subscribe()
    }

    pub fn can_step_forward(&self) -> bool {
        self.driver.can_step_forward()
    }

    pub fn can_step_back(&self) -> bool {
        self.driver.can_step_back()
    }

    pub fn play(&mut self) {
        if self.state == PlaybackState::Paused {
            self.transition(PlaybackState::Playing);
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.transition(PlaybackState::Paused);
        }
    }

    /// Advances one step; `Ok(false)` when the driver cannot advance.
    pub fn step_forward(&mut self) -> Result<bool, PuzzleError> {
        if !self.driver.can_step_forward() {
            return Ok(false);
        }
        self.driver.step_forward()?;
        if !self.driver.can_step_forward() {
            self.transition(PlaybackState::Completed);
        }
        Ok(true)
    }

    /// Rewinds one step; `Ok(false)` when the driver cannot rewind.
    pub fn step_back(&mut self) -> Result<bool, PuzzleError> {
        if !self.driver.can_step_back() {
            return Ok(false);
        }
        self.driver.step_back()?;
        if self.state == PlaybackState::Completed {
            self.transition(PlaybackState::Paused);
        }
        Ok(true)
    }

    pub fn reset(&mut self) -> Result<(), PuzzleError> {
        self.driver.reset()?;
        self.transition(PlaybackState::Idle);
        Ok(())
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            self.state = next;
            self.notifier.notify(&next);
        }
    }
}

/// Replays a precomputed move list through a [`Puzzle`] session.
///
/// Forward steps consume redo history first and only then pending moves,
/// so a solution can be scrubbed back and forth freely.
#[derive(Debug)]
pub struct SolutionDriver {
    puzzle: Puzzle,
    pending: VecDeque<Direction>,
    initial: PuzzleState,
}

impl PlaybackDriver for SolutionDriver {
    fn can_step_forward(&self) -> bool {
        self.puzzle.has_redo() || !self.pending.is_empty()
    }

    fn can_step_back(&self) -> bool {
        self.puzzle.has_undo()
    }

    fn step_forward(&mut self) -> Result<(), PuzzleError> {
        if self.puzzle.redo() {
            return Ok(());
        }
        let direction = self
            .pending
            .pop_front()
            .ok_or(PuzzleError::InvalidOperation("no move left to play"))?;
        if self.puzzle.try_move(direction) {
            Ok(())
        } else {
            Err(PuzzleError::InvalidOperation(
                "solution move would leave the grid",
            ))
        }
    }

    fn step_back(&mut self) -> Result<(), PuzzleError> {
        if self.puzzle.undo() {
            Ok(())
        } else {
            Err(PuzzleError::InvalidOperation("nothing to undo"))
        }
    }

    fn reset(&mut self) -> Result<(), PuzzleError> {
        self.puzzle.set_state(self.initial.clone());
        self.pending.clear();
        Ok(())
    }
}

pub type SolutionPlayer = Player<SolutionDriver>;

impl Player<SolutionDriver> {
    /// Idle player positioned on `initial`.
    pub fn for_start(initial: PuzzleState) -> Self {
        Self::new(SolutionDriver {
            puzzle: Puzzle::new(initial.clone()),
            pending: VecDeque::new(),
            initial,
        })
    }

    /// Loads a move list to be played from the initial state and starts
    /// playing.
    pub fn set_solution(&mut self, moves: impl IntoIterator<Item = Direction>) {
        self.driver.puzzle.set_state(self.driver.initial.clone());
        self.driver.pending = moves.into_iter().collect();
        self.transition(PlaybackState::Playing);
    }

    pub fn puzzle_state(&self) -> &PuzzleState {
        self.driver.puzzle.state()
    }

    pub fn pending_moves(&self) -> usize {
        self.driver.pending.len()
    }

    /// Receives the session state after every step.
    pub fn subscribe_states(&mut self) -> mpsc::Receiver<PuzzleState> {
        self.driver.puzzle.subscribe()
    }
}

/// Drives a stepwise search one expansion per forward step. Expansion
/// cannot be rewound.
#[derive(Debug)]
pub struct SearchProcessDriver<S> {
    algorithm: S,
    start: PuzzleState,
    goal: Option<PuzzleState>,
    last_step: Option<StepResult>,
}

impl<S: StepwiseSearchAlgorithm> PlaybackDriver for SearchProcessDriver<S> {
    fn can_step_forward(&self) -> bool {
        !self.algorithm.is_completed()
    }

    fn can_step_back(&self) -> bool {
        false
    }

    fn step_forward(&mut self) -> Result<(), PuzzleError> {
        self.last_step = Some(self.algorithm.step()?);
        Ok(())
    }

    fn step_back(&mut self) -> Result<(), PuzzleError> {
        Err(PuzzleError::InvalidOperation(
            "search expansion cannot be rewound",
        ))
    }

    fn reset(&mut self) -> Result<(), PuzzleError> {
        self.algorithm.reset();
        self.algorithm.initialize(&self.start, self.goal.as_ref());
        self.last_step = None;
        Ok(())
    }
}

pub type SearchProcessPlayer<S> = Player<SearchProcessDriver<S>>;

impl<S: StepwiseSearchAlgorithm> Player<SearchProcessDriver<S>> {
    /// Initializes `algorithm` from `start` and begins in `Playing`.
    pub fn start(mut algorithm: S, start: PuzzleState, goal: Option<PuzzleState>) -> Self {
        algorithm.initialize(&start, goal.as_ref());
        let mut player = Self::new(SearchProcessDriver {
            algorithm,
            start,
            goal,
            last_step: None,
        });
        player.transition(PlaybackState::Playing);
        player
    }

    pub fn algorithm(&self) -> &S {
        &self.driver.algorithm
    }

    pub fn last_step(&self) -> Option<&StepResult> {
        self.driver.last_step.as_ref()
    }

    /// Receives every expansion performed from now on.
    pub fn subscribe_steps(&mut self) -> mpsc::Receiver<StepResult> {
        self.driver.algorithm.subscribe()
    }
}
