use crate::state::{Parity, PuzzleState};

/// One goal per reachability class.
///
/// A start can only ever reach layouts of its own parity, so the goal it is
/// solved towards is looked up by that parity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStateHolder {
    even: Option<PuzzleState>,
    odd: Option<PuzzleState>,
}

impl GoalStateHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holder with the solved layout filed under its own parity.
    pub fn with_solved(size: usize) -> Self {
        let mut holder = Self::new();
        holder.set_goal(PuzzleState::solved(size));
        holder
    }

    /// Files `goal` under its parity, replacing any previous goal there.
    pub fn set_goal(&mut self, goal: PuzzleState) {
        match goal.parity() {
            Parity::Even => self.even = Some(goal),
            Parity::Odd => self.odd = Some(goal),
        }
    }

    /// The goal sharing `start`'s parity and size, if one is registered.
    pub fn goal_for(&self, start: &PuzzleState) -> Option<&PuzzleState> {
        let goal = match start.parity() {
            Parity::Even => self.even.as_ref(),
            Parity::Odd => self.odd.as_ref(),
        };
        goal.filter(|goal| goal.size() == start.size())
    }

    pub fn even_goal(&self) -> Option<&PuzzleState> {
        self.even.as_ref()
    }

    pub fn odd_goal(&self) -> Option<&PuzzleState> {
        self.odd.as_ref()
    }
}
