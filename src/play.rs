//! Interactive terminal session.

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::debug;
use slider_explorer::{Direction, GoalStateHolder, Parity, Puzzle, PuzzleState};
use std::io::{self, Write};

/// Restores the terminal even when the session loop bails out early.
struct RawTerminal;

impl RawTerminal {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(RawTerminal)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

enum Action {
    Move(Direction),
    Undo,
    Redo,
    Shuffle,
    Quit,
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up => Some(Action::Move(Direction::Up)),
        KeyCode::Down => Some(Action::Move(Direction::Down)),
        KeyCode::Left => Some(Action::Move(Direction::Left)),
        KeyCode::Right => Some(Action::Move(Direction::Right)),
        KeyCode::Char('u') => Some(Action::Undo),
        KeyCode::Char('r') => Some(Action::Redo),
        KeyCode::Char('s') => Some(Action::Shuffle),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Runs the arrow-key session until the player quits. Returns the number of
/// moves on the undo stack at exit.
pub fn run(mut puzzle: Puzzle, goals: &GoalStateHolder) -> Result<usize> {
    let _terminal = RawTerminal::enter()?;
    let mut stdout = io::stdout();

    loop {
        let goal = goals.goal_for(puzzle.state());
        render(&mut stdout, &puzzle, goal)?;

        let Event::Key(KeyEvent { code, .. }) = event::read()? else {
            continue;
        };
        match action_for(code) {
            Some(Action::Move(direction)) => {
                puzzle.try_move(direction);
            }
            Some(Action::Undo) => {
                puzzle.undo();
            }
            Some(Action::Redo) => {
                puzzle.redo();
            }
            Some(Action::Shuffle) => {
                let parity = goal.map_or(Parity::Even, PuzzleState::parity);
                let size = puzzle.state().size();
                puzzle.set_state(PuzzleState::random_solvable(
                    size,
                    parity,
                    &mut rand::thread_rng(),
                ));
                debug!("Shuffled to a new {:?} layout", parity);
            }
            Some(Action::Quit) => break,
            None => {}
        }
    }

    Ok(puzzle.history().undo_len())
}

fn render(out: &mut impl Write, puzzle: &Puzzle, goal: Option<&PuzzleState>) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "{}", puzzle.state().to_string().replace('\n', "\r\n"))?;
    let status = match goal {
        Some(goal) if goal == puzzle.state() => "solved!",
        Some(_) => "",
        None => "no goal for this parity",
    };
    write!(
        out,
        "\r\nmoves: {}  {}\r\narrows move  u undo  r redo  s shuffle  q quit\r\n",
        puzzle.history().undo_len(),
        status
    )?;
    out.flush()?;
    Ok(())
}
