//! Property tests over grid states, sessions and solution paths.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slider_explorer::search::AStarSearch;
use slider_explorer::{Direction, Position, Puzzle, PuzzleState, SearchAlgorithm};

// ── Strategies ──────────────────────────────────────────────────────────

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Any layout of a 2x2 to 4x4 grid, either parity.
fn any_state() -> impl Strategy<Value = PuzzleState> {
    (2usize..=4, any::<u64>()).prop_map(|(size, seed)| {
        PuzzleState::random_with(size, &mut StdRng::seed_from_u64(seed))
    })
}

fn walk(start: &PuzzleState, moves: &[Direction]) -> PuzzleState {
    moves
        .iter()
        .fold(start.clone(), |s, &d| s.moved(d).unwrap_or(s))
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn create_round_trips_values(values in Just((0u16..9).collect::<Vec<_>>()).prop_shuffle()) {
        let state = PuzzleState::create(3, &values).unwrap();
        prop_assert_eq!(state.to_values(), values);
    }

    #[test]
    fn parity_is_invariant_under_moves(
        start in any_state(),
        moves in prop::collection::vec(direction(), 0..64),
    ) {
        let end = walk(&start, &moves);
        prop_assert_eq!(end.parity(), start.parity());
    }

    #[test]
    fn swap_contract(start in any_state(), row in 0usize..5, column in 0usize..5) {
        let target = Position::new(row, column);
        let empty = start.empty_position();
        let legal = target.in_bounds(start.size()) && empty.manhattan_distance(target) == 1;

        match start.swap(target) {
            Some(next) => {
                prop_assert!(legal);
                prop_assert_eq!(next.empty_position(), target);
                prop_assert_eq!(next[empty], start[target]);
                for index in 0..start.total_cells() {
                    let cell = Position::from_index(index, start.size());
                    if cell != empty && cell != target {
                        prop_assert_eq!(next[cell], start[cell]);
                    }
                }
            }
            None => prop_assert!(!legal),
        }
    }

    #[test]
    fn undo_restores_and_redo_replays(
        start in any_state(),
        moves in prop::collection::vec(direction(), 1..40),
    ) {
        let mut puzzle = Puzzle::new(start.clone());
        let applied = moves.iter().filter(|&&d| puzzle.try_move(d)).count();
        let end = puzzle.state().clone();
        prop_assert_eq!(&end, &walk(&start, &moves));

        for _ in 0..applied {
            prop_assert!(puzzle.undo());
        }
        prop_assert_eq!(puzzle.state(), &start);
        prop_assert!(!puzzle.undo());

        if applied > 0 {
            prop_assert!(puzzle.redo());
            prop_assert!(puzzle.undo());
            prop_assert_eq!(puzzle.state(), &start);
        }
    }

    #[test]
    fn adjacency_lists_have_no_duplicates(moves in prop::collection::vec(direction(), 0..12)) {
        let goal = PuzzleState::solved(3);
        let start = walk(&goal, &moves);
        let mut astar = AStarSearch::new();
        astar.search(&start, Some(&goal));
        for (_, node) in astar.result() {
            let mut neighbors = node.adjacent().to_vec();
            neighbors.sort();
            neighbors.dedup();
            prop_assert_eq!(neighbors.len(), node.adjacent().len());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn replayed_path_reaches_goal(moves in prop::collection::vec(direction(), 0..18)) {
        let goal = PuzzleState::solved(3);
        let start = walk(&goal, &moves);

        let mut astar = AStarSearch::new();
        astar.search(&start, Some(&goal));
        let path = astar.result().path_to(&goal).unwrap();
        prop_assert!(path.len() <= moves.len());

        let mut puzzle = Puzzle::new(start);
        for &direction in &path.moves {
            prop_assert!(puzzle.try_move(direction));
        }
        prop_assert_eq!(puzzle.state(), &goal);
    }
}
