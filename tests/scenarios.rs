use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slider_explorer::search::{AStarSearch, BreadthFirstSearch, DepthFirstSearch};
use slider_explorer::{
    reachable_states, AlgorithmKind, Direction, PuzzleError, PuzzleState, SearchAlgorithm,
    SearchOutcome,
};

fn state(values: &[u16]) -> PuzzleState {
    PuzzleState::from_values(values).unwrap()
}

fn random_walk(start: &PuzzleState, moves: usize, rng: &mut StdRng) -> PuzzleState {
    let mut current = start.clone();
    for _ in 0..moves {
        let direction = Direction::ALL[rng.gen_range(0..4)];
        if let Some(next) = current.moved(direction) {
            current = next;
        }
    }
    current
}

#[test]
fn one_move_from_solved_is_a_single_right() {
    let start = state(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
    let goal = PuzzleState::solved(3);

    for kind in [AlgorithmKind::Bfs, AlgorithmKind::Dfs, AlgorithmKind::AStar] {
        let mut search = kind.build();
        assert_eq!(search.search(&start, Some(&goal)), SearchOutcome::GoalReached);
        let path = search.result().path_to(&goal).unwrap();
        assert_eq!(path.moves, vec![Direction::Right], "{}", kind);
    }
}

#[test]
fn start_equal_to_goal_yields_root_only() {
    let start = PuzzleState::solved(3);
    for kind in [AlgorithmKind::Bfs, AlgorithmKind::Dfs, AlgorithmKind::AStar] {
        let mut search = kind.build();
        assert_eq!(search.search(&start, Some(&start)), SearchOutcome::GoalReached);
        assert_eq!(search.result().len(), 1);
        assert!(search.result().path_to(&start).unwrap().is_empty());
    }
}

#[test]
fn opposite_parity_has_no_path() {
    let start = state(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
    let goal = PuzzleState::solved(3);
    assert_ne!(start.parity(), goal.parity());

    for kind in [AlgorithmKind::Bfs, AlgorithmKind::Dfs, AlgorithmKind::AStar] {
        let mut algorithm = kind.build();
        assert_eq!(
            algorithm.search(&start, Some(&goal)),
            SearchOutcome::NoPathFound,
            "{}", kind
        );
        assert!(algorithm.result().is_empty(), "{}", kind);
        assert_eq!(
            algorithm.result().path_to(&goal).unwrap_err(),
            PuzzleError::NoPathFound,
            "{}", kind
        );
    }
}

#[test]
fn full_exploration_covers_half_the_permutations() {
    let mut dfs = DepthFirstSearch::new();
    let outcome = dfs.search(&PuzzleState::solved(3), None);
    assert_eq!(outcome, SearchOutcome::Exhausted);
    assert_eq!(dfs.result().len(), reachable_states(3));
    assert!(dfs
        .result()
        .iter()
        .all(|(s, _)| s.parity() == PuzzleState::solved(3).parity()));
}

#[test]
fn astar_matches_bfs_path_length() {
    let mut rng = StdRng::seed_from_u64(7);
    let goal = PuzzleState::solved(3);
    for _ in 0..5 {
        let start = random_walk(&goal, 16, &mut rng);

        let mut bfs = BreadthFirstSearch::new();
        bfs.search(&start, Some(&goal));
        let mut astar = AStarSearch::new();
        astar.search(&start, Some(&goal));

        let bfs_len = bfs.result().path_to(&goal).unwrap().len();
        let astar_len = astar.result().path_to(&goal).unwrap().len();
        assert_eq!(astar_len, bfs_len, "start:\n{}", start);
    }
}

#[test]
fn bfs_depths_are_shortest_distances() {
    let mut bfs = BreadthFirstSearch::new();
    bfs.search(&PuzzleState::solved(3), None);
    let graph = bfs.result();
    for (state, node) in graph.iter().take(2000) {
        for neighbor in node.adjacent() {
            let other = graph.get(neighbor).unwrap().depth();
            assert!(node.depth().abs_diff(other) <= 1, "{}", state);
        }
    }
    assert_eq!(graph.depth_histogram().iter().sum::<usize>(), graph.len());
    assert_eq!(graph.max_depth(), Some(31));
}
