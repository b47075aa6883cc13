use super::graph::NodeData;
use crate::direction::Direction;
use crate::state::PuzzleState;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Pending-work discipline of a search strategy.
///
/// `EXPANSION_ORDER` fixes which neighbour of a popped state is tried
/// first, which decides parentage when several frontier members could
/// discover the same state.
pub trait Frontier: Default + Send {
    const NAME: &'static str;
    const EXPANSION_ORDER: [Direction; 4];

    fn push(&mut self, state: PuzzleState, node: &NodeData);
    fn pop(&mut self) -> Option<PuzzleState>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO queue: breadth-first.
#[derive(Debug, Default)]
pub struct FifoFrontier(VecDeque<PuzzleState>);

impl Frontier for FifoFrontier {
    const NAME: &'static str = "breadth-first";
    const EXPANSION_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    fn push(&mut self, state: PuzzleState, _node: &NodeData) {
        self.0.push_back(state);
    }

    fn pop(&mut self) -> Option<PuzzleState> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// LIFO stack: depth-first. Neighbours are pushed Down, Left, Up, Right so
/// that Right is popped first.
#[derive(Debug, Default)]
pub struct LifoFrontier(Vec<PuzzleState>);

impl Frontier for LifoFrontier {
    const NAME: &'static str = "depth-first";
    const EXPANSION_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];

    fn push(&mut self, state: PuzzleState, _node: &NodeData) {
        self.0.push(state);
    }

    fn pop(&mut self) -> Option<PuzzleState> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug)]
struct Prioritized {
    total: usize,
    depth: usize,
    seq: u64,
    state: PuzzleState,
}

impl Prioritized {
    fn key(&self) -> (usize, usize, u64) {
        (self.total, self.depth, self.seq)
    }
}

impl PartialEq for Prioritized {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Prioritized {}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prioritized {
    // Reversed so the max-heap yields the smallest key.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Min-priority queue on total cost: best-first (A*).
///
/// Equal costs pop the shallower node first, then the earlier insertion.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Prioritized>,
    seq: u64,
}

impl Frontier for PriorityFrontier {
    const NAME: &'static str = "a-star";
    const EXPANSION_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    fn push(&mut self, state: PuzzleState, node: &NodeData) {
        self.seq += 1;
        self.heap.push(Prioritized {
            total: node.total_cost(),
            depth: node.depth(),
            seq: self.seq,
            state,
        });
    }

    fn pop(&mut self) -> Option<PuzzleState> {
        self.heap.pop().map(|entry| entry.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}
