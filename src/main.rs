mod cli;
mod play;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use log::{info, warn};
use slider_explorer::config::{PuzzleConfig, ResolvedConfig};
use slider_explorer::logging::init_logger;
use slider_explorer::search::{SearchControl, SearchProgress};
use slider_explorer::{
    reachable_states, AlgorithmKind, Parity, Puzzle, PuzzleState, SearchAlgorithm,
    SearchOutcome, SearchProcessPlayer, SolutionPlayer, StepwiseSearchAlgorithm,
};
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PuzzleConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logger(cli.log_level.unwrap_or(config.log_level));
    let config = config.resolve()?;

    match cli.command {
        Command::Solve {
            start,
            goal,
            algorithm,
        } => solve(&config, start, goal, algorithm),
        Command::Explore {
            start,
            algorithm,
            time_limit,
        } => explore(&config, start, algorithm, time_limit),
        Command::Trace {
            start,
            algorithm,
            steps,
            goal,
        } => trace(&config, start, goal, algorithm, steps),
        Command::Play { start } => {
            let start = pick_start(&config, start)?;
            let puzzle = Puzzle::with_history_limit(start, config.history_limit);
            let moves = play::run(puzzle, &config.goals)?;
            println!("Left the session after {} moves", moves);
            Ok(())
        }
    }
}

/// The explicit start, else the configured one, else a random layout that
/// can reach a configured goal.
fn pick_start(config: &ResolvedConfig, start: Option<PuzzleState>) -> Result<PuzzleState> {
    let start = match start.or_else(|| config.start.clone()) {
        Some(start) => start,
        None => {
            let parity = if config.goals.even_goal().is_some() {
                Parity::Even
            } else {
                Parity::Odd
            };
            PuzzleState::random_solvable(config.grid_size, parity, &mut rand::thread_rng())
        }
    };
    info!("Start layout:\n{}", start);
    Ok(start)
}

fn pick_goal(
    config: &ResolvedConfig,
    start: &PuzzleState,
    goal: Option<PuzzleState>,
) -> Result<PuzzleState> {
    let goal = match goal {
        Some(goal) => goal,
        None => config.goals.goal_for(start).cloned().ok_or_else(|| {
            anyhow!("no {:?} goal configured for this start", start.parity())
        })?,
    };
    if goal.size() != start.size() {
        bail!(
            "goal is {0}x{0} but start is {1}x{1}",
            goal.size(),
            start.size()
        );
    }
    if goal.parity() != start.parity() {
        warn!("Goal and start have different parity; the goal is unreachable");
    }
    Ok(goal)
}

fn solve(
    config: &ResolvedConfig,
    start: Option<PuzzleState>,
    goal: Option<PuzzleState>,
    algorithm: Option<AlgorithmKind>,
) -> Result<()> {
    let start = pick_start(config, start)?;
    let goal = pick_goal(config, &start, goal)?;
    let mut search = algorithm.unwrap_or(config.algorithm).build();

    let began = Instant::now();
    let outcome = search.search(&start, Some(&goal));
    if outcome != SearchOutcome::GoalReached {
        bail!("{} found no path to the goal ({:?})", search.name(), outcome);
    }
    let path = search.result().path_to(&goal)?;
    println!(
        "{} found a {}-move solution in {} after visiting {} states",
        search.name(),
        path.len(),
        humantime::format_duration(Duration::from_millis(began.elapsed().as_millis() as u64)),
        search.result().len()
    );

    let mut player = SolutionPlayer::for_start(start.clone());
    player.set_solution(path.moves.iter().copied());
    println!("{}", start);
    for direction in &path.moves {
        player.step_forward()?;
        println!("{}\n{}", direction, player.puzzle_state());
    }
    Ok(())
}

fn explore(
    config: &ResolvedConfig,
    start: Option<PuzzleState>,
    algorithm: Option<AlgorithmKind>,
    time_limit: Option<Duration>,
) -> Result<()> {
    let start = pick_start(config, start)?;
    let algorithm = algorithm.unwrap_or(config.algorithm).build();

    let total = reachable_states(start.size());
    let report_every = (total / 20).max(1);
    let control = SearchControl::new()
        .with_max_estimate(total)
        .with_progress(Box::new(move |progress: SearchProgress| {
            if progress.explored % report_every == 0 {
                info!(
                    "Explored {} of {} states ({:.0}%)",
                    progress.explored,
                    progress.max_estimate,
                    progress.rate() * 100.0
                );
            }
        }));

    let task = algorithm.search_async(start, None, control);
    if let Some(limit) = time_limit {
        let deadline = Instant::now() + limit;
        while !task.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        if !task.is_finished() {
            warn!(
                "Time limit of {} reached, cancelling",
                humantime::format_duration(limit)
            );
            task.cancel();
        }
    }

    let (algorithm, outcome) = task.wait()?;
    if !outcome.is_success() {
        bail!("{} exploration ended with {:?}", algorithm.name(), outcome);
    }

    let graph = algorithm.result();
    println!(
        "{} visited {} states, {} edges",
        algorithm.name(),
        graph.len(),
        graph.edges().count()
    );
    for (depth, count) in graph.depth_histogram().iter().enumerate() {
        println!("depth {:3}: {}", depth, count);
    }
    Ok(())
}

fn trace(
    config: &ResolvedConfig,
    start: Option<PuzzleState>,
    goal: Option<PuzzleState>,
    algorithm: Option<AlgorithmKind>,
    steps: usize,
) -> Result<()> {
    let start = pick_start(config, start)?;
    let goal = match goal {
        Some(goal) => Some(pick_goal(config, &start, Some(goal))?),
        None => config.goals.goal_for(&start).cloned(),
    };
    let stepwise = algorithm.unwrap_or(config.algorithm).build_stepwise();
    let mut player = SearchProcessPlayer::start(stepwise, start, goal);

    for index in 0..steps {
        if !player.step_forward()? {
            break;
        }
        if let Some(step) = player.last_step() {
            println!(
                "step {}: depth {}, cost {}, {} new\n{}",
                index + 1,
                step.node.depth(),
                step.node.total_cost(),
                step.discovered.len(),
                step.expanded
            );
        }
    }
    println!(
        "{} in state {:?} with {} states known",
        player.algorithm().name(),
        player.state(),
        player.algorithm().result().len()
    );
    Ok(())
}
