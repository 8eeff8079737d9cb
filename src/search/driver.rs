//! Planner driver (C7): three anytime strategies sharing one `SearchNode`
//! type, one goal proposer, and one memoised world graph. Grounded in
//! `player_bfs`, `player_mc`/`node`, and `player_rand` respectively.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, instrument};

use crate::config::PlannerConfig;
use crate::hash::PlanningContext;
use crate::model::{Action, Cell, Position, Program, SimState};
use crate::sim;

use super::astar::{PathGraph, astar};
use super::goals::propose_goals;
use super::memo::Memo;
use super::node_pool::NodePool;
use super::time_budget::TimeBudget;

/// Which of the three driver strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Uct,
    GoalDive,
}

/// A simulated world reached by some move prefix, plus whether it is a
/// winning end state (robot standing on the open lift when it ended).
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: SimState,
    pub program: Program,
    pub is_win: bool,
}

type SharedMemo = RefCell<Memo<Program, SearchNode>>;

fn lookup_or_compute(
    ctx: &PlanningContext,
    root: &SimState,
    memo: &SharedMemo,
    program: &Program,
) -> SearchNode {
    if let Some(node) = memo.borrow().get(program) {
        return node.clone();
    }
    let state = sim::runsim(ctx, root, program, false);
    let is_win = state.is_ended && state.robot_pos == ctx.map.lift_pos;
    let node = SearchNode {
        state,
        program: program.clone(),
        is_win,
    };
    memo.borrow_mut().add(program.clone(), node.clone());
    node
}

/// A location in the simulated-world graph A\* searches over: either a
/// real move prefix, or a lightweight stub standing in for a target tile
/// (the original's "goal is a stub node" trick — it is never expanded,
/// only compared against by position).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum WorldLoc {
    Real(Program),
    GoalStub(Position),
}

struct WorldGraph<'a> {
    ctx: &'a PlanningContext,
    root: &'a SimState,
    memo: &'a SharedMemo,
    visited: RefCell<HashSet<u64>>,
}

impl PathGraph for WorldGraph<'_> {
    type Loc = WorldLoc;

    fn check_goal(&self, loc: &WorldLoc, goal: &WorldLoc) -> bool {
        match (loc, goal) {
            (WorldLoc::Real(prog), WorldLoc::GoalStub(target)) => {
                let node = lookup_or_compute(self.ctx, self.root, self.memo, prog);
                node.state.robot_pos == *target
            }
            _ => false,
        }
    }

    fn children(&self, loc: &WorldLoc) -> Vec<WorldLoc> {
        let WorldLoc::Real(prog) = loc else {
            return Vec::new();
        };
        let node = lookup_or_compute(self.ctx, self.root, self.memo, prog);
        if node.state.is_ended {
            return Vec::new();
        }
        let exclude = HashSet::new();
        let legal = sim::legal_moves(self.ctx, &node.state, prog, &exclude);
        let mut out = Vec::new();
        for action in legal {
            let mut child_prog = prog.clone();
            child_prog.push(action);
            let child = lookup_or_compute(self.ctx, self.root, self.memo, &child_prog);
            if self.visited.borrow_mut().insert(child.state.board_hash) {
                out.push(WorldLoc::Real(child_prog));
            }
        }
        out
    }

    fn distance(&self, from: &WorldLoc, to: &WorldLoc) -> i64 {
        match (from, to) {
            (WorldLoc::Real(a), WorldLoc::Real(b)) => (b.len() as i64 - a.len() as i64).max(1),
            _ => 1,
        }
    }

    fn path_estimate(&self, loc: &WorldLoc, goal: &WorldLoc) -> i64 {
        let WorldLoc::GoalStub(target) = goal else {
            return 0;
        };
        let WorldLoc::Real(prog) = loc else {
            return 0;
        };
        let node = lookup_or_compute(self.ctx, self.root, self.memo, prog);
        node.state.robot_pos.manhattan_distance(*target) as i64
    }
}

/// Finds a move-prefix path from `from_program` to a tile at `target`,
/// returning the absolute program that reaches it.
fn find_path_to_goal(
    ctx: &PlanningContext,
    root: &SimState,
    memo: &SharedMemo,
    from_program: &Program,
    target: Position,
    deadline: Instant,
) -> Option<Program> {
    let start_node = lookup_or_compute(ctx, root, memo, from_program);
    let visited = RefCell::new(HashSet::new());
    visited.borrow_mut().insert(start_node.state.board_hash);
    let graph = WorldGraph {
        ctx,
        root,
        memo,
        visited,
    };
    let start = WorldLoc::Real(from_program.clone());
    let goal = WorldLoc::GoalStub(target);
    let path = astar(&graph, start, goal, deadline);
    match path.last() {
        Some(WorldLoc::Real(prog)) => Some(prog.clone()),
        _ => None,
    }
}

/// The planner driver: owns no state between `run` calls, just the
/// resource budget configuration.
pub struct PlannerDriver {
    config: PlannerConfig,
}

impl PlannerDriver {
    pub fn new(config: PlannerConfig) -> Self {
        PlannerDriver { config }
    }

    /// Runs the configured strategy to exhaustion of the time budget (or
    /// external cancellation) and returns the best program found. The
    /// program is not guaranteed to have ended the world — the caller
    /// (the `paiv` binary) appends an explicit abort if needed, matching
    /// the force-abort contract used by the validator.
    pub fn run(&self, ctx: &PlanningContext, initial: &SimState, cancel: Arc<AtomicBool>) -> Program {
        let budget = TimeBudget::new(self.config.time_budget, cancel);
        match self.config.strategy {
            Strategy::Bfs => run_bfs(ctx, initial, &self.config, &budget),
            Strategy::Uct => run_uct(ctx, initial, &self.config, &budget),
            Strategy::GoalDive => run_goal_dive(ctx, initial, &self.config, &budget),
        }
    }
}

/// (a) BFS over goal plans.
#[instrument(skip(ctx, root, config, budget))]
fn run_bfs(ctx: &PlanningContext, root: &SimState, config: &PlannerConfig, budget: &TimeBudget) -> Program {
    let memo = RefCell::new(Memo::new(config.memo_cap));
    let root_node = lookup_or_compute(ctx, root, &memo, &Vec::new());

    let mut visited_hashes = HashSet::new();
    visited_hashes.insert(root_node.state.board_hash);

    let mut best = root_node.clone();
    let mut queue = VecDeque::new();
    queue.push_back(root_node);

    let lambdas_total = ctx.map.lambdas_total as i64;
    let divisor = ((lambdas_total.pow(3) + 2).max(1)) as u32;

    while let Some(node) = queue.pop_front() {
        if budget.expired() {
            break;
        }
        if node.state.score > best.state.score {
            best = node.clone();
        }
        if node.is_win {
            best = node;
            break;
        }

        let goals = propose_goals(ctx, &node.state).goals;
        for goal_pos in goals {
            if budget.expired() {
                break;
            }
            let sub_budget = budget.remaining().checked_div(divisor).unwrap_or(Duration::ZERO);
            let deadline = Instant::now() + sub_budget;
            let Some(path_program) = find_path_to_goal(ctx, root, &memo, &node.program, goal_pos, deadline)
            else {
                continue;
            };
            let child = lookup_or_compute(ctx, root, &memo, &path_program);
            if visited_hashes.insert(child.state.board_hash) {
                queue.push_back(child);
            }
        }
    }
    debug!(
        score = best.state.score,
        program_len = best.program.len(),
        elapsed_ms = budget.elapsed().as_millis() as u64,
        "bfs: finished"
    );
    best.program
}

/// UCT node (C7b): lives in an index-addressed pool so the tree survives
/// reallocation, one child slot per legal action.
struct UctNode {
    program: Program,
    visits: u64,
    reward_sum: f64,
    reward_sq_sum: f64,
    parent: Option<usize>,
    children: [Option<usize>; 5],
    explored: bool,
}

fn action_slot(action: Action) -> usize {
    match action {
        Action::Left => 0,
        Action::Right => 1,
        Action::Up => 2,
        Action::Down => 3,
        Action::Wait => 4,
        Action::Abort => unreachable!("abort is never a pool child"),
    }
}

fn backpropagate(pool: &mut NodePool<UctNode>, mut idx: usize, reward: f64) {
    loop {
        let node = pool.get_mut(idx);
        node.visits += 1;
        node.reward_sum += reward;
        node.reward_sq_sum += reward * reward;
        match node.parent {
            Some(p) => idx = p,
            None => break,
        }
    }
}

/// (b) UCT over move prefixes: select / expand / simulate / backpropagate.
#[instrument(skip(ctx, root, config, budget))]
fn run_uct(ctx: &PlanningContext, root: &SimState, config: &PlannerConfig, budget: &TimeBudget) -> Program {
    let memo = RefCell::new(Memo::new(config.memo_cap));
    let mut pool: NodePool<UctNode> = NodePool::new(config.node_pool_cap);
    let root_search = lookup_or_compute(ctx, root, &memo, &Vec::new());
    let root_idx = pool
        .try_push(UctNode {
            program: Vec::new(),
            visits: 0,
            reward_sum: 0.0,
            reward_sq_sum: 0.0,
            parent: None,
            children: [None; 5],
            explored: false,
        })
        .expect("an empty pool always accepts its first node");

    let mut best = root_search;
    let mut rng = rand::rng();

    while !budget.expired() {
        // select
        let mut idx = root_idx;
        loop {
            if !pool.get(idx).explored {
                break;
            }
            let parent_visits = pool.get(idx).visits.max(1) as f64;
            let mut best_child = None;
            let mut best_score = f64::NEG_INFINITY;
            for slot in pool.get(idx).children.iter().flatten().copied() {
                let child = pool.get(slot);
                let visits = child.visits.max(1) as f64;
                let score = (child.reward_sum / visits) / 10000.0 + (2.0 * parent_visits.ln() / visits).sqrt();
                if score > best_score {
                    best_score = score;
                    best_child = Some(slot);
                }
            }
            match best_child {
                Some(c) => idx = c,
                None => break,
            }
        }

        let node_program = pool.get(idx).program.clone();
        let node_search = lookup_or_compute(ctx, root, &memo, &node_program);
        if node_search.state.score > best.state.score {
            best = node_search.clone();
        }
        if node_search.state.is_ended {
            backpropagate(&mut pool, idx, node_search.state.score as f64);
            continue;
        }

        let legal = sim::legal_moves(ctx, &node_search.state, &node_program, &HashSet::new());
        let missing: Vec<Action> = legal
            .iter()
            .copied()
            .filter(|a| pool.get(idx).children[action_slot(*a)].is_none())
            .collect();
        if missing.is_empty() {
            pool.get_mut(idx).explored = true;
            continue;
        }
        let chosen = missing[rng.random_range(0..missing.len())];

        let mut child_program = node_program.clone();
        child_program.push(chosen);
        let child_search = lookup_or_compute(ctx, root, &memo, &child_program);
        let new_node = UctNode {
            program: child_program.clone(),
            visits: 0,
            reward_sum: 0.0,
            reward_sq_sum: 0.0,
            parent: Some(idx),
            children: [None; 5],
            explored: false,
        };
        let Some(new_idx) = pool.try_push(new_node) else {
            debug!(cap = config.node_pool_cap, "uct: node pool exhausted, keeping current tree");
            continue; // pool exhausted: degrade gracefully, stop expanding
        };
        pool.get_mut(idx).children[action_slot(chosen)] = Some(new_idx);
        if legal
            .iter()
            .all(|a| pool.get(idx).children[action_slot(*a)].is_some())
        {
            pool.get_mut(idx).explored = true;
        }

        // simulate: random legal moves to a terminal/depth-capped state
        let mut sim_state = child_search.state.clone();
        let mut sim_program = child_program.clone();
        let mut dive_visited = HashSet::new();
        dive_visited.insert(sim_state.board_hash);

        while !sim_state.is_ended && sim_program.len() < ctx.map.depth_cap() && !budget.expired() {
            let legal_here = sim::legal_moves(ctx, &sim_state, &sim_program, &HashSet::new());
            if legal_here.is_empty() {
                break;
            }
            let mut fresh: Vec<(Action, SimState)> = Vec::new();
            for &a in &legal_here {
                let next = sim::step(ctx, &sim_state, a);
                if !dive_visited.contains(&next.board_hash) {
                    fresh.push((a, next));
                }
            }
            let (action, next_state) = if fresh.is_empty() {
                let a = legal_here[rng.random_range(0..legal_here.len())];
                (a, sim::step(ctx, &sim_state, a))
            } else {
                fresh.swap_remove(rng.random_range(0..fresh.len()))
            };
            sim_program.push(action);
            dive_visited.insert(next_state.board_hash);
            sim_state = next_state;
        }

        if sim_state.score > best.state.score {
            best = SearchNode {
                is_win: sim_state.is_ended && sim_state.robot_pos == ctx.map.lift_pos,
                state: sim_state.clone(),
                program: sim_program,
            };
        }
        backpropagate(&mut pool, new_idx, sim_state.score as f64);
    }
    debug!(
        score = best.state.score,
        program_len = best.program.len(),
        pool_len = pool.len(),
        "uct: finished"
    );
    best.program
}

/// (c) Goal-planner randomised dive: repeated goal-to-goal A\* legs,
/// biased toward the ten nearest goals with lambda/open-lift goals
/// double-weighted.
#[instrument(skip(ctx, root, config, budget))]
fn run_goal_dive(ctx: &PlanningContext, root: &SimState, config: &PlannerConfig, budget: &TimeBudget) -> Program {
    let memo = RefCell::new(Memo::new(config.memo_cap));
    let root_node = lookup_or_compute(ctx, root, &memo, &Vec::new());
    let mut best = root_node.clone();
    let mut rng = rand::rng();

    while !budget.expired() {
        let mut current = root_node.clone();
        let mut tried_goals = HashSet::new();
        let mut visited_hashes = HashSet::new();
        visited_hashes.insert(current.state.board_hash);

        loop {
            if budget.expired() {
                break;
            }
            if current.state.score > best.state.score {
                best = current.clone();
            }
            if current.is_win || current.state.is_ended {
                break;
            }

            let goal_set = propose_goals(ctx, &current.state);
            let mut candidates: Vec<Position> = goal_set
                .goals
                .into_iter()
                .filter(|g| !tried_goals.contains(g))
                .collect();
            if candidates.is_empty() {
                break;
            }
            candidates.sort_by_key(|g| current.state.robot_pos.manhattan_distance(*g));
            candidates.truncate(10);

            let mut weighted = Vec::with_capacity(candidates.len() * 2);
            for g in &candidates {
                weighted.push(*g);
                if matches!(current.state.cell_at(&ctx.map, *g), Cell::Lambda | Cell::OpenLift) {
                    weighted.push(*g);
                }
            }
            let chosen = weighted[rng.random_range(0..weighted.len())];
            tried_goals.insert(chosen);

            let deadline = Instant::now() + budget.remaining();
            let Some(path_program) = find_path_to_goal(ctx, root, &memo, &current.program, chosen, deadline)
            else {
                continue;
            };
            let next_node = lookup_or_compute(ctx, root, &memo, &path_program);
            if !visited_hashes.insert(next_node.state.board_hash) {
                continue;
            }
            current = next_node;
        }
        if current.state.score > best.state.score {
            best = current;
        }
    }
    debug!(
        score = best.state.score,
        program_len = best.program.len(),
        "goal dive: finished"
    );
    best.program
}
