use crate::hash::PlanningContext;
use crate::model::{Action, Cell, Position, Program, SimState};

/// Outcome of a pure legality check for one of the four directional moves,
/// shared by [`step`] (which mutates) and `legal_moves` (which only peeks).
pub(crate) struct StepPlan {
    pub next: Position,
    pub target: Cell,
    pub rock_push: Option<Position>,
}

/// Where would `action` take the robot, and what is in the way? `None`
/// means the move is blocked and the robot stays put.
pub(crate) fn plan_move(
    ctx: &PlanningContext,
    state: &SimState,
    action: Action,
) -> Option<StepPlan> {
    let next = state.robot_pos.advance(action);
    if !ctx.map.in_bounds(next) {
        return None;
    }
    let target = state.cell_at(&ctx.map, next);
    match target {
        Cell::Empty | Cell::Earth | Cell::Lambda | Cell::OpenLift => Some(StepPlan {
            next,
            target,
            rock_push: None,
        }),
        Cell::Rock => match action {
            Action::Left | Action::Right => {
                let rock_dest = next.advance(action);
                if ctx.map.in_bounds(rock_dest) && state.cell_at(&ctx.map, rock_dest) == Cell::Empty
                {
                    Some(StepPlan {
                        next,
                        target,
                        rock_push: Some(rock_dest),
                    })
                } else {
                    None
                }
            }
            _ => None,
        },
        Cell::Wall | Cell::ClosedLift | Cell::Robot | Cell::OutOfMap => None,
    }
}

/// Advance `state` by one action. Pure: `state` is never mutated, the
/// result is a new value. Mirrors the four phases of a world step: the
/// robot's own move, the lift-open check, gravity, and crush detection.
pub fn step(ctx: &PlanningContext, state: &SimState, action: Action) -> SimState {
    let mut next = state.clone();
    let mut reached_lift_this_step = false;

    match action {
        Action::Left | Action::Right | Action::Up | Action::Down => {
            if let Some(plan) = plan_move(ctx, state, action) {
                let old_robot_pos = state.robot_pos;
                let mut hash = next.board_hash;

                if let Some(rock_dest) = plan.rock_push {
                    ctx.move_entity(&mut hash, plan.next, Cell::Rock, rock_dest, Cell::Empty);
                    next.set_cell(&ctx.map, plan.next, Cell::Empty);
                    next.set_cell(&ctx.map, rock_dest, Cell::Rock);
                }

                let robot_target_content = if plan.rock_push.is_some() {
                    Cell::Empty
                } else {
                    plan.target
                };
                ctx.move_entity(
                    &mut hash,
                    old_robot_pos,
                    Cell::Robot,
                    plan.next,
                    robot_target_content,
                );
                next.set_cell(&ctx.map, old_robot_pos, Cell::Empty);
                next.set_cell(&ctx.map, plan.next, Cell::Robot);
                next.robot_pos = plan.next;
                next.board_hash = hash;

                match plan.target {
                    Cell::Lambda => {
                        next.lambdas_collected += 1;
                        next.score += 50;
                    }
                    Cell::OpenLift => {
                        next.is_ended = true;
                        next.score += 25 * next.lambdas_collected as i64;
                        reached_lift_this_step = true;
                    }
                    _ => {}
                }
            }
            next.score -= 1;
        }
        Action::Wait => next.score -= 1,
        Action::Abort => next.is_ended = true,
    }

    if next.lambdas_collected >= ctx.map.lambdas_total {
        let lift_pos = ctx.map.lift_pos;
        if next.cell_at(&ctx.map, lift_pos) == Cell::ClosedLift {
            let mut hash = next.board_hash;
            ctx.change_cell(&mut hash, lift_pos, Cell::ClosedLift, Cell::OpenLift);
            next.board_hash = hash;
            next.set_cell(&ctx.map, lift_pos, Cell::OpenLift);
        }
    }

    let robot_destroyed = run_gravity(ctx, &mut next);

    if !reached_lift_this_step && robot_destroyed {
        next.is_ended = true;
        next.score -= 25 * next.lambdas_collected as i64;
        let robot_pos = next.robot_pos;
        let mut hash = next.board_hash;
        ctx.change_cell(&mut hash, robot_pos, Cell::Robot, Cell::Rock);
        next.board_hash = hash;
        next.set_cell(&ctx.map, robot_pos, Cell::Rock);
    }

    next
}

/// Bottom-up, left-to-right rock fall. Reads and writes the same board as
/// it goes: a rock that falls into row `r + 1` is visible to the rest of
/// row `r`'s scan (the tie-break the fixed scan order exists to resolve),
/// but a row is never revisited once its scan moves on. Returns whether
/// any rock came to rest directly above the robot this phase.
fn run_gravity(ctx: &PlanningContext, state: &mut SimState) -> bool {
    let map = &ctx.map;
    let mut robot_destroyed = false;

    for row in (0..=map.height - 2).rev() {
        for col in 0..map.width {
            let pos = Position::new(col, row);
            if state.cell_at(map, pos) != Cell::Rock {
                continue;
            }
            let below = Position::new(col, row + 1);
            let dest = match state.cell_at(map, below) {
                Cell::Empty => Some(below),
                Cell::Rock => fall_diagonal(map, state, col, row),
                Cell::Lambda => fall_right_only(map, state, col, row),
                _ => None,
            };
            let Some(dest) = dest else { continue };

            let mut hash = state.board_hash;
            ctx.move_entity(&mut hash, pos, Cell::Rock, dest, Cell::Empty);
            state.board_hash = hash;
            state.set_cell(map, pos, Cell::Empty);
            state.set_cell(map, dest, Cell::Rock);

            if dest.x == state.robot_pos.x && dest.y + 1 == state.robot_pos.y {
                robot_destroyed = true;
            }
        }
    }
    robot_destroyed
}

/// A rock resting on another rock slides right if the right side is clear,
/// else left if the left side is clear. Right is tried first.
fn fall_diagonal(
    map: &crate::model::MapInfo,
    state: &SimState,
    col: i32,
    row: i32,
) -> Option<Position> {
    let right = Position::new(col + 1, row);
    let right_below = Position::new(col + 1, row + 1);
    if state.cell_at(map, right) == Cell::Empty && state.cell_at(map, right_below) == Cell::Empty {
        return Some(right_below);
    }
    let left = Position::new(col - 1, row);
    let left_below = Position::new(col - 1, row + 1);
    if state.cell_at(map, left) == Cell::Empty && state.cell_at(map, left_below) == Cell::Empty {
        return Some(left_below);
    }
    None
}

/// A rock resting on a lambda only ever slides right.
fn fall_right_only(
    map: &crate::model::MapInfo,
    state: &SimState,
    col: i32,
    row: i32,
) -> Option<Position> {
    let right = Position::new(col + 1, row);
    let right_below = Position::new(col + 1, row + 1);
    if state.cell_at(map, right) == Cell::Empty && state.cell_at(map, right_below) == Cell::Empty {
        Some(right_below)
    } else {
        None
    }
}

/// Replay `program` from `initial`, stopping early if the run ends, and
/// capping at `width * height` turns regardless — the same soft resource
/// cap `legal_moves` enforces on search prefixes. When `force_abort` is
/// set and the cap is hit before the run ended on its own, an implicit
/// [`Action::Abort`] is appended and applied, matching how the reference
/// scorer finalizes a truncated program.
pub fn runsim(
    ctx: &PlanningContext,
    initial: &SimState,
    program: &Program,
    force_abort: bool,
) -> SimState {
    let max_turns = ctx.map.depth_cap();
    let mut state = initial.clone();
    let mut turns = 0usize;

    for &action in program {
        if state.is_ended || turns >= max_turns {
            break;
        }
        state = step(ctx, &state, action);
        turns += 1;
    }

    if force_abort && !state.is_ended {
        state = step(ctx, &state, Action::Abort);
    }
    state
}
