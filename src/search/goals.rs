//! Goal proposer (C6): a single board scan that nominates locally
//! promising target tiles for the planner driver. Grounded in
//! `plan_goals()`: lambda/open-lift tiles, earth tiles that are
//! structural dig-pivots for a rock above or beside them, and rocks a
//! horizontal push is currently possible on.

use crate::hash::PlanningContext;
use crate::model::{Cell, Position, SimState};

#[derive(Debug, Clone)]
pub struct GoalSet {
    pub goals: Vec<Position>,
    pub waiting_ok: bool,
}

fn is_passable(cell: Cell) -> bool {
    matches!(cell, Cell::Empty | Cell::Earth | Cell::Lambda)
}

fn is_earth_pivot(ctx: &PlanningContext, state: &SimState, pos: Position) -> bool {
    let map = &ctx.map;
    let at = |dx: i32, dy: i32| state.cell_at(map, Position::new(pos.x + dx, pos.y + dy));

    if at(0, -1) == Cell::Rock {
        return true;
    }
    if at(-1, 0) == Cell::Rock && is_passable(at(-2, 0)) {
        return true;
    }
    if at(1, 0) == Cell::Rock && is_passable(at(2, 0)) {
        return true;
    }
    if at(-1, 0) == Cell::Lambda && at(-1, -1) == Cell::Rock {
        return true;
    }
    if at(1, 0) == Cell::Lambda && at(1, -1) == Cell::Rock {
        return true;
    }
    if at(-1, 0) == Cell::Empty && at(-2, 0) == Cell::Rock {
        return true;
    }
    if at(1, 0) == Cell::Empty && at(2, 0) == Cell::Rock {
        return true;
    }
    if at(-1, 0) == Cell::Empty && at(-2, 0) == Cell::Empty && at(-3, 0) == Cell::Rock {
        return true;
    }
    if at(1, 0) == Cell::Empty && at(2, 0) == Cell::Empty && at(3, 0) == Cell::Rock {
        return true;
    }
    false
}

fn rock_pushable(ctx: &PlanningContext, state: &SimState, pos: Position) -> bool {
    let map = &ctx.map;
    let left = Position::new(pos.x - 1, pos.y);
    let right = Position::new(pos.x + 1, pos.y);
    let robot = state.robot_pos;
    (robot == left && state.cell_at(map, right) == Cell::Empty)
        || (robot == right && state.cell_at(map, left) == Cell::Empty)
}

fn imminent_fall(ctx: &PlanningContext, state: &SimState, pos: Position) -> bool {
    let map = &ctx.map;
    let below = Position::new(pos.x, pos.y + 1);
    match state.cell_at(map, below) {
        Cell::Empty => true,
        Cell::Rock => {
            let right_down = Position::new(pos.x + 1, pos.y + 1);
            let left_down = Position::new(pos.x - 1, pos.y + 1);
            state.cell_at(map, right_down) == Cell::Empty || state.cell_at(map, left_down) == Cell::Empty
        }
        Cell::Lambda => {
            let right_down = Position::new(pos.x + 1, pos.y + 1);
            state.cell_at(map, right_down) == Cell::Empty
        }
        _ => false,
    }
}

pub fn propose_goals(ctx: &PlanningContext, state: &SimState) -> GoalSet {
    let map = &ctx.map;
    let mut goals = Vec::new();
    let mut waiting_ok = false;

    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Position::new(x, y);
            match state.cell_at(map, pos) {
                Cell::Lambda | Cell::OpenLift => goals.push(pos),
                Cell::Earth => {
                    if is_earth_pivot(ctx, state, pos) {
                        goals.push(pos);
                    }
                }
                Cell::Rock => {
                    if rock_pushable(ctx, state, pos) {
                        goals.push(pos);
                    }
                    if !waiting_ok && imminent_fall(ctx, state, pos) {
                        waiting_ok = true;
                    }
                }
                _ => {}
            }
        }
    }

    if waiting_ok {
        goals.push(state.robot_pos);
    }

    GoalSet { goals, waiting_ok }
}
