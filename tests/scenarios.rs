//! End-to-end scoring scenarios, ported one-for-one from the reference
//! test scenarios this system's scoring rules were checked against.

use std::io::Cursor;

use paiv::io::read_map;
use paiv::model::{Action, Position};
use paiv::sim::step;

fn run(map: &str, program: &[Action]) -> (paiv::model::SimState, paiv::hash::PlanningContext) {
    let (ctx, initial) = read_map(&mut Cursor::new(map.as_bytes()));
    let mut state = initial;
    for &action in program {
        state = step(&ctx, &state, action);
    }
    (state, ctx)
}

#[test]
fn s1_trivial_lambda_and_lift() {
    let (state, _ctx) = run("L\\R", &[Action::Left, Action::Left]);
    assert_eq!(state.robot_pos, Position::new(0, 0));
    assert_eq!(state.lambdas_collected, 1);
    assert!(state.is_ended);
    assert_eq!(state.score, 73);
}

#[test]
fn s2_wait_then_waste_truncates_at_depth_cap() {
    let (ctx, initial) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    let program = vec![
        Action::Wait,
        Action::Wait,
        Action::Wait,
        Action::Left,
        Action::Left,
    ];
    let state = paiv::sim::runsim(&ctx, &initial, &program, true);
    assert_eq!(state.lambdas_collected, 0);
    assert_eq!(state.score, -3);
    assert!(state.is_ended);
}

#[test]
fn s3_rock_falls_onto_robot() {
    let (state, _ctx) = run("* \n  \n R\nL#", &[Action::Left]);
    assert_eq!(state.robot_pos, Position::new(0, 2));
    assert!(state.is_ended);
    assert_eq!(state.score, -1);
}

#[test]
fn s4_single_push() {
    let (ctx, initial) = read_map(&mut Cursor::new("* \n R\nL#".as_bytes()));
    let after_left = step(&ctx, &initial, Action::Left);
    assert_eq!(after_left.robot_pos, Position::new(0, 1));
    assert!(!after_left.is_ended);
    assert_eq!(after_left.score, -1);

    let after_down = step(&ctx, &after_left, Action::Down);
    assert_eq!(after_down.robot_pos, Position::new(0, 2));
    assert!(after_down.is_ended);
    assert_eq!(after_down.score, -2);
}

#[test]
fn s5_safe_wait() {
    let (state, _ctx) = run("   \n * \n.*R\nL##", &[Action::Wait]);
    assert_eq!(state.robot_pos, Position::new(2, 2));
    assert!(!state.is_ended);
    assert_eq!(state.score, -1);
}

#[test]
fn s6_lambda_then_lift_via_pushed_rock() {
    let (ctx, initial) = read_map(&mut Cursor::new("* \n  \n  \nL\\R".as_bytes()));
    let after_first = step(&ctx, &initial, Action::Left);
    assert_eq!(after_first.robot_pos, Position::new(1, 3));

    let after_second = step(&ctx, &after_first, Action::Left);
    assert_eq!(after_second.robot_pos, Position::new(0, 3));
    assert!(after_second.is_ended);
    assert_eq!(after_second.lambdas_collected, 1);
    assert_eq!(after_second.score, 73);
}
