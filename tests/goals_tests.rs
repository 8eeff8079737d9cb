use std::io::Cursor;

use paiv::io::read_map;
use paiv::model::Position;
use paiv::search::propose_goals;

#[test]
fn lambda_is_a_goal_but_closed_lift_is_not() {
    let (ctx, state) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    let goal_set = propose_goals(&ctx, &state);
    assert!(goal_set.goals.contains(&Position::new(1, 0)));
    assert!(!goal_set.goals.contains(&Position::new(0, 0)));
}

#[test]
fn earth_below_a_rock_is_a_pivot_goal() {
    let (ctx, state) = read_map(&mut Cursor::new("*\n.".as_bytes()));
    let goal_set = propose_goals(&ctx, &state);
    assert!(goal_set.goals.contains(&Position::new(0, 1)));
}

#[test]
fn rock_adjacent_to_robot_with_clear_landing_is_a_goal() {
    let (ctx, state) = read_map(&mut Cursor::new("R* ".as_bytes()));
    let goal_set = propose_goals(&ctx, &state);
    assert!(goal_set.goals.contains(&Position::new(1, 0)));
}

#[test]
fn rock_over_empty_sets_waiting_ok_and_adds_robot_position() {
    let (ctx, state) = read_map(&mut Cursor::new("*\n \nR".as_bytes()));
    let goal_set = propose_goals(&ctx, &state);
    assert!(goal_set.waiting_ok);
    assert!(goal_set.goals.contains(&state.robot_pos));
    assert_eq!(state.robot_pos, Position::new(0, 2));
}

#[test]
fn settled_rock_does_not_set_waiting_ok() {
    let (ctx, state) = read_map(&mut Cursor::new("R*#".as_bytes()));
    let goal_set = propose_goals(&ctx, &state);
    assert!(!goal_set.waiting_ok);
}
