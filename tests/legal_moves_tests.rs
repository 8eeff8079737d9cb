use std::collections::HashSet;
use std::io::Cursor;

use paiv::io::read_map;
use paiv::model::Action;
use paiv::sim::legal_moves;

#[test]
fn wait_is_always_legal_and_order_is_fixed() {
    let (ctx, initial) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    let moves = legal_moves(&ctx, &initial, &Vec::new(), &HashSet::new());
    // robot at the right edge of a 1-row map: only Left and Wait make sense.
    assert_eq!(moves, vec![Action::Left, Action::Wait]);
}

#[test]
fn wall_and_out_of_bounds_block_movement() {
    let (ctx, initial) = read_map(&mut Cursor::new("R#".as_bytes()));
    let moves = legal_moves(&ctx, &initial, &Vec::new(), &HashSet::new());
    assert!(!moves.contains(&Action::Right)); // wall
    assert!(!moves.contains(&Action::Up)); // out of bounds
    assert!(!moves.contains(&Action::Down)); // out of bounds
    assert!(moves.contains(&Action::Wait));
}

#[test]
fn rock_push_requires_clear_landing_cell() {
    let (ctx, initial) = read_map(&mut Cursor::new("R* ".as_bytes()));
    let moves = legal_moves(&ctx, &initial, &Vec::new(), &HashSet::new());
    assert!(moves.contains(&Action::Right)); // landing cell is empty

    let (ctx2, blocked) = read_map(&mut Cursor::new("R*#".as_bytes()));
    let moves2 = legal_moves(&ctx2, &blocked, &Vec::new(), &HashSet::new());
    assert!(!moves2.contains(&Action::Right)); // landing cell is a wall
}

#[test]
fn exclude_set_is_honored() {
    let (ctx, initial) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    let mut exclude = HashSet::new();
    exclude.insert(Action::Left);
    let moves = legal_moves(&ctx, &initial, &Vec::new(), &exclude);
    assert_eq!(moves, vec![Action::Wait]);
}

#[test]
fn depth_cap_empties_legal_moves() {
    let (ctx, initial) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    let full_prefix = vec![Action::Wait; ctx.map.depth_cap()];
    let moves = legal_moves(&ctx, &initial, &full_prefix, &HashSet::new());
    assert!(moves.is_empty());
}
