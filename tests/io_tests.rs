use std::io::Cursor;

use paiv::io::{read_map, read_program, write_program};
use paiv::model::{Action, Cell};

#[test]
fn short_rows_are_padded_with_empty() {
    let (ctx, state) = read_map(&mut Cursor::new("R\n \n.#.".as_bytes()));
    assert_eq!(ctx.map.width, 3);
    assert_eq!(ctx.map.height, 3);
    // row 0 is "R" padded to "R  "
    assert_eq!(state.cells[1], Cell::Empty);
    assert_eq!(state.cells[2], Cell::Empty);
}

#[test]
fn blank_line_ends_the_map() {
    let (ctx, _state) = read_map(&mut Cursor::new("R \n\n.#.".as_bytes()));
    assert_eq!(ctx.map.height, 1);
}

#[test]
fn unrecognised_byte_ends_the_map() {
    let (ctx, _state) = read_map(&mut Cursor::new("R \n?extra\n.#.".as_bytes()));
    assert_eq!(ctx.map.height, 1);
}

#[test]
fn carriage_return_is_ignored() {
    let (ctx, _state) = read_map(&mut Cursor::new("R \r\n.#.\r\n".as_bytes()));
    assert_eq!(ctx.map.height, 2);
    assert_eq!(ctx.map.width, 3);
}

#[test]
fn lift_and_lambda_positions_and_counts_are_recorded() {
    let (ctx, state) = read_map(&mut Cursor::new("L\\R".as_bytes()));
    assert_eq!(ctx.map.lambdas_total, 1);
    assert_eq!(ctx.map.lift_pos, paiv::model::Position::new(0, 0));
    assert_eq!(state.robot_pos, paiv::model::Position::new(2, 0));
}

#[test]
fn program_round_trips() {
    let program = vec![Action::Left, Action::Up, Action::Wait, Action::Down, Action::Right];
    let mut buf = Vec::new();
    write_program(&mut buf, &program).unwrap();
    let read_back = read_program(&mut Cursor::new(buf));
    assert_eq!(read_back, program);
}

#[test]
fn program_reader_skips_junk_until_newline() {
    let read_back = read_program(&mut Cursor::new(b"L  R\t\tU\nD".to_vec()));
    assert_eq!(read_back, vec![Action::Left, Action::Right, Action::Up]);
}

#[test]
fn program_reader_stops_at_end_of_input_without_newline() {
    let read_back = read_program(&mut Cursor::new(b"LRW".to_vec()));
    assert_eq!(read_back, vec![Action::Left, Action::Right, Action::Wait]);
}
