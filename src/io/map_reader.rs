use std::io::Read;

use crate::hash::PlanningContext;
use crate::model::{Cell, MapInfo, Position, SimState};

/// Reads a map from `reader`: one cell per byte, rows terminated by LF,
/// `CR` ignored. A blank line or any unrecognised byte ends the map; short
/// rows are right-padded with [`Cell::Empty`]. Never fails — worst case
/// you get an empty map.
pub fn read_map<R: Read>(reader: &mut R) -> (PlanningContext, SimState) {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row: Vec<Cell> = Vec::new();
    let mut bytes = reader.bytes();

    'outer: while let Some(Ok(b)) = bytes.next() {
        match b {
            b'\r' => continue,
            b'\n' => {
                if row.is_empty() {
                    break 'outer;
                }
                rows.push(std::mem::take(&mut row));
            }
            other => match Cell::from_byte(other) {
                Some(cell) => row.push(cell),
                None => break 'outer,
            },
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0) as i32;
    let height = rows.len() as i32;

    let mut cells = vec![Cell::Empty; (width as usize) * (height as usize)];
    let mut robot_pos = Position::new(0, 0);
    let mut lift_pos = Position::new(0, 0);
    let mut lambdas_total = 0u32;

    for (y, parsed_row) in rows.into_iter().enumerate() {
        for (x, cell) in parsed_row.into_iter().enumerate() {
            let idx = y * (width as usize) + x;
            cells[idx] = cell;
            let pos = Position::new(x as i32, y as i32);
            match cell {
                Cell::Robot => robot_pos = pos,
                Cell::ClosedLift | Cell::OpenLift => lift_pos = pos,
                Cell::Lambda => lambdas_total += 1,
                _ => {}
            }
        }
    }

    let map = MapInfo {
        width,
        height,
        lift_pos,
        lambdas_total,
    };
    let ctx = PlanningContext::new(map);
    let board_hash = ctx.full_hash(&SimState {
        cells: cells.clone(),
        robot_pos,
        score: 0,
        lambdas_collected: 0,
        is_ended: false,
        board_hash: 0,
    });
    let state = SimState {
        cells,
        robot_pos,
        score: 0,
        lambdas_collected: 0,
        is_ended: false,
        board_hash,
    };
    (ctx, state)
}
