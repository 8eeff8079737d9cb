//! `paiv-validator`: reads a map then a program from stdin, force-abort
//! replays it, and prints the score, final board, and program, in that
//! order.

use std::io::{self, Write};

use paiv::io::{read_map, read_program};
use paiv::model::Cell;
use paiv::sim;

fn render_board(width: i32, cells: &[Cell]) -> String {
    let width = width as usize;
    let mut out = String::with_capacity(cells.len() + cells.len() / width.max(1));
    for row in cells.chunks(width) {
        for &cell in row {
            out.push(cell.to_byte() as char);
        }
        out.push('\n');
    }
    out
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let (ctx, initial) = read_map(&mut handle);
    let program = read_program(&mut handle);

    let final_state = sim::runsim(&ctx, &initial, &program, true);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", final_state.score)?;
    write!(out, "{}", render_board(ctx.map.width, &final_state.cells))?;
    for action in &program {
        write!(out, "{}", action.to_byte() as char)?;
    }
    writeln!(out)
}
