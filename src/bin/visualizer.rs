//! `paiv-viz`: reads a map then a program from stdin and replays it one
//! step at a time, printing a frame with a sleep between them. `--delay
//! <ms>` overrides the 300 ms default.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use paiv::io::{read_map, read_program};
use paiv::model::Cell;
use paiv::sim;

const DEFAULT_DELAY_MS: u64 = 300;

fn parse_delay(args: impl Iterator<Item = String>) -> u64 {
    let args: Vec<String> = args.collect();
    for (i, arg) in args.iter().enumerate() {
        if arg == "--delay" {
            if let Some(value) = args.get(i + 1) {
                if let Ok(ms) = value.parse::<u64>() {
                    return ms;
                }
            }
        }
    }
    DEFAULT_DELAY_MS
}

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
    let delay = Duration::from_millis(parse_delay(std::env::args().skip(1)));

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let (ctx, initial) = read_map(&mut handle);
    let program = read_program(&mut handle);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut state = initial;
    let max_turns = ctx.map.depth_cap();
    let mut turn = 0usize;

    writeln!(out, "turn 0  score {}", state.score)?;
    write!(out, "{}", render_board(ctx.map.width, &state.cells))?;
    out.flush()?;
    thread::sleep(delay);

    for &action in &program {
        if state.is_ended || turn >= max_turns {
            break;
        }
        state = sim::step(&ctx, &state, action);
        turn += 1;
        writeln!(out, "turn {turn}  score {}", state.score)?;
        write!(out, "{}", render_board(ctx.map.width, &state.cells))?;
        out.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}
