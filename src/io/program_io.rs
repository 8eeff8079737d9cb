use std::io::{Read, Write};

use crate::model::{Action, Program};

/// Reads action letters (`L R U D W A`) until a newline or end-of-input.
/// Any other byte — stray whitespace, `CR`, punctuation — is silently
/// skipped rather than ending the read.
pub fn read_program<R: Read>(reader: &mut R) -> Program {
    let mut program = Vec::new();
    for byte in reader.bytes() {
        let Ok(b) = byte else { break };
        if b == b'\n' {
            break;
        }
        if let Some(action) = Action::from_byte(b) {
            program.push(action);
        }
    }
    program
}

/// Renders `program` as action letters followed by a newline.
pub fn write_program<W: Write>(writer: &mut W, program: &Program) -> std::io::Result<()> {
    let mut bytes: Vec<u8> = program.iter().map(|a| a.to_byte()).collect();
    bytes.push(b'\n');
    writer.write_all(&bytes)
}
