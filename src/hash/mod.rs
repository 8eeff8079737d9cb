//! Incremental Zobrist-style board fingerprinting (C3).
//!
//! The fingerprint table used to be process-wide global state in the
//! system this crate is modeled on. Here it lives inside [`PlanningContext`],
//! created once per [`crate::io::read_map`] call and threaded through the
//! planner, so multiple planning runs can coexist in one process without
//! sharing (or clobbering) each other's table.

use crate::model::{Cell, MapInfo, Position, SimState};
use rand::{RngCore, SeedableRng, rngs::StdRng};

#[cfg(feature = "deterministic_hash")]
const FINGERPRINT_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_fingerprint_rng() -> StdRng {
    #[cfg(feature = "deterministic_hash")]
    {
        StdRng::seed_from_u64(FINGERPRINT_SEED)
    }
    #[cfg(not(feature = "deterministic_hash"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

/// `T[offset * Cell::KIND_COUNT + cell.code()]`, filled once per run from
/// host entropy (or from a fixed seed under the `deterministic_hash`
/// feature, for reproducible tests).
#[derive(Debug, Clone)]
pub struct FingerprintTable {
    entries: Vec<u64>,
}

impl FingerprintTable {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width as usize) * (height as usize) * Cell::KIND_COUNT;
        let mut rng = make_fingerprint_rng();
        let mut entries = vec![0u64; size];
        for slot in entries.iter_mut() {
            *slot = rng.next_u64();
        }
        FingerprintTable { entries }
    }

    #[inline]
    fn entry(&self, offset: usize, cell: Cell) -> u64 {
        self.entries[offset * Cell::KIND_COUNT + cell.code()]
    }

    /// Fingerprint of an entire board, computed from scratch. Used to
    /// verify the incremental hash has not drifted (invariant 1, §8).
    pub fn full_hash(&self, cells: &[Cell]) -> u64 {
        cells
            .iter()
            .enumerate()
            .fold(0u64, |acc, (offset, &cell)| acc ^ self.entry(offset, cell))
    }

    /// Entity move from `src` (content `src_content`) to `tgt` (content
    /// `tgt_content`), leaving `Empty` behind at `src`.
    #[inline]
    pub fn apply_move(
        &self,
        hash: &mut u64,
        src_offset: usize,
        src_content: Cell,
        tgt_offset: usize,
        tgt_content: Cell,
    ) {
        *hash ^= self.entry(tgt_offset, tgt_content);
        *hash ^= self.entry(tgt_offset, src_content);
        *hash ^= self.entry(src_offset, src_content);
        *hash ^= self.entry(src_offset, Cell::Empty);
    }

    /// In-place content change at `offset`, from `from` to `to`.
    #[inline]
    pub fn apply_change(&self, hash: &mut u64, offset: usize, from: Cell, to: Cell) {
        *hash ^= self.entry(offset, from);
        *hash ^= self.entry(offset, to);
    }
}

/// Per-run context owning the fingerprint table and the immutable map
/// metadata. Created once by [`crate::io::read_map`] and threaded through
/// every layer of the planner — never stored as global state.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    pub map: MapInfo,
    pub table: FingerprintTable,
}

impl PlanningContext {
    pub fn new(map: MapInfo) -> Self {
        let table = FingerprintTable::new(map.width, map.height);
        PlanningContext { map, table }
    }

    #[inline]
    pub fn full_hash(&self, state: &SimState) -> u64 {
        self.table.full_hash(&state.cells)
    }

    #[inline]
    pub fn move_entity(
        &self,
        hash: &mut u64,
        src: Position,
        src_content: Cell,
        tgt: Position,
        tgt_content: Cell,
    ) {
        self.table.apply_move(
            hash,
            self.map.offset(src),
            src_content,
            self.map.offset(tgt),
            tgt_content,
        );
    }

    #[inline]
    pub fn change_cell(&self, hash: &mut u64, at: Position, from: Cell, to: Cell) {
        self.table.apply_change(hash, self.map.offset(at), from, to);
    }
}
