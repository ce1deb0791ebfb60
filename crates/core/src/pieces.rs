//! Pieces module - Tetromino shapes and rotation lookup
//!
//! Each kind owns an ordered list of 4x4 layouts. The number of layouts is
//! kind-specific (O: 1, I/S/Z: 2, T/J/L: 4), so rotation indices are always
//! normalized against the kind's own count before use.

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to the piece anchor, as `(col, row)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Turn a 4x4 text layout into mino offsets, scanning row by row.
const fn layout(rows: [&[u8; 4]; 4]) -> PieceShape {
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0;
    let mut row = 0;
    while row < 4 {
        let mut col = 0;
        while col < 4 {
            if rows[row][col] == b'X' {
                out[n] = (col as i8, row as i8);
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    out
}

const I_SHAPES: [PieceShape; 2] = [
    layout([b"....", b"XXXX", b"....", b"...."]),
    layout([b"..X.", b"..X.", b"..X.", b"..X."]),
];

const O_SHAPES: [PieceShape; 1] = [layout([b".XX.", b".XX.", b"....", b"...."])];

const T_SHAPES: [PieceShape; 4] = [
    layout([b".X..", b"XXX.", b"....", b"...."]),
    layout([b".X..", b".XX.", b".X..", b"...."]),
    layout([b"....", b"XXX.", b".X..", b"...."]),
    layout([b".X..", b"XX..", b".X..", b"...."]),
];

const S_SHAPES: [PieceShape; 2] = [
    layout([b"..XX", b".XX.", b"....", b"...."]),
    layout([b".X..", b".XX.", b"..X.", b"...."]),
];

const Z_SHAPES: [PieceShape; 2] = [
    layout([b".XX.", b"..XX", b"....", b"...."]),
    layout([b"..X.", b".XX.", b".X..", b"...."]),
];

const J_SHAPES: [PieceShape; 4] = [
    layout([b"X...", b"XXX.", b"....", b"...."]),
    layout([b".XX.", b".X..", b".X..", b"...."]),
    layout([b"....", b"XXX.", b"..X.", b"...."]),
    layout([b".X..", b".X..", b"XX..", b"...."]),
];

const L_SHAPES: [PieceShape; 4] = [
    layout([b"..X.", b"XXX.", b"....", b"...."]),
    layout([b".X..", b".X..", b".XX.", b"...."]),
    layout([b"....", b"XXX.", b"X...", b"...."]),
    layout([b"XX..", b".X..", b".X..", b"...."]),
];

/// All rotation layouts of a kind, in rotation order
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Number of distinct orientations of a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    shapes(kind).len() as u8
}

/// Wrap any requested rotation into `[0, rotation_count(kind))`.
///
/// Negative requests wrap around, so `-1` is the last orientation.
pub fn normalize_rotation(kind: PieceKind, requested: i32) -> u8 {
    requested.rem_euclid(rotation_count(kind) as i32) as u8
}

/// Get the mino offsets for a kind at any (normalized on read) rotation
pub fn cell_offsets(kind: PieceKind, rotation: i32) -> PieceShape {
    shapes(kind)[normalize_rotation(kind, rotation) as usize]
}

/// Rotation kick offsets, tried in order; the first one that fits wins.
pub const ROTATION_KICKS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// A piece instance: kind, orientation and board-relative anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor in its first orientation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Create a tetromino at an explicit position and rotation
    pub fn at(kind: PieceKind, rotation: i32, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: normalize_rotation(kind, rotation),
            x,
            y,
        }
    }

    /// Current rotation index, always in range for the kind
    pub fn rotation(&self) -> u8 {
        normalize_rotation(self.kind, self.rotation as i32)
    }

    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = normalize_rotation(self.kind, rotation);
    }

    /// Rotation index reached by turning `direction` steps from the current one
    pub fn rotated(&self, direction: i32) -> u8 {
        normalize_rotation(self.kind, self.rotation as i32 + direction)
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        cell_offsets(self.kind, self.rotation as i32)
    }

    /// Absolute board cells for a hypothetical rotation and offset
    pub fn cells_at(&self, rotation: i32, dx: i8, dy: i8) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x + dx, self.y + dy);
        cell_offsets(self.kind, rotation)
            .into_iter()
            .map(move |(cx, cy)| (x + cx, y + cy))
    }

    /// Absolute board cells at the current rotation and position
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        self.cells_at(self.rotation as i32, 0, 0)
    }
}
