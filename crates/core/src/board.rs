//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`Block`].
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with negative `y` sit above the visible field; pieces may occupy them
//! transiently but nothing is ever stored there.

use crate::pieces::Tetromino;
use crate::rng::SimpleRng;
use crate::types::{Block, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Rows removed by line clears since the board was created
    lines_cleared: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            lines_cleared: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled).
    /// Out-of-bounds positions are reported as unoccupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `piece`, shifted by (dx, dy) and optionally turned to
    /// `rotation`, fits on the board.
    ///
    /// A mino fails if its column leaves `[0, WIDTH)`, its row reaches
    /// `HEIGHT`, or it lands on an occupied in-field cell. Minos above the top
    /// row are accepted.
    pub fn is_valid(&self, piece: &Tetromino, dx: i8, dy: i8, rotation: Option<i32>) -> bool {
        let rotation = rotation.unwrap_or(piece.rotation() as i32);
        piece.cells_at(rotation, dx, dy).all(|(px, py)| {
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Clear all full rows, compact the rest downwards and refill the top
    /// with empty rows. Returns the number of rows removed.
    ///
    /// Uses a two-pointer pass with zero allocation.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Write a piece into the grid and clear any rows it completes.
    ///
    /// Minos above the visible field are dropped silently. Returns the number
    /// of rows cleared, which is also added to [`Board::lines_cleared`].
    pub fn lock_piece(&mut self, piece: &Tetromino) -> u32 {
        for (px, py) in piece.cells() {
            self.set(px, py, Some(Block::Piece(piece.kind)));
        }

        let lines = self.clear_full_rows();
        self.lines_cleared += lines;
        lines
    }

    /// Push `lines` garbage rows in from the bottom.
    ///
    /// Each iteration drops the top row and appends a row of garbage with one
    /// hole, its column drawn independently from `rng`. The row count never
    /// changes; callers must move the active piece out of the way first.
    pub fn add_garbage(&mut self, lines: u32, rng: &mut SimpleRng) {
        for _ in 0..lines {
            let hole = rng.next_hole();
            self.cells.copy_within(WIDTH.., 0);

            let bottom = &mut self.cells[(HEIGHT - 1) * WIDTH..];
            bottom.fill(Some(Block::Garbage));
            bottom[hole] = None;
        }
    }

    /// Rows removed by line clears so far
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board and its line counter
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.lines_cleared = 0;
    }

    /// Build a board from text rows, top to bottom, for tests and fixtures.
    ///
    /// `.` is empty, `G` garbage, and any piece letter a locked mino of that
    /// kind. Missing rows at the top are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().enumerate().take(HEIGHT) {
            for (x, ch) in row.chars().enumerate().take(WIDTH) {
                let cell = match ch {
                    'G' | 'g' => Some(Block::Garbage),
                    other => {
                        let mut utf8 = [0u8; 4];
                        PieceKind::from_str(other.encode_utf8(&mut utf8)).map(Block::Piece)
                    }
                };
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
