//! GameView: maps game snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! A match is drawn as one block per player, left to right: the bordered
//! board followed by a side panel with the player's label, stats, next-piece
//! preview, incoming garbage and control hints.

use crate::core::{cell_offsets, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs to draw one player
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub label: &'a str,
    pub snapshot: &'a GameSnapshot,
    pub hints: &'a [&'a str],
    pub winner: bool,
}

/// Entries of the mode menu, in display order
pub const MENU_ITEMS: [&str; 2] = ["Single Player", "Battle"];

const PANEL_W: u16 = 20;
const PANEL_GAP: u16 = 2;
const PLAYER_GAP: u16 = 4;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const HEADING: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const GARBAGE: CellStyle = CellStyle::fg(Rgb::new(140, 140, 150)).on(BOARD_BG);
const WARNING: CellStyle = CellStyle::fg(Rgb::new(230, 90, 80)).bold();
const OVERLAY: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
const VICTORY: CellStyle = CellStyle::fg(Rgb::new(250, 210, 80)).bold();

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Width of one player's board plus side panel
    pub fn player_block_width(&self) -> u16 {
        self.frame_size().0 + PANEL_GAP + PANEL_W
    }

    /// Minimum viewport that shows `players` boards without clipping
    pub fn required_viewport(&self, players: usize) -> Viewport {
        let n = players.max(1) as u16;
        let (_, frame_h) = self.frame_size();
        Viewport::new(
            n * self.player_block_width() + (n - 1) * PLAYER_GAP,
            frame_h,
        )
    }

    /// Render every player side by side into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_match_into(&self, players: &[PlayerView<'_>], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let needed = self.required_viewport(players.len());
        let (_, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(needed.width) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let step = self.player_block_width() + PLAYER_GAP;
        for (i, player) in players.iter().enumerate() {
            let x = start_x.saturating_add(step.saturating_mul(i as u16));
            self.draw_player(fb, player, x, start_y);
        }

        if viewport.width < needed.width || viewport.height < needed.height {
            fb.put_str(0, 0, "Terminal too small, please enlarge", WARNING);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render_match(&self, players: &[PlayerView<'_>], viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_match_into(players, viewport, &mut fb);
        fb
    }

    /// Render the mode menu with `selected` highlighted.
    pub fn render_menu_into(&self, selected: usize, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let block_h: u16 = 9;
        let top = viewport.height.saturating_sub(block_h) / 2;
        let w = viewport.width;

        fb.put_str_centered(0, w, top, "T E T R I S", HEADING);
        fb.put_str_centered(0, w, top + 1, "single & battle", TEXT.dim());

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let y = top + 3 + i as u16;
            let active = i == selected;
            let marker = if active { '>' } else { ' ' };
            let line = format!("{} {}  {:<13}", marker, i + 1, item);
            let style = if active { VICTORY } else { TEXT };
            fb.put_str_centered(0, w, y, &line, style);
        }

        fb.put_str_centered(0, w, top + 6, "\u{2191}/\u{2193} select, Enter start", TEXT.dim());
        fb.put_str_centered(0, w, top + 7, "1 single, 2 battle", TEXT.dim());
        fb.put_str_centered(0, w, top + 8, "Esc / Ctrl-C quit", TEXT.dim());
    }

    pub fn render_menu(&self, selected: usize, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_menu_into(selected, viewport, &mut fb);
        fb
    }

    fn draw_player(&self, fb: &mut FrameBuffer, player: &PlayerView<'_>, x: u16, y: u16) {
        let snap = player.snapshot;
        let (frame_w, frame_h) = self.frame_size();

        fb.fill_rect(
            x + 1,
            y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::default().on(BOARD_BG),
        );
        self.draw_border(fb, x, y, frame_w, frame_h, BORDER);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                self.draw_board_cell(fb, x, y, col as i8, row as i8, *cell, false);
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            if ghost_y != active.y {
                let ghost = CellStyle::fg(Rgb::new(140, 140, 140)).on(BOARD_BG).dim();
                for (dx, dy) in cell_offsets(active.kind, active.rotation as i32) {
                    self.fill_board_cell(fb, x, y, active.x + dx, ghost_y + dy, '░', ghost);
                }
            }
        }

        if let Some(active) = snap.active {
            if !snap.game_over {
                for (dx, dy) in cell_offsets(active.kind, active.rotation as i32) {
                    let block = Some(Block::Piece(active.kind));
                    self.draw_board_cell(fb, x, y, active.x + dx, active.y + dy, block, true);
                }
            }
        }

        self.draw_side_panel(fb, player, x + frame_w + PANEL_GAP, y);

        if player.winner {
            self.draw_overlay_text(fb, x, y, frame_w, frame_h, "WINNER", VICTORY);
        } else if snap.game_over {
            self.draw_overlay_text(fb, x, y, frame_w, frame_h, "GAME OVER", OVERLAY);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        cell: Cell,
        bold: bool,
    ) {
        match cell {
            Some(Block::Piece(kind)) => {
                let style = CellStyle {
                    bold,
                    ..CellStyle::fg(piece_color(kind)).on(BOARD_BG)
                };
                self.fill_board_cell(fb, start_x, start_y, x, y, '█', style);
            }
            Some(Block::Garbage) => {
                self.fill_board_cell(fb, start_x, start_y, x, y, '▓', GARBAGE);
            }
            None => {
                let dot = CellStyle::fg(Rgb::new(90, 90, 100)).on(BOARD_BG).dim();
                self.fill_board_cell(fb, start_x, start_y, x, y, '·', dot);
            }
        }
    }

    /// Fill one board cell; cells outside the visible 10x20 grid are skipped.
    #[allow(clippy::too_many_arguments)]
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = start_x + 1 + (x as u16) * self.cell_w;
        let py = start_y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, player: &PlayerView<'_>, panel_x: u16, top: u16) {
        if panel_x >= fb.width() {
            return;
        }
        let snap = player.snapshot;
        let mut y = top;

        fb.put_str(panel_x, y, player.label, HEADING);
        y += 2;

        for (name, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, HEADING);
            fb.put_u32(panel_x + 7, y, value, TEXT);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "NEXT", HEADING);
        y += 1;
        self.draw_preview(fb, snap.next, panel_x, y);
        y += 3;

        fb.put_str(panel_x, y, "INCOMING", HEADING);
        y += 1;
        self.draw_garbage_meter(fb, snap.pending_garbage, panel_x, y);
        y += 2;

        for hint in player.hints {
            fb.put_str(panel_x, y, hint, TEXT.dim());
            y += 1;
        }
    }

    /// Draw `kind` in spawn rotation, trimmed to its occupied rows.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) {
        let shape = cell_offsets(kind, 0);
        let min_row = shape.iter().map(|&(_, r)| r).min().unwrap_or(0);
        let min_col = shape.iter().map(|&(c, _)| c).min().unwrap_or(0);
        let style = CellStyle::fg(piece_color(kind)).bold();
        for (col, row) in shape {
            let px = x + ((col - min_col) as u16) * 2;
            let py = y + (row - min_row) as u16;
            fb.put_str(px, py, "██", style);
        }
    }

    fn draw_garbage_meter(&self, fb: &mut FrameBuffer, pending: u32, x: u16, y: u16) {
        if pending == 0 {
            fb.put_str(x, y, "-", TEXT.dim());
            return;
        }
        let shown = pending.min(10) as u16;
        fb.fill_rect(x, y, shown, 1, '▮', WARNING);
        fb.put_u32(x + shown + 1, y, pending, WARNING);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
        style: CellStyle,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        fb.put_str_centered(start_x, frame_w, mid_y, text, style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
