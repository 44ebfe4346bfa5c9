//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Ink};
use crate::types::{Lifecycle, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Cosmetic state owned by the driver, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewEffects {
    /// Rows cleared by the lock currently flashing; 0 when idle
    pub clear_flash_lines: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Narrowest side panel worth drawing.
const PANEL_MIN_WIDTH: u16 = 12;
/// Column of the numbers in the stats block.
const STAT_COLUMN: u16 = 8;

const MINO: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

/// Renders the well, falling piece and side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps minos roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    left: u16,
    top: u16,
    frame_w: u16,
    frame_h: u16,
    /// Left column of the side panel, if it fits
    panel: Option<u16>,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size of the bordered board frame.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, ViewEffects::default(), viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: ViewEffects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height);
        let layout = self.layout(viewport);

        let frame_ink = if effects.clear_flash_lines > 0 {
            Ink::Flash
        } else {
            Ink::Frame
        };
        draw_frame(fb, layout, frame_ink);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let glyph = match cell {
                    Some(kind) => Glyph::new(MINO, Ink::Piece(*kind)),
                    None => Glyph::new(EMPTY, Ink::Well),
                };
                self.paint_cell(fb, layout, x as i8, y as i8, glyph);
            }
        }

        for (x, y) in snap.ghost.into_iter().flatten() {
            self.paint_cell(fb, layout, x, y, Glyph::new(GHOST, Ink::Ghost));
        }
        if let Some(active) = snap.active {
            let glyph = Glyph::new(MINO, Ink::Piece(active.kind));
            for (x, y) in active.cells {
                self.paint_cell(fb, layout, x, y, glyph);
            }
        }

        if let Some(panel_x) = layout.panel {
            draw_panel(fb, snap, effects, panel_x, layout.top);
        }

        let banner = match snap.lifecycle {
            Lifecycle::Idle => Some("READY"),
            Lifecycle::Paused => Some("PAUSED"),
            Lifecycle::GameOver => Some("GAME OVER"),
            Lifecycle::Running => None,
        };
        if let Some(text) = banner {
            let text_w = text.chars().count() as u16;
            let x = layout.left + layout.frame_w.saturating_sub(text_w) / 2;
            fb.text(x, layout.top + layout.frame_h / 2, text, Ink::Banner);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let (frame_w, frame_h) = self.frame_size();
        let left = viewport.width.saturating_sub(frame_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let panel_x = left.saturating_add(frame_w).saturating_add(2);
        let panel = (viewport.width.saturating_sub(panel_x) >= PANEL_MIN_WIDTH).then_some(panel_x);

        Layout {
            left,
            top,
            frame_w,
            frame_h,
            panel,
        }
    }

    /// Paint one board cell. Cells off the board (spawn rows above it) are skipped.
    fn paint_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: i8, y: i8, glyph: Glyph) {
        let (Ok(col), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if col >= BOARD_WIDTH as u16 || row >= BOARD_HEIGHT as u16 {
            return;
        }
        fb.fill(
            layout.left + 1 + col * self.cell_w,
            layout.top + 1 + row * self.cell_h,
            self.cell_w,
            self.cell_h,
            glyph,
        );
    }
}

fn draw_frame(fb: &mut FrameBuffer, layout: Layout, ink: Ink) {
    let Layout {
        left,
        top,
        frame_w: w,
        frame_h: h,
        ..
    } = layout;
    let (right, bottom) = (left + w - 1, top + h - 1);

    fb.fill(left, top, w, 1, Glyph::new('─', ink));
    fb.fill(left, bottom, w, 1, Glyph::new('─', ink));
    fb.fill(left, top, 1, h, Glyph::new('│', ink));
    fb.fill(right, top, 1, h, Glyph::new('│', ink));
    fb.set(left, top, Glyph::new('┌', ink));
    fb.set(right, top, Glyph::new('┐', ink));
    fb.set(left, bottom, Glyph::new('└', ink));
    fb.set(right, bottom, Glyph::new('┘', ink));
}

fn draw_panel(
    fb: &mut FrameBuffer,
    snap: &GameSnapshot,
    effects: ViewEffects,
    x: u16,
    top: u16,
) {
    let mut y = top;
    for (name, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
        fb.text(x, y, name, Ink::Label);
        fb.number(x, y + 1, value, Ink::Value);
        y += 3;
    }

    fb.text(x, y, "NEXT", Ink::Label);
    draw_preview(fb, x, y + 1, Ink::Piece(snap.next));
    y += 4;

    fb.text(x, y, "HOLD", Ink::Label);
    match snap.held {
        Some(kind) if snap.can_hold => draw_preview(fb, x, y + 1, Ink::Piece(kind)),
        Some(kind) => draw_preview(fb, x, y + 1, Ink::Spent(kind)),
        None => {
            fb.text(x, y + 1, "-", Ink::Value);
        }
    }
    y += 4;

    fb.text(x, y, "PIECES", Ink::Label);
    fb.number(x + STAT_COLUMN, y, snap.metrics.pieces_placed, Ink::Value);
    fb.text(x, y + 1, "TETRIS", Ink::Label);
    fb.number(x + STAT_COLUMN, y + 1, snap.metrics.tetris_clears, Ink::Value);
    fb.text(x, y + 2, "TIME", Ink::Label);
    draw_clock(fb, x + STAT_COLUMN, y + 2, snap.play_time_ms);

    if let Some(name) = clear_name(effects.clear_flash_lines) {
        fb.text(x, y + 4, name, Ink::Flash);
    }
}

/// A piece in its spawn rotation, two columns per mino.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, ink: Ink) {
    let kind = match ink {
        Ink::Piece(kind) | Ink::Spent(kind) => kind,
        _ => return,
    };
    for (dx, dy) in get_shape(kind, 0) {
        fb.fill(x + dx as u16 * 2, y + dy as u16, 2, 1, Glyph::new(MINO, ink));
    }
}

/// `m:ss` of play time.
fn draw_clock(fb: &mut FrameBuffer, x: u16, y: u16, ms: u64) {
    let secs = ms / 1000;
    let minutes = u32::try_from(secs / 60).unwrap_or(u32::MAX);
    let seconds = (secs % 60) as u32;

    let colon = fb.number(x, y, minutes, Ink::Value);
    fb.text(colon, y, if seconds < 10 { ":0" } else { ":" }, Ink::Value);
    let at = colon + if seconds < 10 { 2 } else { 1 };
    fb.number(at, y, seconds, Ink::Value);
}

fn clear_name(lines: u32) -> Option<&'static str> {
    match lines {
        0 => None,
        1 => Some("SINGLE"),
        2 => Some("DOUBLE"),
        3 => Some("TRIPLE"),
        _ => Some("TETRIS!"),
    }
}
