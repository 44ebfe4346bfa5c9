//! TerminalRenderer: puts frames on the terminal.
//!
//! The renderer remembers what the terminal shows. Each row is compared with
//! the new frame and only the span between its first and last changed glyph
//! is rewritten. A falling piece touches a handful of rows per frame, so most
//! rows emit nothing. Colors come from the [`Ink`] palette here.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::fb::{FrameBuffer, Glyph, Ink};
use crate::types::PieceKind;

const WELL_BG: Color = rgb(30, 30, 40);
const SCREEN_BG: Color = rgb(0, 0, 0);
const TEXT: Color = rgb(200, 200, 200);
const BRIGHT: Color = rgb(255, 255, 255);

pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    shown: FrameBuffer,
    /// False until the terminal holds a known frame
    in_sync: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: FrameBuffer::new(0, 0),
            in_sync: false,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.in_sync = false;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next frame, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.in_sync = false;
    }

    /// Bring the terminal up to date with `frame`.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        if self.in_sync && self.shown.same_size(frame) {
            encode_changes(&self.shown, frame, &mut self.buf)?;
        } else {
            encode_frame(frame, &mut self.buf)?;
        }

        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.out.flush()?;
        }
        self.shown.copy_from(frame);
        self.in_sync = true;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

/// Clear the screen and paint every row of `frame`.
pub fn encode_frame(frame: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let mut ink = None;
    for y in 0..frame.height() {
        queue!(out, cursor::MoveTo(0, y))?;
        paint(out, frame.row(y), &mut ink)?;
    }
    finish(out, ink)
}

/// Repaint the changed span of each row. Writes nothing when the frames match.
pub fn encode_changes(
    shown: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut ink = None;
    for y in 0..next.height() {
        let row = next.row(y);
        if let Some((first, last)) = changed_span(shown.row(y), row) {
            queue!(out, cursor::MoveTo(first as u16, y))?;
            paint(out, &row[first..=last], &mut ink)?;
        }
    }
    finish(out, ink)
}

/// First and last column where the rows differ.
fn changed_span(old: &[Glyph], new: &[Glyph]) -> Option<(usize, usize)> {
    let differs = |(a, b): (&Glyph, &Glyph)| a != b;
    let first = old.iter().zip(new).position(differs)?;
    let last = old.iter().zip(new).rposition(differs)?;
    Some((first, last))
}

fn paint(out: &mut Vec<u8>, glyphs: &[Glyph], current: &mut Option<Ink>) -> io::Result<()> {
    for glyph in glyphs {
        if *current != Some(glyph.ink) {
            set_ink(out, glyph.ink)?;
            *current = Some(glyph.ink);
        }
        queue!(out, Print(glyph.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>, ink: Option<Ink>) -> io::Result<()> {
    if ink.is_some() {
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}

fn set_ink(out: &mut Vec<u8>, ink: Ink) -> io::Result<()> {
    let (fg, bg) = colors(ink);
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(fg),
        SetBackgroundColor(bg)
    )?;
    match ink {
        Ink::Flash | Ink::Piece(_) | Ink::Label | Ink::Banner => {
            queue!(out, SetAttribute(Attribute::Bold))
        }
        Ink::Well | Ink::Ghost | Ink::Spent(_) => queue!(out, SetAttribute(Attribute::Dim)),
        Ink::Blank | Ink::Frame | Ink::Value => Ok(()),
    }
}

fn colors(ink: Ink) -> (Color, Color) {
    match ink {
        Ink::Blank | Ink::Frame | Ink::Value => (TEXT, SCREEN_BG),
        Ink::Flash | Ink::Banner | Ink::Label => (BRIGHT, SCREEN_BG),
        Ink::Well => (rgb(90, 90, 100), WELL_BG),
        Ink::Ghost => (rgb(140, 140, 140), WELL_BG),
        Ink::Piece(kind) => (piece_color(kind), WELL_BG),
        Ink::Spent(kind) => (piece_color(kind), SCREEN_BG),
    }
}

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => rgb(80, 220, 220),
        PieceKind::O => rgb(240, 220, 80),
        PieceKind::T => rgb(200, 120, 220),
        PieceKind::S => rgb(100, 220, 120),
        PieceKind::Z => rgb(220, 80, 80),
        PieceKind::J => rgb(80, 120, 220),
        PieceKind::L => rgb(255, 165, 0),
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
