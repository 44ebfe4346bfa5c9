//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `blockfall-term`. The engine only sees millisecond timestamps taken from a
//! monotonic clock started here.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameConfig, GameSnapshot, GameState};
use blockfall::input::{should_quit, InputHandler};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, ViewEffects, Viewport};
use blockfall::types::LINE_CLEAR_FLASH_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    logging::init_file_or_sink(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        tracing::warn!(error = %err, "failed to restore terminal");
    }
    result
}

/// Driver-side line-clear flash.
#[derive(Debug, Default)]
struct ClearFlash {
    lines: u32,
    until_ms: u64,
}

impl ClearFlash {
    fn trigger(&mut self, lines: u32, now_ms: u64) {
        self.lines = lines;
        self.until_ms = now_ms + u64::from(LINE_CLEAR_FLASH_MS);
    }

    fn effects(&self, now_ms: u64) -> ViewEffects {
        ViewEffects {
            clear_flash_lines: if now_ms < self.until_ms { self.lines } else { 0 },
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game_state = GameState::new(config);
    game_state.start(now_ms());

    let view = GameView::default();
    let mut input_handler = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut flash = ClearFlash::default();

    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let now = now_ms();
        game_state.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_effects(&snap, flash.effects(now), Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    let now = now_ms();
                    match key.kind {
                        KeyEventKind::Press => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            if let Some(command) = input_handler.handle_key_press(key.code, now) {
                                game_state.apply(command, now);
                            }
                        }
                        KeyEventKind::Repeat => {
                            // Keeps the key alive; the engine paces repeats itself.
                            input_handler.handle_key_press(key.code, now);
                        }
                        KeyEventKind::Release => {
                            if let Some(command) = input_handler.handle_key_release(key.code) {
                                game_state.apply(command, now);
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let now = now_ms();

            for command in input_handler.update(now) {
                game_state.apply(command, now);
            }
            game_state.tick(now);
        }

        if let Some(event) = game_state.take_last_event() {
            if event.lines_cleared > 0 {
                flash.trigger(event.lines_cleared, now_ms());
            }
        }
    }
}
