//! Terminal runner (default binary).
//!
//! Fixed-timestep scheduler: input is polled with crossterm until the next
//! tick is due, then the round advances by exactly one tick, drained events
//! go to the optional JSONL log, and the frame is redrawn.
//!
//! Configuration comes from `BLOCKFALL_CONFIG` (JSON settings file) and the
//! event log from `BLOCKFALL_LOG_PATH`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::{GameSettings, Round, RoundSnapshot};
use blockfall::event_log::EventLog;
use blockfall::input::{map_key, should_quit, KeyAction};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let settings = GameSettings::from_env().context("loading settings")?;
    let mut log = EventLog::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, settings, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(log) = log.as_mut() {
        log.flush()?;
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    settings: GameSettings,
    mut log: Option<&mut EventLog<std::io::BufWriter<std::fs::File>>>,
) -> Result<()> {
    let tick = Duration::from_secs(1) / settings.tick_rate.max(1);
    let view = GameView::default().with_preview(settings.lookahead);
    let mut round = Round::with_entropy(settings);

    let mut snap = RoundSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick = Instant::now() + tick;

    loop {
        round.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next tick is due.
        while let Some(timeout) = next_tick.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match map_key(key) {
                        Some(KeyAction::Command(cmd)) => round.enqueue_command(cmd),
                        Some(KeyAction::Pause) => round.toggle_pause(),
                        Some(KeyAction::Restart) => round.restart(),
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        round.tick();
        next_tick += tick;
        // Don't try to catch up after a stall
        let now = Instant::now();
        if next_tick < now {
            next_tick = now + tick;
        }

        let events = round.drain_events();
        if let Some(log) = log.as_deref_mut() {
            log.append_all(round.frames(), &events)?;
        }
    }
}
