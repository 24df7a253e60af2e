//! GameView: draws a `RoundSnapshot` into a framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::RoundSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, RoundPhase};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal lines.
    cell_h: u16,
    /// Upcoming pieces listed in the side panel
    preview: usize,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells look roughly square
        Self {
            cell_w: 2,
            cell_h: 1,
            preview: 2,
        }
    }
}

/// Screen placement of the well for one frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    col: u16,
    line: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_preview(mut self, preview: usize) -> Self {
        self.preview = preview;
        self
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &RoundSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::plain(SCREEN_BG, SCREEN_BG).glyph(' '));

        let well_w = snap.cols as u16 * self.cell_w;
        let well_h = snap.rows as u16 * self.cell_h;
        let frame = Frame {
            col: viewport.width.saturating_sub(well_w + 2) / 2,
            line: viewport.height.saturating_sub(well_h + 2) / 2,
            w: well_w + 2,
            h: well_h + 2,
        };

        self.draw_border(fb, frame);

        let empty = Style::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        for x in 0..snap.rows as i8 {
            for y in 0..snap.cols as i8 {
                match snap.cell(x, y) {
                    Some(kind) => self.fill_cell(fb, frame, x, y, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, x, y, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            if snap.phase != RoundPhase::GameOver {
                let shadow = Style::plain(Rgb::new(140, 140, 140), WELL_BG).dim();
                for &(x, y) in &snap.shadow_cells {
                    self.fill_cell(fb, frame, x, y, '░', shadow);
                }
            }
            for &(x, y) in &snap.active_cells {
                self.fill_cell(fb, frame, x, y, '█', piece_style(active.kind).bold());
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            RoundPhase::Paused => self.draw_overlay(fb, frame, "PAUSED"),
            RoundPhase::GameOver => self.draw_overlay(fb, frame, "GAME OVER"),
            RoundPhase::Running => {}
        }
    }

    /// Render into a fresh framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let (right, bottom) = (f.col + f.w - 1, f.line + f.h - 1);

        fb.put_char(f.col, f.line, '┌', style);
        fb.put_char(right, f.line, '┐', style);
        fb.put_char(f.col, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for c in f.col + 1..right {
            fb.put_char(c, f.line, '─', style);
            fb.put_char(c, bottom, '─', style);
        }
        for l in f.line + 1..bottom {
            fb.put_char(f.col, l, '│', style);
            fb.put_char(right, l, '│', style);
        }
    }

    /// Fill board cell `(x, y)`; cells outside the board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, ch: char, style: Style) {
        if x < 0 || y < 0 {
            return;
        }
        let col = f.col + 1 + y as u16 * self.cell_w;
        let line = f.line + 1 + x as u16 * self.cell_h;
        if col + self.cell_w > f.col + f.w - 1 || line + self.cell_h > f.line + f.h - 1 {
            return;
        }
        fb.fill_rect(col, line, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, vp: Viewport, f: Frame) {
        let col = f.col.saturating_add(f.w).saturating_add(2);
        if col >= vp.width || vp.width - col < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut line = f.line;
        for (name, n) in [("SCORE", snap.score), ("LINES", snap.lines), ("REN", snap.ren)] {
            fb.put_str(col, line, name, label);
            fb.put_u32(col, line + 1, n, value);
            line += 3;
        }

        fb.put_str(col, line, "HOLD", label);
        let held = snap.held.map(|k| k.as_str()).unwrap_or("-");
        let held_style = if snap.hold_used { value.dim() } else { value };
        fb.put_str(col, line + 1, &held.to_ascii_uppercase(), held_style);
        line += 3;

        fb.put_str(col, line, "NEXT", label);
        line += 1;
        for kind in snap.upcoming.iter().take(self.preview) {
            fb.put_str(col, line, &kind.as_str().to_ascii_uppercase(), piece_style(*kind));
            line += 1;
        }

        if let Some(msg) = snap.message.as_deref() {
            if snap.phase != RoundPhase::GameOver {
                let style = Style::plain(Rgb::new(255, 220, 120), SCREEN_BG).bold();
                fb.put_str(col, line + 1, msg, style);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let text_w = text.chars().count() as u16;
        let col = f.col.saturating_add(f.w.saturating_sub(text_w) / 2);
        let style = Style::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(col, f.line + f.h / 2, text, style);
    }
}

fn piece_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    Style::plain(fg, WELL_BG)
}
