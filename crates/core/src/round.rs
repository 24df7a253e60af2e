//! Round module - the round controller and its per-tick state machine
//!
//! A [`Round`] owns the board, the active piece, the bag and every counter.
//! It is advanced by an external fixed-rate scheduler calling [`Round::tick`]
//! and fed abstract [`Command`]s through [`Round::enqueue_command`].
//!
//! Each tick, while running:
//!
//! 1. Drain the command queue in FIFO order and dispatch every command.
//! 2. Advance the frame counter and apply gravity every `drop_interval` frames.
//! 3. If the piece rests on its shadow, start or check the lock timer; lock
//!    once `lock_delay` frames have passed since it started.
//! 4. Expire the transient message after `message_life` frames.
//!
//! Every spawn is followed by a collision check; a piece that cannot occupy
//! its spawn anchor ends the round.

use std::collections::VecDeque;

use crate::bag::PieceBag;
use crate::board::Board;
use crate::events::RoundEvent;
use crate::piece::ActivePiece;
use crate::scoring::{is_t_spin, score_clear};
use crate::settings::GameSettings;
use crate::shapes::ShapeCatalog;
use crate::snapshot::{ActiveSnapshot, RoundSnapshot};
use crate::types::{Cell, Command, PieceKind, RotateDir, Rotation, RoundPhase};

/// Text shown when the round ends
pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// One game from first spawn to game over
#[derive(Debug, Clone)]
pub struct Round {
    settings: GameSettings,
    shapes: ShapeCatalog,
    board: Board,
    bag: PieceBag,
    active: ActivePiece,
    held: Option<PieceKind>,
    /// Hold already used by the current piece
    hold_used: bool,
    /// Commands waiting for the next running tick
    commands: VecDeque<Command>,
    frames: u64,
    /// Frame of the last gravity step
    drop_timer: u64,
    /// Frame the piece started resting, if it is resting
    lock_timer: Option<u64>,
    score: u32,
    lines: u32,
    /// Consecutive clearing locks
    ren: u32,
    message: Option<String>,
    /// Frame the message was shown
    message_at: u64,
    phase: RoundPhase,
    events: Vec<RoundEvent>,
    seed: u64,
}

impl Round {
    /// Start a round on an empty board with a deterministic piece sequence.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let board = Board::new(settings.rows, settings.cols);
        Self::with_board(settings, seed, board)
    }

    /// Start a round seeded from OS entropy.
    pub fn with_entropy(settings: GameSettings) -> Self {
        Self::new(settings, rand::random())
    }

    /// Start a round on a prepared board.
    ///
    /// The board's dimensions replace `settings.rows` and `settings.cols`.
    /// The first piece spawns immediately, so a board whose spawn area is
    /// occupied yields a round that is already over.
    ///
    /// # Panics
    ///
    /// Panics with the [`SettingsError`](crate::SettingsError) text if the
    /// settings do not pass [`GameSettings::validate`].
    pub fn with_board(mut settings: GameSettings, seed: u64, board: Board) -> Self {
        settings.rows = board.rows();
        settings.cols = board.cols();
        if let Err(e) = settings.validate() {
            panic!("cannot start round: {e}");
        }

        let mut bag = PieceBag::new(seed, settings.lookahead);
        let first = bag.next_kind();
        let active = ActivePiece::spawn(first, settings.spawn());

        let mut round = Self {
            shapes: ShapeCatalog::standard(),
            board,
            bag,
            active,
            held: None,
            hold_used: false,
            commands: VecDeque::new(),
            frames: 0,
            drop_timer: 0,
            lock_timer: None,
            score: 0,
            lines: 0,
            ren: 0,
            message: None,
            message_at: 0,
            phase: RoundPhase::Running,
            events: Vec::new(),
            seed,
            settings,
        };
        round.events.push(RoundEvent::Spawned { kind: first });
        round.check_alive();
        round
    }

    /// Throw the round away and start over on an empty board.
    ///
    /// The settings are kept and the seed advances, so consecutive restarts
    /// play different sequences. Undrained events survive the restart.
    pub fn restart(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        let next_seed = self.seed.wrapping_add(1);
        *self = Self::new(self.settings.clone(), next_seed);
        events.append(&mut self.events);
        self.events = events;
    }

    /// Queue a command for the next running tick.
    ///
    /// Commands are kept across pauses. Once the round is over they are dropped.
    pub fn enqueue_command(&mut self, cmd: Command) {
        if self.phase == RoundPhase::GameOver {
            return;
        }
        self.commands.push_back(cmd);
    }

    /// Switch between running and paused. No effect once the round is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RoundPhase::Running => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Running,
            RoundPhase::GameOver => return,
        };
        self.events.push(RoundEvent::PauseToggled {
            paused: self.phase == RoundPhase::Paused,
        });
    }

    /// Advance the round by one logic tick.
    pub fn tick(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }

        while let Some(cmd) = self.commands.pop_front() {
            self.dispatch(cmd);
            if self.phase == RoundPhase::GameOver {
                self.commands.clear();
                return;
            }
        }

        self.frames += 1;

        // Gravity
        if self.frames - self.drop_timer >= u64::from(self.settings.drop_interval) {
            self.active.try_move(&self.shapes, &self.board, 1, 0);
            self.drop_timer = self.frames;
        }

        // Lock delay
        if self.active.is_resting(&self.shapes, &self.board) {
            match self.lock_timer {
                Some(started)
                    if self.frames - started >= u64::from(self.settings.lock_delay) =>
                {
                    self.lock_timer = None;
                    self.drop_and_clear();
                    self.spawn_next();
                    if self.phase == RoundPhase::GameOver {
                        return;
                    }
                }
                Some(_) => {}
                None => self.lock_timer = Some(self.frames),
            }
        } else {
            self.lock_timer = None;
        }

        if self.message.is_some()
            && self.frames - self.message_at >= u64::from(self.settings.message_life)
        {
            self.message = None;
        }
    }

    fn dispatch(&mut self, cmd: Command) {
        match cmd {
            Command::MoveLeft => {
                self.active.try_move(&self.shapes, &self.board, 0, -1);
            }
            Command::MoveRight => {
                self.active.try_move(&self.shapes, &self.board, 0, 1);
            }
            Command::SoftDrop => {
                self.active.try_move(&self.shapes, &self.board, 1, 0);
            }
            Command::RotateLeft => self.rotate(RotateDir::Left),
            Command::RotateRight => self.rotate(RotateDir::Right),
            Command::Hold => self.hold(),
            Command::HardDrop => {
                self.lock_timer = None;
                self.drop_and_clear();
                self.spawn_next();
            }
        }
    }

    fn rotate(&mut self, dir: RotateDir) {
        let kicks = self.settings.kick_set.offsets();
        self.active.rotate(&self.shapes, &self.board, dir, kicks);
    }

    /// Swap the active kind into the hold slot, once per piece.
    fn hold(&mut self) {
        if self.hold_used {
            return;
        }

        let stashed = self.active.kind;
        let next = match self.held.replace(stashed) {
            Some(kind) => kind,
            None => self.bag.next_kind(),
        };
        self.active = ActivePiece::spawn(next, self.settings.spawn());
        self.hold_used = true;
        self.lock_timer = None;

        self.events.push(RoundEvent::Held {
            stashed,
            active: next,
        });
        self.check_alive();
    }

    /// Lock the active piece at its shadow, clear rows and score.
    fn drop_and_clear(&mut self) {
        self.active.hard_drop_resolve(&self.shapes, &mut self.board);
        self.hold_used = false;

        // Corners are tested before the cleared rows collapse
        let t_spin = is_t_spin(&self.active, &self.board);
        let cleared = self.board.clear_full_rows().len();

        let mut points = 0;
        if cleared > 0 {
            self.ren += 1;
            let result = score_clear(cleared, self.ren, t_spin);
            points = result.points;
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            if let Some(message) = result.message {
                self.show_message(message.to_string());
            }
        } else {
            self.ren = 0;
        }

        self.events.push(RoundEvent::Locked {
            kind: self.active.kind,
            rotation: self.active.rotation,
            x: self.active.x,
            y: self.active.y,
            lines_cleared: cleared as u8,
            t_spin,
            points,
        });
    }

    /// Replace the active piece with the next kind from the bag.
    fn spawn_next(&mut self) {
        let kind = self.bag.next_kind();
        self.active = ActivePiece::spawn(kind, self.settings.spawn());
        self.events.push(RoundEvent::Spawned { kind });
        self.check_alive();
    }

    fn check_alive(&mut self) {
        if self.active.is_alive(&self.shapes, &self.board) {
            return;
        }
        self.phase = RoundPhase::GameOver;
        self.commands.clear();
        self.show_message(GAME_OVER_TEXT.to_string());
        self.events.push(RoundEvent::GameOver {
            score: self.score,
            lines: self.lines,
        });
    }

    fn show_message(&mut self, text: String) {
        self.events.push(RoundEvent::Message { text: text.clone() });
        self.message = Some(text);
        self.message_at = self.frames;
    }

    /// Next `n` kinds the bag will hand out.
    pub fn peek_upcoming(&self, n: usize) -> Vec<PieceKind> {
        self.bag.peek(n)
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Locked cells as a row-major matrix.
    pub fn board_snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.to_rows()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `(kind, rotation, x, y)` of the falling piece
    pub fn active_state(&self) -> (PieceKind, Rotation, i8, i8) {
        let p = &self.active;
        (p.kind, p.rotation, p.x, p.y)
    }

    /// Anchor the active piece would lock at if hard-dropped now.
    pub fn shadow_position(&self) -> (i8, i8) {
        self.active.shadow_position(&self.shapes, &self.board)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn ren(&self) -> u32 {
        self.ren
    }

    /// Transient message, if one is showing.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RoundPhase::Paused
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Running ticks so far; paused ticks do not count.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lock_timer_started(&self) -> bool {
        self.lock_timer.is_some()
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        let shadow = self.shadow_position();
        out.active = Some(ActiveSnapshot::from(self.active));
        out.active_cells = self.active.cells(&self.shapes);
        out.shadow = shadow;
        out.shadow_cells = self.active.cells_at(&self.shapes, shadow.0, shadow.1);

        out.held = self.held;
        out.hold_used = self.hold_used;
        out.upcoming.clear();
        out.upcoming
            .extend(self.bag.peek(self.settings.lookahead));

        out.score = self.score;
        out.lines = self.lines;
        out.ren = self.ren;
        out.message.clone_from(&self.message);
        out.phase = self.phase;
        out.frames = self.frames;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn force_active(&mut self, kind: PieceKind) {
        self.active = ActivePiece::spawn(kind, self.settings.spawn());
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(GameSettings::default(), 1)
    }
}
