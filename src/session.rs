use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use crate::board::Board;
use crate::card::CardId;
use crate::covering::CoverStrategy;
use crate::deal::{build_board, Deal};
use crate::engine::moves::{self, MoveOutcome, MoveRejection};
use crate::engine::undo::UndoLog;
use crate::events::{EventSink, GameEvent};
use crate::types::Pile;

/// Monotonic time source for the undo cooldown; tests substitute a
/// manually advanced clock.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// `Instant`-backed clock measured from session creation.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Most recent reversible moves retained for undo.
    pub undo_depth: usize,
    /// Minimum spacing between two accepted undos.
    pub undo_cooldown: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_depth: 100,
            undo_cooldown: Duration::from_millis(800),
        }
    }
}

/// Why an undo request was refused. Refusals change nothing except that
/// `NothingToUndo` also emits its namesake event as user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoRejection {
    AnimationInFlight,
    CooldownActive,
    NothingToUndo,
}

impl fmt::Display for UndoRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UndoRejection::AnimationInFlight => "an animation is still in flight",
            UndoRejection::CooldownActive => "undo cooldown has not elapsed",
            UndoRejection::NothingToUndo => "no moves to undo",
        };
        f.write_str(msg)
    }
}

/// Orchestration facade over one play session: owns the board, the undo
/// log, the event sink, and the two presentation gates (the animation
/// reentrancy flag and the undo cooldown).
///
/// Successful moves and undos set the animation flag; the presentation
/// reports its animations finished via `set_animation_playing(false)`,
/// which reopens the command surface.
pub struct GameSession {
    board: Option<Board>,
    undo: UndoLog,
    sink: Box<dyn EventSink>,
    clock: Box<dyn Clock>,
    config: SessionConfig,
    animation_playing: bool,
    last_undo: Option<Duration>,
}

impl GameSession {
    pub fn new(config: SessionConfig, sink: Box<dyn EventSink>) -> Self {
        Self::with_clock(config, sink, Box::new(MonotonicClock::default()))
    }

    pub fn with_clock(config: SessionConfig, sink: Box<dyn EventSink>, clock: Box<dyn Clock>) -> Self {
        Self {
            board: None,
            undo: UndoLog::new(config.undo_depth),
            sink,
            clock,
            config,
            animation_playing: false,
            last_undo: None,
        }
    }

    /// Replace any running game with a fresh board built from `deal`.
    /// Clears the undo history and reopens the command surface.
    pub fn start_deal(&mut self, deal: &Deal, strategy: CoverStrategy) -> Result<(), String> {
        let board = build_board(deal, strategy)?;
        self.board = Some(board);
        self.undo.clear();
        self.undo.set_max_steps(self.config.undo_depth);
        self.animation_playing = false;
        self.last_undo = None;
        Ok(())
    }

    #[inline]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[inline]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Route a click by the card's pile: tableau cards try to match,
    /// stack and discard cards go down the draw path.
    pub fn handle_card_click(&mut self, id: CardId) -> Result<MoveOutcome, MoveRejection> {
        let Some(board) = self.board.as_ref() else {
            return Err(MoveRejection::UnknownCard);
        };
        let Some(card) = board.card(id) else {
            return Err(MoveRejection::UnknownCard);
        };
        let pile = card.pile();
        match pile {
            Pile::Tableau => self.attempt_tableau_match(id),
            Pile::Stack | Pile::Discard => self.attempt_draw_top(id),
        }
    }

    pub fn attempt_tableau_match(&mut self, id: CardId) -> Result<MoveOutcome, MoveRejection> {
        if self.animation_playing {
            debug!("click on {id} dropped: animation in flight");
            return Err(MoveRejection::AnimationInFlight);
        }
        let Some(board) = self.board.as_mut() else {
            return Err(MoveRejection::UnknownCard);
        };
        let outcome = moves::attempt_tableau_match(board, &mut self.undo, self.sink.as_ref(), id)?;
        self.animation_playing = true;
        Ok(outcome)
    }

    pub fn attempt_draw_top(&mut self, id: CardId) -> Result<MoveOutcome, MoveRejection> {
        if self.animation_playing {
            debug!("click on {id} dropped: animation in flight");
            return Err(MoveRejection::AnimationInFlight);
        }
        let Some(board) = self.board.as_mut() else {
            return Err(MoveRejection::UnknownCard);
        };
        let outcome = moves::attempt_draw_top(board, &mut self.undo, self.sink.as_ref(), id)?;
        self.animation_playing = true;
        Ok(outcome)
    }

    /// Undo the most recent move. Gated by the animation flag, then the
    /// cooldown (reset on each accepted undo), then history. Success
    /// emits `UndoApplied` and sets the animation flag.
    pub fn undo(&mut self) -> Result<(), UndoRejection> {
        if self.animation_playing {
            debug!("undo dropped: animation in flight");
            return Err(UndoRejection::AnimationInFlight);
        }
        let now = self.clock.now();
        if let Some(last) = self.last_undo {
            if now.saturating_sub(last) < self.config.undo_cooldown {
                debug!("undo dropped: cooldown active");
                return Err(UndoRejection::CooldownActive);
            }
        }
        let Some(board) = self.board.as_mut() else {
            self.sink.emit(GameEvent::NothingToUndo);
            return Err(UndoRejection::NothingToUndo);
        };
        match self.undo.undo_against(board) {
            Some(report) => {
                self.last_undo = Some(now);
                self.animation_playing = true;
                self.sink.emit(GameEvent::UndoApplied {
                    cards: report.affected,
                });
                Ok(())
            }
            None => {
                self.sink.emit(GameEvent::NothingToUndo);
                Err(UndoRejection::NothingToUndo)
            }
        }
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    #[inline]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Presentation write-back: animations done (or starting). While
    /// `true`, every move and undo request is refused.
    #[inline]
    pub fn set_animation_playing(&mut self, playing: bool) {
        self.animation_playing = playing;
    }

    #[inline]
    pub fn is_animation_playing(&self) -> bool {
        self.animation_playing
    }
}
