#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod rules;
pub mod card;
pub mod covering;
pub mod board;
pub mod deal;
pub mod events;
pub mod session;

pub mod engine {
    pub mod moves;
    pub mod undo;
}

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Board;
pub use crate::card::{Card, CardId};
pub use crate::covering::{CoverMap, CoverStrategy};
pub use crate::deal::{build_board, load_deal_from_json, Deal, DealEntry};
pub use crate::engine::moves::{attempt_draw_top, attempt_tableau_match, MoveOutcome, MoveRejection};
pub use crate::engine::undo::{CardSnapshot, StepKind, UndoLog, UndoReport, UndoStep};
pub use crate::events::{ChannelSink, EventSink, GameEvent, NullSink};
pub use crate::rules::can_match;
pub use crate::session::{Clock, GameSession, MonotonicClock, SessionConfig, UndoRejection};
pub use crate::types::{Face, GamePhase, Pile, Pos, Suit};
