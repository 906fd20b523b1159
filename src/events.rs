use crossbeam_channel::Sender;

use crate::card::CardId;
use crate::types::Pos;

/// State-change notifications for the presentation layer. Fire and
/// forget: the engine never waits on, or learns anything from, a
/// consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A card left its pile for the discard top; `origin` is its
    /// pre-move position, for travel animations.
    CardMovedToDiscard { card: CardId, origin: Pos },
    /// One undo step was applied; both touched cards are listed.
    UndoApplied { cards: [CardId; 2] },
    /// Undo was requested with no history left.
    NothingToUndo,
    /// The tableau is empty.
    GameWon,
}

pub trait EventSink {
    fn emit(&self, event: GameEvent);
}

/// Forwards events into a crossbeam channel. A disconnected receiver is
/// ignored; a dead consumer must never stall the engine.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<GameEvent>,
}

impl ChannelSink {
    #[inline]
    pub fn new(tx: Sender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: GameEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drops every event; for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: GameEvent) {}
}
