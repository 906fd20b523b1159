use std::fmt;

use log::{debug, warn};

use crate::board::Board;
use crate::card::CardId;
use crate::engine::undo::UndoLog;
use crate::events::{EventSink, GameEvent};
use crate::types::{GamePhase, Pile};

/// Why a requested move was refused. A refusal never mutates the board
/// and never emits an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// A previous move's animation has not been reported finished.
    AnimationInFlight,
    UnknownCard,
    /// Match path: the card is not a tableau resident.
    NotInTableau,
    /// Match path: the card is face down.
    FaceDown,
    /// Match path: another tableau card still covers this one.
    Blocked,
    /// Match path: there is no discard top to match against.
    NoDiscardTop,
    /// Match path: the faces are not ordinally adjacent.
    FacesNotAdjacent,
    /// Draw path: the card is a tableau resident.
    NotInStack,
    /// Draw path: only the stack back may be drawn.
    NotStackTop,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveRejection::AnimationInFlight => "an animation is still in flight",
            MoveRejection::UnknownCard => "unknown card id",
            MoveRejection::NotInTableau => "card is not in the tableau",
            MoveRejection::FaceDown => "card is face down",
            MoveRejection::Blocked => "card is covered by another tableau card",
            MoveRejection::NoDiscardTop => "no discard top to match against",
            MoveRejection::FacesNotAdjacent => "faces are not adjacent",
            MoveRejection::NotInStack => "card is not in the stack pile",
            MoveRejection::NotStackTop => "only the stack top can be drawn",
        };
        f.write_str(msg)
    }
}

/// A successful forward move: which card reached the discard top, and
/// whether it emptied the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub card: CardId,
    pub won: bool,
}

/// Match an exposed tableau card against the current discard top.
///
/// Validation order: known id, tableau resident, face up, not covered,
/// a discard top exists, faces adjacent. On success the move is recorded
/// for undo first, then applied: the card leaves the tableau, lands on
/// the discard top's position one layer up, becomes the new top, and the
/// move counter advances. Emits `CardMovedToDiscard`, plus `GameWon`
/// when this match empties the tableau.
pub fn attempt_tableau_match(
    board: &mut Board,
    undo: &mut UndoLog,
    sink: &dyn EventSink,
    id: CardId,
) -> Result<MoveOutcome, MoveRejection> {
    let Some(card) = board.card(id) else {
        return Err(MoveRejection::UnknownCard);
    };
    if card.pile() != Pile::Tableau {
        debug!("match refused: {id} is not a tableau card");
        return Err(MoveRejection::NotInTableau);
    }
    if card.covered {
        debug!("match refused: {id} is face down");
        return Err(MoveRejection::FaceDown);
    }
    let origin = card.position;

    if board.is_blocked(id) {
        debug!("match refused: {id} is covered");
        return Err(MoveRejection::Blocked);
    }
    let Some(top) = board.discard_top() else {
        warn!("match refused: no discard top");
        return Err(MoveRejection::NoDiscardTop);
    };
    let top_id = top.id();
    let target = top.position;
    if !board.can_match(id, top_id) {
        debug!("match refused: {id} and {top_id} are not adjacent");
        return Err(MoveRejection::FacesNotAdjacent);
    }

    undo.record_tableau_match(board, id, top_id);

    let layer = board.next_discard_layer();
    board.remove_from_tableau(id);
    board.move_to_discard(id);
    if let Some(card) = board.card_mut(id) {
        card.position = target;
        card.z_order = layer;
    }
    board.set_discard_top(id);
    board.increment_move_count();

    let won = board.check_win();
    if won {
        board.set_phase(GamePhase::Victory);
    }

    sink.emit(GameEvent::CardMovedToDiscard { card: id, origin });
    if won {
        sink.emit(GameEvent::GameWon);
    }
    Ok(MoveOutcome { card: id, won })
}

/// Draw the stack top onto the discard pile.
///
/// Only the stack back is drawable; tableau cards are refused outright.
/// The drawn card is revealed (face up), re-homed onto the previous
/// top's position one layer up, and becomes the new discard top. The
/// move counter is untouched. If no previous top exists the draw
/// proceeds without an undo record, with a warning; a correctly built
/// board always has a top.
pub fn attempt_draw_top(
    board: &mut Board,
    undo: &mut UndoLog,
    sink: &dyn EventSink,
    id: CardId,
) -> Result<MoveOutcome, MoveRejection> {
    let Some(card) = board.card(id) else {
        return Err(MoveRejection::UnknownCard);
    };
    if card.pile() == Pile::Tableau {
        debug!("draw refused: {id} is a tableau card");
        return Err(MoveRejection::NotInStack);
    }
    let origin = card.position;

    if board.stack_ids().last() != Some(&id) {
        debug!("draw refused: {id} is not the stack top");
        return Err(MoveRejection::NotStackTop);
    }

    let previous = board.discard_top().map(|c| (c.id(), c.position));
    match previous {
        Some((top_id, _)) => undo.record_stack_draw(board, id, top_id),
        None => warn!("draw of {id} with no discard top; move will not be undoable"),
    }

    let layer = board.next_discard_layer();
    let drawn = board.draw_from_stack();
    debug_assert_eq!(drawn, Some(id));
    if let Some(card) = board.card_mut(id) {
        card.covered = false;
        if let Some((_, target)) = previous {
            card.position = target;
        }
        card.z_order = layer;
    }
    board.move_to_discard(id);
    board.set_discard_top(id);

    sink.emit(GameEvent::CardMovedToDiscard { card: id, origin });
    Ok(MoveOutcome { card: id, won: false })
}
