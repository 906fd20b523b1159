use std::collections::VecDeque;

use log::warn;

use crate::board::Board;
use crate::card::CardId;
use crate::types::{GamePhase, Pile, Pos};

pub const DEFAULT_MAX_STEPS: usize = 100;

/// Complete pre-move state of one card. A snapshot is everything needed
/// to put the card back exactly where it was; covered flag and layer are
/// not recoverable from pile membership alone, so both are captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSnapshot {
    pub id: CardId,
    pub position: Pos,
    pub covered: bool,
    pub pile: Pile,
    pub z_order: i32,
}

impl CardSnapshot {
    pub fn capture(board: &Board, id: CardId) -> Option<Self> {
        let card = board.card(id)?;
        Some(Self {
            id,
            position: card.position,
            covered: card.covered,
            pile: card.pile(),
            z_order: card.z_order,
        })
    }

    fn apply(&self, board: &mut Board) {
        if let Some(card) = board.card_mut(self.id) {
            card.position = self.position;
            card.covered = self.covered;
            card.z_order = self.z_order;
            card.set_pile(self.pile);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    TableauMatch,
    DrawTop,
}

/// One reversible forward move: `a` is the card that moved, `b` the
/// discard top it landed on. Both snapshots are taken before any
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndoStep {
    pub kind: StepKind,
    pub a: CardSnapshot,
    pub b: CardSnapshot,
}

/// What an applied undo touched; the session turns this into an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndoReport {
    pub kind: StepKind,
    pub affected: [CardId; 2],
}

/// Bounded LIFO log of reversible steps. Pushing past the cap evicts the
/// oldest step, so the newest `max_steps` moves stay undoable.
#[derive(Debug)]
pub struct UndoLog {
    steps: VecDeque<UndoStep>,
    max_steps: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl UndoLog {
    pub fn new(max_steps: usize) -> Self {
        Self {
            steps: VecDeque::with_capacity(max_steps.min(DEFAULT_MAX_STEPS)),
            max_steps,
        }
    }

    pub fn push(&mut self, step: UndoStep) {
        self.steps.push_back(step);
        while self.steps.len() > self.max_steps {
            self.steps.pop_front();
        }
    }

    #[inline]
    pub fn pop(&mut self) -> Option<UndoStep> {
        self.steps.pop_back()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Change the cap, trimming oldest steps immediately if needed.
    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
        while self.steps.len() > self.max_steps {
            self.steps.pop_front();
        }
    }

    /// Snapshot both cards of a tableau match before the move mutates
    /// anything. Missing cards skip the record with a warning.
    pub fn record_tableau_match(&mut self, board: &Board, moved: CardId, top: CardId) {
        let (Some(a), Some(b)) = (
            CardSnapshot::capture(board, moved),
            CardSnapshot::capture(board, top),
        ) else {
            warn!("undo record skipped: missing card ({moved} or {top})");
            return;
        };
        self.push(UndoStep {
            kind: StepKind::TableauMatch,
            a,
            b,
        });
    }

    /// Snapshot a stack draw: the drawn card and the discard top it is
    /// about to replace.
    pub fn record_stack_draw(&mut self, board: &Board, drawn: CardId, previous_top: CardId) {
        let (Some(a), Some(b)) = (
            CardSnapshot::capture(board, drawn),
            CardSnapshot::capture(board, previous_top),
        ) else {
            warn!("undo record skipped: missing card ({drawn} or {previous_top})");
            return;
        };
        self.push(UndoStep {
            kind: StepKind::DrawTop,
            a,
            b,
        });
    }

    /// Pop the most recent step and invert it against `board`. Returns
    /// what was undone, or `None` when the log is empty.
    pub fn undo_against(&mut self, board: &mut Board) -> Option<UndoReport> {
        let step = self.pop()?;
        match step.kind {
            StepKind::TableauMatch => revert_tableau_match(board, &step),
            StepKind::DrawTop => revert_stack_draw(board, &step),
        }
        Some(UndoReport {
            kind: step.kind,
            affected: [step.a.id, step.b.id],
        })
    }
}

fn revert_tableau_match(board: &mut Board, step: &UndoStep) {
    pop_expected_top(board, step.a.id);
    board.restore_to_tableau(step.a.id);
    step.a.apply(board);

    board.set_discard_top(step.b.id);
    step.b.apply(board);

    board.decrement_move_count();
    if board.phase() == GamePhase::Victory && !board.check_win() {
        board.set_phase(GamePhase::Playing);
    }
}

fn revert_stack_draw(board: &mut Board, step: &UndoStep) {
    pop_expected_top(board, step.a.id);
    board.push_to_stack(step.a.id);
    step.a.apply(board);

    board.set_discard_top(step.b.id);
    step.b.apply(board);
}

/// The step's moved card must be the current discard top; anything else
/// means the log and the board disagree, so the pile is left untouched
/// and the restore continues on the card itself.
fn pop_expected_top(board: &mut Board, expected: CardId) {
    match board.discard_top() {
        Some(top) if top.id() == expected => {
            board.pop_discard();
        }
        Some(top) => {
            let found = top.id();
            warn!("undo expected discard top {expected}, found {found}; pile left as is");
        }
        None => {
            warn!("undo expected discard top {expected}, discard is empty");
        }
    }
}
