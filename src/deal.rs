use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::card::{Card, CardId};
use crate::covering::CoverStrategy;
use crate::types::{Face, GamePhase, Pos, Suit};

/// One card of a deal descriptor: raw face/suit codes, the deal position,
/// and whether the card starts face down. Codes are validated when the
/// board is built, not when the descriptor is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealEntry {
    pub face: u8,
    pub suit: u8,
    #[serde(default)]
    pub position: Pos,
    #[serde(default)]
    pub covered: bool,
}

/// A pre-built deal: tableau cards in placement order (later entries
/// cover earlier ones) and stack cards in pile order (the last entry is
/// the first draw). Where the deal comes from is the caller's business;
/// `load_deal_from_json` is one convenience source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub tableau: Vec<DealEntry>,
    pub stack: Vec<DealEntry>,
}

/// Load a deal descriptor from a JSON file (runtime).
pub fn load_deal_from_json<P: AsRef<Path>>(path: P) -> Result<Deal, String> {
    let data = fs::read_to_string(path.as_ref()).map_err(|e| format!("Failed to read JSON: {e}"))?;
    let deal: Deal =
        serde_json::from_str(&data).map_err(|e| format!("Failed to parse JSON: {e}"))?;
    Ok(deal)
}

fn validate_entry(entry: &DealEntry, pile: &str, index: usize) -> Result<(Face, Suit), String> {
    let face = Face::try_from(entry.face).map_err(|e| format!("{pile} entry {index}: {e}"))?;
    let suit = Suit::try_from(entry.suit).map_err(|e| format!("{pile} entry {index}: {e}"))?;
    Ok((face, suit))
}

/// Build a playable board from a deal.
///
/// Ids are assigned sequentially in deal order, tableau first. Tableau
/// and stack cards get their deal index as initial layer. After the
/// covering graph is built, the stack back is auto-drawn face up as the
/// opening discard top; that draw is not undoable. Any out-of-range
/// face/suit code rejects the whole deal, as does a deal with no cards.
pub fn build_board(deal: &Deal, strategy: CoverStrategy) -> Result<Board, String> {
    if deal.tableau.is_empty() && deal.stack.is_empty() {
        return Err("Deal has no cards".to_string());
    }

    let mut board = Board::new();
    let mut next_id: u32 = 0;

    for (i, entry) in deal.tableau.iter().enumerate() {
        let (face, suit) = validate_entry(entry, "tableau", i)?;
        let mut card = Card::new(CardId(next_id), face, suit, entry.position, entry.covered);
        card.z_order = i as i32;
        board.add_card(card, true);
        next_id += 1;
    }
    for (i, entry) in deal.stack.iter().enumerate() {
        let (face, suit) = validate_entry(entry, "stack", i)?;
        let mut card = Card::new(CardId(next_id), face, suit, entry.position, entry.covered);
        card.z_order = i as i32;
        board.add_card(card, false);
        next_id += 1;
    }

    board.build_cover(strategy);

    // Opening top: the stack back lands face up on the empty discard pile.
    if let Some(id) = board.draw_from_stack() {
        let layer = board.next_discard_layer();
        if let Some(card) = board.card_mut(id) {
            card.covered = false;
            card.z_order = layer;
        }
        board.move_to_discard(id);
        board.set_discard_top(id);
        debug!("opening discard top is {id}");
    }

    board.set_phase(GamePhase::Playing);
    Ok(board)
}
