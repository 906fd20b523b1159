use hashbrown::HashMap;
use log::{debug, warn};

use crate::card::{Card, CardId};
use crate::covering::{CoverMap, CoverStrategy};
use crate::rules;
use crate::types::{GamePhase, Pile};

/// Central authority for one dealt game: owns every card (arena keyed by
/// id), the three pile sequences, the covering graph, and the scalar
/// game state. All legality questions are answered here; the move
/// executor composes the mutation primitives below.
///
/// Pile sequences carry order only. The back of `stack_ids` is the
/// drawable top; the back of `discard_ids` is the active match target.
/// Membership itself is authoritative in each card's `Pile` tag, kept in
/// lockstep by the primitives (every mover detaches before it pushes).
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: HashMap<CardId, Card>,
    tableau_ids: Vec<CardId>,
    stack_ids: Vec<CardId>,
    discard_ids: Vec<CardId>,
    current_top: Option<CardId>,
    cover: CoverMap,
    phase: GamePhase,
    move_count: u32,
}

impl Board {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card into the arena and the chosen pile sequence.
    /// Duplicate ids are ignored with a warning; the original wins.
    pub fn add_card(&mut self, card: Card, to_tableau: bool) {
        let id = card.id();
        if self.cards.contains_key(&id) {
            warn!("add_card: duplicate id {id}, ignoring");
            return;
        }
        let mut card = card;
        if to_tableau {
            card.set_pile(Pile::Tableau);
            self.tableau_ids.push(id);
        } else {
            card.set_pile(Pile::Stack);
            self.stack_ids.push(id);
        }
        self.cards.insert(id, card);
    }

    /// Build the covering graph over the tableau as currently dealt.
    /// Called once per deal, after all cards are added.
    pub fn build_cover(&mut self, strategy: CoverStrategy) {
        let tableau: Vec<_> = self
            .tableau_ids
            .iter()
            .filter_map(|&id| self.cards.get(&id).map(|c| (id, c.position)))
            .collect();
        let mut cover = CoverMap::build(&tableau, strategy);
        for &id in &self.stack_ids {
            cover.seed_off_tableau(id);
        }
        self.cover = cover;
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        let card = self.cards.get(&id);
        if card.is_none() {
            warn!("card: unknown id {id} ({} cards total)", self.cards.len());
        }
        card
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        if !self.cards.contains_key(&id) {
            warn!("card_mut: unknown id {id}");
            return None;
        }
        self.cards.get_mut(&id)
    }

    /// The active match target. Resolves the tracked top first, then
    /// falls back to the discard back and (defensively) the stack back
    /// for boards where no top was ever set.
    pub fn discard_top(&self) -> Option<&Card> {
        if let Some(id) = self.current_top {
            return self.cards.get(&id);
        }
        if let Some(&id) = self.discard_ids.last() {
            warn!("discard_top: top unset, using discard back {id}");
            return self.cards.get(&id);
        }
        if let Some(&id) = self.stack_ids.last() {
            warn!("discard_top: discard empty, using stack back {id}");
            return self.cards.get(&id);
        }
        None
    }

    /// Mark `id` as the active match target. If the card is not already
    /// at the discard back it is relocated there, so pile membership
    /// stays exclusive even when callers hand us a stray id.
    pub fn set_discard_top(&mut self, id: CardId) {
        if !self.cards.contains_key(&id) {
            warn!("set_discard_top: unknown id {id}");
            return;
        }
        if self.discard_ids.last() != Some(&id) {
            warn!("set_discard_top: {id} not at discard back, relocating");
            self.detach(id);
            self.discard_ids.push(id);
            self.cover.set_in_tableau(id, false);
            if let Some(card) = self.cards.get_mut(&id) {
                card.set_pile(Pile::Discard);
            }
        }
        self.current_top = Some(id);
    }

    /// True iff another card still resident in the tableau covers `id`.
    #[inline]
    pub fn is_blocked(&self, id: CardId) -> bool {
        self.cover.is_blocked(id)
    }

    /// Take a card out of the tableau: status flag and sequence only.
    /// Covering edges are left intact so undo can restore blocking.
    pub fn remove_from_tableau(&mut self, id: CardId) {
        self.cover.set_in_tableau(id, false);
        self.tableau_ids.retain(|&x| x != id);
    }

    /// Put a card back into the tableau (undo path). Appends at the back;
    /// tableau order is not consulted by any rule, only the edges are.
    pub fn restore_to_tableau(&mut self, id: CardId) {
        if !self.cards.contains_key(&id) {
            warn!("restore_to_tableau: unknown id {id}");
            return;
        }
        self.detach(id);
        self.cover.set_in_tableau(id, true);
        self.tableau_ids.push(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_pile(Pile::Tableau);
        }
    }

    /// Push a card onto the discard back and tag it accordingly.
    pub fn move_to_discard(&mut self, id: CardId) {
        if !self.cards.contains_key(&id) {
            warn!("move_to_discard: unknown id {id}");
            return;
        }
        self.detach(id);
        self.cover.set_in_tableau(id, false);
        self.discard_ids.push(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_pile(Pile::Discard);
        }
    }

    /// Pop the drawable stack top. The caller is expected to move the
    /// card on (normally via `move_to_discard`).
    #[inline]
    pub fn draw_from_stack(&mut self) -> Option<CardId> {
        self.stack_ids.pop()
    }

    /// Pop the discard back (undo inverse of `move_to_discard`). Clears
    /// the tracked top when it pointed at the popped card.
    pub fn pop_discard(&mut self) -> Option<CardId> {
        let popped = self.discard_ids.pop();
        if let Some(id) = popped {
            if self.current_top == Some(id) {
                self.current_top = None;
            }
        }
        popped
    }

    /// Return a card to the stack back (undo inverse of a draw).
    pub fn push_to_stack(&mut self, id: CardId) {
        if !self.cards.contains_key(&id) {
            warn!("push_to_stack: unknown id {id}");
            return;
        }
        self.detach(id);
        self.cover.set_in_tableau(id, false);
        self.stack_ids.push(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_pile(Pile::Stack);
        }
    }

    #[inline]
    pub fn check_win(&self) -> bool {
        self.tableau_ids.is_empty()
    }

    /// Face adjacency between two cards by id; false (logged) when
    /// either id is unknown.
    pub fn can_match(&self, a: CardId, b: CardId) -> bool {
        let (Some(ca), Some(cb)) = (self.cards.get(&a), self.cards.get(&b)) else {
            warn!("can_match: unknown id ({a} or {b})");
            return false;
        };
        rules::can_match(ca.face(), cb.face())
    }

    // Query surface

    #[inline]
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn tableau_ids(&self) -> &[CardId] {
        &self.tableau_ids
    }

    #[inline]
    pub fn stack_ids(&self) -> &[CardId] {
        &self.stack_ids
    }

    #[inline]
    pub fn discard_ids(&self) -> &[CardId] {
        &self.discard_ids
    }

    #[inline]
    pub fn cover(&self) -> &CoverMap {
        &self.cover
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Layer for the next card landing on the discard pile; grows with
    /// pile height so later arrivals render above earlier ones.
    #[inline]
    pub fn next_discard_layer(&self) -> i32 {
        self.discard_ids.len() as i32
    }

    #[inline]
    pub(crate) fn increment_move_count(&mut self) {
        self.move_count += 1;
    }

    #[inline]
    pub(crate) fn decrement_move_count(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
    }

    /// Remove `id` from every pile sequence. Every membership mover goes
    /// through here first, which is what keeps membership exclusive.
    fn detach(&mut self, id: CardId) {
        self.tableau_ids.retain(|&x| x != id);
        self.stack_ids.retain(|&x| x != id);
        self.discard_ids.retain(|&x| x != id);
    }
}
