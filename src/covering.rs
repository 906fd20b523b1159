use hashbrown::HashMap;

use crate::card::CardId;
use crate::types::Pos;

/// How covering edges are derived from the tableau deal.
///
/// Both strategies share one direction convention: the later-placed card
/// covers the earlier-placed one. `DealOrder` takes placement order as
/// the whole truth; `Overlap` additionally requires the two cards'
/// bounding boxes (deal positions, shared card extent) to intersect,
/// with touching edges counting as overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverStrategy {
    DealOrder,
    Overlap { card_size: Pos },
}

impl CoverStrategy {
    #[inline]
    fn covers(self, later: Pos, earlier: Pos) -> bool {
        match self {
            CoverStrategy::DealOrder => true,
            CoverStrategy::Overlap { card_size } => {
                (later.x - earlier.x).abs() <= card_size.x
                    && (later.y - earlier.y).abs() <= card_size.y
            }
        }
    }
}

/// Covering graph for one deal: forward edges (covering id -> covered
/// ids) plus a per-card "still in tableau" status.
///
/// Edges are built once at construction and never rebuilt; play and undo
/// flip only the status flags, so relationships survive any move
/// sequence.
#[derive(Debug, Clone, Default)]
pub struct CoverMap {
    covers: HashMap<CardId, Vec<CardId>>,
    in_tableau: HashMap<CardId, bool>,
}

impl CoverMap {
    /// Build edges over `tableau` (ids with deal positions, in deal
    /// order). O(n^2) over the tableau, once per deal.
    pub fn build(tableau: &[(CardId, Pos)], strategy: CoverStrategy) -> Self {
        let mut covers: HashMap<CardId, Vec<CardId>> = HashMap::with_capacity(tableau.len());
        let mut in_tableau: HashMap<CardId, bool> = HashMap::with_capacity(tableau.len());

        for (i, &(id, pos)) in tableau.iter().enumerate() {
            let mut covered: Vec<CardId> = Vec::new();
            for &(earlier_id, earlier_pos) in &tableau[..i] {
                if strategy.covers(pos, earlier_pos) {
                    covered.push(earlier_id);
                }
            }
            covers.insert(id, covered);
            in_tableau.insert(id, true);
        }

        Self { covers, in_tableau }
    }

    /// Register a card that starts outside the tableau (stack cards), so
    /// status lookups never miss.
    pub(crate) fn seed_off_tableau(&mut self, id: CardId) {
        self.in_tableau.insert(id, false);
    }

    #[inline]
    pub(crate) fn set_in_tableau(&mut self, id: CardId, resident: bool) {
        self.in_tableau.insert(id, resident);
    }

    #[inline]
    pub fn is_in_tableau(&self, id: CardId) -> bool {
        self.in_tableau.get(&id).copied().unwrap_or(false)
    }

    /// Ids this card was dealt over. Empty for unknown ids.
    pub fn covered_ids(&self, id: CardId) -> &[CardId] {
        match self.covers.get(&id) {
            Some(v) => v.as_slice(),
            None => &[],
        }
    }

    /// True iff some other card still resident in the tableau covers `id`.
    pub fn is_blocked(&self, id: CardId) -> bool {
        self.covers.iter().any(|(&covering, covered)| {
            covering != id && self.is_in_tableau(covering) && covered.contains(&id)
        })
    }
}
