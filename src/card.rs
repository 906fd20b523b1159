use std::fmt;

use crate::types::{Face, Pile, Pos, Suit};

/// Stable card identity, unique within one board. Ids are assigned
/// sequentially during board construction, tableau entries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dealt card. Identity (id, face, suit) is fixed for the card's
/// lifetime; position, covered flag, layer and owning pile change as the
/// game is played and are exactly what undo restores.
#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    face: Face,
    suit: Suit,
    pub position: Pos,
    /// Face down (back showing). Face-down tableau cards cannot be matched.
    pub covered: bool,
    /// Presentation layering hint; never consulted by rules.
    pub z_order: i32,
    pile: Pile,
}

impl Card {
    pub fn new(id: CardId, face: Face, suit: Suit, position: Pos, covered: bool) -> Self {
        Self {
            id,
            face,
            suit,
            position,
            covered,
            z_order: 0,
            // Board::add_card assigns the real pile on insertion.
            pile: Pile::Tableau,
        }
    }

    #[inline]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[inline]
    pub fn face(&self) -> Face {
        self.face
    }

    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn pile(&self) -> Pile {
        self.pile
    }

    #[inline]
    pub(crate) fn set_pile(&mut self, pile: Pile) {
        self.pile = pile;
    }
}
