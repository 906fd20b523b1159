use serde::{Deserialize, Serialize};

/// Card face, Ace low. Matching compares ordinals only; suits are
/// cosmetic throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Face {
    #[inline]
    pub fn all() -> [Face; 13] {
        [
            Face::Ace,
            Face::Two,
            Face::Three,
            Face::Four,
            Face::Five,
            Face::Six,
            Face::Seven,
            Face::Eight,
            Face::Nine,
            Face::Ten,
            Face::Jack,
            Face::Queen,
            Face::King,
        ]
    }

    /// 0-based ordinal: Ace=0 .. King=12.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Face {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Face::Ace),
            1 => Ok(Face::Two),
            2 => Ok(Face::Three),
            3 => Ok(Face::Four),
            4 => Ok(Face::Five),
            5 => Ok(Face::Six),
            6 => Ok(Face::Seven),
            7 => Ok(Face::Eight),
            8 => Ok(Face::Nine),
            9 => Ok(Face::Ten),
            10 => Ok(Face::Jack),
            11 => Ok(Face::Queen),
            12 => Ok(Face::King),
            _ => Err(format!("invalid face code {v} (must be 0..=12)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    #[inline]
    pub fn all() -> [Suit; 4] {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
    }
}

impl TryFrom<u8> for Suit {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Suit::Clubs),
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Hearts),
            3 => Ok(Suit::Spades),
            _ => Err(format!("invalid suit code {v} (must be 0..=3)")),
        }
    }
}

/// The pile a card currently belongs to. A card is in exactly one pile
/// at a time; the ordered id sequences on the board carry order only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pile {
    Tableau,
    Stack,
    Discard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    #[default]
    Initializing,
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// 2D point in deal/model space. Presentation reads it; undo restores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const ZERO: Pos = Pos { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
