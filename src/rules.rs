use crate::types::Face;

/// Match legality: two faces match when their ordinals differ by exactly
/// one, or when the pair is Ace and King (wrap-around adjacency). Suit is
/// never consulted. This is the single source of truth for move
/// validation and any future hint logic.
#[inline]
pub fn can_match(a: Face, b: Face) -> bool {
    let diff = a.value().abs_diff(b.value());
    diff == 1 || diff == 12
}
