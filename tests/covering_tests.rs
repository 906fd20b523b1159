use tripeaks::{build_board, CardId, CoverMap, CoverStrategy, Deal, DealEntry, Pos};

fn layout(positions: &[(f32, f32)]) -> Vec<(CardId, Pos)> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| (CardId(i as u32), Pos::new(x, y)))
        .collect()
}

/// DealOrder: every later card covers every earlier one, so only the
/// last-dealt card starts unblocked.
#[test]
fn deal_order_blocks_all_but_last() {
    let tableau = layout(&[(0.0, 0.0), (500.0, 0.0), (0.0, 500.0)]);
    let map = CoverMap::build(&tableau, CoverStrategy::DealOrder);

    assert!(map.is_blocked(CardId(0)));
    assert!(map.is_blocked(CardId(1)));
    assert!(!map.is_blocked(CardId(2)), "last dealt card is never covered");
    assert_eq!(map.covered_ids(CardId(2)), &[CardId(0), CardId(1)]);
    assert!(map.covered_ids(CardId(0)).is_empty());
}

/// Overlap: an edge needs the two boxes within one card extent on both
/// axes; distant cards stay independent regardless of deal order.
#[test]
fn overlap_requires_intersection() {
    let size = Pos::new(100.0, 150.0);
    let tableau = layout(&[(0.0, 0.0), (80.0, 120.0), (500.0, 0.0)]);
    let map = CoverMap::build(&tableau, CoverStrategy::Overlap { card_size: size });

    assert!(map.is_blocked(CardId(0)), "card 1 overlaps card 0");
    assert!(!map.is_blocked(CardId(1)));
    assert!(!map.is_blocked(CardId(2)), "distant card has no coverers");
    assert!(map.covered_ids(CardId(2)).is_empty());
}

/// Boxes that exactly touch still count as overlapping; one unit past
/// the extent breaks the edge.
#[test]
fn overlap_touching_edges_count() {
    let size = Pos::new(100.0, 150.0);

    let touching = layout(&[(0.0, 0.0), (100.0, 150.0)]);
    let map = CoverMap::build(&touching, CoverStrategy::Overlap { card_size: size });
    assert!(map.is_blocked(CardId(0)), "touching boxes still cover");

    let apart = layout(&[(0.0, 0.0), (101.0, 0.0)]);
    let map = CoverMap::build(&apart, CoverStrategy::Overlap { card_size: size });
    assert!(!map.is_blocked(CardId(0)));
}

/// The edge always points from the later-dealt card to the earlier one.
#[test]
fn later_card_covers_earlier() {
    let tableau = layout(&[(0.0, 0.0), (10.0, 10.0)]);
    let map = CoverMap::build(
        &tableau,
        CoverStrategy::Overlap {
            card_size: Pos::new(100.0, 150.0),
        },
    );

    assert_eq!(map.covered_ids(CardId(1)), &[CardId(0)]);
    assert!(map.covered_ids(CardId(0)).is_empty(), "earlier card covers nothing");
    assert!(!map.is_blocked(CardId(1)));
}

/// With a card extent spanning the whole layout, Overlap degenerates to
/// the DealOrder graph.
#[test]
fn overlap_with_huge_extent_matches_deal_order() {
    let tableau = layout(&[(0.0, 0.0), (50.0, 40.0), (90.0, 10.0), (20.0, 70.0)]);
    let by_order = CoverMap::build(&tableau, CoverStrategy::DealOrder);
    let by_overlap = CoverMap::build(
        &tableau,
        CoverStrategy::Overlap {
            card_size: Pos::new(1000.0, 1000.0),
        },
    );

    for &(id, _) in &tableau {
        assert_eq!(
            by_overlap.covered_ids(id),
            by_order.covered_ids(id),
            "graphs differ at {id}"
        );
    }
}

/// Unknown ids: never blocked, no coverers, not resident.
#[test]
fn unknown_ids_are_inert() {
    let map = CoverMap::build(&layout(&[(0.0, 0.0)]), CoverStrategy::DealOrder);
    assert!(!map.is_blocked(CardId(9)));
    assert!(map.covered_ids(CardId(9)).is_empty());
    assert!(!map.is_in_tableau(CardId(9)));
}

/// Edges are built once and never rebuilt; removing and restoring a
/// coverer flips blocking purely through the residency status.
#[test]
fn blocking_follows_tableau_residency() {
    let deal = Deal {
        tableau: vec![
            DealEntry {
                face: 0,
                suit: 0,
                position: Pos::new(0.0, 0.0),
                covered: false,
            },
            DealEntry {
                face: 1,
                suit: 1,
                position: Pos::new(10.0, 10.0),
                covered: false,
            },
        ],
        stack: vec![],
    };
    let mut board = build_board(&deal, CoverStrategy::DealOrder).expect("build_board");

    assert!(board.is_blocked(CardId(0)));
    assert!(board.cover().is_in_tableau(CardId(1)));

    board.remove_from_tableau(CardId(1));
    board.move_to_discard(CardId(1));
    assert!(!board.is_blocked(CardId(0)), "removing the coverer unblocks");
    assert!(!board.cover().is_in_tableau(CardId(1)));

    board.restore_to_tableau(CardId(1));
    assert!(board.is_blocked(CardId(0)), "restoring the coverer re-blocks");
    assert_eq!(
        board.cover().covered_ids(CardId(1)),
        &[CardId(0)],
        "edges survive the round trip"
    );
}
