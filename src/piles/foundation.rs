//! Foundation piles.
//!
//! Four suit stacks, each built from Ace to King. A foundation only ever
//! receives single cards — the game table routes the explicit
//! send-to-foundation gesture here, never a dragged run.
//!
//! The pile latches its suit on the first accepted card and tracks the
//! completed rank with a counter rather than recomputing from chain length;
//! rank rises by exactly one per accepted card by construction.

use serde::{Deserialize, Serialize};

use crate::core::card::{CardId, Rank, Suit};
use crate::core::layout::Point;
use crate::runs::CardArena;

/// One foundation suit stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoundationPile {
    anchor: Point,
    suit: Option<Suit>,
    count: u8,
    root: Option<CardId>,
    leaf: Option<CardId>,
}

impl FoundationPile {
    /// Create an empty pile anchored at `anchor`.
    #[must_use]
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            suit: None,
            count: 0,
            root: None,
            leaf: None,
        }
    }

    /// The pile's fixed anchor position.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Suit latched by the first accepted card, if any.
    #[must_use]
    pub const fn suit(&self) -> Option<Suit> {
        self.suit
    }

    /// Completed rank: 0 when empty, 13 when the King is home.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Bottom card of the stack (the Ace), if any.
    #[must_use]
    pub const fn root(&self) -> Option<CardId> {
        self.root
    }

    /// Top card of the stack, if any.
    #[must_use]
    pub const fn leaf(&self) -> Option<CardId> {
        self.leaf
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Ace through King all home?
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.count == Rank::KING.raw()
    }

    /// May `card` land here? An empty pile accepts only an Ace; otherwise
    /// the suit must match the latch and the rank must be exactly one above
    /// the completed count.
    #[must_use]
    pub fn can_receive(&self, arena: &CardArena, card: CardId) -> bool {
        let card = arena.card(card);
        match self.suit {
            None => card.rank.is_ace(),
            Some(suit) => card.suit == suit && card.rank.raw() == self.count + 1,
        }
    }

    /// Accept a detached single card.
    ///
    /// Panics if the card still carries a run — foundations never receive
    /// multi-card runs.
    pub fn receive(&mut self, arena: &mut CardArena, card: CardId) {
        if arena.card(card).leaf.is_some() {
            panic!("{} carries a run, foundations take single cards", card);
        }

        match self.root {
            None => {
                if arena.card(card).parent.is_some() {
                    panic!("{} must be detached before a pile can root it", card);
                }
                self.root = Some(card);
            }
            Some(root) => {
                arena.append_run(root, card);
            }
        }

        self.suit = Some(arena.card(card).suit);
        self.count += 1;
        self.leaf = Some(card);
        arena.card_mut(card).pos = self.anchor;
    }

    /// Restack the pile at its anchor.
    pub fn reset_layout(&self, arena: &mut CardArena) {
        let Some(root) = self.root else { return };

        let ids: Vec<CardId> = arena.chain(root).collect();
        for id in ids {
            arena.card_mut(id).pos = self.anchor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pile() -> FoundationPile {
        FoundationPile::new(Point::new(780.0, 50.0))
    }

    #[test]
    fn test_empty_pile_accepts_only_aces() {
        let mut arena = CardArena::new();
        let ace = arena.alloc(Suit::Hearts, Rank::ACE);
        let two = arena.alloc(Suit::Hearts, Rank::new(2));
        let pile = pile();

        assert!(pile.can_receive(&arena, ace));
        assert!(!pile.can_receive(&arena, two));
    }

    #[test]
    fn test_receive_latches_suit_and_counts() {
        let mut arena = CardArena::new();
        let ace = arena.alloc(Suit::Hearts, Rank::ACE);
        let two_hearts = arena.alloc(Suit::Hearts, Rank::new(2));
        let two_spades = arena.alloc(Suit::Spades, Rank::new(2));
        let mut pile = pile();

        pile.receive(&mut arena, ace);

        assert_eq!(pile.suit(), Some(Suit::Hearts));
        assert_eq!(pile.count(), 1);
        assert!(pile.can_receive(&arena, two_hearts));
        assert!(!pile.can_receive(&arena, two_spades));
    }

    #[test]
    fn test_rank_gap_rejected_count_unchanged() {
        let mut arena = CardArena::new();
        let ace = arena.alloc(Suit::Hearts, Rank::ACE);
        let three = arena.alloc(Suit::Hearts, Rank::new(3));
        let mut pile = pile();

        pile.receive(&mut arena, ace);

        assert!(!pile.can_receive(&arena, three));
        assert_eq!(pile.count(), 1);
    }

    #[test]
    fn test_complete_after_thirteen() {
        let mut arena = CardArena::new();
        let mut pile = pile();

        for rank in 1..=13 {
            let card = arena.alloc(Suit::Clubs, Rank::new(rank));
            assert!(pile.can_receive(&arena, card));
            pile.receive(&mut arena, card);
        }

        assert!(pile.is_complete());
        assert_eq!(pile.count(), 13);
    }

    #[test]
    fn test_cards_stack_at_anchor() {
        let mut arena = CardArena::new();
        let ace = arena.alloc(Suit::Diamonds, Rank::ACE);
        let two = arena.alloc(Suit::Diamonds, Rank::new(2));
        let mut pile = pile();

        pile.receive(&mut arena, ace);
        pile.receive(&mut arena, two);

        assert_eq!(arena.card(ace).pos, pile.anchor());
        assert_eq!(arena.card(two).pos, pile.anchor());
        assert_eq!(pile.leaf(), Some(two));
    }

    #[test]
    #[should_panic(expected = "single cards")]
    fn test_receiving_a_run_panics() {
        let mut arena = CardArena::new();
        let ace = arena.alloc(Suit::Hearts, Rank::ACE);
        let other = arena.alloc(Suit::Spades, Rank::new(2));
        arena.link(ace, other);

        pile().receive(&mut arena, ace);
    }
}
