//! Cards, suits, ranks, and the pure stacking rules.
//!
//! A `Card` is the atomic unit of the engine: a suit, a rank, a face
//! orientation, and its linkage into the run it belongs to. Runs are not
//! materialized objects — they are the transitive `leaf` chain starting at
//! some root card, walked through the arena (see `runs::CardArena`).
//!
//! The stacking predicates here are pure functions of card data:
//!
//! - `can_stack` — tableau rule: alternating colour, descending rank.
//! - `can_foundation_stack` — foundation rule: same suit, ascending rank.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::core::{Card, Rank, Suit, can_stack};
//!
//! let six = Card::new(Suit::Spades, Rank::new(6));
//! let five = Card::new(Suit::Hearts, Rank::new(5));
//!
//! // A red five goes onto a black six.
//! assert!(can_stack(&six, &five));
//! // Never the other way around.
//! assert!(!can_stack(&five, &six));
//! ```

use serde::{Deserialize, Serialize};

use super::layout::Point;

/// Unique identifier for a card in the arena.
///
/// Containers and run links hold `CardId`s, never card references; the
/// arena owns the cards themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Hearts,
    Diamonds,
    Spades,
}

impl Suit {
    /// All suits, in a fixed order used for deck construction and
    /// foundation pile indexing.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Diamonds, Suit::Spades];

    /// Colour of the suit. Pure and stable for the card's lifetime.
    #[must_use]
    pub const fn colour(self) -> Colour {
        match self {
            Suit::Hearts | Suit::Diamonds => Colour::Red,
            Suit::Clubs | Suit::Spades => Colour::Black,
        }
    }

    /// Index into `Suit::ALL`, used to select the foundation pile.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Spades => 3,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
        };
        write!(f, "{}", name)
    }
}

/// Card colour, derived from suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Black,
}

/// Card rank: 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Create a rank. Panics outside 1..=13.
    #[must_use]
    pub fn new(rank: u8) -> Self {
        assert!((1..=13).contains(&rank), "Rank {} out of range 1..=13", rank);
        Self(rank)
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Is this an Ace?
    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == 1
    }

    /// Is this a King?
    #[must_use]
    pub const fn is_king(self) -> bool {
        self.0 == 13
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "Ace"),
            11 => write!(f, "Jack"),
            12 => write!(f, "Queen"),
            13 => write!(f, "King"),
            n => write!(f, "{}", n),
        }
    }
}

/// A card in play.
///
/// `parent` points at the card directly above it in its run; `leaf` at the
/// single card directly below it. Both are maintained bidirectionally by
/// every arena mutation: a card's `parent` always names the card whose
/// `leaf` is this card. Runs never branch.
///
/// Cards are created once at deal time and never destroyed during a game;
/// only `parent`, `leaf`, `face_up`, and `pos` mutate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,

    /// Face orientation. Dealt face down; flipped by reveals and the talon
    /// recycle.
    pub face_up: bool,

    /// The card directly above this one in its run. Back-reference only.
    pub parent: Option<CardId>,

    /// The card directly below this one. At most one — runs are simple
    /// chains.
    pub leaf: Option<CardId>,

    /// Current layout position. Purely presentational; rules never read it
    /// except for drop-target proximity.
    pub pos: Point,
}

impl Card {
    /// Create a face-down, unlinked card.
    #[must_use]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
            parent: None,
            leaf: None,
            pos: Point::ORIGIN,
        }
    }

    /// Colour of this card.
    #[must_use]
    pub fn colour(&self) -> Colour {
        self.suit.colour()
    }

    /// Toggle face orientation.
    pub fn toggle_face(&mut self) {
        self.face_up = !self.face_up;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Tableau stacking rule: `upper` may sit on `lower` iff the colours differ
/// and `lower` outranks `upper` by exactly one.
#[must_use]
pub fn can_stack(lower: &Card, upper: &Card) -> bool {
    lower.colour() != upper.colour() && lower.rank.raw() == upper.rank.raw() + 1
}

/// Foundation stacking rule: `candidate` may sit on `top` iff the suits
/// match and `candidate` outranks `top` by exactly one.
///
/// The empty-pile case (only an Ace is accepted) is handled by
/// `FoundationPile::can_receive`, which has no `top` to pass.
#[must_use]
pub fn can_foundation_stack(top: &Card, candidate: &Card) -> bool {
    top.suit == candidate.suit && candidate.rank.raw() == top.rank.raw() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_of_suits() {
        assert_eq!(Suit::Hearts.colour(), Colour::Red);
        assert_eq!(Suit::Diamonds.colour(), Colour::Red);
        assert_eq!(Suit::Clubs.colour(), Colour::Black);
        assert_eq!(Suit::Spades.colour(), Colour::Black);
    }

    #[test]
    fn test_suit_index_matches_all_order() {
        for (i, suit) in Suit::ALL.iter().enumerate() {
            assert_eq!(suit.index(), i);
        }
    }

    #[test]
    fn test_can_stack_requires_alternating_colour() {
        let black_six = Card::new(Suit::Clubs, Rank::new(6));
        let red_five = Card::new(Suit::Diamonds, Rank::new(5));
        let black_five = Card::new(Suit::Spades, Rank::new(5));

        assert!(can_stack(&black_six, &red_five));
        assert!(!can_stack(&black_six, &black_five));
    }

    #[test]
    fn test_can_stack_requires_descending_by_one() {
        let black_six = Card::new(Suit::Clubs, Rank::new(6));
        let red_four = Card::new(Suit::Hearts, Rank::new(4));
        let red_six = Card::new(Suit::Hearts, Rank::new(6));

        assert!(!can_stack(&black_six, &red_four));
        assert!(!can_stack(&black_six, &red_six));
    }

    #[test]
    fn test_can_foundation_stack() {
        let ace = Card::new(Suit::Hearts, Rank::ACE);
        let two_hearts = Card::new(Suit::Hearts, Rank::new(2));
        let two_spades = Card::new(Suit::Spades, Rank::new(2));
        let three = Card::new(Suit::Hearts, Rank::new(3));

        assert!(can_foundation_stack(&ace, &two_hearts));
        assert!(!can_foundation_stack(&ace, &two_spades)); // Suit mismatch
        assert!(!can_foundation_stack(&ace, &three)); // Rank gap
        assert!(!can_foundation_stack(&two_hearts, &ace)); // Descending
    }

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::ACE.is_ace());
        assert!(Rank::KING.is_king());
        assert_eq!(Rank::new(7).raw(), 7);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_rank_zero_panics() {
        let _ = Rank::new(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_rank_fourteen_panics() {
        let _ = Rank::new(14);
    }

    #[test]
    fn test_new_card_is_face_down_and_unlinked() {
        let card = Card::new(Suit::Spades, Rank::KING);

        assert!(!card.face_up);
        assert!(card.parent.is_none());
        assert!(card.leaf.is_none());
    }

    #[test]
    fn test_toggle_face() {
        let mut card = Card::new(Suit::Hearts, Rank::ACE);

        card.toggle_face();
        assert!(card.face_up);
        card.toggle_face();
        assert!(!card.face_up);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(42)), "Card(42)");
        assert_eq!(
            format!("{}", Card::new(Suit::Spades, Rank::KING)),
            "King of Spades"
        );
        assert_eq!(
            format!("{}", Card::new(Suit::Hearts, Rank::new(7))),
            "7 of Hearts"
        );
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(Suit::Diamonds, Rank::new(9));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
