//! Core types: cards, geometry, deal RNG.

pub mod card;
pub mod layout;
pub mod rng;

pub use card::{can_foundation_stack, can_stack, Card, CardId, Colour, Rank, Suit};
pub use layout::{
    foundation_anchor, tableau_anchor, talon_anchor, Point, Rect, CARD_HEIGHT, CARD_WIDTH,
    FAN_OFFSET, FOUNDATION_COUNT, TABLEAU_COUNT,
};
pub use rng::{DealRng, DealRngState};
