//! # klondike-engine
//!
//! A Klondike solitaire rules engine: the card-hierarchy and
//! move-validation core that a rendering/input frontend drives.
//!
//! ## Design Principles
//!
//! 1. **Arena-addressed runs**: Cards live in a `CardArena` and are
//!    addressed by stable `CardId`s. A run is the transitive `leaf` chain
//!    from a root card; containers hold only root/leaf ids. No live
//!    references, no dangling links when a run is detached mid-chain.
//!
//! 2. **Validate before detach**: A move attempt checks the destination
//!    before severing anything, so a rejected move leaves the source chain
//!    untouched — an illegal drop only resets layout positions.
//!
//! 3. **One gesture at a time**: The `GameTable` owns an at-most-one
//!    `MoveContext`, created on pickup and cleared unconditionally by the
//!    attempt that follows. Single-threaded, synchronous, no stale
//!    card-in-hand state.
//!
//! 4. **Rejections are values**: Illegal moves return
//!    `MoveOutcome::Rejected`, never an error. Structural misuse of the
//!    arena is a programming error and panics. Empty-pile queries return
//!    `Option`.
//!
//! ## Modules
//!
//! - `core`: Cards, suits, ranks, stacking predicates, geometry, deal RNG
//! - `runs`: Card arena and run linkage (detach, append, reveal, traverse)
//! - `piles`: Tableau columns, foundation stacks, the talon
//! - `table`: Dealing, gesture orchestration, win detection, move log
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::{GameTableBuilder, MoveOutcome};
//!
//! let mut table = GameTableBuilder::new().build(42);
//!
//! // Pick up the revealed card of column 2 and drop it nowhere: the move
//! // is rejected, the column resets, nothing structural changed.
//! let card = table.arena().terminal_leaf(table.tableau(2).root().unwrap());
//! assert!(table.begin_move(card));
//! let outcome = table.attempt_move(None);
//! assert!(outcome.is_rejected());
//! assert!(table.in_flight().is_none());
//! ```

pub mod core;
pub mod piles;
pub mod runs;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    can_foundation_stack, can_stack, Card, CardId, Colour, DealRng, DealRngState, Point, Rank,
    Rect, Suit,
};

pub use crate::runs::{CardArena, CardSnapshot, ChainIter};

pub use crate::piles::{FoundationPile, TableauPile, Talon};

pub use crate::table::{
    ContainerId, GameTable, GameTableBuilder, MoveContext, MoveOutcome, MoveRecord, RejectReason,
};
