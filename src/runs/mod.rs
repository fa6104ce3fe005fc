//! Card arena and run linkage.
//!
//! All cards live in a `CardArena` and are addressed by stable `CardId`s.
//! A run is the transitive `leaf` chain starting at some root card; the
//! arena owns every link mutation so that `parent` and `leaf` can never
//! disagree. Containers hold only root and leaf ids.
//!
//! Structural misuse — linking onto a card that already has a leaf,
//! appending a run whose root is still attached — is a programming error
//! and panics. Empty queries return `Option`.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::core::{Rank, Suit};
//! use klondike_engine::runs::CardArena;
//!
//! let mut arena = CardArena::new();
//! let six = arena.alloc(Suit::Spades, Rank::new(6));
//! let five = arena.alloc(Suit::Hearts, Rank::new(5));
//!
//! arena.link(six, five);
//! assert_eq!(arena.terminal_leaf(six), five);
//! assert_eq!(arena.run_len(six), 2);
//!
//! // Lifting the five severs both directions of the link.
//! arena.detach(five);
//! assert!(arena.card(six).leaf.is_none());
//! assert!(arena.card(five).parent.is_none());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::{can_stack, Card, CardId, Rank, Suit};

/// One card's worth of a chain snapshot: `(suit, rank, face_up)`.
///
/// The structured replacement for ad-hoc debug printing; tests and
/// diagnostics consume these instead of formatted strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

/// Owns every card in a game and all run linkage between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardArena {
    cards: Vec<Card>,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new face-down, unlinked card.
    pub fn alloc(&mut self, suit: Suit, rank: Rank) -> CardId {
        let id = CardId::new(self.cards.len() as u32);
        self.cards.push(Card::new(suit, rank));
        id
    }

    /// Number of cards in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the arena empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card. Panics on an id from another arena.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.raw() as usize]
    }

    /// Get a mutable card. Panics on an id from another arena.
    pub fn card_mut(&mut self, id: CardId) -> &mut Card {
        &mut self.cards[id.raw() as usize]
    }

    /// Get a card if the id is valid.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.raw() as usize)
    }

    // === Linkage ===

    /// Link `child` directly below `parent`.
    ///
    /// Panics if `parent` already has a leaf (runs never branch) or if
    /// `child` is still attached to another run.
    pub fn link(&mut self, parent: CardId, child: CardId) {
        if self.card(parent).leaf.is_some() {
            panic!("{} already has a leaf, runs never branch", parent);
        }
        if self.card(child).parent.is_some() {
            panic!("{} is still attached to a run", child);
        }

        self.card_mut(parent).leaf = Some(child);
        self.card_mut(child).parent = Some(parent);
    }

    /// Sever `card` from its parent, making it the root of its own run.
    ///
    /// The chain below `card` comes with it. No-op if `card` is already a
    /// root. Returns `card` as the run root.
    pub fn detach(&mut self, card: CardId) -> CardId {
        if let Some(parent) = self.card(card).parent {
            self.card_mut(parent).leaf = None;
            self.card_mut(card).parent = None;
        }
        card
    }

    /// Append the run rooted at `run_root` below the chain containing
    /// `onto`, returning the new terminal leaf.
    ///
    /// Panics if `run_root` is still attached to another run.
    pub fn append_run(&mut self, onto: CardId, run_root: CardId) -> CardId {
        if self.card(run_root).parent.is_some() {
            panic!("{} must be detached before it can be appended", run_root);
        }

        let tail = self.terminal_leaf(onto);
        self.link(tail, run_root);
        self.terminal_leaf(run_root)
    }

    // === Traversal ===

    /// Walk from `card` to the terminal leaf of its chain.
    ///
    /// Returns `card` itself if it has no leaf.
    #[must_use]
    pub fn terminal_leaf(&self, card: CardId) -> CardId {
        let mut current = card;
        let mut steps = 0;
        while let Some(next) = self.card(current).leaf {
            current = next;
            steps += 1;
            if steps > self.cards.len() {
                panic!("run linkage cycle detected at {}", card);
            }
        }
        current
    }

    /// Length of the run from `root` to its terminal leaf, inclusive.
    #[must_use]
    pub fn run_len(&self, root: CardId) -> usize {
        self.chain(root).count()
    }

    /// Iterate the run rooted at `root`, root first.
    pub fn chain(&self, root: CardId) -> ChainIter<'_> {
        ChainIter {
            arena: self,
            next: Some(root),
            steps: 0,
        }
    }

    /// Materialize the run rooted at `root` as ordered
    /// `(suit, rank, face_up)` snapshots, root first.
    #[must_use]
    pub fn snapshot(&self, root: CardId) -> SmallVec<[CardSnapshot; 16]> {
        self.chain(root)
            .map(|id| {
                let card = self.card(id);
                CardSnapshot {
                    suit: card.suit,
                    rank: card.rank,
                    face_up: card.face_up,
                }
            })
            .collect()
    }

    // === Rules ===

    /// May the run rooted at `root` be picked up as a unit?
    ///
    /// True iff `root` is face up and every consecutive pair along the
    /// chain satisfies the tableau stacking rule. A single face-up card is
    /// trivially movable; a face-down card never is.
    #[must_use]
    pub fn is_movable_run(&self, root: CardId) -> bool {
        if !self.card(root).face_up {
            return false;
        }

        let mut current = root;
        while let Some(next) = self.card(current).leaf {
            if !can_stack(self.card(current), self.card(next)) {
                return false;
            }
            current = next;
        }
        true
    }

    /// Flip the terminal leaf of the chain containing `root` face up if it
    /// is face down. Intermediate cards are untouched.
    pub fn reveal_terminal_face_up(&mut self, root: CardId) {
        let terminal = self.terminal_leaf(root);
        let card = self.card_mut(terminal);
        if !card.face_up {
            card.face_up = true;
        }
    }
}

/// Iterator over a run, root to terminal leaf.
pub struct ChainIter<'a> {
    arena: &'a CardArena,
    next: Option<CardId>,
    steps: usize,
}

impl Iterator for ChainIter<'_> {
    type Item = CardId;

    fn next(&mut self) -> Option<CardId> {
        let current = self.next?;
        self.steps += 1;
        if self.steps > self.arena.len() {
            panic!("run linkage cycle detected at {}", current);
        }
        self.next = self.arena.card(current).leaf;
        Some(current)
    }
}
