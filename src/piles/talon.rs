//! The talon (draw container).
//!
//! Holds the undealt remainder of the stock as a single run, built by
//! repeated appends during dealing and stacked at one anchor.
//!
//! The one rule operation here is `place_first`: the run's tail card is
//! detached and relinked as the new root, pushing the previous root down to
//! second place, and both the new root and the new second card toggle face
//! orientation. This is the original game's recycle-to-front rule,
//! preserved literally rather than normalized to a conventional reshuffle.

use serde::{Deserialize, Serialize};

use crate::core::card::CardId;
use crate::core::layout::Point;
use crate::runs::CardArena;

/// The draw container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Talon {
    anchor: Point,
    root: Option<CardId>,
    leaf: Option<CardId>,
}

impl Talon {
    /// Create an empty talon anchored at `anchor`.
    #[must_use]
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            root: None,
            leaf: None,
        }
    }

    /// The talon's fixed anchor position.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Root (current draw-facing) card, if any.
    #[must_use]
    pub const fn root(&self) -> Option<CardId> {
        self.root
    }

    /// Terminal leaf of the run, if any.
    #[must_use]
    pub const fn leaf(&self) -> Option<CardId> {
        self.leaf
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self, arena: &CardArena) -> usize {
        match self.root {
            None => 0,
            Some(root) => arena.run_len(root),
        }
    }

    /// Append a detached card to the tail. Used while dealing.
    pub fn push(&mut self, arena: &mut CardArena, card: CardId) {
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
        self.leaf = Some(card);
        arena.card_mut(card).pos = self.anchor;
    }

    /// Recycle the tail card to the front.
    ///
    /// Detaches the run's terminal leaf, relinks it as the new root (the
    /// previous root becomes second), and toggles the face orientation of
    /// both. Returns `false` without structural change when the talon
    /// holds fewer than two cards.
    pub fn place_first(&mut self, arena: &mut CardArena) -> bool {
        let (Some(root), Some(leaf)) = (self.root, self.leaf) else {
            return false;
        };
        if root == leaf {
            return false;
        }

        // leaf != root, so the tail has a parent: the new terminal leaf.
        let new_tail = arena.card(leaf).parent;
        arena.detach(leaf);
        arena.link(leaf, root);

        self.root = Some(leaf);
        self.leaf = new_tail;

        arena.card_mut(leaf).toggle_face();
        arena.card_mut(root).toggle_face();
        self.reset_layout(arena);
        true
    }

    /// Detach the run rooted at `card` from the talon.
    ///
    /// Releasing the root empties the pile. Panics if the talon is empty.
    pub fn release(&mut self, arena: &mut CardArena, card: CardId) -> CardId {
        let root = match self.root {
            Some(root) => root,
            None => panic!("release of {} from an empty talon", card),
        };

        if card == root {
            self.root = None;
            self.leaf = None;
            return arena.detach(card);
        }

        let detached = arena.detach(card);
        self.leaf = Some(arena.terminal_leaf(root));
        detached
    }

    /// Restack the run at the anchor.
    pub fn reset_layout(&self, arena: &mut CardArena) {
        let Some(root) = self.root else { return };

        let ids: Vec<CardId> = arena.chain(root).collect();
        for id in ids {
            arena.card_mut(id).pos = self.anchor;
        }
    }
}
