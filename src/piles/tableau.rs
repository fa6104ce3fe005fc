//! Tableau columns.
//!
//! Each of the seven tableau piles holds at most one run, rooted at the
//! pile's anchor and fanned downward. A pile accepts a run when its current
//! leaf and the incoming root satisfy the tableau stacking rule; an empty
//! pile accepts any card.
//!
//! `receive` and `release` never validate — validation belongs to the game
//! table, which checks `can_receive` before any link is severed.

use serde::{Deserialize, Serialize};

use crate::core::card::{can_stack, CardId};
use crate::core::layout::{Point, Rect, CARD_HEIGHT, CARD_WIDTH, FAN_OFFSET};
use crate::runs::CardArena;

/// One tableau column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableauPile {
    anchor: Point,
    root: Option<CardId>,
    leaf: Option<CardId>,
}

impl TableauPile {
    /// Create an empty pile anchored at `anchor`.
    #[must_use]
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            root: None,
            leaf: None,
        }
    }

    /// The pile's fixed anchor position.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Root card of the pile's run, if any.
    #[must_use]
    pub const fn root(&self) -> Option<CardId> {
        self.root
    }

    /// Cached terminal leaf of the pile's run, if any.
    #[must_use]
    pub const fn leaf(&self) -> Option<CardId> {
        self.leaf
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// May `card` (with whatever run hangs below it) land here?
    ///
    /// An empty pile accepts any card; otherwise the current leaf and the
    /// incoming card must stack.
    #[must_use]
    pub fn can_receive(&self, arena: &CardArena, card: CardId) -> bool {
        match self.leaf {
            None => true,
            Some(leaf) => can_stack(arena.card(leaf), arena.card(card)),
        }
    }

    /// Append the detached run rooted at `run_root` and re-fan the column.
    pub fn receive(&mut self, arena: &mut CardArena, run_root: CardId) {
        match self.root {
            None => {
                if arena.card(run_root).parent.is_some() {
                    panic!("{} must be detached before a pile can root it", run_root);
                }
                self.root = Some(run_root);
            }
            Some(root) => {
                arena.append_run(root, run_root);
            }
        }
        self.leaf = Some(arena.terminal_leaf(run_root));
        self.reset_layout(arena);
    }

    /// Detach the run rooted at `card` from this pile.
    ///
    /// Releasing the root empties the pile. Releasing a sub-run re-exposes
    /// the remaining chain: its new terminal leaf is flipped face up if it
    /// was covered. Returns the detached run's root.
    ///
    /// Panics if the pile is empty — releasing from an empty pile is a
    /// programming error.
    pub fn release(&mut self, arena: &mut CardArena, card: CardId) -> CardId {
        let root = match self.root {
            Some(root) => root,
            None => panic!("release of {} from an empty tableau pile", card),
        };

        if card == root {
            self.root = None;
            self.leaf = None;
            return arena.detach(card);
        }

        let detached = arena.detach(card);
        self.leaf = Some(arena.terminal_leaf(root));
        arena.reveal_terminal_face_up(root);
        detached
    }

    /// Re-fan the whole column from the anchor. Used after every receive
    /// and as the illegal-drop recovery path.
    pub fn reset_layout(&self, arena: &mut CardArena) {
        let Some(root) = self.root else { return };

        let ids: Vec<CardId> = arena.chain(root).collect();
        for (i, id) in ids.into_iter().enumerate() {
            arena.card_mut(id).pos = self.anchor.offset(0.0, FAN_OFFSET * i as f32);
        }
    }

    /// The pile's current hit-test region: the anchor card slot, extended
    /// downward over the fanned run.
    #[must_use]
    pub fn bounds(&self, arena: &CardArena) -> Rect {
        let fanned = match self.root {
            None => 0,
            Some(root) => arena.run_len(root).saturating_sub(1),
        };
        Rect::new(
            self.anchor.x,
            self.anchor.y,
            CARD_WIDTH,
            CARD_HEIGHT + FAN_OFFSET * fanned as f32,
        )
    }

    /// Is the pile's leaf still sitting in the column? False while the
    /// leaf has been dragged sideways off the anchor line.
    #[must_use]
    pub fn leaf_aligned(&self, arena: &CardArena) -> bool {
        match self.leaf {
            None => true,
            Some(leaf) => arena.card(leaf).pos.x == self.anchor.x,
        }
    }
}
