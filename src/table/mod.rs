//! The game table: dealing, move orchestration, win detection.
//!
//! `GameTable` owns the card arena, the seven tableau columns, the four
//! foundation piles, the talon, and the membership map that says which
//! container currently owns each card. All structural mutation funnels
//! through it, one synchronous gesture at a time:
//!
//! 1. `begin_move` — pointer press; validates `is_movable_run` and records
//!    the move context. Nothing detaches yet.
//! 2. `drag_to` — pure geometry; run linkage is unaffected.
//! 3. `attempt_move` — pointer release; validates the destination *before*
//!    any detach, so a rejected move leaves the source chain untouched and
//!    only resets its layout. The move context is cleared unconditionally.
//! 4. `attempt_foundation_move` — the explicit send-to-foundation gesture;
//!    single terminal cards only, routed to the pile matching the suit.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::table::GameTableBuilder;
//!
//! let table = GameTableBuilder::new().build(42);
//!
//! // 1..=7 cards per column, remainder in the talon.
//! assert_eq!(table.talon().len(table.arena()), 52 - 28);
//! assert!(!table.is_won());
//! ```

pub mod context;

pub use context::{ContainerId, MoveContext, MoveOutcome, MoveRecord, RejectReason};

use im::Vector;
use log::{debug, trace};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::card::{Card, CardId, Rank, Suit};
use crate::core::layout::{
    foundation_anchor, tableau_anchor, talon_anchor, Point, Rect, FAN_OFFSET, FOUNDATION_COUNT,
    TABLEAU_COUNT,
};
use crate::core::rng::DealRng;
use crate::piles::{FoundationPile, TableauPile, Talon};
use crate::runs::{CardArena, CardSnapshot};

/// Builder for dealing a fresh table.
#[derive(Clone, Debug)]
pub struct GameTableBuilder {
    deal_talon: bool,
    stock: Option<Vec<(Suit, Rank)>>,
}

impl Default for GameTableBuilder {
    fn default() -> Self {
        Self {
            deal_talon: true,
            stock: None,
        }
    }
}

impl GameTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal the undealt remainder of the stock into the talon (default) or
    /// leave it out of play.
    #[must_use]
    pub fn deal_talon(mut self, deal: bool) -> Self {
        self.deal_talon = deal;
        self
    }

    /// Deal from this exact stock order instead of shuffling a fresh deck.
    ///
    /// Cards are dealt front-to-back: the seven columns take the first 28,
    /// the talon the rest. Needs at least 28 cards.
    #[must_use]
    pub fn with_stock(mut self, stock: Vec<(Suit, Rank)>) -> Self {
        assert!(stock.len() >= 28, "a stock needs at least 28 cards to deal");
        self.stock = Some(stock);
        self
    }

    /// Deal a table. Same seed, same deal.
    #[must_use]
    pub fn build(self, seed: u64) -> GameTable {
        let mut arena = CardArena::new();
        let stock: Vec<CardId> = match self.stock {
            Some(fixed) => fixed
                .into_iter()
                .map(|(suit, rank)| arena.alloc(suit, rank))
                .collect(),
            None => {
                let mut stock: Vec<CardId> = Vec::with_capacity(52);
                for suit in Suit::ALL {
                    for rank in 1..=13 {
                        stock.push(arena.alloc(suit, Rank::new(rank)));
                    }
                }
                let mut rng = DealRng::new(seed);
                rng.shuffle(&mut stock);
                stock
            }
        };

        let mut tableaus: Vec<TableauPile> = (0..TABLEAU_COUNT)
            .map(|i| TableauPile::new(tableau_anchor(i)))
            .collect();
        let foundations: Vec<FoundationPile> = (0..FOUNDATION_COUNT)
            .map(|i| FoundationPile::new(foundation_anchor(i)))
            .collect();
        let mut talon = Talon::new(talon_anchor());
        let mut locations = FxHashMap::default();

        // Column i gets i+1 cards, all face down.
        let mut cursor = 0;
        for (i, pile) in tableaus.iter_mut().enumerate() {
            for _ in 0..=i {
                let card = stock[cursor];
                cursor += 1;
                pile.receive(&mut arena, card);
                locations.insert(card, ContainerId::Tableau(i as u8));
            }
        }

        // Then the terminal card of each column is revealed.
        for pile in &tableaus {
            if let Some(root) = pile.root() {
                arena.reveal_terminal_face_up(root);
            }
        }

        if self.deal_talon {
            while cursor < stock.len() {
                let card = stock[cursor];
                cursor += 1;
                talon.push(&mut arena, card);
                locations.insert(card, ContainerId::Talon);
            }
        }

        debug!(
            "dealt table: seed {}, {} cards in the talon",
            seed,
            talon.len(&arena)
        );

        GameTable {
            arena,
            tableaus,
            foundations,
            talon,
            locations,
            in_hand: None,
            moves: Vector::new(),
        }
    }
}

/// Orchestrates containers: locates a card's owner, finds the nearest legal
/// destination, executes or rejects moves, and tracks the win condition.
#[derive(Clone, Debug)]
pub struct GameTable {
    arena: CardArena,
    tableaus: Vec<TableauPile>,
    foundations: Vec<FoundationPile>,
    talon: Talon,

    /// Which container owns each card. Exclusive: exactly one owner per
    /// card in play.
    locations: FxHashMap<CardId, ContainerId>,

    /// The at-most-one in-flight move.
    in_hand: Option<MoveContext>,

    /// Read-only log of executed moves.
    moves: Vector<MoveRecord>,
}

impl GameTable {
    // === Access ===

    #[must_use]
    pub fn arena(&self) -> &CardArena {
        &self.arena
    }

    /// Get a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        self.arena.card(id)
    }

    #[must_use]
    pub fn tableaus(&self) -> &[TableauPile] {
        &self.tableaus
    }

    #[must_use]
    pub fn tableau(&self, index: usize) -> &TableauPile {
        &self.tableaus[index]
    }

    /// The foundation pile that cards of `suit` are sent to.
    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &FoundationPile {
        &self.foundations[suit.index()]
    }

    #[must_use]
    pub fn talon(&self) -> &Talon {
        &self.talon
    }

    /// The in-flight move context, if a run is currently held.
    #[must_use]
    pub fn in_flight(&self) -> Option<&MoveContext> {
        self.in_hand.as_ref()
    }

    /// The log of executed moves, oldest first.
    #[must_use]
    pub fn moves(&self) -> &Vector<MoveRecord> {
        &self.moves
    }

    /// Which container owns `card`, or `None` for a card out of play.
    #[must_use]
    pub fn owner_of(&self, card: CardId) -> Option<ContainerId> {
        self.locations.get(&card).copied()
    }

    /// Materialize a container's chain as ordered `(suit, rank, face_up)`
    /// snapshots, root first. Empty containers yield an empty sequence.
    #[must_use]
    pub fn container_snapshot(&self, container: ContainerId) -> SmallVec<[CardSnapshot; 16]> {
        let root = match container {
            ContainerId::Tableau(i) => self.tableaus[i as usize].root(),
            ContainerId::Foundation(i) => self.foundations[i as usize].root(),
            ContainerId::Talon => self.talon.root(),
        };
        match root {
            Some(root) => self.arena.snapshot(root),
            None => SmallVec::new(),
        }
    }

    /// All four foundations complete?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(FoundationPile::is_complete)
    }

    // === Gestures ===

    /// Pointer press: pick up the run rooted at `card`.
    ///
    /// Returns `false` — and holds nothing — if another move is already in
    /// flight, the card belongs to no container or to a foundation, or the
    /// run is not movable. Nothing detaches either way; the pickup only
    /// records the move context.
    pub fn begin_move(&mut self, card: CardId) -> bool {
        if self.in_hand.is_some() {
            trace!("pickup of {} refused: a move is already in flight", card);
            return false;
        }
        let Some(source) = self.owner_of(card) else {
            trace!("pickup of {} refused: card is out of play", card);
            return false;
        };
        if matches!(source, ContainerId::Foundation(_)) {
            trace!("pickup of {} refused: cards never leave a foundation", card);
            return false;
        }
        if !self.arena.is_movable_run(card) {
            trace!("pickup of {} refused: not a movable run", card);
            return false;
        }

        self.in_hand = Some(MoveContext { card, source });
        true
    }

    /// Pointer drag: position the held run at `pos`, fanned downward.
    /// Pure geometry; run linkage is unaffected.
    pub fn drag_to(&mut self, card: CardId, pos: Point) {
        let ids: Vec<CardId> = self.arena.chain(card).collect();
        for (i, id) in ids.into_iter().enumerate() {
            self.arena.card_mut(id).pos = pos.offset(0.0, FAN_OFFSET * i as f32);
        }
    }

    /// Find the tableau pile nearest to the dragged `card`.
    ///
    /// Considers piles whose leaf still sits in its column and whose bounds
    /// overlap the card's rectangle, excluding the card's own pile; picks
    /// the smallest horizontal midpoint distance, first found winning exact
    /// ties. Legality of the drop is `attempt_move`'s business.
    #[must_use]
    pub fn nearest_destination(&self, card: CardId) -> Option<ContainerId> {
        let card_rect = Rect::card_at(self.arena.card(card).pos);
        let card_mid = card_rect.midpoint_x();
        let own_pile = self.owner_of(card);

        let mut best: Option<(usize, f32)> = None;
        for (i, pile) in self.tableaus.iter().enumerate() {
            if own_pile == Some(ContainerId::Tableau(i as u8)) {
                continue;
            }
            if !pile.leaf_aligned(&self.arena) {
                continue;
            }
            if !pile.bounds(&self.arena).intersects(&card_rect) {
                continue;
            }

            let target = match pile.leaf() {
                Some(leaf) => Rect::card_at(self.arena.card(leaf).pos),
                None => Rect::card_at(pile.anchor()),
            };
            let distance = (target.midpoint_x() - card_mid).abs();

            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((i, distance)),
            }
        }

        best.map(|(i, _)| ContainerId::Tableau(i as u8))
    }

    /// Pointer release: complete the in-flight move against `destination`.
    ///
    /// The destination is validated *before* anything detaches: a missing
    /// or refusing destination resets the source pile's layout and leaves
    /// its chain untouched. The move context is taken up front, so no
    /// branch can leave a stale card in hand.
    pub fn attempt_move(&mut self, destination: Option<ContainerId>) -> MoveOutcome {
        let Some(ctx) = self.in_hand.take() else {
            return MoveOutcome::Rejected(RejectReason::NoMoveInFlight);
        };

        let Some(dest) = destination else {
            trace!("drop of {} found no destination", ctx.card);
            self.reset_container(ctx.source);
            return MoveOutcome::Rejected(RejectReason::NoDestination);
        };

        if dest == ctx.source || !self.can_receive(dest, ctx.card) {
            trace!("{} refused {}", dest, ctx.card);
            self.reset_container(ctx.source);
            return MoveOutcome::Rejected(RejectReason::Refused);
        }

        let run_root = self.release_from(ctx.source, ctx.card);
        self.receive_at(dest, run_root);
        self.relabel_run(run_root, dest);
        self.record_move(ctx.card, ctx.source, dest)
    }

    /// Explicit send-to-foundation gesture (double-click).
    ///
    /// The destination is always the foundation pile matching the card's
    /// suit, and the moved unit is always a single terminal face-up card,
    /// never a run. Any stale drag context is cleared.
    pub fn attempt_foundation_move(&mut self, card: CardId) -> MoveOutcome {
        self.in_hand = None;

        let Some(source) = self.owner_of(card) else {
            return MoveOutcome::Rejected(RejectReason::UnknownCard);
        };
        if matches!(source, ContainerId::Foundation(_)) {
            return MoveOutcome::Rejected(RejectReason::Refused);
        }
        if !self.arena.card(card).face_up {
            trace!("foundation gesture on face-down {}", card);
            return MoveOutcome::Rejected(RejectReason::FaceDown);
        }
        if self.arena.card(card).leaf.is_some() {
            trace!("foundation gesture on non-terminal {}", card);
            return MoveOutcome::Rejected(RejectReason::NotTerminal);
        }

        let index = self.arena.card(card).suit.index();
        if !self.foundations[index].can_receive(&self.arena, card) {
            trace!("foundation {} refused {}", index, card);
            self.reset_container(source);
            return MoveOutcome::Rejected(RejectReason::Refused);
        }

        let single = self.release_from(source, card);
        self.foundations[index].receive(&mut self.arena, single);
        let dest = ContainerId::Foundation(index as u8);
        self.locations.insert(card, dest);
        self.record_move(card, source, dest)
    }

    /// Recycle the talon's tail card to the front (see `Talon::place_first`).
    pub fn recycle_talon(&mut self) -> bool {
        let recycled = self.talon.place_first(&mut self.arena);
        if recycled {
            debug!("talon recycled, {} now drawn", self.talon_root_display());
        }
        recycled
    }

    // === Internals ===

    fn talon_root_display(&self) -> String {
        match self.talon.root() {
            Some(root) => self.arena.card(root).to_string(),
            None => "nothing".to_string(),
        }
    }

    fn can_receive(&self, destination: ContainerId, card: CardId) -> bool {
        match destination {
            ContainerId::Tableau(i) => self.tableaus[i as usize].can_receive(&self.arena, card),
            ContainerId::Foundation(i) => {
                // Foundations take single cards only, even on a drop.
                self.arena.card(card).leaf.is_none()
                    && self.foundations[i as usize].can_receive(&self.arena, card)
            }
            ContainerId::Talon => false,
        }
    }

    fn release_from(&mut self, source: ContainerId, card: CardId) -> CardId {
        match source {
            ContainerId::Tableau(i) => self.tableaus[i as usize].release(&mut self.arena, card),
            ContainerId::Talon => self.talon.release(&mut self.arena, card),
            ContainerId::Foundation(_) => {
                panic!("{} cannot be released: cards never leave a foundation", card)
            }
        }
    }

    fn receive_at(&mut self, destination: ContainerId, run_root: CardId) {
        match destination {
            ContainerId::Tableau(i) => self.tableaus[i as usize].receive(&mut self.arena, run_root),
            ContainerId::Foundation(i) => {
                self.foundations[i as usize].receive(&mut self.arena, run_root)
            }
            ContainerId::Talon => panic!("the talon is never a move destination"),
        }
    }

    fn reset_container(&mut self, container: ContainerId) {
        match container {
            ContainerId::Tableau(i) => self.tableaus[i as usize].reset_layout(&mut self.arena),
            ContainerId::Foundation(i) => self.foundations[i as usize].reset_layout(&mut self.arena),
            ContainerId::Talon => self.talon.reset_layout(&mut self.arena),
        }
    }

    fn relabel_run(&mut self, run_root: CardId, destination: ContainerId) {
        let ids: Vec<CardId> = self.arena.chain(run_root).collect();
        for id in ids {
            self.locations.insert(id, destination);
        }
    }

    fn record_move(&mut self, card: CardId, from: ContainerId, to: ContainerId) -> MoveOutcome {
        let sequence = self.moves.len() as u32;
        self.moves.push_back(MoveRecord {
            card,
            from,
            to,
            sequence,
        });
        debug!("moved {} from {} to {}", self.arena.card(card), from, to);
        if self.is_won() {
            debug!("all four foundations complete");
        }
        MoveOutcome::Moved { card, from, to }
    }
}
