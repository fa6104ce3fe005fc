//! Move context, outcomes, and the move log record.
//!
//! A `MoveContext` exists for the duration of exactly one gesture: created
//! when a run is picked up, consumed unconditionally by the move attempt
//! that follows. The engine never carries a stale card-in-hand across
//! gestures.

use serde::{Deserialize, Serialize};

use crate::core::card::CardId;

/// Identifies one of the table's containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    /// Tableau column by index (0..7).
    Tableau(u8),
    /// Foundation pile by suit index (0..4).
    Foundation(u8),
    /// The draw container.
    Talon,
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerId::Tableau(i) => write!(f, "Tableau({})", i),
            ContainerId::Foundation(i) => write!(f, "Foundation({})", i),
            ContainerId::Talon => write!(f, "Talon"),
        }
    }
}

/// The one in-flight move: which run root is held and where it came from.
///
/// Owned by the game table between pickup and drop; cleared at the end of
/// every move attempt regardless of outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveContext {
    /// Root of the run being held.
    pub card: CardId,
    /// Container that owned the run when it was picked up.
    pub source: ContainerId,
}

/// Why a move attempt was rejected.
///
/// Rejections are ordinary values, not errors: the source pile's layout is
/// reset and the game continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// No pickup preceded the drop.
    NoMoveInFlight,
    /// The drop found no destination at all.
    NoDestination,
    /// The destination refused the card.
    Refused,
    /// Foundation gesture on a card that still carries a run.
    NotTerminal,
    /// Foundation gesture on a face-down card.
    FaceDown,
    /// The card belongs to no container.
    UnknownCard,
}

/// Result of a move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The run was released from `from` and received by `to`.
    Moved {
        card: CardId,
        from: ContainerId,
        to: ContainerId,
    },
    /// Nothing changed structurally; the source layout was reset.
    Rejected(RejectReason),
}

impl MoveOutcome {
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected(_))
    }
}

/// One executed move, for the read-only move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Root of the run that moved.
    pub card: CardId,
    pub from: ContainerId,
    pub to: ContainerId,
    /// Position in the log, starting at 0.
    pub sequence: u32,
}
