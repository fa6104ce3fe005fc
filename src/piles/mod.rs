//! The three container kinds: tableau columns, foundation stacks, and the
//! talon. Containers hold only root/leaf ids plus a fixed anchor; all run
//! linkage goes through the arena.

pub mod foundation;
pub mod tableau;
pub mod talon;

pub use foundation::FoundationPile;
pub use tableau::TableauPile;
pub use talon::Talon;
