//! Contact classification
//!
//! Physics reports "these two entities started touching"; this module turns
//! that into what it means for the run.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};

/// A gameplay event produced by a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player touched the ground; jumping is allowed again
    Landed,
    /// Player hit an obstacle; the run is over
    Died,
    /// Player picked up a prize
    LeveledUp,
}

/// Classify a contact between two entities, in either order
pub fn classify(a: &Entity, b: &Entity) -> Option<GameEvent> {
    classify_kinds(a.kind, b.kind)
}

/// Classify a contact between two entity kinds, in either order
pub fn classify_kinds(a: EntityKind, b: EntityKind) -> Option<GameEvent> {
    use EntityKind::*;

    match (a, b) {
        (Player, Ground) | (Ground, Player) => Some(GameEvent::Landed),
        (Player, Obstacle) | (Obstacle, Player) => Some(GameEvent::Died),
        (Player, Prize) | (Prize, Player) => Some(GameEvent::LeveledUp),
        (Player, Player)
        | (Obstacle, Obstacle | Prize | Ground)
        | (Prize, Obstacle | Prize | Ground)
        | (Ground, Obstacle | Prize | Ground) => None,
    }
}

/// Whether two kinds push each other apart
///
/// Only the player and the ground are solid to each other; everything else
/// passes through.
pub fn should_physically_collide(a: EntityKind, b: EntityKind) -> bool {
    matches!(
        (a, b),
        (EntityKind::Player, EntityKind::Ground) | (EntityKind::Ground, EntityKind::Player)
    )
}

/// Whether touching between two kinds is reported to the game loop
///
/// Every contact involving the player is reported. Obstacles and prizes
/// never report contact with each other or with the ground.
pub fn should_report_contact(a: EntityKind, b: EntityKind) -> bool {
    classify_kinds(a, b).is_some()
}
