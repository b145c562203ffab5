//! Contact classification. Pure: reactions are applied by the session.

use crate::api::types::{BodyRole, Contact, ObstacleId};

/// What a contact means for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Something passed through a ring: consume it and score.
    ScorePass(ObstacleId),
    /// The player hit something that is not the boundary zone.
    ObstacleDeath,
    /// No reaction.
    Ignored,
}

/// Classify one contact. Rules, first match wins:
///
/// 1. Either body is a ring: score-pass on that ring (the first ring of the
///    pair when both are rings).
/// 2. The player touches anything but the boundary zone: death.
/// 3. Anything else, including player/boundary: ignored.
///
/// Ring/boundary pairs are caught by rule 1, so they never end the game.
pub fn classify(contact: &Contact) -> ContactKind {
    if let Some(id) = contact.a.obstacle().or_else(|| contact.b.obstacle()) {
        return ContactKind::ScorePass(id);
    }

    match contact.other_than(BodyRole::Player) {
        Some(BodyRole::Boundary) | None => ContactKind::Ignored,
        Some(_) => ContactKind::ObstacleDeath,
    }
}
