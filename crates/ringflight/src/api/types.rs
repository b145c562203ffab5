use bytemuck::{Pod, Zeroable};

/// Identity of one ring obstacle. Unique within a session, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub u32);

/// Role tag carried by every tracked body and by every contact it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRole {
    Player,
    /// A ring obstacle ("scoreDetect").
    Obstacle(ObstacleId),
    /// The static trigger zone behind the player ("loseGame").
    Boundary,
    /// Anything else the player can hit (the ground).
    Other,
}

impl BodyRole {
    pub fn obstacle(&self) -> Option<ObstacleId> {
        match *self {
            BodyRole::Obstacle(id) => Some(id),
            _ => None,
        }
    }
}

/// Two tracked bodies began overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyRole,
    pub b: BodyRole,
}

impl Contact {
    pub fn new(a: BodyRole, b: BodyRole) -> Self {
        Self { a, b }
    }

    /// True if either side has the given role.
    pub fn involves(&self, role: BodyRole) -> bool {
        self.a == role || self.b == role
    }

    /// The role opposite `role`, if `role` is part of this pair.
    pub fn other_than(&self, role: BodyRole) -> Option<BodyRole> {
        if self.a == role {
            Some(self.b)
        } else if self.b == role {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A sound event emitted by the game logic.
/// The numeric value maps to a sound in the host's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const COIN: SoundEvent = SoundEvent(1);
    pub const EXPLOSION: SoundEvent = SoundEvent(2);
    pub const MUSIC_START: SoundEvent = SoundEvent(3);
    pub const MUSIC_STOP: SoundEvent = SoundEvent(4);
}

/// A display event for the host UI.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = current score.
    pub const SCORE: f32 = 1.0;
    /// `a` = 1.0 when the "game over" banner is visible.
    pub const GAME_OVER: f32 = 2.0;
    /// `a` = 1.0 while the intro logo is shown.
    pub const INTRO: f32 = 3.0;
    /// `a` = background offset, `b` = ground offset.
    pub const SCROLL: f32 = 4.0;
    /// Host plays the one-shot boost animation on the player sprite.
    pub const BOOST: f32 = 5.0;

    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }
}
