use glam::Vec2;

use crate::api::sinks::PlayerSnapshot;

/// The session's view of the glider. Position and velocity belong to the
/// physics host; the session keeps the last snapshot it saw.
#[derive(Debug, Clone)]
pub struct Player {
    alive: bool,
    active: bool,
    last: PlayerSnapshot,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            alive: true,
            active: false,
            last: PlayerSnapshot {
                pos: start,
                velocity: Vec2::ZERO,
            },
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether gravity acts on the player yet.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn observe(&mut self, snapshot: PlayerSnapshot) {
        if self.alive {
            self.last = snapshot;
        }
    }

    /// Last known position; where the death effect plays.
    pub fn pos(&self) -> Vec2 {
        self.last.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.last.velocity
    }
}

/// Nose angle for a vertical velocity. Y-down world, clockwise-positive:
/// falling tips the nose down, climbing lifts it.
pub fn tilt(velocity_y: f32, factor: f32) -> f32 {
    velocity_y * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilt_follows_velocity() {
        assert_eq!(tilt(0.0, 0.001), 0.0);
        assert!(tilt(400.0, 0.001) > 0.0);
        assert!(tilt(-300.0, 0.001) < 0.0);
    }

    #[test]
    fn dead_player_keeps_last_position() {
        let mut p = Player::new(Vec2::new(10.0, 10.0));
        p.observe(PlayerSnapshot { pos: Vec2::new(20.0, 30.0), velocity: Vec2::Y });
        p.kill();
        p.observe(PlayerSnapshot::default());
        assert_eq!(p.pos(), Vec2::new(20.0, 30.0));
        assert!(!p.is_alive());
    }
}
