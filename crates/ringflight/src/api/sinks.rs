//! Capability interfaces the game calls through. `FrameContext` implements
//! all of them by buffering requests for the host to drain each frame.

use glam::Vec2;

use crate::api::game::FrameContext;
use crate::api::types::{BodyRole, GameEvent, ObstacleId, SoundEvent};

/// Score label, banners and background motion.
pub trait DisplaySink {
    fn show_score(&mut self, score: u32);
    fn show_game_over(&mut self, visible: bool);
    fn show_intro(&mut self, visible: bool);
    fn show_scroll(&mut self, background: f32, ground: f32);
    /// One-shot boost animation on the player sprite.
    fn play_boost(&mut self);
}

/// Fire-and-forget cues plus the looping background track.
pub trait AudioSink {
    fn play_cue(&mut self, cue: SoundEvent);
    fn play_music(&mut self);
    fn stop_music(&mut self);
}

/// One-shot particle effects.
pub trait EffectSink {
    /// Request a named effect at `pos`. Returns false when the host has no
    /// definition for it; the request is dropped.
    fn spawn_effect(&mut self, name: &str, pos: Vec2) -> bool;
}

/// Tracked-body registration and control.
pub trait BodySink {
    fn command(&mut self, cmd: BodyCommand);
}

/// Everything the game needs from its host.
pub trait Host: DisplaySink + AudioSink + EffectSink + BodySink {}

impl<T: DisplaySink + AudioSink + EffectSink + BodySink> Host for T {}

/// A request to the physics host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyCommand {
    /// Register a body. The host picks the body type from the role.
    Spawn {
        role: BodyRole,
        pos: Vec2,
        half_extents: Vec2,
    },
    MoveObstacle { id: ObstacleId, pos: Vec2 },
    /// Unregister a body. Unknown bodies are ignored.
    Remove(BodyRole),
    /// Let gravity act on the player.
    ActivatePlayer,
    /// Zero the player's velocity, then apply `impulse`.
    Flap { impulse: Vec2 },
    TiltPlayer { angle: f32 },
    /// Stop all world motion.
    Freeze,
    /// Drop every body; a new session follows.
    Reset,
}

/// Player state as reported back by the physics host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub velocity: Vec2,
}

/// A resolved effect request for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    /// Host-side effect id from the asset manifest.
    pub event_id: u32,
    pub pos: Vec2,
}

impl DisplaySink for FrameContext {
    fn show_score(&mut self, score: u32) {
        self.events.push(GameEvent::new(GameEvent::SCORE, score as f32));
    }

    fn show_game_over(&mut self, visible: bool) {
        self.events.push(GameEvent::new(GameEvent::GAME_OVER, flag(visible)));
    }

    fn show_intro(&mut self, visible: bool) {
        self.events.push(GameEvent::new(GameEvent::INTRO, flag(visible)));
    }

    fn show_scroll(&mut self, background: f32, ground: f32) {
        self.events.push(GameEvent {
            kind: GameEvent::SCROLL,
            a: background,
            b: ground,
            c: 0.0,
        });
    }

    fn play_boost(&mut self) {
        self.events.push(GameEvent::new(GameEvent::BOOST, 1.0));
    }
}

impl AudioSink for FrameContext {
    fn play_cue(&mut self, cue: SoundEvent) {
        self.sounds.push(cue);
    }

    fn play_music(&mut self) {
        self.sounds.push(SoundEvent::MUSIC_START);
    }

    fn stop_music(&mut self) {
        self.sounds.push(SoundEvent::MUSIC_STOP);
    }
}

impl EffectSink for FrameContext {
    fn spawn_effect(&mut self, name: &str, pos: Vec2) -> bool {
        let Some(event_id) = self.manifest().effects.get(name).map(|e| e.event_id) else {
            return false;
        };
        self.effects.push(EffectRequest { event_id, pos });
        true
    }
}

impl BodySink for FrameContext {
    fn command(&mut self, cmd: BodyCommand) {
        self.bodies.push(cmd);
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::AssetManifest;

    #[test]
    fn missing_effect_is_dropped() {
        let mut ctx = FrameContext::new();
        assert!(!ctx.spawn_effect("player_explosion", Vec2::ZERO));
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn known_effect_resolves_event_id() {
        let manifest = AssetManifest::from_json(
            r#"{ "effects": { "player_explosion": { "path": "explosion.json", "event_id": 9 } } }"#,
        )
        .unwrap();
        let mut ctx = FrameContext::with_manifest(manifest);
        assert!(ctx.spawn_effect("player_explosion", Vec2::new(10.0, 20.0)));
        assert_eq!(
            ctx.effects,
            vec![EffectRequest { event_id: 9, pos: Vec2::new(10.0, 20.0) }]
        );
    }

    #[test]
    fn music_commands_map_to_sound_events() {
        let mut ctx = FrameContext::new();
        ctx.play_music();
        ctx.play_cue(SoundEvent::COIN);
        ctx.stop_music();
        assert_eq!(
            ctx.sounds,
            vec![SoundEvent::MUSIC_START, SoundEvent::COIN, SoundEvent::MUSIC_STOP]
        );
    }
}
