use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::sinks::{BodyCommand, EffectRequest, PlayerSnapshot};
use crate::api::types::{Contact, GameEvent, SoundEvent};
use crate::assets::manifest::AssetManifest;
use crate::input::queue::InputQueue;

/// Tunables for one game, provided by the game and optionally loaded from JSON.
/// World coordinates are Y-down: y grows toward the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on fixed steps run for one host frame.
    pub max_steps_per_frame: u32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Seconds between obstacle spawns while playing.
    pub spawn_interval: f32,
    /// Seconds an obstacle takes to cross the screen.
    pub traversal_time: f32,
    /// Lowest allowed obstacle y.
    pub spawn_margin_low: f32,
    /// Distance kept between the highest allowed obstacle y and the world height.
    pub spawn_margin_high: f32,
    /// Rendered ring width; drives the off-screen start and end positions.
    pub obstacle_width: f32,
    /// Full size of the ring's pass-through detector.
    pub obstacle_collider: [f32; 2],
    /// Full size of the player's collider.
    pub player_size: [f32; 2],
    /// Player start as a fraction of the world size.
    pub player_start: [f32; 2],
    /// Downward acceleration once the player is active.
    pub gravity: f32,
    /// Upward velocity change applied per flap.
    pub flap_impulse: f32,
    /// Radians of tilt per unit of vertical velocity.
    pub tilt_factor: f32,
    /// Horizontal center of the boundary zone.
    pub boundary_x: f32,
    /// Width of the boundary zone.
    pub boundary_width: f32,
    /// Gaps left above and below the boundary zone.
    pub boundary_margins: [f32; 2],
    /// Ground collider thickness at the bottom of the world.
    pub ground_height: f32,
    /// Seconds for the background to scroll one width.
    pub background_period: f32,
    /// Seconds for the ground to scroll one width.
    pub ground_period: f32,
    /// Seed for obstacle placement; each new session derives its own.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            world_width: 1024.0,
            world_height: 768.0,
            spawn_interval: 3.0,
            traversal_time: 6.2,
            spawn_margin_low: 125.0,
            spawn_margin_high: 250.0,
            obstacle_width: 64.0,
            obstacle_collider: [24.0, 64.0],
            player_size: [64.0, 40.0],
            player_start: [1.0 / 6.0, 0.25],
            gravity: 750.0,
            flap_impulse: 300.0,
            tilt_factor: 0.001,
            boundary_x: 200.0,
            boundary_width: 32.0,
            boundary_margins: [50.0, 150.0],
            ground_height: 10.0,
            background_period: 20.0,
            ground_period: 8.0,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(ConfigError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        for (name, value) in [
            ("fixed_dt", self.fixed_dt),
            ("spawn_interval", self.spawn_interval),
            ("traversal_time", self.traversal_time),
            ("background_period", self.background_period),
            ("ground_period", self.ground_period),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        let (low, high) = self.spawn_band();
        if low < 0.0 || low > high {
            return Err(ConfigError::EmptySpawnBand {
                low,
                high,
                height: self.world_height,
            });
        }
        Ok(())
    }

    /// Inclusive vertical range obstacles may spawn in.
    pub fn spawn_band(&self) -> (f32, f32) {
        (
            self.spawn_margin_low,
            self.world_height - self.spawn_margin_high,
        )
    }

    pub fn player_start_pos(&self) -> Vec2 {
        Vec2::new(
            self.world_width * self.player_start[0],
            self.world_height * self.player_start[1],
        )
    }
}

/// The contract the host loop drives.
pub trait Game {
    /// Return configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Register bodies and publish the initial display state.
    fn init(&mut self, ctx: &mut FrameContext);

    /// One fixed-timestep tick: input, queued contacts, then time.
    fn update(&mut self, ctx: &mut FrameContext, input: &InputQueue);

    /// Optional read-only pass that lists sprites for the host renderer.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Per-frame exchange buffer between the game and its host.
/// The game writes sounds, display events, effects and body commands;
/// the host writes contacts and the player snapshot.
pub struct FrameContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    pub effects: Vec<EffectRequest>,
    pub bodies: Vec<BodyCommand>,
    /// Latest player position and velocity, once a physics host reports one.
    pub player: Option<PlayerSnapshot>,
    contacts: Vec<Contact>,
    manifest: AssetManifest,
}

impl FrameContext {
    pub fn new() -> Self {
        Self::with_manifest(AssetManifest::default())
    }

    pub fn with_manifest(manifest: AssetManifest) -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            effects: Vec::new(),
            bodies: Vec::new(),
            player: None,
            contacts: Vec::new(),
            manifest,
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn set_manifest(&mut self, manifest: AssetManifest) {
        self.manifest = manifest;
    }

    /// Queue a contact reported by the physics host for the next update.
    pub fn push_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Take every queued contact, in arrival order.
    pub fn take_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }

    /// Take every pending body command, in emission order.
    pub fn drain_bodies(&mut self) -> Vec<BodyCommand> {
        std::mem::take(&mut self.bodies)
    }

    /// Clear per-frame outputs (sounds, events, effects).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.effects.clear();
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One sprite for the host renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 4;

    pub const PLAYER: f32 = 1.0;
    pub const RING: f32 = 2.0;
}

/// Render context for listing sprites.
pub struct RenderContext<'a> {
    pub sprites: &'a mut Vec<SpriteInstance>,
}
