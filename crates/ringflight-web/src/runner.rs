use ringflight::{
    AssetManifest, FixedTimestep, FrameContext, Game, GameConfig, GameEvent, InputEvent,
    InputQueue, RenderContext, SpriteInstance,
};
#[cfg(feature = "physics")]
use ringflight::ContactWorld;

/// Drives a `Game` from host frames: fixed timestep, input hand-off, body
/// commands into the contact world, and flat buffers for the host to read.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: FrameContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    #[cfg(feature = "physics")]
    world: ContactWorld,
    initialized: bool,
    /// Flat buffer of sound event IDs for the host to read.
    sound_buffer: Vec<u8>,
    /// Display events accumulated over all ticks of the last frame.
    event_buffer: Vec<GameEvent>,
    sprite_buffer: Vec<SpriteInstance>,
    /// Effect requests as (event_id, x, y) triples.
    effect_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        #[cfg(feature = "physics")]
        let world = {
            let mut world = ContactWorld::new(config.gravity);
            world.set_dt(config.fixed_dt);
            world
        };

        Self {
            game,
            ctx: FrameContext::new(),
            input: InputQueue::new(),
            timestep,
            config,
            #[cfg(feature = "physics")]
            world,
            initialized: false,
            sound_buffer: Vec::with_capacity(16),
            event_buffer: Vec::with_capacity(32),
            sprite_buffer: Vec::with_capacity(16),
            effect_buffer: Vec::with_capacity(6),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.sync_world();
        self.collect_outputs();
        self.initialized = true;
    }

    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!(
                    "manifest loaded: {} sounds, {} effects",
                    manifest.sounds.len(),
                    manifest.effects.len()
                );
                self.ctx.set_manifest(manifest);
            }
            Err(e) => log::warn!("manifest rejected: {}", e),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: as many fixed ticks as the elapsed time allows,
    /// each followed by a physics step, then rebuild the output buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            // A gesture belongs to exactly one tick: the first one.
            let mut input = InputQueue::from(self.input.drain());
            for _ in 0..steps {
                self.game.update(&mut self.ctx, &input);
                self.sync_world();
                input = InputQueue::new();
            }
        }

        self.collect_outputs();
    }

    /// Apply pending body commands and step the contact world; its contacts
    /// and player snapshot feed the next update.
    #[cfg(feature = "physics")]
    fn sync_world(&mut self) {
        for cmd in self.ctx.drain_bodies() {
            self.world.apply(&cmd);
        }
        let mut contacts = Vec::new();
        self.world.step_into(&mut contacts);
        for contact in contacts {
            self.ctx.push_contact(contact);
        }
        self.ctx.player = self.world.player_snapshot();
    }

    /// Without a physics host, body commands have nowhere to go.
    #[cfg(not(feature = "physics"))]
    fn sync_world(&mut self) {
        self.ctx.drain_bodies();
    }

    fn collect_outputs(&mut self) {
        self.sound_buffer.clear();
        self.sound_buffer
            .extend(self.ctx.sounds.iter().map(|s| s.0 as u8));

        self.event_buffer.clear();
        self.event_buffer.extend_from_slice(&self.ctx.events);

        self.effect_buffer.clear();
        for fx in &self.ctx.effects {
            self.effect_buffer
                .extend_from_slice(&[fx.event_id as f32, fx.pos.x, fx.pos.y]);
        }

        self.sprite_buffer.clear();
        let mut render_ctx = RenderContext {
            sprites: &mut self.sprite_buffer,
        };
        self.game.render(&mut render_ctx);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ---- Buffers for host reads ----

    pub fn sounds(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.event_buffer
    }

    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprite_buffer
    }

    pub fn effects(&self) -> &[f32] {
        &self.effect_buffer
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<GameEvent, f32>(&self.event_buffer).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<SpriteInstance, f32>(&self.sprite_buffer).as_ptr()
    }

    pub fn sprite_count(&self) -> u32 {
        self.sprite_buffer.len() as u32
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.effect_buffer.as_ptr()
    }

    pub fn effect_count(&self) -> u32 {
        (self.effect_buffer.len() / 3) as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
