//! One play-through, from the intro logo to the crash.
//!
//! A `Session` owns everything that must start fresh on restart: state
//! machine, score, spawner, player status, scroll layers and random source.
//! Restarting never mutates a dead session; the owner builds a new one.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::sinks::{BodyCommand, Host, PlayerSnapshot};
use crate::api::types::{BodyRole, Contact, ObstacleId, SoundEvent};
use crate::assets::manifest::PLAYER_EXPLOSION;
use crate::core::rng::Rng;
use crate::game::collision::{classify, ContactKind};
use crate::game::player::{tilt, Player};
use crate::game::score::ScoreLedger;
use crate::game::spawner::ObstacleSpawner;
use crate::game::state::{GameState, StateMachine, TapAction};
use crate::systems::scroll::ScrollLayer;

/// What the session's owner must do after a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Continue,
    /// The session is over; replace it with a new one.
    Restart,
}

pub struct Session {
    config: GameConfig,
    machine: StateMachine,
    score: ScoreLedger,
    spawner: ObstacleSpawner,
    player: Player,
    rng: Rng,
    background: ScrollLayer,
    ground: ScrollLayer,
    elapsed: f32,
}

impl Session {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            machine: StateMachine::new(),
            score: ScoreLedger::new(),
            spawner: ObstacleSpawner::new(config),
            player: Player::new(config.player_start_pos()),
            rng: Rng::new(seed),
            background: ScrollLayer::new(config.world_width, config.background_period),
            ground: ScrollLayer::new(config.world_width, config.ground_period),
            elapsed: 0.0,
        }
    }

    /// Register the session's static bodies and publish the opening screen.
    pub fn init(&mut self, host: &mut impl Host) {
        let c = &self.config;
        let (w, h) = (c.world_width, c.world_height);

        host.command(BodyCommand::Spawn {
            role: BodyRole::Player,
            pos: self.player.pos(),
            half_extents: Vec2::from(c.player_size) / 2.0,
        });

        let [top, bottom] = c.boundary_margins;
        let boundary_height = (h - top - bottom).max(0.0);
        host.command(BodyCommand::Spawn {
            role: BodyRole::Boundary,
            pos: Vec2::new(c.boundary_x, top + boundary_height / 2.0),
            half_extents: Vec2::new(c.boundary_width / 2.0, boundary_height / 2.0),
        });

        host.command(BodyCommand::Spawn {
            role: BodyRole::Other,
            pos: Vec2::new(w / 2.0, h - c.ground_height / 2.0),
            half_extents: Vec2::new(w, c.ground_height / 2.0),
        });

        self.score.reset(host);
        host.show_game_over(false);
        host.show_intro(true);
        host.play_music();
        log::info!("session ready ({}x{})", w, h);
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Seconds of world motion so far; stops advancing at death.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Background and ground offsets.
    pub fn scroll_offsets(&self) -> (f32, f32) {
        (self.background.offset(), self.ground.offset())
    }

    pub fn on_tap(&mut self, host: &mut impl Host) -> TapOutcome {
        match self.machine.on_tap() {
            TapAction::Begin => {
                host.show_intro(false);
                host.command(BodyCommand::ActivatePlayer);
                self.player.activate();
                self.spawner.enable();
                log::info!("play started");
                TapOutcome::Continue
            }
            TapAction::Flap => {
                host.command(BodyCommand::Flap {
                    impulse: Vec2::new(0.0, -self.config.flap_impulse),
                });
                host.play_boost();
                TapOutcome::Continue
            }
            TapAction::Restart => TapOutcome::Restart,
        }
    }

    /// React to one contact. Only a session in play reacts; contacts that
    /// arrive in the intro or after death are dropped.
    pub fn on_contact(&mut self, contact: &Contact, host: &mut impl Host) {
        if !self.machine.is_playing() {
            log::debug!("contact {:?} ignored in {:?}", contact, self.state());
            return;
        }

        match classify(contact) {
            ContactKind::ScorePass(id) => self.score_pass(id, host),
            ContactKind::ObstacleDeath => {
                self.on_death_trigger(host);
            }
            ContactKind::Ignored => {}
        }
    }

    /// Playing → Dead with the full death sequence. Returns false when the
    /// session was not playing.
    pub fn on_death_trigger(&mut self, host: &mut impl Host) -> bool {
        if !self.machine.on_death_trigger() {
            return false;
        }

        self.spawner.disable();
        self.player.kill();

        if !host.spawn_effect(PLAYER_EXPLOSION, self.player.pos()) {
            log::warn!("effect '{}' not loaded; skipped", PLAYER_EXPLOSION);
        }
        host.play_cue(SoundEvent::EXPLOSION);
        host.show_game_over(true);
        self.score.publish(host);
        host.stop_music();
        host.command(BodyCommand::Freeze);
        host.command(BodyCommand::Remove(BodyRole::Player));

        log::info!("game over, score {}", self.score.value());
        true
    }

    /// Take the physics host's latest view of the player.
    pub fn observe_player(&mut self, snapshot: PlayerSnapshot) {
        self.player.observe(snapshot);
    }

    /// Advance world time. A dead session is frozen.
    pub fn tick(&mut self, dt: f32, host: &mut impl Host) {
        if self.machine.is_dead() {
            return;
        }
        self.elapsed += dt;

        let background = self.background.advance(dt);
        let ground = self.ground.advance(dt);
        host.show_scroll(background, ground);

        if !self.machine.is_playing() {
            return;
        }

        let half_extents = Vec2::from(self.config.obstacle_collider) / 2.0;
        let tick = self.spawner.tick(dt, &mut self.rng);
        for id in tick.expired {
            log::debug!("ring {:?} left unpassed", id);
            host.command(BodyCommand::Remove(BodyRole::Obstacle(id)));
        }
        for id in tick.spawned {
            if let Some(pos) = self.spawner.position(id) {
                host.command(BodyCommand::Spawn {
                    role: BodyRole::Obstacle(id),
                    pos,
                    half_extents,
                });
            }
        }
        for (id, pos) in self.spawner.positions() {
            host.command(BodyCommand::MoveObstacle { id, pos });
        }

        if self.player.is_active() {
            host.command(BodyCommand::TiltPlayer {
                angle: tilt(self.player.velocity().y, self.config.tilt_factor),
            });
        }
    }

    fn score_pass(&mut self, id: ObstacleId, host: &mut impl Host) {
        // A ring can report more than once before its removal lands.
        if !self.spawner.remove(id) {
            log::debug!("ring {:?} already consumed", id);
            return;
        }
        host.command(BodyCommand::Remove(BodyRole::Obstacle(id)));
        let total = self.score.increment(host);
        host.play_cue(SoundEvent::COIN);
        log::debug!("ring {:?} passed, score {}", id, total);
    }
}
