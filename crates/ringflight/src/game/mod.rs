pub mod collision;
pub mod input;
pub mod player;
pub mod score;
pub mod session;
pub mod spawner;
pub mod state;

use crate::api::error::ConfigError;
use crate::api::game::{FrameContext, Game, GameConfig, RenderContext, SpriteInstance};
use crate::api::sinks::{BodyCommand, BodySink};
use crate::game::input::primary_taps;
use crate::game::player::tilt;
use crate::game::session::{Session, TapOutcome};
use crate::input::queue::InputQueue;

/// Ring Flight: owns the current session and swaps in a fresh one on restart.
pub struct RingFlight {
    config: GameConfig,
    session: Session,
    /// Sessions started so far, including the current one.
    generation: u64,
}

impl RingFlight {
    pub fn new() -> Self {
        Self::from_valid(GameConfig::default())
    }

    /// Build a game from caller-supplied tunables, rejecting values the
    /// spawner and timers cannot work with.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: GameConfig) -> Self {
        let session = Session::new(&config, config.seed);
        Self {
            config,
            session,
            generation: 1,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn restart(&mut self, ctx: &mut FrameContext) {
        // Contacts and the player snapshot came from the old world.
        let stale = ctx.take_contacts();
        if !stale.is_empty() {
            log::debug!("dropping {} contacts from the finished session", stale.len());
        }
        ctx.player = None;
        ctx.command(BodyCommand::Reset);

        let seed = self.config.seed.wrapping_add(self.generation);
        self.generation += 1;
        self.session = Session::new(&self.config, seed);
        self.session.init(ctx);
        log::info!("session {} started", self.generation);
    }
}

impl Default for RingFlight {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for RingFlight {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut FrameContext) {
        self.session.init(ctx);
    }

    fn update(&mut self, ctx: &mut FrameContext, input: &InputQueue) {
        for _ in 0..primary_taps(input) {
            if self.session.on_tap(ctx) == TapOutcome::Restart {
                self.restart(ctx);
            }
        }

        for contact in ctx.take_contacts() {
            self.session.on_contact(&contact, ctx);
        }

        if let Some(snapshot) = ctx.player {
            self.session.observe_player(snapshot);
        }
        self.session.tick(self.config.fixed_dt, ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let player = self.session.player();
        if player.is_alive() {
            ctx.sprites.push(SpriteInstance {
                kind: SpriteInstance::PLAYER,
                x: player.pos().x,
                y: player.pos().y,
                rotation: tilt(player.velocity().y, self.config.tilt_factor),
            });
        }
        for (_, pos) in self.session.spawner().positions() {
            ctx.sprites.push(SpriteInstance {
                kind: SpriteInstance::RING,
                x: pos.x,
                y: pos.y,
                rotation: 0.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyRole, Contact, ObstacleId};
    use crate::game::state::GameState;
    use crate::input::queue::InputEvent;

    fn tap() -> InputQueue {
        InputQueue::from(vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }])
    }

    fn started() -> (RingFlight, FrameContext) {
        let mut game = RingFlight::new();
        let mut ctx = FrameContext::new();
        game.init(&mut ctx);
        game.update(&mut ctx, &tap());
        (game, ctx)
    }

    #[test]
    fn tap_then_crash_then_tap_restarts() {
        let (mut game, mut ctx) = started();
        assert_eq!(game.session().state(), GameState::Playing);

        for _ in 0..200 {
            game.update(&mut ctx, &InputQueue::new());
        }
        game.update(&mut ctx, &tap());
        assert_eq!(game.session().score(), 0);

        ctx.push_contact(Contact::new(BodyRole::Player, BodyRole::Obstacle(ObstacleId(1))));
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(game.session().score(), 1);

        ctx.push_contact(Contact::new(BodyRole::Player, BodyRole::Other));
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(game.session().state(), GameState::Dead);

        ctx.drain_bodies();
        game.update(&mut ctx, &tap());
        assert_eq!(game.generation(), 2);
        assert_eq!(game.session().state(), GameState::Intro);
        assert_eq!(game.session().score(), 0);
        assert!(game.session().spawner().is_empty());

        let bodies = ctx.drain_bodies();
        assert_eq!(bodies.first(), Some(&BodyCommand::Reset));
    }

    #[test]
    fn restart_drops_contacts_for_the_old_session() {
        let (mut game, mut ctx) = started();
        ctx.push_contact(Contact::new(BodyRole::Player, BodyRole::Other));
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(game.session().state(), GameState::Dead);

        ctx.push_contact(Contact::new(BodyRole::Player, BodyRole::Other));
        game.update(&mut ctx, &tap());
        assert_eq!(game.session().state(), GameState::Intro);
    }

    #[test]
    fn one_frame_of_taps_is_applied_in_order() {
        let (mut game, mut ctx) = started();
        ctx.push_contact(Contact::new(BodyRole::Other, BodyRole::Player));
        game.update(&mut ctx, &InputQueue::new());

        // Restart, then begin the new session.
        let taps = InputQueue::from(vec![
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::KeyDown { key_code: 32 },
        ]);
        game.update(&mut ctx, &taps);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.session().state(), GameState::Playing);
    }

    #[test]
    fn render_lists_player_and_rings() {
        let (mut game, mut ctx) = started();
        for _ in 0..190 {
            game.update(&mut ctx, &InputQueue::new());
        }
        let mut sprites = Vec::new();
        game.render(&mut RenderContext { sprites: &mut sprites });
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].kind, SpriteInstance::PLAYER);
        assert_eq!(sprites[1].kind, SpriteInstance::RING);
    }

    #[test]
    fn with_config_rejects_an_empty_spawn_band() {
        let config = GameConfig {
            world_height: 300.0,
            ..GameConfig::default()
        };
        match RingFlight::with_config(config) {
            Err(ConfigError::EmptySpawnBand { low, high, .. }) => assert!(low > high),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("an inverted band must be rejected"),
        }
    }

    #[test]
    fn with_config_accepts_valid_tunables() {
        let config = GameConfig {
            seed: 9,
            ..GameConfig::default()
        };
        let game = RingFlight::with_config(config).unwrap();
        assert_eq!(game.config().seed, 9);
        assert_eq!(game.session().state(), GameState::Intro);
    }
}
