pub mod api;
pub mod assets;
pub mod core;
pub mod game;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::error::ConfigError;
pub use api::game::{FrameContext, Game, GameConfig, RenderContext, SpriteInstance};
pub use api::sinks::{
    AudioSink, BodyCommand, BodySink, DisplaySink, EffectRequest, EffectSink, Host, PlayerSnapshot,
};
pub use api::types::{BodyRole, Contact, GameEvent, ObstacleId, SoundEvent};
pub use assets::manifest::AssetManifest;
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use game::collision::{classify, ContactKind};
pub use game::score::ScoreLedger;
pub use game::session::{Session, TapOutcome};
pub use game::spawner::{Obstacle, ObstacleSpawner, SpawnerTick};
pub use game::state::{GameState, StateMachine, TapAction};
pub use game::RingFlight;
pub use input::queue::{InputEvent, InputQueue};
pub use systems::scroll::ScrollLayer;

#[cfg(feature = "physics")]
pub use core::physics::ContactWorld;
