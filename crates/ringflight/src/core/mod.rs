pub mod rng;
pub mod time;
#[cfg(feature = "physics")]
pub mod physics;
