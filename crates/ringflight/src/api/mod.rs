pub mod error;
pub mod game;
pub mod sinks;
pub mod types;
