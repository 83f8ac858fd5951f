//! Pong core game engine - ball, paddles, computer opponent and scoring

pub mod config;
pub mod entities;
pub mod game;
pub mod physics;
pub mod render;
pub mod types;

pub use config::{Config, ConfigError};
pub use entities::{Ball, Field, Paddle};
pub use game::GameSession;
pub use render::{CommandList, DrawCommand, Surface};
pub use types::*;
