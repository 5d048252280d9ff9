//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only (every timer counts whole 60 Hz frames)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wall;

pub use effects::{Firework, Particle};
pub use rect::Rect;
pub use state::{
    Ball, BallStatus, Brick, CollisionTag, GameEvent, GamePhase, GameState, Laser, Paddle,
    PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
pub use wall::{BRICK_PALETTE, LEVELS, LevelSpec, build_brick_wall};
