//! Brick Blitz - a Breakout/Arkanoid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, power-ups)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound cues (silent no-op without an audio context)
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels (origin top-left, +y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Simulation runs frame-stepped at a fixed 60 Hz
    pub const FRAME_RATE: f32 = 60.0;
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE;
    /// Maximum catch-up frames per render to prevent spiral of death
    pub const MAX_FRAMES_PER_RENDER: u32 = 4;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_GROWN_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Distance from the screen bottom to the paddle top
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 6.0;

    /// All paddle/ball power-up effects last this many frames
    pub const POWER_UP_DURATION: u32 = 600;
    /// Per-destroyed-brick chance of dropping a power-up
    pub const POWER_UP_DROP_CHANCE: f64 = 0.3;
    pub const POWER_UP_WIDTH: f32 = 30.0;
    pub const POWER_UP_HEIGHT: f32 = 15.0;
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;

    /// Laser projectile defaults
    pub const LASER_WIDTH: f32 = 5.0;
    pub const LASER_HEIGHT: f32 = 15.0;
    pub const LASER_SPEED: f32 = 8.0;
    /// Lasers spawn in a pair this far either side of the paddle center
    pub const LASER_MOUNT_OFFSET: f32 = 30.0;

    /// Brick wall layout
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Subtracted from each grid column to leave a gutter
    pub const BRICK_GUTTER: f32 = 10.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const WALL_TOP_OFFSET: f32 = 50.0;

    /// Scoring and session
    pub const SCORE_PER_BRICK: u32 = 10;
    pub const STARTING_LIVES: i32 = 3;
    /// Transient HUD message display time in frames
    pub const HUD_MESSAGE_FRAMES: u32 = 120;
}
