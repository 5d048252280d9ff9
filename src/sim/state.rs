//! Game state and core simulation types
//!
//! Everything the per-frame tick reads or mutates lives here. All timers are
//! frame counts, not wall-clock durations; game speed is coupled to the fixed
//! 60 Hz step.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision;
use super::effects::{Firework, Particle};
use super::rect::Rect;
use super::wall::{LEVELS, build_brick_wall};
use crate::consts::*;

/// Top-level phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    TitleScreen,
    Playing,
    GameOver,
    YouWin,
}

/// What a ball update reported back to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStatus {
    Playing,
    /// Ball fell past the bottom edge
    Lost,
}

/// Which surface the ball bounced off this frame
///
/// When wall and paddle conditions both fire in one frame the paddle tag
/// wins: wall checks run first and the last assignment is reported. Sound
/// cues and particle bursts key off this tag, so the precedence is load
/// bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionTag {
    Wall,
    Paddle,
}

/// Things that happened during a tick, drained by the front-end for
/// audio cues. Never consumed inside the sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce,
    BrickDestroyed,
    LaserFired,
    PowerUpCollected(PowerUpKind),
    BallLost,
    GameOver,
    LevelCleared,
    Victory,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Grow,
    Laser,
    Glue,
    Slow,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Grow,
        PowerUpKind::Laser,
        PowerUpKind::Glue,
        PowerUpKind::Slow,
    ];

    /// Capsule fill color
    pub fn color(&self) -> [f32; 4] {
        match self {
            PowerUpKind::Grow => [0.24, 0.24, 1.0, 1.0],
            PowerUpKind::Laser => [1.0, 0.24, 0.24, 1.0],
            PowerUpKind::Glue => [0.24, 1.0, 0.24, 1.0],
            PowerUpKind::Slow => [1.0, 0.65, 0.0, 1.0],
        }
    }

    /// Letter drawn on the capsule
    pub fn symbol(&self) -> char {
        match self {
            PowerUpKind::Grow => 'G',
            PowerUpKind::Laser => 'L',
            PowerUpKind::Glue => 'C',
            PowerUpKind::Slow => 'S',
        }
    }

    /// Transient HUD message shown on catch
    pub fn message(&self) -> &'static str {
        match self {
            PowerUpKind::Grow => "PADDLE GROW",
            PowerUpKind::Laser => "LASER CANNONS",
            PowerUpKind::Glue => "CATCH PADDLE",
            PowerUpKind::Slow => "SLOW BALL",
        }
    }

    /// Grow/Laser/Glue attach to the paddle; Slow attaches to the ball
    pub fn affects_paddle(&self) -> bool {
        !matches!(self, PowerUpKind::Slow)
    }
}

/// Frame countdowns for the paddle's power-up effects
///
/// An effect is active iff its timer is non-zero; re-catching a power-up
/// refreshes the timer rather than stacking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerUpTimers {
    pub grow: u32,
    pub laser: u32,
    pub glue: u32,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub timers: PowerUpTimers,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                SCREEN_HEIGHT - PADDLE_BOTTOM_MARGIN,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            timers: PowerUpTimers::default(),
        }
    }
}

impl Paddle {
    pub fn has_laser(&self) -> bool {
        self.timers.laser > 0
    }

    pub fn has_glue(&self) -> bool {
        self.timers.glue > 0
    }

    pub fn is_grown(&self) -> bool {
        self.timers.grow > 0
    }

    /// Restore original width and clear all effects. Called on life loss and
    /// on returning to the title screen.
    pub fn reset(&mut self) {
        self.rect.resize_width_about_center(PADDLE_WIDTH);
        self.rect.set_center_x(SCREEN_WIDTH / 2.0);
        self.timers = PowerUpTimers::default();
    }

    /// Consume movement input, clamp to the screen, and advance effect timers
    pub fn update(&mut self, left: bool, right: bool) {
        if left {
            self.rect.x -= PADDLE_SPEED;
        }
        if right {
            self.rect.x += PADDLE_SPEED;
        }
        self.rect.clamp_horizontal(0.0, SCREEN_WIDTH);

        if self.timers.grow > 0 {
            self.timers.grow -= 1;
            if self.timers.grow == 0 {
                self.rect.resize_width_about_center(PADDLE_WIDTH);
            }
        }
        self.timers.laser = self.timers.laser.saturating_sub(1);
        self.timers.glue = self.timers.glue.saturating_sub(1);
    }

    /// Apply a caught paddle power-up, refreshing its timer
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Grow => {
                if self.timers.grow == 0 {
                    self.rect.resize_width_about_center(PADDLE_GROWN_WIDTH);
                }
                self.timers.grow = POWER_UP_DURATION;
            }
            PowerUpKind::Laser => self.timers.laser = POWER_UP_DURATION,
            PowerUpKind::Glue => self.timers.glue = POWER_UP_DURATION,
            // Slow belongs to the ball
            PowerUpKind::Slow => {}
        }
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub is_glued: bool,
    /// Frames remaining of the slow effect; zero means full speed
    pub slow_ticks: u32,
}

impl Ball {
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            is_glued: false,
            slow_ticks: 0,
        };
        ball.reset(rng);
        ball
    }

    /// Bounding square used for all collision checks
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.radius * 2.0, self.radius * 2.0)
    }

    /// Recenter with a fresh launch velocity, clearing glue/slow state
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        self.vel = Vec2::new(random_sign(rng) * BALL_BASE_SPEED, -BALL_BASE_SPEED);
        self.is_glued = false;
        self.slow_ticks = 0;
    }

    /// Advance one frame of ball physics
    ///
    /// Mirrors the update order the rest of the game depends on: glue pinning
    /// and launch, slow expiry, integration, top wall, side walls, paddle,
    /// bottom loss. A frame that satisfies both a wall and the paddle
    /// condition reports `Paddle` because the paddle check assigns last.
    pub fn update(
        &mut self,
        paddle: &Paddle,
        launch: bool,
        rng: &mut Pcg32,
    ) -> (BallStatus, Option<CollisionTag>) {
        if self.is_glued {
            // Pinned to paddle top-center until launched
            self.pos.x = paddle.rect.center_x();
            self.pos.y = paddle.rect.top() - self.radius;
            if launch {
                self.is_glued = false;
                self.vel = Vec2::new(random_sign(rng) * BALL_BASE_SPEED, -BALL_BASE_SPEED);
            }
            return (BallStatus::Playing, None);
        }

        if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
            if self.slow_ticks == 0 {
                // Undo the halving applied on activation
                self.vel *= 2.0;
            }
        }

        self.pos += self.vel;

        let rect = self.rect();
        let mut tag = None;
        if collision::hits_top_edge(&rect) {
            self.vel.y = -self.vel.y;
            tag = Some(CollisionTag::Wall);
        }
        if collision::hits_side_edge(&rect) {
            self.vel.x = -self.vel.x;
            tag = Some(CollisionTag::Wall);
        }
        if rect.intersects(&paddle.rect) && self.vel.y > 0.0 {
            if paddle.has_glue() {
                self.is_glued = true;
            }
            self.vel.y = -self.vel.y;
            tag = Some(CollisionTag::Paddle);
        }
        if collision::below_screen(&rect) {
            // Tag from this frame is discarded
            return (BallStatus::Lost, None);
        }

        (BallStatus::Playing, tag)
    }

    /// Apply the slow power-up; idempotent while already slowed
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        if kind == PowerUpKind::Slow && self.slow_ticks == 0 {
            self.vel /= 2.0;
            self.slow_ticks = POWER_UP_DURATION;
        }
    }
}

fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// A destructible brick. No mutable state; destruction removes it from the
/// wall.
#[derive(Debug, Clone)]
pub struct Brick {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

impl PowerUp {
    /// Spawn with the capsule's top-left at the given point (the destroyed
    /// brick's center)
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, POWER_UP_WIDTH, POWER_UP_HEIGHT),
            kind,
        }
    }

    pub fn update(&mut self) {
        self.rect.y += POWER_UP_FALL_SPEED;
    }
}

/// A paddle-fired projectile
#[derive(Debug, Clone)]
pub struct Laser {
    pub rect: Rect,
}

impl Laser {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, LASER_WIDTH, LASER_HEIGHT),
        }
    }

    pub fn update(&mut self) {
        self.rect.y -= LASER_SPEED;
    }
}

/// Complete game session state
///
/// Exclusively owns every entity collection; entities never reference each
/// other except the ball reading the paddle's rect during its update.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, for reproducing a run
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Index into [`LEVELS`]
    pub level_index: usize,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub lasers: Vec<Laser>,
    pub particles: Vec<Particle>,
    pub fireworks: Vec<Firework>,
    pub score: u32,
    pub lives: i32,
    /// Transient HUD message and its remaining display frames
    pub hud_message: Option<&'static str>,
    pub hud_ticks: u32,
    /// Frames until the next celebration firework in `YouWin`
    pub firework_ticks: u32,
    /// Simulation frame counter
    pub frame: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session at the title screen
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::default();
        let ball = Ball::new(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::TitleScreen,
            level_index: 0,
            paddle,
            ball,
            bricks: build_brick_wall(&LEVELS[0]),
            power_ups: Vec::new(),
            lasers: Vec::new(),
            particles: Vec::new(),
            fireworks: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            hud_message: None,
            hud_ticks: 0,
            firework_ticks: 0,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Number of levels in the fixed campaign
    pub fn level_count(&self) -> usize {
        LEVELS.len()
    }

    /// Full reinit back to the title screen, keeping the RNG stream
    pub fn reset_session(&mut self) {
        self.paddle.reset();
        self.ball.reset(&mut self.rng);
        self.level_index = 0;
        self.bricks = build_brick_wall(&LEVELS[0]);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.power_ups.clear();
        self.lasers.clear();
        self.particles.clear();
        self.fireworks.clear();
        self.hud_message = None;
        self.hud_ticks = 0;
        self.firework_ticks = 0;
        self.phase = GamePhase::TitleScreen;
    }

    /// Rebuild the wall for the current level and reset ball + paddle
    pub fn start_level(&mut self) {
        self.bricks = build_brick_wall(&LEVELS[self.level_index]);
        self.ball.reset(&mut self.rng);
        self.paddle.reset();
    }

    /// Show a transient HUD message for the fixed display duration
    pub fn show_message(&mut self, message: &'static str) {
        self.hud_message = Some(message);
        self.hud_ticks = HUD_MESSAGE_FRAMES;
    }

    /// Drain the events produced by the most recent tick
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roll for a power-up drop at a destroyed brick's center
    pub fn maybe_drop_power_up(&mut self, center: Vec2) {
        if self.rng.random_bool(POWER_UP_DROP_CHANCE) {
            let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
            self.power_ups.push(PowerUp::new(center, kind));
        }
    }
}
