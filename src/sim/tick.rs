//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically, one 60 Hz
//! frame per call. Update order within a playing frame: paddle, ball, brick
//! collisions, power-ups, lasers, level progression. Particles and the HUD
//! message timer advance in every phase.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision;
use super::effects::{Firework, Particle};
use super::state::{
    BallStatus, CollisionTag, GameEvent, GamePhase, GameState, Laser, PowerUpKind,
};
use super::wall::LEVELS;
use crate::consts::*;

/// Input commands for a single frame
///
/// `left`/`right`/`launch` are held-key levels polled once per frame;
/// `fire` and `start` are key-down edges.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Release a glued ball (space held)
    pub launch: bool,
    /// Fire the laser cannons (edge)
    pub fire: bool,
    /// Start from the title, or reset from game-over/you-win (edge)
    pub start: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.frame += 1;

    match state.phase {
        GamePhase::TitleScreen => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => playing_frame(state, input),

        GamePhase::GameOver | GamePhase::YouWin => {
            if state.phase == GamePhase::YouWin {
                update_fireworks(state);
            }
            if input.start {
                state.reset_session();
            }
        }
    }

    // HUD message countdown runs in every phase
    if state.hud_ticks > 0 {
        state.hud_ticks -= 1;
        if state.hud_ticks == 0 {
            state.hud_message = None;
        }
    }

    // Decorative particles keep animating across phase changes
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(Particle::alive);
}

/// One frame of active gameplay
fn playing_frame(state: &mut GameState, input: &TickInput) {
    state.paddle.update(input.left, input.right);

    let (status, tag) = state
        .ball
        .update(&state.paddle, input.launch, &mut state.rng);

    if status == BallStatus::Lost {
        state.events.push(GameEvent::BallLost);
        state.lives -= 1;
        if state.lives <= 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        } else {
            state.ball.reset(&mut state.rng);
            state.paddle.reset();
        }
    } else {
        if let Some(tag) = tag {
            state.events.push(match tag {
                CollisionTag::Wall => GameEvent::WallBounce,
                CollisionTag::Paddle => GameEvent::PaddleBounce,
            });
            // Small yellow spark burst at the contact
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                state.ball.pos,
                [1.0, 1.0, 0.0, 1.0],
                5,
                (1.0, 3.0),
                (1.0, 3.0),
                0.0,
            );
        }

        // Ball vs bricks: at most one brick per frame, insertion order
        let ball_rect = state.ball.rect();
        if let Some(idx) =
            collision::first_overlap(&ball_rect, state.bricks.iter().map(|b| &b.rect))
        {
            state.ball.vel.y = -state.ball.vel.y;
            let brick = state.bricks.remove(idx);
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                brick.rect.center(),
                brick.color,
                15,
                (1.0, 4.0),
                (1.0, 4.0),
                0.05,
            );
            state.score += SCORE_PER_BRICK;
            state.events.push(GameEvent::BrickDestroyed);
            state.maybe_drop_power_up(brick.rect.center());
        }
    }

    // In-flight power-ups and lasers keep moving on a lost-ball frame; only
    // the steps that need a live ball are skipped
    update_power_ups(state);
    update_lasers(state, input);

    // Level progression after all per-frame updates
    if state.bricks.is_empty() && state.phase == GamePhase::Playing {
        state.level_index += 1;
        if state.level_index < LEVELS.len() {
            state.start_level();
            state.events.push(GameEvent::LevelCleared);
        } else {
            state.phase = GamePhase::YouWin;
            state.events.push(GameEvent::Victory);
        }
    }
}

/// Advance falling power-ups, prune off-screen ones, and dispatch catches
fn update_power_ups(state: &mut GameState) {
    for power_up in &mut state.power_ups {
        power_up.update();
    }

    let paddle_rect = state.paddle.rect;
    let mut caught: Vec<PowerUpKind> = Vec::new();
    state.power_ups.retain(|power_up| {
        if collision::below_screen(&power_up.rect) {
            false
        } else if power_up.rect.intersects(&paddle_rect) {
            caught.push(power_up.kind);
            false
        } else {
            true
        }
    });

    for kind in caught {
        state.show_message(kind.message());
        if kind.affects_paddle() {
            state.paddle.activate_power_up(kind);
        } else {
            state.ball.activate_power_up(kind);
        }
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

/// Fire, advance, and resolve lasers; each destroys at most one brick
fn update_lasers(state: &mut GameState, input: &TickInput) {
    if input.fire && state.paddle.has_laser() {
        let cx = state.paddle.rect.center_x();
        let top = state.paddle.rect.top();
        state.lasers.push(Laser::new(cx - LASER_MOUNT_OFFSET, top));
        state.lasers.push(Laser::new(cx + LASER_MOUNT_OFFSET, top));
        state.events.push(GameEvent::LaserFired);
    }

    for laser in &mut state.lasers {
        laser.update();
    }

    // Collect removal decisions during the scan, apply after, so brick
    // removal never invalidates the laser iteration
    let mut spent: Vec<usize> = Vec::new();
    for (li, laser) in state.lasers.iter().enumerate() {
        if collision::above_screen(&laser.rect) {
            spent.push(li);
            continue;
        }
        if let Some(bi) =
            collision::first_overlap(&laser.rect, state.bricks.iter().map(|b| &b.rect))
        {
            let brick = state.bricks.remove(bi);
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                brick.rect.center(),
                brick.color,
                10,
                (1.0, 3.0),
                (1.0, 3.0),
                0.05,
            );
            state.score += SCORE_PER_BRICK;
            state.events.push(GameEvent::BrickDestroyed);
            spent.push(li);
        }
    }
    for li in spent.into_iter().rev() {
        state.lasers.remove(li);
    }
}

/// Celebration fireworks during `YouWin`, on a randomized spawn interval
fn update_fireworks(state: &mut GameState) {
    if state.firework_ticks == 0 {
        let firework = Firework::new(&mut state.rng);
        state.fireworks.push(firework);
        state.firework_ticks = state.rng.random_range(20..=50);
    } else {
        state.firework_ticks -= 1;
    }

    let GameState {
        fireworks, rng, ..
    } = state;
    for firework in fireworks.iter_mut() {
        firework.update(rng);
    }
    state.fireworks.retain(|fw| !fw.is_dead());
}

#[allow(clippy::too_many_arguments)]
fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: [f32; 4],
    count: usize,
    size_range: (f32, f32),
    speed_range: (f32, f32),
    gravity: f32,
) {
    for _ in 0..count {
        particles.push(Particle::new(
            pos,
            color,
            size_range.0,
            size_range.1,
            speed_range.0,
            speed_range.1,
            gravity,
            rng,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUp;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Playing;
        state
    }

    /// Park the ball where nothing can touch it this frame
    fn park_ball(state: &mut GameState) {
        state.ball.pos = Vec2::new(SCREEN_WIDTH / 2.0, 320.0);
        state.ball.vel = Vec2::ZERO;
    }

    #[test]
    fn test_title_to_playing_on_start() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::TitleScreen);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ball_brick_hit_scores_and_reflects() {
        let mut state = playing_state(2);
        let target = state.bricks[0].rect.center();
        state.ball.pos = target;
        state.ball.vel = Vec2::new(0.0, -2.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, SCORE_PER_BRICK);
        assert_eq!(state.bricks.len(), 39);
        // Vertical velocity inverted by the brick hit
        assert!(state.ball.vel.y > 0.0);
        assert!(state.events.contains(&GameEvent::BrickDestroyed));
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_one_brick_per_frame_by_ball() {
        let mut state = playing_state(3);
        // Ball spans the padding between two adjacent bricks
        let a = state.bricks[0].rect;
        let b = state.bricks[1].rect;
        state.ball.pos = Vec2::new((a.right() + b.left()) / 2.0, a.center_y());
        state.ball.vel = Vec2::ZERO;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.len(), 39);
        assert_eq!(state.score, SCORE_PER_BRICK);
    }

    #[test]
    fn test_life_loss_resets_ball_and_paddle() {
        let mut state = playing_state(4);
        state.paddle.activate_power_up(PowerUpKind::Laser);
        state.ball.pos = Vec2::new(400.0, SCREEN_HEIGHT + 40.0);
        state.ball.vel = Vec2::new(0.0, 6.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        // Ball recentered, paddle effects cleared
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert!(!state.paddle.has_laser());
        assert!(state.events.contains(&GameEvent::BallLost));
    }

    #[test]
    fn test_lost_frame_still_runs_lasers_and_power_ups() {
        let mut state = playing_state(17);
        state.ball.pos = Vec2::new(400.0, SCREEN_HEIGHT + 40.0);
        state.ball.vel = Vec2::new(0.0, 6.0);
        let target = state.bricks[0].rect;
        state
            .lasers
            .push(Laser::new(target.center_x(), target.bottom() + 2.0));
        state.power_ups.push(PowerUp::new(
            Vec2::new(
                state.paddle.rect.center_x() - 10.0,
                state.paddle.rect.top() - 5.0,
            ),
            PowerUpKind::Glue,
        ));

        // The lost-ball frame still advances lasers and power-ups: the laser
        // destroys its brick and the capsule lands on the freshly reset paddle
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.bricks.len(), 39);
        assert_eq!(state.score, SCORE_PER_BRICK);
        assert!(state.lasers.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.paddle.has_glue());
    }

    #[test]
    fn test_game_over_at_zero_lives_then_reset() {
        let mut state = playing_state(5);
        state.lives = 1;
        state.score = 120;
        state.ball.pos = Vec2::new(400.0, SCREEN_HEIGHT + 40.0);
        state.ball.vel = Vec2::new(0.0, 6.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        // No further playing updates while game over
        let bricks_before = state.bricks.len();
        let score_before = state.score;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.len(), bricks_before);
        assert_eq!(state.score, score_before);

        // Reset input returns to a fresh title screen
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::TitleScreen);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_clearing_level_zero_rebuilds_next_wall() {
        let mut state = playing_state(6);
        assert_eq!(state.bricks.len(), 40);

        // Feed the ball one brick per frame
        while !state.bricks.is_empty() {
            state.ball.pos = state.bricks[0].rect.center();
            state.ball.vel = Vec2::ZERO;
            tick(&mut state, &TickInput::default());
            if state.level_index > 0 {
                break;
            }
        }

        assert_eq!(state.score, 40 * SCORE_PER_BRICK);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.bricks.len(), 50);
        // Ball and paddle were reset for the new level
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.paddle.rect.width, PADDLE_WIDTH);
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let mut state = playing_state(7);
        state.level_index = LEVELS.len() - 1;
        state.start_level();
        // Leave a single brick and park the ball on it
        state.bricks.truncate(1);
        state.ball.pos = state.bricks[0].rect.center();
        state.ball.vel = Vec2::ZERO;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::YouWin);
        assert!(state.events.contains(&GameEvent::Victory));
    }

    #[test]
    fn test_you_win_spawns_fireworks() {
        let mut state = playing_state(8);
        state.phase = GamePhase::YouWin;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.fireworks.len(), 1);
        assert!(state.firework_ticks >= 20 && state.firework_ticks <= 50);
    }

    #[test]
    fn test_power_up_catch_dispatches_to_paddle() {
        let mut state = playing_state(9);
        park_ball(&mut state);
        state.power_ups.push(PowerUp::new(
            Vec2::new(state.paddle.rect.center_x(), state.paddle.rect.center_y()),
            PowerUpKind::Grow,
        ));

        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert!(state.paddle.is_grown());
        assert_eq!(state.hud_message, Some("PADDLE GROW"));
        assert!(
            state
                .events
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::Grow))
        );
    }

    #[test]
    fn test_slow_power_up_dispatches_to_ball() {
        let mut state = playing_state(10);
        park_ball(&mut state);
        state.ball.vel = Vec2::new(6.0, -6.0);
        state.power_ups.push(PowerUp::new(
            Vec2::new(state.paddle.rect.center_x(), state.paddle.rect.center_y()),
            PowerUpKind::Slow,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.slow_ticks, POWER_UP_DURATION);
        // Ball update ran before the catch, so the halved velocity is intact
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_missed_power_up_falls_off_screen() {
        let mut state = playing_state(11);
        park_ball(&mut state);
        state.power_ups.push(PowerUp::new(
            Vec2::new(100.0, SCREEN_HEIGHT + 30.0),
            PowerUpKind::Laser,
        ));

        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert!(!state.paddle.has_laser());
    }

    #[test]
    fn test_laser_requires_power_up() {
        let mut state = playing_state(12);
        park_ball(&mut state);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert!(state.lasers.is_empty());

        state.paddle.activate_power_up(PowerUpKind::Laser);
        tick(&mut state, &fire);
        assert_eq!(state.lasers.len(), 2);
        assert!(state.events.contains(&GameEvent::LaserFired));
    }

    #[test]
    fn test_laser_destroys_one_brick_and_is_spent() {
        let mut state = playing_state(13);
        park_ball(&mut state);
        let target = state.bricks[25].rect;
        state
            .lasers
            .push(Laser::new(target.center_x(), target.bottom() + 2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.len(), 39);
        assert_eq!(state.score, SCORE_PER_BRICK);
        assert!(state.lasers.is_empty());
    }

    #[test]
    fn test_laser_prunes_off_screen() {
        let mut state = playing_state(14);
        park_ball(&mut state);
        // Clear bricks out of the laser's path and let it run off the top
        state.bricks.retain(|b| b.rect.center_x() > 400.0);
        state.lasers.push(Laser::new(10.0, -40.0));

        tick(&mut state, &TickInput::default());
        assert!(state.lasers.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_only_from_bricks() {
        let mut state = playing_state(15);
        // Wall bounce frame: no score
        state.ball.pos = Vec2::new(400.0, BALL_RADIUS + 1.0);
        state.ball.vel = Vec2::new(0.0, -6.0);
        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::WallBounce));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_hud_message_expires() {
        let mut state = playing_state(16);
        park_ball(&mut state);
        state.show_message("PADDLE GROW");
        for _ in 0..HUD_MESSAGE_FRAMES {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.hud_message, None);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                launch: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut a = playing_state(99);
        let mut b = playing_state(99);
        for _ in 0..120 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.bricks.len(), b.bricks.len());
    }
}
