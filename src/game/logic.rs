//! Per-frame game logic: cat movement, spawning, scrolling, scoring,
//! collision, and the heart/game-over state machine.
//!
//! [`tick_game`] is the single update entry point. It mutates the world and
//! returns events for the host loop to consume (UI cues, high-score
//! persistence); nothing in here touches the terminal or the filesystem.

use super::types::{EntityKind, GamePhase, GameWorld};
use crate::constants::*;
use crate::input::PointerSample;
use rand::Rng;

/// What happened during a tick, in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A scratcher scrolled past the cat; one half-point credited.
    ObstaclePassed,
    /// The session score moved the watermark. Carries the new watermark.
    NewHighScore { best_half_points: u32 },
    /// The cat was hit with hearts to spare.
    HeartLost { hearts_left: u8 },
    /// Hearts hit zero; the session is over.
    GameOver {
        score_half_points: u32,
        best_half_points: u32,
    },
}

/// Advance the world by `dt_ms` of wall time, stepping fixed 16 ms frames.
///
/// A no-op while paused or after game over (the host keeps rendering).
/// `pointer` is the latest normalized sample, or `None` if the pointer has
/// not been seen yet, in which case the cat stays put.
pub fn tick_game<R: Rng>(
    world: &mut GameWorld,
    pointer: Option<PointerSample>,
    dt_ms: u64,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if world.paused || world.phase == GamePhase::GameOver {
        return events;
    }

    // Clamp dt so a lag spike or resume cannot teleport the world.
    world.accumulated_ms += dt_ms.min(MAX_TICK_MS);

    while world.accumulated_ms >= FRAME_MS {
        world.accumulated_ms -= FRAME_MS;
        step_frame(world, pointer, rng, &mut events);

        if world.phase == GamePhase::GameOver {
            break;
        }
    }

    events
}

/// One 16 ms frame: actor move, spawn, motion/score, collision, health.
fn step_frame<R: Rng>(
    world: &mut GameWorld,
    pointer: Option<PointerSample>,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    world.elapsed_ms += FRAME_MS;

    move_cat(world, pointer);

    if world.phase != GamePhase::Active {
        return;
    }

    world.frame_count += 1;
    if world.frame_count % SPAWN_INTERVAL_FRAMES == 0 {
        world.spawn_scratcher_pair(rng);
    }

    advance_scratchers(world, events);
    check_collisions(world, events);
}

/// Move the cat toward the scaled pointer target and clamp to its bounds.
///
/// Ready: snap straight to the target. Active: first-order low-pass toward
/// it. Game over: frozen. No pointer sample yet: stay put.
fn move_cat(world: &mut GameWorld, pointer: Option<PointerSample>) {
    let Some(sample) = pointer else {
        return;
    };

    let target_x = sample.x * INPUT_SCALE_X;
    let target_y = sample.y * INPUT_SCALE_Y;

    match world.phase {
        GamePhase::Ready => {
            world.cat.x = target_x;
            world.cat.y = target_y;
        }
        GamePhase::Active => {
            world.cat.x += (target_x - world.cat.x) * FOLLOW_SMOOTHING;
            world.cat.y += (target_y - world.cat.y) * FOLLOW_SMOOTHING;
        }
        GamePhase::GameOver => return,
    }

    world.cat.x = world.cat.x.clamp(CAT_MIN_X, CAT_MAX_X);
    world.cat.y = world.cat.y.clamp(CAT_MIN_Y, CAT_MAX_Y);
}

/// Scroll scratchers left, credit passes, and drop off-screen members.
fn advance_scratchers(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let cat_x = world.cat.x;

    for obstacle in world.entities.iter_mut() {
        if obstacle.kind != EntityKind::Scratcher {
            continue;
        }

        obstacle.x -= SCRATCHER_SPEED;

        // One-shot: each pair member scores 0.5 the first frame it is behind
        // the cat, so a full pair is worth one point.
        if !obstacle.passed && obstacle.x < cat_x {
            obstacle.passed = true;
            world.score_half_points += 1;
            events.push(GameEvent::ObstaclePassed);

            if world.score_half_points > world.best_half_points {
                world.best_half_points = world.score_half_points;
                events.push(GameEvent::NewHighScore {
                    best_half_points: world.best_half_points,
                });
            }
        }
    }

    world
        .entities
        .retain(|o| o.kind != EntityKind::Scratcher || o.x >= DESPAWN_X);
}

/// AABB-test the cat against every entity plus the ceiling bound. At most
/// one heart is lost per frame; skipped entirely while invincible.
fn check_collisions(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if world.cat.is_invincible(world.elapsed_ms) {
        return;
    }

    let cat = &world.cat;
    let hit = world
        .entities
        .iter()
        .any(|o| boxes_overlap(cat.x, cat.y, CAT_WIDTH, CAT_HEIGHT, o.x, o.y, o.width, o.height))
        || cat.y > CEILING_Y;

    if hit {
        // Bounce impulse; consumed by the scene for the cat's pose.
        world.cat.velocity_y = BOUNCE_VELOCITY;
        world.cat.velocity_x = -world.cat.velocity_x;
        lose_heart(world, events);
    }
}

/// Strict AABB overlap on both axes between two center/extent boxes.
#[allow(clippy::too_many_arguments)]
fn boxes_overlap(ax: f64, ay: f64, aw: f64, ah: f64, bx: f64, by: f64, bw: f64, bh: f64) -> bool {
    (ax - bx).abs() < (aw + bw) / 2.0 && (ay - by).abs() < (ah + bh) / 2.0
}

fn lose_heart(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if world.hearts == 0 {
        return;
    }

    world.hearts -= 1;

    if world.hearts == 0 {
        enter_game_over(world, events);
    } else {
        // Brief grace period so one scratcher cannot drain several hearts.
        world
            .cat
            .grant_invincibility(world.elapsed_ms, INVINCIBILITY_AFTER_HIT_MS);
        world.damage_flash_until_ms = world.elapsed_ms + DAMAGE_FLASH_MS;
        events.push(GameEvent::HeartLost {
            hearts_left: world.hearts,
        });
    }
}

/// Enter the terminal phase. Idempotent.
fn enter_game_over(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if world.phase == GamePhase::GameOver {
        return;
    }

    world.phase = GamePhase::GameOver;
    events.push(GameEvent::GameOver {
        score_half_points: world.score_half_points,
        best_half_points: world.best_half_points,
    });
}

/// Leave the start screen. Only meaningful in `Ready`.
pub fn start_game(world: &mut GameWorld) {
    if world.phase != GamePhase::Ready {
        return;
    }

    world.phase = GamePhase::Active;
    world.score_half_points = 0;
    world.frame_count = 0;
    world.cat.velocity_x = 0.0;
    world.cat.velocity_y = 0.0;
    world
        .cat
        .grant_invincibility(world.elapsed_ms, INVINCIBILITY_MS);
}

/// Reset into a fresh active session: new cat, full hearts, scratchers
/// cleared, score and frame counter zeroed. The watermark survives.
pub fn reset_game(world: &mut GameWorld) {
    world.entities.retain(|o| o.kind == EntityKind::Fixture);
    world.cat = super::types::Cat::at(CAT_RESPAWN_X, CAT_RESPAWN_Y);
    world.hearts = MAX_HEARTS;
    world.score_half_points = 0;
    world.frame_count = 0;
    world.paused = false;
    world.damage_flash_until_ms = 0;
    world.phase = GamePhase::Active;
    world
        .cat
        .grant_invincibility(world.elapsed_ms, INVINCIBILITY_MS);
}

/// Flip the pause flag. Only meaningful mid-game.
pub fn toggle_pause(world: &mut GameWorld) {
    if world.phase == GamePhase::Active {
        world.paused = !world.paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    /// An active world with the start-grace invincibility dropped so
    /// collision tests see hits immediately.
    fn active_world() -> GameWorld {
        let mut world = GameWorld::new(0);
        start_game(&mut world);
        world.cat.invincible_until_ms = None;
        world
    }

    fn scratcher_at(x: f64, y: f64) -> Obstacle {
        Obstacle {
            kind: EntityKind::Scratcher,
            x,
            y,
            width: SCRATCHER_WIDTH,
            height: 10.0,
            passed: false,
        }
    }

    #[test]
    fn test_boxes_overlap_requires_both_axes() {
        // Dead center.
        assert!(boxes_overlap(0.0, 0.0, 3.0, 2.0, 0.0, 0.0, 2.0, 10.0));
        // Overlap on x only.
        assert!(!boxes_overlap(0.0, 0.0, 3.0, 2.0, 1.0, 20.0, 2.0, 10.0));
        // Overlap on y only.
        assert!(!boxes_overlap(0.0, 0.0, 3.0, 2.0, 15.0, 0.0, 2.0, 10.0));
        // Exactly touching edges do not overlap (strict comparison).
        assert!(!boxes_overlap(0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_ready_phase_snaps_to_pointer() {
        let mut world = GameWorld::new(0);
        let mut rng = test_rng();

        let sample = Some(PointerSample { x: 0.5, y: 0.5 });
        tick_game(&mut world, sample, FRAME_MS, &mut rng);

        assert!((world.cat.x - 0.5 * INPUT_SCALE_X).abs() < 1e-9);
        assert!((world.cat.y - 0.5 * INPUT_SCALE_Y).abs() < 1e-9);
    }

    #[test]
    fn test_active_phase_smooths_toward_pointer() {
        let mut world = active_world();
        world.cat.x = 0.0;
        world.cat.y = 0.0;
        let mut rng = test_rng();

        let sample = Some(PointerSample { x: 1.0, y: 0.0 });
        tick_game(&mut world, sample, FRAME_MS, &mut rng);

        // One low-pass step: 20% of the remaining distance to x = 8.
        assert!((world.cat.x - 8.0 * FOLLOW_SMOOTHING).abs() < 1e-9);
    }

    #[test]
    fn test_cat_clamped_to_bounds() {
        let mut world = GameWorld::new(0);
        let mut rng = test_rng();

        // Bottom-left corner: the raw target is (-8, -5); push past with
        // an out-of-range sample to exercise the clamp.
        let sample = Some(PointerSample { x: -2.0, y: -2.0 });
        tick_game(&mut world, sample, FRAME_MS, &mut rng);
        assert!((world.cat.x - CAT_MIN_X).abs() < 1e-9);
        assert!((world.cat.y - CAT_MIN_Y).abs() < 1e-9);

        let sample = Some(PointerSample { x: 2.0, y: 2.0 });
        tick_game(&mut world, sample, FRAME_MS, &mut rng);
        assert!((world.cat.x - CAT_MAX_X).abs() < 1e-9);
        assert!((world.cat.y - CAT_MAX_Y).abs() < 1e-9);
    }

    #[test]
    fn test_no_pointer_sample_keeps_cat_put() {
        let mut world = GameWorld::new(0);
        let mut rng = test_rng();
        let (x, y) = (world.cat.x, world.cat.y);

        tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert!((world.cat.x - x).abs() < f64::EPSILON);
        assert!((world.cat.y - y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scratchers_scroll_left() {
        let mut world = active_world();
        world.entities.push(scratcher_at(10.0, 20.0));
        let mut rng = test_rng();

        tick_game(&mut world, None, FRAME_MS, &mut rng);

        let obstacle = world.entities.iter().find(|o| o.is_scratcher()).unwrap();
        assert!((obstacle.x - (10.0 - SCRATCHER_SPEED)).abs() < 1e-9);
    }

    #[test]
    fn test_pass_credits_half_point_once() {
        let mut world = active_world();
        // Just ahead of the cat and far above it; crosses on the first frame.
        world.entities.push(scratcher_at(world.cat.x + 0.1, 20.0));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);
        assert_eq!(world.score_half_points, 1);
        assert!(events.contains(&GameEvent::ObstaclePassed));

        // Further frames must not re-credit the same obstacle.
        for _ in 0..10 {
            tick_game(&mut world, None, FRAME_MS, &mut rng);
        }
        assert_eq!(world.score_half_points, 1);
    }

    #[test]
    fn test_watermark_follows_score() {
        let mut world = active_world();
        world.best_half_points = 3;
        world.score_half_points = 3;
        world.entities.push(scratcher_at(world.cat.x + 0.1, 20.0));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.best_half_points, 4);
        assert!(events.contains(&GameEvent::NewHighScore {
            best_half_points: 4
        }));
    }

    #[test]
    fn test_pass_below_watermark_is_silent() {
        let mut world = active_world();
        world.best_half_points = 10;
        world.entities.push(scratcher_at(world.cat.x + 0.1, 20.0));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.best_half_points, 10);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. })));
    }

    #[test]
    fn test_offscreen_scratcher_removed() {
        let mut world = active_world();
        world.entities.push(scratcher_at(DESPAWN_X + 0.1, 20.0));
        let mut rng = test_rng();

        tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.scratcher_count(), 0);
        // The ground fixture is never despawned.
        assert_eq!(world.entities.len(), 1);
    }

    #[test]
    fn test_collision_loses_heart_and_grants_grace() {
        let mut world = active_world();
        world.entities.push(scratcher_at(world.cat.x + 1.0, world.cat.y));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.hearts, MAX_HEARTS - 1);
        assert!(events.contains(&GameEvent::HeartLost {
            hearts_left: MAX_HEARTS - 1
        }));
        assert!(world.cat.is_invincible(world.elapsed_ms));
        assert!(world.damage_flash_active());
        assert!((world.cat.velocity_y - BOUNCE_VELOCITY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invincibility_gates_collision() {
        let mut world = active_world();
        world.cat.grant_invincibility(world.elapsed_ms, 10_000);
        world.entities.push(scratcher_at(world.cat.x, world.cat.y));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.hearts, MAX_HEARTS);
        assert!(events.is_empty());
    }

    #[test]
    fn test_at_most_one_heart_per_frame() {
        let mut world = active_world();
        // Two overlapping scratchers on the cat.
        world.entities.push(scratcher_at(world.cat.x, world.cat.y));
        world.entities.push(scratcher_at(world.cat.x, world.cat.y));
        let mut rng = test_rng();

        tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.hearts, MAX_HEARTS - 1);
    }

    #[test]
    fn test_ceiling_collision() {
        let mut world = active_world();
        world.cat.y = CEILING_Y + 1.0;
        let mut rng = test_rng();

        // No pointer sample, so the clamp never pulls the cat back down.
        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.hearts, MAX_HEARTS - 1);
        assert!(events.contains(&GameEvent::HeartLost {
            hearts_left: MAX_HEARTS - 1
        }));
    }

    #[test]
    fn test_last_heart_enters_game_over_without_grace() {
        let mut world = active_world();
        world.hearts = 1;
        world.score_half_points = 6;
        world.entities.push(scratcher_at(world.cat.x, world.cat.y));
        let mut rng = test_rng();

        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);

        assert_eq!(world.hearts, 0);
        assert_eq!(world.phase, GamePhase::GameOver);
        // No invincibility when no hearts remain.
        assert!(world.cat.invincible_until_ms.is_none());
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                score_half_points: 6,
                ..
            }
        )));
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut world = active_world();
        world.hearts = 1;
        world.entities.push(scratcher_at(world.cat.x, world.cat.y));
        let mut rng = test_rng();

        tick_game(&mut world, None, FRAME_MS, &mut rng);
        assert_eq!(world.phase, GamePhase::GameOver);

        // Ticking a finished world changes nothing and emits nothing.
        let events = tick_game(&mut world, None, FRAME_MS, &mut rng);
        assert!(events.is_empty());
        assert_eq!(world.hearts, 0);
    }

    #[test]
    fn test_start_game_only_from_ready() {
        let mut world = GameWorld::new(0);
        start_game(&mut world);
        assert_eq!(world.phase, GamePhase::Active);
        assert!(world.cat.is_invincible(world.elapsed_ms));

        // Starting again mid-game is a no-op.
        world.score_half_points = 4;
        start_game(&mut world);
        assert_eq!(world.score_half_points, 4);
    }

    #[test]
    fn test_reset_clears_session_but_keeps_watermark() {
        let mut world = active_world();
        world.entities.push(scratcher_at(5.0, 3.0));
        world.hearts = 1;
        world.score_half_points = 9;
        world.best_half_points = 9;
        world.frame_count = 400;
        world.paused = true;

        reset_game(&mut world);

        assert_eq!(world.phase, GamePhase::Active);
        assert!(!world.paused);
        assert_eq!(world.hearts, MAX_HEARTS);
        assert_eq!(world.score_half_points, 0);
        assert_eq!(world.best_half_points, 9);
        assert_eq!(world.frame_count, 0);
        assert_eq!(world.scratcher_count(), 0);
        assert_eq!(world.entities.len(), 1);
        assert!((world.cat.x - CAT_RESPAWN_X).abs() < f64::EPSILON);
        assert!((world.cat.y - CAT_RESPAWN_Y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_toggle_pause_only_while_active() {
        let mut world = GameWorld::new(0);
        toggle_pause(&mut world);
        assert!(!world.paused);

        start_game(&mut world);
        toggle_pause(&mut world);
        assert!(world.paused);
        toggle_pause(&mut world);
        assert!(!world.paused);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut world = active_world();
        let mut rng = test_rng();

        // One frame short of the interval: nothing yet.
        for _ in 0..(SPAWN_INTERVAL_FRAMES - 1) {
            tick_game(&mut world, None, FRAME_MS, &mut rng);
        }
        assert_eq!(world.scratcher_count(), 0);

        // The interval frame spawns exactly one pair.
        tick_game(&mut world, None, FRAME_MS, &mut rng);
        assert_eq!(world.scratcher_count(), 2);
    }

    #[test]
    fn test_dt_clamp_limits_catchup() {
        let mut world = active_world();
        let mut rng = test_rng();

        // A huge dt only advances MAX_TICK_MS worth of frames.
        tick_game(&mut world, None, 10_000, &mut rng);
        assert_eq!(world.frame_count, MAX_TICK_MS / FRAME_MS);
    }
}
