//! Game world data structures.
//!
//! A side-scrolling avoidance game: the cat follows the pointer while
//! scratcher pairs scroll in from the right. Everything mutable lives in
//! [`GameWorld`]; the per-frame pipeline in `logic.rs` is its only writer.

use crate::constants::*;
use rand::Rng;

/// Phase of the session state machine. Pause is an orthogonal flag on
/// [`GameWorld`], not a phase: a paused world still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen: the cat snaps to the pointer, nothing else moves.
    Ready,
    /// Scratchers spawn, scroll, and collide.
    Active,
    /// Terminal. Left only through an explicit reset.
    GameOver,
}

/// The player-controlled cat.
#[derive(Debug, Clone)]
pub struct Cat {
    /// Position in world units.
    pub x: f64,
    pub y: f64,
    /// Bounce impulse recorded on the most recent hit. The tick never
    /// integrates these.
    pub velocity_x: f64,
    pub velocity_y: f64,
    /// World-clock instant the current invincibility window ends, if any.
    pub invincible_until_ms: Option<u64>,
}

impl Cat {
    pub fn new() -> Self {
        Self::at(CAT_START_X, CAT_START_Y)
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            invincible_until_ms: None,
        }
    }

    /// True while an invincibility window is open at `now_ms`.
    pub fn is_invincible(&self, now_ms: u64) -> bool {
        matches!(self.invincible_until_ms, Some(until) if now_ms < until)
    }

    /// Open (or extend) an invincibility window ending `duration_ms` from now.
    pub fn grant_invincibility(&mut self, now_ms: u64, duration_ms: u64) {
        self.invincible_until_ms = Some(now_ms + duration_ms);
    }
}

impl Default for Cat {
    fn default() -> Self {
        Self::new()
    }
}

/// What an entity in the world is. Fixtures (the ground) collide but are
/// exempt from the spawn cap, scrolling, scoring, and despawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Fixture,
    Scratcher,
}

/// An axis-aligned collidable entity.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: EntityKind,
    /// Center position in world units.
    pub x: f64,
    pub y: f64,
    /// Collision box extents.
    pub width: f64,
    pub height: f64,
    /// Scoring already credited for this entity (one-shot).
    pub passed: bool,
}

impl Obstacle {
    /// The sandy ground strip along the bottom of the world.
    pub fn ground() -> Self {
        Self {
            kind: EntityKind::Fixture,
            x: 0.0,
            y: GROUND_Y,
            width: GROUND_WIDTH,
            height: GROUND_HEIGHT,
            // Fixtures never score.
            passed: true,
        }
    }

    pub fn is_scratcher(&self) -> bool {
        self.kind == EntityKind::Scratcher
    }
}

/// The whole mutable state of one session.
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub phase: GamePhase,
    /// Orthogonal to `phase`: while set, every update is skipped.
    pub paused: bool,
    pub cat: Cat,
    /// Ground fixture plus active scratchers.
    pub entities: Vec<Obstacle>,
    /// Remaining lives, in [0, MAX_HEARTS].
    pub hearts: u8,
    /// Session score in half-point units (one scratcher passed = 1 = 0.5 pts).
    pub score_half_points: u32,
    /// High-score watermark in half-point units. Never decreases.
    pub best_half_points: u32,
    /// Frames elapsed since the game became active. Drives spawning.
    pub frame_count: u64,
    /// World clock in milliseconds; expiring effects compare against it.
    pub elapsed_ms: u64,
    /// Sub-frame remainder carried between ticks.
    pub accumulated_ms: u64,
    /// World-clock instant the damage flash ends.
    pub damage_flash_until_ms: u64,
}

impl GameWorld {
    /// Fresh world on the start screen, seeded with the persisted watermark.
    pub fn new(best_half_points: u32) -> Self {
        Self {
            phase: GamePhase::Ready,
            paused: false,
            cat: Cat::new(),
            entities: vec![Obstacle::ground()],
            hearts: MAX_HEARTS,
            score_half_points: 0,
            best_half_points,
            frame_count: 0,
            elapsed_ms: 0,
            accumulated_ms: 0,
            damage_flash_until_ms: 0,
        }
    }

    /// Active scratchers, excluding fixtures.
    pub fn scratcher_count(&self) -> usize {
        self.entities.iter().filter(|o| o.is_scratcher()).count()
    }

    /// Spawn one top/bottom scratcher pair at the spawn column with a random
    /// gap center. A no-op when the pair would push the population past the
    /// cap.
    pub fn spawn_scratcher_pair<R: Rng>(&mut self, rng: &mut R) {
        if self.scratcher_count() + 2 > MAX_SCRATCHERS {
            return;
        }

        let gap_center = rng.gen_range(-GAP_CENTER_RANGE..GAP_CENTER_RANGE);

        // Both members extend past the visible bound so no open end shows.
        let top_height = SCRATCHER_REACH + gap_center;
        let bottom_height = SCRATCHER_REACH - gap_center;

        self.entities.push(Obstacle {
            kind: EntityKind::Scratcher,
            x: SPAWN_X,
            y: gap_center + GAP_SIZE / 2.0 + top_height / 2.0,
            width: SCRATCHER_WIDTH,
            height: top_height,
            passed: false,
        });
        self.entities.push(Obstacle {
            kind: EntityKind::Scratcher,
            x: SPAWN_X,
            y: gap_center - GAP_SIZE / 2.0 - bottom_height / 2.0,
            width: SCRATCHER_WIDTH,
            height: bottom_height,
            passed: false,
        });
    }

    /// True while the damage flash effect is live.
    pub fn damage_flash_active(&self) -> bool {
        self.elapsed_ms < self.damage_flash_until_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_new_world_defaults() {
        let world = GameWorld::new(7);
        assert_eq!(world.phase, GamePhase::Ready);
        assert!(!world.paused);
        assert_eq!(world.hearts, MAX_HEARTS);
        assert_eq!(world.score_half_points, 0);
        assert_eq!(world.best_half_points, 7);
        assert_eq!(world.frame_count, 0);
        assert_eq!(world.scratcher_count(), 0);
        // The ground fixture is present from the start.
        assert_eq!(world.entities.len(), 1);
        assert_eq!(world.entities[0].kind, EntityKind::Fixture);
        assert!(world.entities[0].passed);
    }

    #[test]
    fn test_cat_starts_on_the_sand() {
        let cat = Cat::new();
        assert!((cat.x - CAT_START_X).abs() < f64::EPSILON);
        assert!((cat.y - CAT_START_Y).abs() < f64::EPSILON);
        assert!(cat.invincible_until_ms.is_none());
    }

    #[test]
    fn test_invincibility_window() {
        let mut cat = Cat::new();
        assert!(!cat.is_invincible(0));

        cat.grant_invincibility(1000, 500);
        assert!(cat.is_invincible(1000));
        assert!(cat.is_invincible(1499));
        assert!(!cat.is_invincible(1500));
        assert!(!cat.is_invincible(2000));
    }

    #[test]
    fn test_spawn_pair_geometry() {
        let mut world = GameWorld::new(0);
        let mut rng = test_rng();

        world.spawn_scratcher_pair(&mut rng);

        assert_eq!(world.scratcher_count(), 2);
        let top = &world.entities[1];
        let bottom = &world.entities[2];

        // Both members share the spawn column.
        assert!((top.x - SPAWN_X).abs() < f64::EPSILON);
        assert!((bottom.x - SPAWN_X).abs() < f64::EPSILON);
        assert!(!top.passed);
        assert!(!bottom.passed);

        // The inner edges are exactly one gap apart.
        let top_inner = top.y - top.height / 2.0;
        let bottom_inner = bottom.y + bottom.height / 2.0;
        assert!((top_inner - bottom_inner - GAP_SIZE).abs() < 1e-9);

        // Gap center stays within the configured range.
        let gap_center = top_inner - GAP_SIZE / 2.0;
        assert!(gap_center >= -GAP_CENTER_RANGE);
        assert!(gap_center < GAP_CENTER_RANGE);

        // Outer edges extend past the visible bound.
        assert!(top.y + top.height / 2.0 > CEILING_Y);
        assert!(bottom.y - bottom.height / 2.0 < GROUND_Y);
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut world = GameWorld::new(0);
        let mut rng = test_rng();

        for _ in 0..20 {
            world.spawn_scratcher_pair(&mut rng);
            assert!(world.scratcher_count() <= MAX_SCRATCHERS);
        }
        assert_eq!(world.scratcher_count(), MAX_SCRATCHERS);
    }

    #[test]
    fn test_damage_flash_expiry() {
        let mut world = GameWorld::new(0);
        assert!(!world.damage_flash_active());

        world.damage_flash_until_ms = 200;
        assert!(world.damage_flash_active());

        world.elapsed_ms = 200;
        assert!(!world.damage_flash_active());
    }
}
