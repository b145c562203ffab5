//! Ring obstacles: timed spawning, linear traversal and identity-keyed removal.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::ObstacleId;
use crate::core::rng::Rng;

/// Absorbs f32 drift when summing fixed timesteps up to an interval.
const TIME_EPSILON: f32 = 1e-4;

/// One ring in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Seconds since the ring appeared.
    pub age: f32,
    /// Fixed vertical position.
    pub y: f32,
}

/// Obstacles that appeared or left during one tick.
#[derive(Debug, Default, PartialEq)]
pub struct SpawnerTick {
    pub spawned: Vec<ObstacleId>,
    /// Rings that completed their traversal unpassed.
    pub expired: Vec<ObstacleId>,
}

pub struct ObstacleSpawner {
    active: bool,
    interval: f32,
    traversal_time: f32,
    band: (f32, f32),
    start_x: f32,
    travel: f32,
    since_spawn: f32,
    next_id: u32,
    obstacles: BTreeMap<ObstacleId, Obstacle>,
}

impl ObstacleSpawner {
    pub fn new(config: &GameConfig) -> Self {
        let w = config.obstacle_width;
        Self {
            active: false,
            interval: config.spawn_interval,
            traversal_time: config.traversal_time,
            band: config.spawn_band(),
            // Just off the right edge, until fully off the left edge.
            start_x: config.world_width + w * 1.25,
            travel: config.world_width + w * 2.0,
            since_spawn: 0.0,
            next_id: 1,
            obstacles: BTreeMap::new(),
        }
    }

    /// Start the timer. The first ring appears one interval from now.
    pub fn enable(&mut self) {
        if !self.active {
            self.active = true;
            self.since_spawn = 0.0;
        }
    }

    pub fn disable(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Age every ring, discard the ones that finished crossing, then spawn
    /// one ring per interval boundary crossed.
    pub fn tick(&mut self, dt: f32, rng: &mut Rng) -> SpawnerTick {
        let mut out = SpawnerTick::default();

        for obstacle in self.obstacles.values_mut() {
            obstacle.age += dt;
        }
        let traversal = self.traversal_time;
        self.obstacles.retain(|id, o| {
            let done = o.age + TIME_EPSILON >= traversal;
            if done {
                out.expired.push(*id);
            }
            !done
        });

        if self.active {
            self.since_spawn += dt;
            while self.since_spawn + TIME_EPSILON >= self.interval {
                self.since_spawn = (self.since_spawn - self.interval).max(0.0);
                let id = self.spawn(self.since_spawn, rng);
                out.spawned.push(id);
            }
        }

        out
    }

    /// Vertical position for a new ring, uniform over the spawn band.
    pub fn spawn_y(&self, rng: &mut Rng) -> f32 {
        rng.range_inclusive(self.band.0, self.band.1)
    }

    /// Stop tracking a ring. Returns whether it was still tracked; removing
    /// an unknown or already removed ring is a no-op.
    pub fn remove(&mut self, id: ObstacleId) -> bool {
        self.obstacles.remove(&id).is_some()
    }

    pub fn is_tracked(&self, id: ObstacleId) -> bool {
        self.obstacles.contains_key(&id)
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Horizontal position `age` seconds into a traversal.
    pub fn x_at(&self, age: f32) -> f32 {
        let t = (age / self.traversal_time).clamp(0.0, 1.0);
        self.start_x - self.travel * t
    }

    pub fn position(&self, id: ObstacleId) -> Option<Vec2> {
        self.obstacles
            .get(&id)
            .map(|o| Vec2::new(self.x_at(o.age), o.y))
    }

    /// Every tracked ring with its current position, oldest first.
    pub fn positions(&self) -> impl Iterator<Item = (ObstacleId, Vec2)> + '_ {
        self.obstacles
            .values()
            .map(|o| (o.id, Vec2::new(self.x_at(o.age), o.y)))
    }

    fn spawn(&mut self, age: f32, rng: &mut Rng) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        let y = self.spawn_y(rng);
        self.obstacles.insert(
            id,
            Obstacle {
                id,
                age,
                y,
            },
        );
        log::debug!("ring {:?} spawned at y={:.1}", id, y);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(spawner: &mut ObstacleSpawner, rng: &mut Rng, seconds: f32) -> SpawnerTick {
        let mut total = SpawnerTick::default();
        let steps = (seconds / DT).round() as usize;
        for _ in 0..steps {
            let tick = spawner.tick(DT, rng);
            total.spawned.extend(tick.spawned);
            total.expired.extend(tick.expired);
        }
        total
    }

    #[test]
    fn inactive_spawner_emits_nothing() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(1);
        assert!(run(&mut spawner, &mut rng, 10.0).spawned.is_empty());
    }

    #[test]
    fn first_ring_after_one_interval() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(1);
        spawner.enable();
        assert!(run(&mut spawner, &mut rng, 2.9).spawned.is_empty());
        assert_eq!(run(&mut spawner, &mut rng, 0.2).spawned, vec![ObstacleId(1)]);
        assert_eq!(run(&mut spawner, &mut rng, 3.0).spawned, vec![ObstacleId(2)]);
    }

    #[test]
    fn unpassed_ring_leaves_after_traversal() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(1);
        spawner.enable();
        run(&mut spawner, &mut rng, 3.1);
        spawner.disable();
        assert!(spawner.is_tracked(ObstacleId(1)));

        // t = 9.0: still on screen, near the left edge
        run(&mut spawner, &mut rng, 5.9);
        let x = spawner.position(ObstacleId(1)).unwrap().x;
        assert!(x < 100.0, "x={x}");
        assert!(spawner.is_tracked(ObstacleId(1)));

        // t = 9.3: gone
        let tick = run(&mut spawner, &mut rng, 0.3);
        assert_eq!(tick.expired, vec![ObstacleId(1)]);
        assert!(spawner.is_empty());
    }

    #[test]
    fn traversal_runs_edge_to_edge() {
        let config = GameConfig::default();
        let spawner = ObstacleSpawner::new(&config);
        let w = config.obstacle_width;
        assert_eq!(spawner.x_at(0.0), config.world_width + w * 1.25);
        let end = spawner.x_at(config.traversal_time);
        assert!(end < -w / 2.0, "ring must end fully off screen: {end}");
        assert_eq!(spawner.x_at(100.0), end);
    }

    #[test]
    fn spawn_y_stays_in_band() {
        let config = GameConfig::default();
        let spawner = ObstacleSpawner::new(&config);
        let mut rng = Rng::new(0xDEAD_BEEF);
        let high = config.world_height - 250.0;
        for _ in 0..10_000 {
            let y = spawner.spawn_y(&mut rng);
            assert!((125.0..=high).contains(&y), "y={y}");
        }
    }

    #[test]
    fn remove_is_idempotent() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(5);
        spawner.enable();
        run(&mut spawner, &mut rng, 6.1);
        assert_eq!(spawner.len(), 2);

        assert!(spawner.remove(ObstacleId(1)));
        let after_once = spawner.len();
        assert!(!spawner.remove(ObstacleId(1)));
        assert_eq!(spawner.len(), after_once);
        assert!(!spawner.is_tracked(ObstacleId(1)));
        assert!(spawner.is_tracked(ObstacleId(2)));
    }

    #[test]
    fn removed_ring_does_not_expire_again() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(5);
        spawner.enable();
        run(&mut spawner, &mut rng, 3.1);
        spawner.disable();
        spawner.remove(ObstacleId(1));
        let tick = run(&mut spawner, &mut rng, 7.0);
        assert!(tick.expired.is_empty());
    }

    #[test]
    fn long_tick_spawns_every_boundary_crossed() {
        let mut spawner = ObstacleSpawner::new(&GameConfig::default());
        let mut rng = Rng::new(9);
        spawner.enable();
        let tick = spawner.tick(9.5, &mut rng);
        assert_eq!(tick.spawned.len(), 3);
        // The oldest one is already 6.5 s into its crossing.
        assert!((spawner.get(ObstacleId(1)).unwrap().age - 6.5).abs() < 1e-3);
        let tick = spawner.tick(DT, &mut rng);
        assert_eq!(tick.expired, vec![ObstacleId(1)]);
    }
}
