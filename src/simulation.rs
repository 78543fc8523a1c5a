/*
 * Simulation Module
 *
 * This module owns the boid and food populations together with one quadtree
 * for each, and advances everything one frame at a time.
 *
 * A frame runs in a fixed order:
 * 1. update + wrap every boid, then index it in the boid tree
 * 2. index every food item, then make it available again
 * 3. for every boid, query food and eat, query boids and flock
 * 4. dispose both trees
 *
 * Indexing everyone before anyone reacts keeps the result independent of
 * the order boids are stored in.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::boid::{Boid, BoidSnapshot};
use crate::error::SimulationError;
use crate::food::{Food, FoodSlot};
use crate::params::SimulationParams;
use crate::quadtree::{QuadTree, Region};

/// Counters collected while stepping the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub respawned: usize,
    pub food_eaten: usize,
    pub partition_nodes: usize,
    /// Neighbour candidates handed to `flock`, summed over all boids.
    pub flock_candidates: usize,
    /// Food candidates handed to `eat`, summed over all boids.
    pub food_candidates: usize,
}

pub struct Simulation {
    params: SimulationParams,
    world: Region,
    boids: Vec<Boid>,
    food: Vec<Food>,
    boid_tree: QuadTree<BoidSnapshot>,
    food_tree: QuadTree<FoodSlot>,
    rng: StdRng,
    stats: FrameStats,
    // Host overlay toggle; survives resets and reconfiguration
    show_partition: bool,
    // Query buffers reused across boids and frames
    neighbors: Vec<BoidSnapshot>,
    food_candidates: Vec<FoodSlot>,
    partition_outline: Vec<Region>,
}

fn world_region(width: f32, height: f32) -> Result<Region, SimulationError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(SimulationError::InvalidWorld { width, height });
    }
    Ok(Region::new(0.0, 0.0, width, height))
}

impl Simulation {
    pub fn new(params: SimulationParams, width: f32, height: f32) -> Result<Self, SimulationError> {
        params.validate()?;
        let world = world_region(width, height)?;

        let rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            boid_tree: QuadTree::with_capacity(params.partition_capacity),
            food_tree: QuadTree::with_capacity(params.partition_capacity),
            params,
            world,
            boids: Vec::new(),
            food: Vec::new(),
            rng,
            stats: FrameStats::default(),
            show_partition: false,
            neighbors: Vec::new(),
            food_candidates: Vec::new(),
            partition_outline: Vec::new(),
        };
        sim.populate();
        Ok(sim)
    }

    // Throw everything away and spawn fresh populations in the current world
    fn populate(&mut self) {
        self.boid_tree.reset();
        self.boid_tree.init_region(self.world);
        self.food_tree.reset();
        self.food_tree.init_region(self.world);

        let behavior = &self.params.behavior;
        let world = self.world;
        let rng = &mut self.rng;

        self.boids = (0..self.params.num_boids)
            .map(|id| Boid::new(id, &world, behavior, rng))
            .collect();
        self.food = (0..self.params.num_food)
            .map(|_| Food::random(&world, behavior.food_nutrition, rng))
            .collect();

        self.stats = FrameStats::default();
        self.partition_outline.clear();

        info!(
            boids = self.boids.len(),
            food = self.food.len(),
            width = world.w,
            height = world.h,
            "Populated simulation"
        );
    }

    // Respawn both populations with the current parameters
    pub fn reset(&mut self) {
        self.populate();
    }

    /// Apply new parameters and start over. Invalid parameters leave the
    /// running simulation untouched.
    pub fn reconfigure(&mut self, params: SimulationParams) -> Result<(), SimulationError> {
        params.validate()?;
        if params.partition_capacity != self.params.partition_capacity {
            self.boid_tree = QuadTree::with_capacity(params.partition_capacity);
            self.food_tree = QuadTree::with_capacity(params.partition_capacity);
        }
        self.params = params;
        self.populate();
        Ok(())
    }

    /// New world bounds: nothing survives a resize, both populations are
    /// spawned again inside the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SimulationError> {
        self.world = world_region(width, height)?;
        self.populate();
        Ok(())
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self) {
        let Self {
            params,
            world,
            boids,
            food,
            boid_tree,
            food_tree,
            rng,
            stats,
            show_partition,
            neighbors,
            food_candidates,
            partition_outline,
        } = self;
        let behavior = &params.behavior;

        let mut frame = FrameStats {
            frame: stats.frame + 1,
            ..FrameStats::default()
        };

        // Move everyone and index the new positions
        boid_tree.reset();
        boid_tree.init_region(*world);
        for boid in boids.iter_mut() {
            if boid.update(world, behavior, rng) {
                frame.respawned += 1;
            }
            boid.edges(world);
            if !boid_tree.insert(boid.snapshot()) {
                trace!(id = boid.id(), "Boid outside the partition");
            }
        }

        // Index food, then make last frame's meals available again
        food_tree.reset();
        food_tree.init_region(*world);
        for (index, item) in food.iter_mut().enumerate() {
            food_tree.insert(FoodSlot::of(index, item));
            item.refresh();
        }

        // Everyone is indexed; now react
        for boid in boids.iter_mut() {
            food_candidates.clear();
            food_tree.query(&boid.food_boundary(), food_candidates);
            frame.food_candidates += food_candidates.len();
            if boid.eat(food_candidates, food, world, behavior, rng).is_some() {
                frame.food_eaten += 1;
            }

            neighbors.clear();
            boid_tree.query(&boid.flock_boundary(), neighbors);
            frame.flock_candidates += neighbors.len();
            boid.flock(neighbors, behavior);
        }

        frame.partition_nodes = boid_tree.node_count();
        partition_outline.clear();
        if *show_partition {
            boid_tree.regions(partition_outline);
        }

        boid_tree.dispose();
        food_tree.dispose();

        if frame.respawned > 0 {
            debug!(frame = frame.frame, respawned = frame.respawned, "Boids respawned");
        }
        trace!(
            frame = frame.frame,
            eaten = frame.food_eaten,
            nodes = frame.partition_nodes,
            "Frame stepped"
        );

        *stats = frame;
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn show_partition(&self) -> bool {
        self.show_partition
    }

    // Host toggle that does not need a reset
    pub fn set_show_partition(&mut self, show: bool) {
        self.show_partition = show;
        if !show {
            self.partition_outline.clear();
        }
    }

    pub fn world(&self) -> Region {
        self.world
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame(&self) -> u64 {
        self.stats.frame
    }

    // Boid tree node boundaries from the last frame, empty unless enabled
    pub fn partition_outline(&self) -> &[Region] {
        &self.partition_outline
    }

    pub fn average_health(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        self.boids.iter().map(Boid::health).sum::<f32>() / self.boids.len() as f32
    }

    pub fn average_mood(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        self.boids.iter().map(Boid::mood).sum::<f32>() / self.boids.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::genome::{Genome, Traits, Zones};
    use crate::params::BehaviorParams;
    use nannou::prelude::*;

    fn still_boid(id: usize, position: Point2) -> Boid {
        let traits = Traits {
            max_force: 0.4,
            max_speed: 2.0,
            moodiness: 0.05,
            mental_endurance: 2.0,
            mental_health: 0.0,
            mood_limit: 10.0,
        };
        let genome = Genome::new(traits, Zones::default());
        Boid::with_kinematics(id, genome, position, Vec2::ZERO, &BehaviorParams::default())
    }

    fn seeded(num_boids: usize, num_food: usize) -> SimulationParams {
        SimulationParams {
            num_boids,
            num_food,
            rng_seed: Some(1234),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn new_spawns_requested_populations() {
        let sim = Simulation::new(seeded(200, 100), 800.0, 600.0).expect("valid setup");
        assert_eq!(sim.boids().len(), 200);
        assert_eq!(sim.food().len(), 100);
        assert_eq!(sim.frame(), 0);
        for (id, boid) in sim.boids().iter().enumerate() {
            assert_eq!(boid.id(), id);
            assert!(sim.world().contains(&boid.position()));
        }
    }

    #[test]
    fn invalid_world_fails_fast() {
        let err = Simulation::new(seeded(10, 10), 0.0, 600.0).err();
        assert!(matches!(err, Some(SimulationError::InvalidWorld { .. })));

        let err = Simulation::new(seeded(10, 10), 800.0, f32::NAN).err();
        assert!(matches!(err, Some(SimulationError::InvalidWorld { .. })));
    }

    #[test]
    fn empty_population_fails_fast() {
        let err = Simulation::new(seeded(0, 10), 800.0, 600.0).err();
        assert!(matches!(err, Some(SimulationError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn step_keeps_everyone_in_bounds() {
        let mut sim = Simulation::new(seeded(150, 60), 500.0, 400.0).expect("valid setup");
        for _ in 0..200 {
            sim.step();
            for boid in sim.boids() {
                assert!(sim.world().contains(&boid.position()));
                let limit = boid.genome().mood_limit();
                assert!(boid.mood() >= -limit && boid.mood() <= limit);
                assert!(boid.health() > 0.0);
                assert!(boid.velocity().x.is_finite() && boid.velocity().y.is_finite());
            }
            for item in sim.food() {
                assert!(sim.world().contains(&item.position()));
            }
        }
        assert_eq!(sim.frame(), 200);
    }

    #[test]
    fn stats_count_partition_and_candidates() {
        let mut sim = Simulation::new(seeded(100, 20), 300.0, 300.0).expect("valid setup");
        sim.step();

        let stats = sim.stats();
        assert_eq!(stats.frame, 1);
        assert!(stats.partition_nodes >= 1);
        // Every boid at least finds itself
        assert!(stats.flock_candidates >= 100);
    }

    #[test]
    fn partition_outline_only_when_enabled() {
        let mut sim = Simulation::new(seeded(50, 0), 400.0, 400.0).expect("valid setup");
        sim.step();
        assert!(sim.partition_outline().is_empty());

        sim.set_show_partition(true);
        sim.step();
        assert_eq!(sim.partition_outline().len(), sim.stats().partition_nodes);
        assert_eq!(sim.partition_outline()[0], sim.world());

        // The toggle belongs to the simulation and survives a reconfigure
        sim.reconfigure(seeded(30, 0)).expect("valid params");
        assert!(sim.show_partition());
        sim.step();
        assert!(!sim.partition_outline().is_empty());

        sim.set_show_partition(false);
        assert!(sim.partition_outline().is_empty());
    }

    #[test]
    fn food_is_eaten_once_per_frame_and_returns_next_frame() {
        let mut sim = Simulation::new(seeded(2, 1), 400.0, 300.0).expect("valid setup");
        let spot = vec2(101.0, 100.0);
        sim.boids = vec![still_boid(0, vec2(100.0, 100.0)), still_boid(1, vec2(102.0, 100.0))];
        sim.food = vec![Food::new(spot, 10.0)];

        sim.step();

        // Both boids are in reach, only the first one to react gets the meal
        assert_eq!(sim.stats().food_eaten, 1);
        let fed = sim.boids().iter().filter(|b| (b.health() - 109.9).abs() < 1e-3).count();
        let hungry = sim.boids().iter().filter(|b| (b.health() - 99.9).abs() < 1e-3).count();
        assert_eq!((fed, hungry), (1, 1));

        let relocated = sim.food()[0].position();
        assert!(sim.food()[0].is_eaten());
        assert_ne!(relocated, spot);
        assert!(sim.world().contains(&relocated));

        // Move everyone well away from the new spot, outside the food zone
        let away = vec2((relocated.x + 200.0) % 400.0, relocated.y);
        sim.boids = vec![still_boid(0, away), still_boid(1, away)];

        sim.step();

        assert_eq!(sim.stats().food_eaten, 0);
        assert!(sim.food()[0].is_available());
        assert_eq!(sim.food()[0].position(), relocated);
    }

    #[test]
    fn resize_repopulates_inside_new_bounds() {
        let mut sim = Simulation::new(seeded(80, 40), 800.0, 600.0).expect("valid setup");
        for _ in 0..10 {
            sim.step();
        }

        sim.resize(200.0, 100.0).expect("valid size");

        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.world(), Region::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(sim.boids().len(), 80);
        assert_eq!(sim.food().len(), 40);
        assert!(sim.boids().iter().all(|b| sim.world().contains(&b.position())));
        assert!(sim.food().iter().all(|f| sim.world().contains(&f.position())));
    }

    #[test]
    fn failed_resize_keeps_previous_world() {
        let mut sim = Simulation::new(seeded(10, 5), 800.0, 600.0).expect("valid setup");
        assert!(sim.resize(-1.0, 100.0).is_err());
        assert_eq!(sim.world(), Region::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn reconfigure_changes_population() {
        let mut sim = Simulation::new(seeded(10, 5), 800.0, 600.0).expect("valid setup");
        sim.reconfigure(seeded(25, 0)).expect("valid params");
        assert_eq!(sim.boids().len(), 25);
        assert!(sim.food().is_empty());

        assert!(sim.reconfigure(seeded(0, 0)).is_err());
        assert_eq!(sim.boids().len(), 25);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = Simulation::new(seeded(60, 30), 400.0, 300.0).expect("valid setup");
        let mut b = Simulation::new(seeded(60, 30), 400.0, 300.0).expect("valid setup");
        for _ in 0..50 {
            a.step();
            b.step();
        }
        let pa: Vec<Point2> = a.boids().iter().map(Boid::position).collect();
        let pb: Vec<Point2> = b.boids().iter().map(Boid::position).collect();
        assert_eq!(pa, pb);
    }
}
