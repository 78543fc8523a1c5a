/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid carries a genome, kinematic state, a mood and a health pool.
 * Every frame it reacts to nearby boids and food:
 * 1. Alignment: Steer towards the average heading of neighbors
 * 2. Cohesion: Steer towards the average position of neighbors
 * 3. Separation: Avoid crowding neighbors, harder when in a bad mood
 * 4. Clarity of view: Turn away from neighbors blocking the line of sight
 * 5. Mood: Pick up the mood of neighbors and react to crowding
 * 6. Food: Steer towards the nearest food and eat it when close enough
 *
 * A boid whose health runs out is re-initialised in place, so "dead" is
 * never visible between frames.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::food::{Food, FoodSlot};
use crate::genome::Genome;
use crate::params::BehaviorParams;
use crate::quadtree::{Positioned, Region};
use crate::vecmath;

/// Read-only copy of a boid taken when it is inserted into the partition.
///
/// Flocking only ever sees these, never the live boids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidSnapshot {
    pub id: usize,
    pub position: Point2,
    pub velocity: Vec2,
    pub mood: f32,
}

impl Positioned for BoidSnapshot {
    fn x(&self) -> f32 {
        self.position.x
    }

    fn y(&self) -> f32 {
        self.position.y
    }
}

/// Everything a renderer needs to draw a boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub position: Point2,
    /// Heading angle in radians, counter-clockwise from +x.
    pub heading: f32,
    /// Mood colour, each channel in [0, 1].
    pub color: (f32, f32, f32),
    pub alpha: f32,
}

// Per-boid accumulators for one flocking pass
#[derive(Debug, Clone, Default)]
struct FlockScratch {
    align: Vec2,
    cohes: Vec2,
    separ: Vec2,
    view: f32,
    mood: f32,
    align_count: u32,
    cohes_count: u32,
    separ_count: u32,
    view_count: u32,
    mood_count: u32,
    happy_count: u32,
    uncomfortable_count: u32,
}

#[derive(Debug, Clone)]
pub struct Boid {
    id: usize,
    genome: Genome,
    position: Point2,
    velocity: Vec2,
    acceleration: Vec2,
    mood: f32,
    mood_swing: f32,
    health: f32,
    fade: f32,
    scratch: FlockScratch,
}

impl Boid {
    pub fn new(id: usize, world: &Region, behavior: &BehaviorParams, rng: &mut impl Rng) -> Self {
        let genome = Genome::random(rng);
        let mut boid = Self::with_kinematics(id, genome, Point2::ZERO, Vec2::ZERO, behavior);
        boid.respawn(world, behavior, rng);
        boid
    }

    // Fixed starting state, mostly for tests and benchmarks
    pub fn with_kinematics(
        id: usize,
        genome: Genome,
        position: Point2,
        velocity: Vec2,
        behavior: &BehaviorParams,
    ) -> Self {
        Self {
            id,
            genome,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            mood: 0.0,
            mood_swing: 0.0,
            health: behavior.initial_health,
            fade: 0.0,
            scratch: FlockScratch::default(),
        }
    }

    // Fresh random kinematics, full health, neutral mood; genome is kept
    fn respawn(&mut self, world: &Region, behavior: &BehaviorParams, rng: &mut impl Rng) {
        self.position = world.random_point(rng);
        self.velocity = vecmath::random_direction(rng, self.genome.max_speed());
        self.acceleration = vecmath::random_direction(rng, self.genome.max_force());
        self.mood = 0.0;
        self.mood_swing = 0.0;
        self.health = behavior.initial_health;
        self.fade = 0.0;
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn mood(&self) -> f32 {
        self.mood
    }

    pub fn mood_swing(&self) -> f32 {
        self.mood_swing
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn fade(&self) -> f32 {
        self.fade
    }

    pub fn snapshot(&self) -> BoidSnapshot {
        BoidSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            mood: self.mood,
        }
    }

    // Square the driver queries the boid partition with
    pub fn flock_boundary(&self) -> Region {
        Region::around(self.position, self.genome.max_zone())
    }

    // Square the driver queries the food partition with
    pub fn food_boundary(&self) -> Region {
        Region::around(self.position, self.genome.food_zone())
    }

    /// Integrate one frame. Returns `true` when the boid ran out of health
    /// and was re-initialised.
    pub fn update(&mut self, world: &Region, behavior: &BehaviorParams, rng: &mut impl Rng) -> bool {
        let mood_limit = self.genome.mood_limit();
        self.mood = (self.mood + self.mood_swing).clamp(-mood_limit, mood_limit);

        // Position moves with last frame's velocity, then velocity picks up the forces
        self.position += self.velocity;
        self.velocity += self.acceleration;
        self.velocity = vecmath::limit(self.velocity, self.genome.max_speed());

        self.health = (self.health - behavior.health_decay + self.mood / behavior.mood_health_divisor).max(0.0);

        self.acceleration = Vec2::ZERO;
        self.mood_swing = 0.0;
        self.fade = (self.fade + behavior.fade_step).min(1.0);

        if self.health == 0.0 {
            self.respawn(world, behavior, rng);
            return true;
        }

        false
    }

    // Wrap the boid around the world edges
    pub fn edges(&mut self, world: &Region) {
        if self.position.x > world.right() {
            self.position.x = world.x;
        } else if self.position.x < world.x {
            self.position.x = world.right();
        }

        if self.position.y > world.bottom() {
            self.position.y = world.y;
        } else if self.position.y < world.y {
            self.position.y = world.bottom();
        }
    }

    // Nearest available food inside the food zone, with its distance
    fn nearest_food(&self, candidates: &[FoodSlot], food: &[Food]) -> Option<(usize, f32)> {
        let mut nearest: Option<(usize, f32)> = None;

        for slot in candidates {
            let Some(item) = food.get(slot.index) else {
                continue;
            };
            if item.is_eaten() {
                continue;
            }

            let dist = self.position.distance(item.position());
            if dist >= self.genome.food_zone() {
                continue;
            }
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((slot.index, dist));
            }
        }

        nearest
    }

    /// Eat the nearest food if it is within reach, otherwise steer towards it.
    ///
    /// Returns the index of the food item eaten, if any.
    pub fn eat(
        &mut self,
        candidates: &[FoodSlot],
        food: &mut [Food],
        world: &Region,
        behavior: &BehaviorParams,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        let (index, dist) = self.nearest_food(candidates, food)?;

        if dist < behavior.consumption_distance {
            self.health += food[index].eat(world, rng);
            return Some(index);
        }

        let toward = food[index].position() - self.position;
        if let Some(desired) = vecmath::set_magnitude(toward, self.genome.max_speed()) {
            let steer = vecmath::limit(
                desired - self.velocity,
                behavior.food_steer_factor * self.genome.max_force(),
            );
            self.acceleration += steer;
        }

        None
    }

    // Force limit for separation: grows as the mood drops
    pub fn separation_limit(&self, behavior: &BehaviorParams) -> f32 {
        let mood_limit = self.genome.mood_limit();
        let modulation = (mood_limit - self.mood) / (mood_limit * behavior.separation_mood_divisor)
            + behavior.separation_mood_baseline;
        self.genome.max_force() * modulation
    }

    // Single pass over the candidates filling the scratch accumulators
    fn gather(&mut self, neighbors: &[BoidSnapshot], behavior: &BehaviorParams) {
        let zones = *self.genome.zones();
        let heading_normal = vecmath::perpendicular(self.velocity);
        let s = &mut self.scratch;
        *s = FlockScratch::default();

        for other in neighbors {
            // Identity, not distance: distinct boids can overlap exactly
            if other.id == self.id {
                continue;
            }

            let dist = self.position.distance(other.position);

            if dist < zones.alignment {
                s.align += other.velocity;
                s.align_count += 1;
            }

            if dist < zones.cohesion {
                s.cohes += other.position;
                s.cohes_count += 1;
            }

            if dist < zones.separation {
                // Coincident boids push with no direction
                if dist > 0.0 {
                    s.separ += (self.position - other.position) / dist;
                }
                s.separ_count += 1;
            }

            if dist < zones.view {
                let bearing = other.position - self.position;
                if let Some(angle) = vecmath::angle_between(self.velocity, bearing) {
                    if angle < behavior.view_angle {
                        let side = heading_normal.dot(bearing);
                        s.view += if side > 0.0 { -angle } else { angle };
                        s.view_count += 1;
                    }
                }
            }

            if dist < zones.close {
                s.uncomfortable_count += 1;
            } else if dist < zones.happy {
                s.happy_count += 1;
            }

            if dist < zones.sensitive {
                s.mood += other.mood;
                s.mood_count += 1;
            }
        }
    }

    /// Accumulate this frame's steering forces and mood swing from the
    /// neighbours found by the partition query. Neighbours are never mutated.
    pub fn flock(&mut self, neighbors: &[BoidSnapshot], behavior: &BehaviorParams) {
        self.gather(neighbors, behavior);

        let max_speed = self.genome.max_speed();
        let max_force = self.genome.max_force();
        let s = self.scratch.clone();

        // Alignment
        if s.align_count > 0 {
            let average = s.align / s.align_count as f32;
            if let Some(desired) = vecmath::set_magnitude(average, max_speed) {
                self.acceleration += vecmath::limit(desired - self.velocity, max_force);
            }
        }

        // Cohesion
        if s.cohes_count > 0 {
            let center = s.cohes / s.cohes_count as f32;
            if let Some(desired) = vecmath::set_magnitude(center - self.position, max_speed) {
                self.acceleration += vecmath::limit(desired - self.velocity, max_force);
            }
        }

        // Separation
        if s.separ_count > 0 {
            let average = s.separ / s.separ_count as f32;
            if let Some(desired) = vecmath::set_magnitude(average, max_speed) {
                let limit = self.separation_limit(behavior);
                self.acceleration += vecmath::limit(desired - self.velocity, limit);
            }
        }

        // Clarity of view
        if s.view_count > 0 {
            let turned = vecmath::rotate(self.velocity, s.view / s.view_count as f32);
            if let Some(desired) = vecmath::set_magnitude(turned, max_speed) {
                self.acceleration += vecmath::limit(desired + self.velocity, max_force);
            }
        }

        // Mood diffusion
        if s.mood_count > 0 {
            self.mood_swing += self.genome.moodiness() * s.mood / s.mood_count as f32;
        }

        // Crowding pressure, applied even with nobody around
        let crowding = -2.0 * s.uncomfortable_count as f32 + s.happy_count as f32;
        self.mood_swing += self.genome.moodiness()
            * (self.genome.mental_endurance() * crowding + self.genome.mental_health());
    }

    pub fn appearance(&self) -> Appearance {
        let mood_limit = self.genome.mood_limit();
        let mood = (self.mood + mood_limit) / (mood_limit * 2.0);
        let r = (2.0 * mood).min(1.0);
        let b = (2.0 - 2.0 * mood).min(1.0);
        let g = (130.0 * r / 2.0 + 125.0) / 255.0;

        // Low health fades the boid out
        let vitality = 1.0 - 1.0 / (0.2 * self.health + 1.0);

        Appearance {
            position: self.position,
            heading: self.velocity.y.atan2(self.velocity.x),
            color: (r, g, b),
            alpha: self.fade * vitality,
        }
    }
}
