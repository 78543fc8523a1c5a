/*
 * Food Module
 *
 * A food item is a point with a fixed nutrition value. When eaten it jumps
 * to a new random spot straight away and stays unavailable until the driver
 * refreshes it at the start of the next frame.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::quadtree::{Positioned, Region};

#[derive(Debug, Clone)]
pub struct Food {
    position: Point2,
    value: f32,
    available: bool,
}

impl Food {
    pub fn new(position: Point2, value: f32) -> Self {
        Self {
            position,
            value,
            available: true,
        }
    }

    pub fn random(world: &Region, value: f32, rng: &mut impl Rng) -> Self {
        Self::new(world.random_point(rng), value)
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_eaten(&self) -> bool {
        !self.available
    }

    // Consume: mark unavailable, relocate, hand back the nutrition
    pub fn eat(&mut self, world: &Region, rng: &mut impl Rng) -> f32 {
        self.available = false;
        self.position = world.random_point(rng);
        self.value
    }

    pub fn refresh(&mut self) {
        self.available = true;
    }
}

/// What the food partition stores: the slot of a food item and where it was
/// when the partition was built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSlot {
    pub index: usize,
    pub position: Point2,
}

impl FoodSlot {
    pub fn of(index: usize, food: &Food) -> Self {
        Self {
            index,
            position: food.position,
        }
    }
}

impl Positioned for FoodSlot {
    fn x(&self) -> f32 {
        self.position.x
    }

    fn y(&self) -> f32 {
        self.position.y
    }
}
