/*
 * Mood Flock - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The simulation core (vecmath, genome, quadtree, food, boid, simulation)
 * never touches the window; app, input, ui and renderer form the
 * nannou host that steps and draws it.
 */

// Re-export key components for easier access
pub use boid::{Appearance, Boid, BoidSnapshot};
pub use debug::DebugInfo;
pub use error::{ConfigError, SimulationError};
pub use food::{Food, FoodSlot};
pub use genome::{Genome, Traits, Zones};
pub use params::{BehaviorParams, SimulationParams};
pub use quadtree::{Positioned, QuadTree, Region};
pub use simulation::{FrameStats, Simulation};

// Define modules
pub mod vecmath;
pub mod genome;
pub mod quadtree;
pub mod food;
pub mod boid;
pub mod params;
pub mod error;
pub mod simulation;
pub mod debug;
pub mod app;
pub mod ui;
pub mod input;
pub mod renderer;
