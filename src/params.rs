/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the startup
 * configuration of the simulation and the host toggles adjustable through
 * the UI. It also provides validation, JSON loading and the snapshot based
 * change detection the UI uses to decide when a reset is needed.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::quadtree::DEFAULT_CAPACITY;

/// Largest accepted node capacity; every node preallocates this many slots.
pub const MAX_PARTITION_CAPACITY: usize = 1024;

/// Tuned constants of the boid behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    /// Neighbours within this bearing (radians) of the heading block the view.
    pub view_angle: f32,
    /// Separation force multiplier at the top of the mood range.
    pub separation_mood_baseline: f32,
    /// Divisor applied to the mood range when modulating separation.
    pub separation_mood_divisor: f32,
    pub consumption_distance: f32,
    /// Fraction of max force used to steer towards food.
    pub food_steer_factor: f32,
    pub food_nutrition: f32,
    pub initial_health: f32,
    pub health_decay: f32,
    /// Mood is divided by this before being added to health each frame.
    pub mood_health_divisor: f32,
    pub fade_step: f32,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            view_angle: 1.0,
            separation_mood_baseline: 0.75,
            separation_mood_divisor: 4.0,
            consumption_distance: 4.0,
            food_steer_factor: 0.1,
            food_nutrition: 10.0,
            initial_health: 100.0,
            health_decay: 0.1,
            mood_health_divisor: 100.0,
            fade_step: 0.05,
        }
    }
}

impl BehaviorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (self.view_angle, "view_angle must be positive"),
            (self.separation_mood_divisor, "separation_mood_divisor must be positive"),
            (self.consumption_distance, "consumption_distance must be positive"),
            (self.initial_health, "initial_health must be positive"),
            (self.mood_health_divisor, "mood_health_divisor must be positive"),
            (self.fade_step, "fade_step must be positive"),
        ];
        for (value, message) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(message));
            }
        }

        let non_negative = [
            (self.separation_mood_baseline, "separation_mood_baseline must not be negative"),
            (self.food_steer_factor, "food_steer_factor must not be negative"),
            (self.food_nutrition, "food_nutrition must not be negative"),
            (self.health_decay, "health_decay must not be negative"),
        ];
        for (value, message) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(message));
            }
        }

        Ok(())
    }
}

// Parameters for the simulation, partly adjustable via UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub num_food: usize,
    /// Seed for the simulation RNG; `None` draws one from the OS.
    pub rng_seed: Option<u64>,
    pub partition_capacity: usize,
    pub behavior: BehaviorParams,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    pub(crate) previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    num_boids: usize,
    num_food: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 200,
            num_food: 100,
            rng_seed: None,
            partition_capacity: DEFAULT_CAPACITY,
            behavior: BehaviorParams::default(),
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_boids == 0 {
            return Err(ConfigError::Invalid("num_boids must be at least 1"));
        }
        if self.partition_capacity == 0 {
            return Err(ConfigError::Invalid("partition_capacity must be at least 1"));
        }
        if self.partition_capacity > MAX_PARTITION_CAPACITY {
            return Err(ConfigError::Invalid("partition_capacity must not exceed 1024"));
        }
        self.behavior.validate()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_boids: self.num_boids,
            num_food: self.num_food,
        });
    }

    // Check if the population sizes changed since the last snapshot
    pub fn detect_changes(&self) -> bool {
        let Some(prev) = &self.previous_values else {
            return false;
        };

        self.num_boids != prev.num_boids || self.num_food != prev.num_food
    }

    // Get parameter ranges for UI sliders
    pub fn num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=2000
    }

    pub fn num_food_range() -> std::ops::RangeInclusive<usize> {
        0..=1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.num_boids, 200);
        assert_eq!(params.num_food, 100);
        assert_eq!(params.partition_capacity, 4);
    }

    #[test]
    fn zero_population_is_rejected() {
        let params = SimulationParams {
            num_boids: 0,
            ..SimulationParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partition_capacity_is_bounded() {
        let params = SimulationParams {
            partition_capacity: MAX_PARTITION_CAPACITY,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_ok());

        let params = SimulationParams {
            partition_capacity: MAX_PARTITION_CAPACITY + 1,
            ..SimulationParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Invalid(_))));

        // A huge value from a config file is rejected before any tree is built
        let err = SimulationParams::from_json_str(r#"{ "partition_capacity": 1000000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn degenerate_behavior_is_rejected() {
        let mut params = SimulationParams::default();
        params.behavior.separation_mood_divisor = 0.0;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::default();
        params.behavior.food_nutrition = f32::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params = SimulationParams::from_json_str(
            r#"{ "num_boids": 50, "rng_seed": 9, "behavior": { "view_angle": 0.5 } }"#,
        )
        .expect("valid config");

        assert_eq!(params.num_boids, 50);
        assert_eq!(params.num_food, 100);
        assert_eq!(params.rng_seed, Some(9));
        assert_eq!(params.behavior.view_angle, 0.5);
        assert_eq!(params.behavior.consumption_distance, 4.0);
    }

    #[test]
    fn invalid_json_reports_parse_error() {
        let err = SimulationParams::from_json_str("{ num_boids: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn change_detection_flags_population_changes() {
        let mut params = SimulationParams::default();
        assert!(!params.detect_changes());

        params.take_snapshot();
        params.show_debug = true;
        params.pause_simulation = true;
        assert!(!params.detect_changes());

        params.take_snapshot();
        params.num_food = 10;
        assert!(params.detect_changes());
    }
}
