/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Counters of the last simulated frame
 * - Average health and mood of the flock
 */

use std::time::Duration;

use crate::simulation::{FrameStats, Simulation};

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub stats: FrameStats,
    pub average_health: f32,
    pub average_mood: f32,
}

impl DebugInfo {
    // Pull the latest counters out of the simulation
    pub fn refresh(&mut self, sim: &Simulation) {
        self.stats = sim.stats();
        self.average_health = sim.average_health();
        self.average_mood = sim.average_mood();
    }
}
