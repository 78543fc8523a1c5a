/*
 * Application Module
 *
 * This module defines the main application model for the nannou host.
 * The host owns the window, the control panel and a Simulation sized to the
 * window, and calls Simulation::step once per frame unless paused.
 *
 * Pausing (from the panel, the keyboard or losing window focus) only stops
 * stepping. The simulation keeps no time-based state, so resuming carries on
 * exactly where it stopped.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::path::Path;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "MOODFLOCK_CONFIG";

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Set while the window is not focused
    pub hidden: bool,
}

impl Model {
    pub fn is_running(&self) -> bool {
        !self.params.pause_simulation && !self.hidden
    }

    // Start over with whatever the panel currently holds
    pub fn reset_simulation(&mut self) {
        if let Err(err) = self.sim.reconfigure(self.params.clone()) {
            warn!(%err, "Keeping the running simulation");
        }
    }
}

// Read the config file named by MOODFLOCK_CONFIG, falling back to defaults
pub fn load_params() -> SimulationParams {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return SimulationParams::default();
    };

    let path = Path::new(&path);
    match SimulationParams::load(path) {
        Ok(params) => {
            info!(path = %path.display(), "Loaded simulation config");
            params
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "Using default simulation config");
            SimulationParams::default()
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    let window_id = app
        .new_window()
        .title("Mood Flock")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .resized(input::resized)
        .focused(input::focused)
        .unfocused(input::unfocused)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window was just created");
    let egui = Egui::from_window(&window);

    let rect = window.rect();
    let mut params = load_params();
    let sim = match Simulation::new(params.clone(), rect.w(), rect.h()) {
        Ok(sim) => sim,
        Err(err) => {
            warn!(%err, "Falling back to default parameters");
            params = SimulationParams::default();
            Simulation::new(params.clone(), rect.w().max(1.0), rect.h().max(1.0))
                .expect("Default parameters are valid")
        }
    };

    Model {
        sim,
        params,
        egui,
        debug_info: DebugInfo::default(),
        hidden: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let mut show_partition = model.sim.show_partition();
    let response = ui::update_ui(&mut model.egui, &mut model.params, &mut show_partition, &model.debug_info);

    if response.reset_requested || response.population_changed {
        model.reset_simulation();
    }
    if show_partition != model.sim.show_partition() {
        model.sim.set_show_partition(show_partition);
    }

    if model.is_running() {
        model.sim.step();
    }

    model.debug_info.refresh(&model.sim);
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
