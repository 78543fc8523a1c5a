/*
 * UI Module
 *
 * This module contains the control panel drawn with nannou_egui. It edits the
 * host toggles and population sizes; parameter change detection is handled by
 * the SimulationParams struct. The partition overlay flag belongs to the
 * simulation and is passed in separately.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// What the panel asks the app to do after this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub reset_requested: bool,
    pub population_changed: bool,
}

// Update the UI and report whether the simulation must be reset
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    show_partition: &mut bool,
    debug_info: &DebugInfo,
) -> UiResponse {
    let mut reset_requested = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::num_boids_range()).text("Boids"));
                ui.add(egui::Slider::new(&mut params.num_food, SimulationParams::num_food_range()).text("Food"));

                if ui.button("Reset Simulation").clicked() {
                    reset_requested = true;
                }
            });

            ui.collapsing("Statistics", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Frame: {}", debug_info.stats.frame));
                ui.label(format!("Average health: {:.1}", debug_info.average_health));
                ui.label(format!("Average mood: {:.2}", debug_info.average_mood));
                ui.label(format!("Food eaten: {}", debug_info.stats.food_eaten));
                ui.label(format!("Respawned: {}", debug_info.stats.respawned));
                ui.label(format!("Partition nodes: {}", debug_info.stats.partition_nodes));
            });

            ui.checkbox(show_partition, "Show Partition");
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation (Space)");
        });

    UiResponse {
        reset_requested,
        population_changed: params.detect_changes(),
    }
}
