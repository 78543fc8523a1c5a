/*
 * Input Module
 *
 * This module handles window events for the host application.
 *
 * Features:
 * - Space toggles pause, R resets, P and D toggle the overlays
 * - Losing focus pauses stepping, regaining it resumes
 * - Resizing the window restarts the simulation in the new bounds
 */

use nannou::prelude::*;
use tracing::{debug, warn};

use crate::app::Model;

// Keyboard shortcuts, ignored while the panel has keyboard focus
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::R => model.reset_simulation(),
        Key::P => {
            let show = !model.sim.show_partition();
            model.sim.set_show_partition(show);
        }
        Key::D => model.params.show_debug = !model.params.show_debug,
        _ => {}
    }
}

pub fn resized(_app: &App, model: &mut Model, dim: Vec2) {
    match model.sim.resize(dim.x, dim.y) {
        Ok(()) => debug!(width = dim.x, height = dim.y, "Simulation resized"),
        // Minimised windows report a zero size; keep the old world until restored
        Err(err) => warn!(%err, "Ignoring resize"),
    }
}

pub fn focused(_app: &App, model: &mut Model) {
    model.hidden = false;
}

pub fn unfocused(_app: &App, model: &mut Model) {
    model.hidden = true;
}
