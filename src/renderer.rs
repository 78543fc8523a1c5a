/*
 * Renderer Module
 *
 * This module draws the simulation state. It only reads from the model.
 * The simulation works in window-sized coordinates with the origin in the
 * top-left corner and y pointing down; nannou centres the origin with y up.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::boid::Boid;
use crate::quadtree::Region;

pub const BOID_SIZE: f32 = 15.0;
const FOOD_RADIUS: f32 = 2.0;

// Map a simulation point to nannou's window space
fn to_screen(world: &Region, p: Point2) -> Point2 {
    pt2(p.x - world.w / 2.0, world.h / 2.0 - p.y)
}

// Triangle pointing along the heading, tip at the boid's position
fn boid_triangle(world: &Region, boid: &Boid) -> ([Point2; 3], Rgba) {
    let look = boid.appearance();
    let dir = vec2(look.heading.cos(), look.heading.sin());
    let side = vec2(-dir.y, dir.x) * 0.2 * BOID_SIZE;
    let base = look.position - dir * 0.5 * BOID_SIZE;

    let points = [
        to_screen(world, look.position),
        to_screen(world, base + side),
        to_screen(world, base - side),
    ];
    let (r, g, b) = look.color;
    (points, rgba(r, g, b, look.alpha))
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.16, 0.16, 0.16));

    let world = model.sim.world();

    if model.sim.show_partition() {
        for region in model.sim.partition_outline() {
            let center = to_screen(&world, pt2(region.x + region.w / 2.0, region.y + region.h / 2.0));
            draw.rect()
                .xy(center)
                .wh(vec2(region.w, region.h))
                .no_fill()
                .stroke_weight(1.0)
                .stroke(rgba(1.0, 1.0, 1.0, 0.04));
        }
    }

    for item in model.sim.food().iter().filter(|f| f.is_available()) {
        draw.ellipse()
            .xy(to_screen(&world, item.position()))
            .radius(FOOD_RADIUS)
            .color(rgba(1.0, 1.0, 1.0, 0.16));
    }

    for boid in model.sim.boids() {
        let (points, color) = boid_triangle(&world, boid);
        draw.polygon().color(color).points(points);
    }

    if model.params.show_debug {
        draw_debug(&draw, model, &world);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(error = ?err, "Failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?err, "Failed to draw UI");
    }
}

// Perception zones of the first boid plus a few counters
fn draw_debug(draw: &Draw, model: &Model, world: &Region) {
    if let Some(first) = model.sim.boids().first() {
        let center = to_screen(world, first.position());
        let genome = first.genome();

        let zones = [
            (genome.separation_zone(), RED),
            (genome.alignment_zone(), GREEN),
            (genome.close_zone(), ORANGE),
            (genome.food_zone(), BLUE),
        ];
        for (radius, color) in zones {
            draw.ellipse()
                .xy(center)
                .radius(radius)
                .no_fill()
                .stroke(color)
                .stroke_weight(1.0);
        }

        let velocity = first.velocity();
        draw.arrow()
            .start(center)
            .end(center + vec2(velocity.x, -velocity.y) * 10.0)
            .color(YELLOW)
            .stroke_weight(2.0);
    }

    let info = &model.debug_info;
    let lines = [
        format!("FPS: {:.1}", info.fps),
        format!("Frame time: {:.2} ms", info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", model.sim.boids().len()),
        format!("Avg health: {:.1}", info.average_health),
        format!("Paused: {}", !model.is_running()),
    ];
    let left = -world.w / 2.0 + 100.0;
    let top = world.h / 2.0 - 20.0;
    for (i, line) in lines.iter().enumerate() {
        draw.text(line)
            .x_y(left, top - 20.0 * i as f32)
            .color(WHITE)
            .font_size(14);
    }
}
