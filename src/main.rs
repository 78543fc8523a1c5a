/*
 * Mood Flock
 *
 * A flock of boids whose behaviour is driven by a per-boid genome and mood.
 * Besides the classic rules (separation, alignment, cohesion) boids keep a
 * clear line of sight, share moods with neighbours, and hunt for food to
 * stay healthy. Neighbours are found through a quadtree rebuilt every frame.
 *
 * Set RUST_LOG to control logging and MOODFLOCK_CONFIG to load parameters
 * from a JSON file.
 */

use moodflock::app;

fn main() {
    init_tracing();
    tracing::info!("Starting Mood Flock");

    nannou::app(app::model)
        .update(app::update)
        .run();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
