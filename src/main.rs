/*
 * Shoal Aquarium
 *
 * A 3D fish-tank simulation: schools of boids that flock within their own
 * size tier, flee bigger fish, hunt smaller ones, and react to a
 * player-controlled fish that eats its way up the food chain while a
 * hunger meter ticks down.
 *
 * Controls: mouse steers the player fish, space thrusts, left-drag orbits
 * the camera, wheel zooms. Simulation parameters live in the egui panel.
 */

use shoal::app;

fn main() {
    env_logger::init();
    nannou::app(app::model).update(app::update).run();
}
