/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the aquarium simulation. These parameters can be
 * modified through the UI. It also provides methods for parameter change
 * detection and for pushing the current tuning onto live boids.
 */

use crate::boid::{self, Boid};
use crate::registry;

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    pub num_boids: usize,
    pub max_weight_class: u32,
    pub max_speed: f32,
    pub max_force: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub fear_weight: f32,
    pub hunt_weight: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_radius: f32,
    pub predator_radius: f32,
    pub prey_radius: f32,
    pub boundary_turn_gain: f32,
    pub fixed_physics_fps: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    num_boids: usize,
    max_weight_class: u32,
    max_speed: f32,
    max_force: f32,
    alignment_weight: f32,
    cohesion_weight: f32,
    separation_weight: f32,
    fear_weight: f32,
    hunt_weight: f32,
    alignment_radius: f32,
    cohesion_radius: f32,
    separation_radius: f32,
    predator_radius: f32,
    prey_radius: f32,
    boundary_turn_gain: f32,
    fixed_physics_fps: f32,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let perception = boid::Perception::default();
        let weights = boid::SteeringWeights::default();
        Self {
            num_boids: 120,
            max_weight_class: 3,
            max_speed: boid::DEFAULT_MAX_SPEED,
            max_force: boid::DEFAULT_MAX_FORCE,
            alignment_weight: weights.alignment,
            cohesion_weight: weights.cohesion,
            separation_weight: weights.separation,
            fear_weight: weights.fear,
            hunt_weight: weights.hunt,
            alignment_radius: perception.alignment,
            cohesion_radius: perception.cohesion,
            separation_radius: perception.separation,
            predator_radius: perception.predator,
            prey_radius: perception.prey,
            boundary_turn_gain: registry::DEFAULT_TURN_GAIN,
            fixed_physics_fps: 60.0,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_boids: self.num_boids,
            max_weight_class: self.max_weight_class,
            max_speed: self.max_speed,
            max_force: self.max_force,
            alignment_weight: self.alignment_weight,
            cohesion_weight: self.cohesion_weight,
            separation_weight: self.separation_weight,
            fear_weight: self.fear_weight,
            hunt_weight: self.hunt_weight,
            alignment_radius: self.alignment_radius,
            cohesion_radius: self.cohesion_radius,
            separation_radius: self.separation_radius,
            predator_radius: self.predator_radius,
            prey_radius: self.prey_radius,
            boundary_turn_gain: self.boundary_turn_gain,
            fixed_physics_fps: self.fixed_physics_fps,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Check if any parameters have changed since the last snapshot.
    // Returns (population_changed, any_ui_changed).
    pub fn detect_changes(&self) -> (bool, bool) {
        let mut population_changed = false;
        let mut ui_changed = false;

        if let Some(prev) = &self.previous_values {
            if self.num_boids != prev.num_boids || self.max_weight_class != prev.max_weight_class {
                population_changed = true;
                ui_changed = true;
            }

            if self.max_speed != prev.max_speed
                || self.max_force != prev.max_force
                || self.alignment_weight != prev.alignment_weight
                || self.cohesion_weight != prev.cohesion_weight
                || self.separation_weight != prev.separation_weight
                || self.fear_weight != prev.fear_weight
                || self.hunt_weight != prev.hunt_weight
                || self.alignment_radius != prev.alignment_radius
                || self.cohesion_radius != prev.cohesion_radius
                || self.separation_radius != prev.separation_radius
                || self.predator_radius != prev.predator_radius
                || self.prey_radius != prev.prey_radius
                || self.boundary_turn_gain != prev.boundary_turn_gain
                || self.fixed_physics_fps != prev.fixed_physics_fps
                || self.show_debug != prev.show_debug
                || self.pause_simulation != prev.pause_simulation
            {
                ui_changed = true;
            }
        }

        (population_changed, ui_changed)
    }

    /// Push the current tuning onto a live boid. Weight class and scale are
    /// spawn-time properties and stay untouched.
    pub fn apply_to(&self, boid: &mut Boid) {
        boid.max_speed = self.max_speed;
        boid.max_force = self.max_force;
        boid.weights.alignment = self.alignment_weight;
        boid.weights.cohesion = self.cohesion_weight;
        boid.weights.separation = self.separation_weight;
        boid.weights.fear = self.fear_weight;
        boid.weights.hunt = self.hunt_weight;
        boid.perception.alignment = self.alignment_radius;
        boid.perception.cohesion = self.cohesion_radius;
        boid.perception.separation = self.separation_radius;
        boid.perception.predator = self.predator_radius;
        boid.perception.prey = self.prey_radius;
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=500
    }

    pub fn get_weight_class_range() -> std::ops::RangeInclusive<u32> {
        1..=6
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=40.0
    }

    pub fn get_max_force_range() -> std::ops::RangeInclusive<f32> {
        0.5..=30.0
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=100.0
    }

    pub fn get_turn_gain_range() -> std::ops::RangeInclusive<f32> {
        0.0..=20.0
    }

    pub fn get_physics_fps_range() -> std::ops::RangeInclusive<f32> {
        15.0..=240.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_detection_tracks_population_and_tuning() {
        let mut params = SimulationParams::default();

        // No snapshot yet: nothing can have changed.
        assert_eq!(params.detect_changes(), (false, false));

        params.take_snapshot();
        assert_eq!(params.detect_changes(), (false, false));

        params.fear_weight += 0.5;
        assert_eq!(params.detect_changes(), (false, true));

        params.take_snapshot();
        params.num_boids += 10;
        assert_eq!(params.detect_changes(), (true, true));
    }

    #[test]
    fn apply_to_retunes_a_live_boid() {
        use nannou::prelude::*;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut params = SimulationParams::default();
        params.max_speed = 33.0;
        params.hunt_weight = 4.5;
        params.prey_radius = 77.0;

        let mut rng = StdRng::seed_from_u64(1);
        let mut boid = Boid::new(Vec3::ZERO, 2, &mut rng);
        params.apply_to(&mut boid);

        assert_eq!(boid.max_speed, 33.0);
        assert_eq!(boid.weights.hunt, 4.5);
        assert_eq!(boid.perception.prey, 77.0);
        assert_eq!(boid.weight_class, 2);
    }
}
