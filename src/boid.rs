/*
 * Boid Module
 *
 * This module defines the Boid struct and its steering behavior.
 * Each frame a boid runs a fixed five-phase pipeline:
 * 1. Perceive: pull neighbor/predator/prey sets from the registry
 * 2. Evaluate: compute independent steering forces
 * 3. Combine: weighted sum into the acceleration accumulator
 * 4. Integrate: velocity, position and facing
 * 5. Reset: clear the accumulator
 *
 * Behaviors: separation, alignment and cohesion (classic flocking, with
 * alignment/cohesion restricted to the boid's own weight class), fear of
 * heavier classes, hunting of lighter classes, reaction to the player fish,
 * and boundary containment.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::registry::{BoidId, BoidRegistry};

pub const DEFAULT_MAX_SPEED: f32 = 16.0;
pub const DEFAULT_MAX_FORCE: f32 = 8.0;
// Vertical acceleration clamp; fish pitch up and down more lazily than they turn.
pub const DEFAULT_MAX_PITCH: f32 = 4.0;

pub const BASE_SCALE: f32 = 1.0;
pub const SCALE_PER_CLASS: f32 = 0.35;

const DEFAULT_NUTRITION: f32 = 10.0;

// Below this acceleration magnitude, facing follows velocity instead.
const FACING_DEADZONE: f32 = 0.1;
// Fraction of the remaining angle covered per second when turning to face.
const ROTATION_GAIN: f32 = 5.0;
// Visible scale eases toward the target scale at this rate after growth.
const SCALE_SETTLE_GAIN: f32 = 5.0;

const MIN_LENGTH_SQ: f32 = 1e-10;

/// Perception radii for each query the boid issues per frame.
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub predator: f32,
    pub prey: f32,
}

impl Default for Perception {
    fn default() -> Self {
        Self {
            alignment: 24.0,
            cohesion: 40.0,
            separation: 8.0,
            predator: 45.0,
            prey: 30.0,
        }
    }
}

/// Multipliers applied to each steering force before summation.
#[derive(Debug, Clone, Copy)]
pub struct SteeringWeights {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub fear: f32,
    pub hunt: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            alignment: 1.0,
            cohesion: 1.0,
            separation: 1.5,
            fear: 2.0,
            hunt: 1.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    acceleration: Vec3,
    /// Unit vector the fish is visually pointing along.
    pub facing: Vec3,
    /// Ordinal size tier deciding who hunts whom. Distinct from `scale`.
    pub weight_class: u32,
    /// Physical size, eased toward `target_scale` after eating.
    pub scale: f32,
    target_scale: f32,
    pub nutrition: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub max_pitch: f32,
    pub perception: Perception,
    pub weights: SteeringWeights,
}

impl Boid {
    pub fn new(position: Vec3, weight_class: u32, rng: &mut impl Rng) -> Self {
        let weight_class = weight_class.max(1);
        let scale = scale_for_class(weight_class);

        // Drift in a random direction at half speed until the flock takes over.
        let velocity = random_unit_vector(rng) * DEFAULT_MAX_SPEED * 0.5;
        let facing = velocity.normalize();

        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            facing,
            weight_class,
            scale,
            target_scale: scale,
            nutrition: DEFAULT_NUTRITION,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            max_pitch: DEFAULT_MAX_PITCH,
            perception: Perception::default(),
            weights: SteeringWeights::default(),
        }
    }

    // Apply a force to the boid's acceleration accumulator
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Phases 1-3 of the frame pipeline: perceive, evaluate, combine.
    /// Reads only pre-step state; the returned sum is applied in pass two.
    pub fn plan(&self, id: BoidId, registry: &BoidRegistry) -> Vec3 {
        let hood = registry.neighbors(
            id,
            self.perception.alignment,
            self.perception.cohesion,
            self.perception.separation,
        );

        // Flocking only binds within a size tier; separation, fear and hunt
        // apply across tiers.
        let alignment_mates: Vec<&Boid> = hood
            .alignment
            .iter()
            .copied()
            .filter(|other| other.weight_class == self.weight_class)
            .collect();
        let cohesion_mates: Vec<&Boid> = hood
            .cohesion
            .iter()
            .copied()
            .filter(|other| other.weight_class == self.weight_class)
            .collect();

        let predators = registry.predators(id, self.perception.predator);
        let prey = registry.prey(id, self.perception.prey);

        let mut force = Vec3::ZERO;
        force += self.alignment(&alignment_mates) * self.weights.alignment;
        force += self.cohesion(&cohesion_mates) * self.weights.cohesion;
        force += self.separation(&hood.separation) * self.weights.separation;
        force += self.fear(&predators) * self.weights.fear;
        force += self.hunt(&prey) * self.weights.hunt;
        force += self.player_reaction(registry) * self.weights.fear;
        force += registry.boundary_force(self.position);
        force
    }

    /// Phases 4-5: integrate velocity/position/facing, then reset the
    /// accumulator. Speed is hard-clamped to `max_speed`.
    pub fn integrate(&mut self, dt: f32) {
        self.acceleration.y = self.acceleration.y.clamp(-self.max_pitch, self.max_pitch);

        self.velocity += self.acceleration * dt;
        let speed_sq = self.velocity.length_squared();
        if speed_sq > self.max_speed * self.max_speed {
            self.velocity *= self.max_speed / speed_sq.sqrt();
        }
        self.position += self.velocity * dt;

        // Face where we are pushing, or failing that where we are going.
        let accel_length = self.acceleration.length();
        let heading = if accel_length > FACING_DEADZONE {
            self.acceleration / accel_length
        } else if self.velocity.length_squared() > MIN_LENGTH_SQ {
            self.velocity.normalize()
        } else {
            self.facing
        };
        self.facing = slerp_unit(self.facing, heading, (ROTATION_GAIN * dt).min(1.0));

        self.scale += (self.target_scale - self.scale) * (SCALE_SETTLE_GAIN * dt).min(1.0);

        self.acceleration = Vec3::ZERO;
    }

    // ALIGNMENT: steer toward the average heading of same-class neighbors
    pub fn alignment(&self, mates: &[&Boid]) -> Vec3 {
        if mates.is_empty() {
            return Vec3::ZERO;
        }
        let mut average = Vec3::ZERO;
        for other in mates {
            average += other.velocity;
        }
        average /= mates.len() as f32;
        self.steer(average)
    }

    // COHESION: steer toward the centroid of same-class neighbors
    pub fn cohesion(&self, mates: &[&Boid]) -> Vec3 {
        if mates.is_empty() {
            return Vec3::ZERO;
        }
        let mut center = Vec3::ZERO;
        for other in mates {
            center += other.position;
        }
        center /= mates.len() as f32;
        self.steer(center - self.position)
    }

    // SEPARATION: steer away from anything crowding us, closer = stronger
    pub fn separation(&self, crowd: &[&Boid]) -> Vec3 {
        let mut push = Vec3::ZERO;
        let mut count = 0;
        for other in crowd {
            let offset = self.position - other.position;
            let distance = offset.length();
            if distance <= f32::EPSILON {
                // Coincident pair, no direction to push along
                continue;
            }
            push += offset / (distance * distance);
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        self.steer(push / count as f32)
    }

    // FEAR: flee predators, with bigger and closer ones dominating the direction
    pub fn fear(&self, predators: &[&Boid]) -> Vec3 {
        let mut push = Vec3::ZERO;
        let mut count = 0;
        for predator in predators {
            let offset = self.position - predator.position;
            let distance = offset.length();
            if distance <= f32::EPSILON {
                continue;
            }
            let class_gap = predator.weight_class.saturating_sub(self.weight_class) as f32;
            push += offset / (distance * distance) * (1.0 + 0.5 * class_gap);
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        self.steer(push / count as f32)
    }

    // HUNT: chase the single nearest prey, not an average
    pub fn hunt(&self, prey: &[&Boid]) -> Vec3 {
        let mut closest: Option<(f32, &Boid)> = None;
        for target in prey {
            let distance_sq = self.position.distance_squared(target.position);
            if closest.map_or(true, |(best, _)| distance_sq < best) {
                closest = Some((distance_sq, target));
            }
        }
        match closest {
            Some((_, target)) => self.steer(target.position - self.position),
            None => Vec3::ZERO,
        }
    }

    // PLAYER: flee the player when it outsizes us, chase it when we outsize it.
    // The caller multiplies the result by the fear weight; the chase branch is
    // rescaled by hunt/fear so one slider drives both reactions. Treat the
    // ratio as a tunable, not a law.
    pub fn player_reaction(&self, registry: &BoidRegistry) -> Vec3 {
        if let Some(player) = registry.player_predator(self.scale) {
            let offset = self.position - player.position;
            if offset.length_squared() <= self.perception.predator * self.perception.predator {
                return self.steer(offset);
            }
        } else if let Some(player) = registry.player_prey(self.scale) {
            let offset = player.position - self.position;
            if offset.length_squared() <= self.perception.prey * self.perception.prey
                && self.weights.fear > f32::EPSILON
            {
                return self.steer(offset) * (self.weights.hunt / self.weights.fear);
            }
        }
        Vec3::ZERO
    }

    /// Raise the target scale by `increment`, never past `cap`. The visible
    /// scale catches up over the following frames.
    pub fn grow(&mut self, increment: f32, cap: f32) {
        self.target_scale = (self.target_scale + increment).min(cap);
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    // Steer along a desired heading: desired velocity at max speed, force
    // limited to max_force. Zero headings contribute nothing.
    fn steer(&self, heading: Vec3) -> Vec3 {
        let length_sq = heading.length_squared();
        if length_sq <= MIN_LENGTH_SQ {
            return Vec3::ZERO;
        }
        let desired = heading * (self.max_speed / length_sq.sqrt());
        limit(desired - self.velocity, self.max_force)
    }
}

/// Physical scale for a weight class: monotonic in the class, with
/// diminishing growth so high tiers do not dwarf the aquarium.
pub fn scale_for_class(weight_class: u32) -> f32 {
    BASE_SCALE * (1.0 + (weight_class.max(1) as f32).log2() * SCALE_PER_CLASS)
}

/// Uniform random direction, via rejection sampling of the unit ball.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = vec3(
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
        );
        let length_sq = v.length_squared();
        if length_sq > 1e-4 && length_sq <= 1.0 {
            return v / length_sq.sqrt();
        }
    }
}

// Clamp a force vector to a maximum magnitude
fn limit(force: Vec3, max_force: f32) -> Vec3 {
    let length_sq = force.length_squared();
    if length_sq > max_force * max_force {
        force * (max_force / length_sq.sqrt())
    } else {
        force
    }
}

/// Spherical interpolation between unit vectors. `t` is clamped to [0, 1];
/// antiparallel inputs rotate through an arbitrary perpendicular axis.
pub fn slerp_unit(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let dot = from.dot(to).clamp(-1.0, 1.0);
    let angle = dot.acos();
    if angle < 1e-4 {
        return to;
    }
    if angle > std::f32::consts::PI - 1e-4 {
        // No unique great circle; rotate around any perpendicular axis.
        let mut axis = from.cross(Vec3::Y);
        if axis.length_squared() < 1e-8 {
            axis = from.cross(Vec3::X);
        }
        let axis = axis.normalize();
        let (sin, cos) = (angle * t).sin_cos();
        return (from * cos + axis.cross(from) * sin).normalize();
    }
    let sin_total = angle.sin();
    let blended = from * ((1.0 - t) * angle).sin() + to * (t * angle).sin();
    (blended / sin_total).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_boid(position: Vec3, weight_class: u32) -> Boid {
        let mut rng = StdRng::seed_from_u64(7);
        let mut boid = Boid::new(position, weight_class, &mut rng);
        boid.velocity = Vec3::ZERO;
        boid
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn integration_never_exceeds_max_speed() {
        let mut boid = still_boid(Vec3::ZERO, 1);
        boid.max_pitch = f32::MAX;
        for _ in 0..10 {
            boid.apply_force(vec3(1_000.0, 500.0, -2_000.0));
            boid.integrate(1.0 / 60.0);
            assert!(boid.velocity.length() <= boid.max_speed + 1e-3);
        }
    }

    #[test]
    fn vertical_acceleration_is_pitch_limited() {
        let mut boid = still_boid(Vec3::ZERO, 1);
        let dt = 1.0 / 60.0;
        boid.apply_force(vec3(0.0, 1_000.0, 0.0));
        boid.integrate(dt);
        assert!(boid.velocity.y <= boid.max_pitch * dt + 1e-5);
    }

    #[test]
    fn cohesion_in_a_row_pulls_outer_boids_inward() {
        let left = still_boid(vec3(0.0, 0.0, 0.0), 1);
        let middle = still_boid(vec3(1.0, 0.0, 0.0), 1);
        let right = still_boid(vec3(2.0, 0.0, 0.0), 1);

        // Middle boid sits exactly on its neighbors' centroid: no pull.
        let force = middle.cohesion(&[&left, &right]);
        assert_close(force.length(), 0.0);

        // Outer boids steer toward the middle.
        let force = left.cohesion(&[&middle, &right]);
        assert!(force.x > 0.0);
        assert_close(force.y, 0.0);
        assert_close(force.z, 0.0);

        let force = right.cohesion(&[&left, &middle]);
        assert!(force.x < 0.0);
    }

    #[test]
    fn close_pair_pushes_apart() {
        let a = still_boid(vec3(0.0, 0.0, 0.0), 1);
        let b = still_boid(vec3(0.1, 0.0, 0.0), 1);

        let force_on_a = a.separation(&[&b]);
        let force_on_b = b.separation(&[&a]);

        assert!(force_on_a.length() > 0.0);
        assert!(force_on_b.length() > 0.0);
        assert!(force_on_a.x < 0.0);
        assert!(force_on_b.x > 0.0);
    }

    #[test]
    fn coincident_neighbor_contributes_nothing() {
        let a = still_boid(Vec3::ZERO, 1);
        let b = still_boid(Vec3::ZERO, 1);
        let force = a.separation(&[&b]);
        assert_close(force.length(), 0.0);
    }

    #[test]
    fn alignment_matches_average_neighbor_heading() {
        let mut mate = still_boid(vec3(5.0, 0.0, 0.0), 1);
        mate.velocity = vec3(0.0, 0.0, 3.0);
        let boid = still_boid(Vec3::ZERO, 1);

        let force = boid.alignment(&[&mate]);
        assert!(force.z > 0.0);
        assert_close(force.x, 0.0);

        assert_close(boid.alignment(&[]).length(), 0.0);
    }

    #[test]
    fn alignment_with_stationary_neighbors_is_zero() {
        let boid = still_boid(Vec3::ZERO, 1);
        let mate = still_boid(vec3(1.0, 0.0, 0.0), 1);
        assert_close(boid.alignment(&[&mate]).length(), 0.0);
    }

    #[test]
    fn fear_is_dominated_by_the_heavier_predator() {
        let boid = still_boid(Vec3::ZERO, 1);
        let light = still_boid(vec3(10.0, 0.0, 0.0), 2);
        let heavy = still_boid(vec3(-10.0, 0.0, 0.0), 4);

        // Equidistant predators: the heavier one wins, so the net flee
        // direction points away from it.
        let force = boid.fear(&[&light, &heavy]);
        assert!(force.x > 0.0);
    }

    #[test]
    fn hunt_chases_only_the_nearest_prey() {
        let boid = still_boid(Vec3::ZERO, 3);
        let near = still_boid(vec3(0.0, 0.0, 4.0), 1);
        let far = still_boid(vec3(0.0, 0.0, -20.0), 1);

        let force = boid.hunt(&[&far, &near]);
        assert!(force.z > 0.0);

        assert_close(boid.hunt(&[]).length(), 0.0);
    }

    #[test]
    fn facing_follows_velocity_below_the_accel_deadzone() {
        let mut boid = still_boid(Vec3::ZERO, 1);
        boid.velocity = vec3(0.0, 0.0, 5.0);
        boid.facing = vec3(1.0, 0.0, 0.0);
        // Long enough for the turn gain to converge.
        for _ in 0..120 {
            boid.integrate(1.0 / 60.0);
        }
        assert!(boid.facing.z > 0.99);
    }

    #[test]
    fn slerp_unit_hits_endpoints_and_midpoint() {
        let from = vec3(1.0, 0.0, 0.0);
        let to = vec3(0.0, 1.0, 0.0);

        assert!((slerp_unit(from, to, 0.0) - from).length() < 1e-4);
        assert!((slerp_unit(from, to, 1.0) - to).length() < 1e-4);

        let halfway = slerp_unit(from, to, 0.5);
        assert_close(halfway.x, std::f32::consts::FRAC_1_SQRT_2);
        assert_close(halfway.y, std::f32::consts::FRAC_1_SQRT_2);
        assert_close(halfway.length(), 1.0);
    }

    #[test]
    fn scale_grows_with_class_at_a_diminishing_rate() {
        let s1 = scale_for_class(1);
        let s2 = scale_for_class(2);
        let s3 = scale_for_class(3);
        let s4 = scale_for_class(4);

        assert!(s1 < s2 && s2 < s3 && s3 < s4);
        assert!((s4 - s3) < (s2 - s1));
        assert_close(s1, BASE_SCALE);
    }

    #[test]
    fn growth_is_capped() {
        let mut boid = still_boid(Vec3::ZERO, 1);
        boid.grow(100.0, 4.0);
        assert_close(boid.target_scale(), 4.0);
        boid.grow(1.0, 4.0);
        assert_close(boid.target_scale(), 4.0);
    }
}
