/*
 * Boid Registry Module
 *
 * The registry owns the live set of boids and answers every spatial question
 * agents ask each frame: the combined three-radius neighbor lookup, predator
 * and prey lookups by weight class, player relationship checks, and the
 * boundary containment force. It never steers an agent itself; agents pull
 * query results and steer themselves.
 *
 * Queries walk the whole population once per call using squared distances.
 * O(n) per query, O(n^2) per frame, which is comfortable at the population
 * this aquarium runs (tens to low hundreds of fish). If that ever grows,
 * bucket boids into a uniform grid keyed by truncated position and scan the
 * neighboring buckets; the query contracts stay identical.
 */

use log::debug;
use nannou::prelude::*;
use rand::Rng;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::boid::Boid;

// Size ratio above which one side counts as the other side's predator.
pub const PLAYER_SIZE_MARGIN: f32 = 1.2;

// Proportional gain of the boundary restoring force.
pub const DEFAULT_TURN_GAIN: f32 = 5.0;

/// Errors raised by fail-fast validation of simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid boundary volume: {0}")]
    InvalidBoundary(&'static str),
    #[error("invalid spawn configuration: {0}")]
    InvalidSpawn(&'static str),
}

new_key_type! {
    /// Stable handle for a registered boid. Generational, so a handle to a
    /// despawned boid can never alias a later one.
    pub struct BoidId;
}

/// Axis-aligned box the whole simulation lives in.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryVolume {
    center: Vec3,
    size: Vec3,
}

impl BoundaryVolume {
    /// Fails fast on degenerate volumes; a zero-extent aquarium is a
    /// configuration bug, not something to limp along with.
    pub fn new(center: Vec3, size: Vec3) -> Result<Self, ConfigError> {
        if !(size.x.is_finite() && size.y.is_finite() && size.z.is_finite()) {
            return Err(ConfigError::InvalidBoundary("size must be finite"));
        }
        if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(ConfigError::InvalidBoundary(
                "size must be positive on every axis",
            ));
        }
        Ok(Self { center, size })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size / 2.0
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// Clamp a point into the volume.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.max(self.min()).min(self.max())
    }

    /// Uniform random point inside the volume.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec3 {
        let min = self.min();
        let max = self.max();
        vec3(
            rng.gen_range(min.x..max.x),
            rng.gen_range(min.y..max.y),
            rng.gen_range(min.z..max.z),
        )
    }

    // Per-axis proportional restoring force: zero inside, linear in
    // penetration depth outside. Axes are independent and additive.
    fn restoring_force(&self, position: Vec3, turn_gain: f32) -> Vec3 {
        let min = self.min();
        let max = self.max();
        let mut force = Vec3::ZERO;

        if position.x < min.x {
            force.x = (min.x - position.x) * turn_gain;
        } else if position.x > max.x {
            force.x = (max.x - position.x) * turn_gain;
        }

        if position.y < min.y {
            force.y = (min.y - position.y) * turn_gain;
        } else if position.y > max.y {
            force.y = (max.y - position.y) * turn_gain;
        }

        if position.z < min.z {
            force.z = (min.z - position.z) * turn_gain;
        } else if position.z > max.z {
            force.z = (max.z - position.z) * turn_gain;
        }

        force
    }
}

/// Player state supplied by the app each frame. The registry does not own
/// the player, it only remembers the latest binding.
#[derive(Debug, Clone, Copy)]
pub struct PlayerBinding {
    pub position: Vec3,
    pub size: f32,
}

/// Result of the combined three-radius neighbor query. A boid may land in
/// any subset of the three sets depending on its distance.
#[derive(Default)]
pub struct Neighborhood<'a> {
    pub alignment: Vec<&'a Boid>,
    pub cohesion: Vec<&'a Boid>,
    pub separation: Vec<&'a Boid>,
}

pub struct BoidRegistry {
    boids: SlotMap<BoidId, Boid>,
    boundary: BoundaryVolume,
    turn_gain: f32,
    player: Option<PlayerBinding>,
}

impl BoidRegistry {
    pub fn new(boundary: BoundaryVolume) -> Self {
        Self {
            boids: SlotMap::with_key(),
            boundary,
            turn_gain: DEFAULT_TURN_GAIN,
            player: None,
        }
    }

    /// Register a boid and mint its handle. Handles are generational, so a
    /// boid cannot end up registered twice.
    pub fn spawn(&mut self, boid: Boid) -> BoidId {
        let id = self.boids.insert(boid);
        debug!("registered boid {:?}, population {}", id, self.boids.len());
        id
    }

    /// Unregister a boid. Stale or repeated handles are a no-op.
    pub fn despawn(&mut self, id: BoidId) -> Option<Boid> {
        let removed = self.boids.remove(id);
        if removed.is_some() {
            debug!("unregistered boid {:?}, population {}", id, self.boids.len());
        }
        removed
    }

    pub fn contains(&self, id: BoidId) -> bool {
        self.boids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn get(&self, id: BoidId) -> Option<&Boid> {
        self.boids.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoidId, &Boid)> {
        self.boids.iter()
    }

    /// Mutable walk over the population, used by the app to retune live
    /// boids when a parameter slider moves. Not called during a step.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BoidId, &mut Boid)> {
        self.boids.iter_mut()
    }

    pub fn get_mut(&mut self, id: BoidId) -> Option<&mut Boid> {
        self.boids.get_mut(id)
    }

    pub fn boundary(&self) -> &BoundaryVolume {
        &self.boundary
    }

    pub fn turn_gain(&self) -> f32 {
        self.turn_gain
    }

    pub fn set_turn_gain(&mut self, turn_gain: f32) {
        self.turn_gain = turn_gain.max(0.0);
    }

    /// Refresh the player binding for this frame.
    pub fn bind_player(&mut self, position: Vec3, size: f32) {
        self.player = Some(PlayerBinding { position, size });
    }

    /// Drop the player binding; player-reaction forces degrade to zero.
    pub fn clear_player(&mut self) {
        self.player = None;
    }

    pub fn player(&self) -> Option<&PlayerBinding> {
        self.player.as_ref()
    }

    /// One pass over the population, testing every other boid against all
    /// three squared radii at once (boundaries inclusive). The querying boid
    /// is excluded by identity; an unregistered handle yields empty sets.
    pub fn neighbors(
        &self,
        id: BoidId,
        alignment_radius: f32,
        cohesion_radius: f32,
        separation_radius: f32,
    ) -> Neighborhood<'_> {
        let mut hood = Neighborhood::default();
        let agent = match self.boids.get(id) {
            Some(agent) => agent,
            None => return hood,
        };

        // Squared radii avoid a square root per pair
        let alignment_sq = alignment_radius * alignment_radius;
        let cohesion_sq = cohesion_radius * cohesion_radius;
        let separation_sq = separation_radius * separation_radius;

        for (other_id, other) in &self.boids {
            if other_id == id {
                continue;
            }
            let distance_sq = agent.position.distance_squared(other.position);
            if distance_sq <= alignment_sq {
                hood.alignment.push(other);
            }
            if distance_sq <= cohesion_sq {
                hood.cohesion.push(other);
            }
            if distance_sq <= separation_sq {
                hood.separation.push(other);
            }
        }
        hood
    }

    /// Boids of a strictly greater weight class within `radius`.
    pub fn predators(&self, id: BoidId, radius: f32) -> Vec<&Boid> {
        let mut predators = Vec::new();
        let agent = match self.boids.get(id) {
            Some(agent) => agent,
            None => return predators,
        };
        let radius_sq = radius * radius;
        for (other_id, other) in &self.boids {
            if other_id == id || other.weight_class <= agent.weight_class {
                continue;
            }
            if agent.position.distance_squared(other.position) <= radius_sq {
                predators.push(other);
            }
        }
        predators
    }

    /// Boids of a strictly lesser weight class within `radius`.
    pub fn prey(&self, id: BoidId, radius: f32) -> Vec<&Boid> {
        let mut prey = Vec::new();
        let agent = match self.boids.get(id) {
            Some(agent) => agent,
            None => return prey,
        };
        let radius_sq = radius * radius;
        for (other_id, other) in &self.boids {
            if other_id == id || other.weight_class >= agent.weight_class {
                continue;
            }
            if agent.position.distance_squared(other.position) <= radius_sq {
                prey.push(other);
            }
        }
        prey
    }

    /// Containment force for a position, per the current turn gain.
    /// Unbounded so it wins against every steering force near the glass.
    pub fn boundary_force(&self, position: Vec3) -> Vec3 {
        self.boundary.restoring_force(position, self.turn_gain)
    }

    /// The player, if bound and big enough to threaten an agent of the given
    /// physical scale. The margin is asymmetric: each side must outsize the
    /// other by 20% before the relationship tips either way.
    pub fn player_predator(&self, agent_scale: f32) -> Option<PlayerBinding> {
        let player = self.player?;
        (player.size > agent_scale * PLAYER_SIZE_MARGIN).then_some(player)
    }

    /// The player, if bound and small enough to be hunted by an agent of the
    /// given physical scale.
    pub fn player_prey(&self, agent_scale: f32) -> Option<PlayerBinding> {
        let player = self.player?;
        (agent_scale > player.size * PLAYER_SIZE_MARGIN).then_some(player)
    }

    /// Advance the simulation one frame.
    ///
    /// Strict two-pass discipline: pass one plans every boid's acceleration
    /// from the shared pre-step state, pass two integrates. No boid ever
    /// observes another boid's current-frame mutation, and membership cannot
    /// change mid-pass.
    pub fn step(&mut self, dt: f32) {
        let planned: Vec<(BoidId, Vec3)> = self
            .boids
            .iter()
            .map(|(id, boid)| (id, boid.plan(id, self)))
            .collect();

        for (id, force) in planned {
            if let Some(boid) = self.boids.get_mut(id) {
                boid.apply_force(force);
                boid.integrate(dt);
            }
        }
    }
}
