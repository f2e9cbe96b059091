/*
 * Spawner Module
 *
 * Seeds the aquarium: clears the registry and fills it with a fresh school
 * of boids at random positions inside the boundary volume, with weight
 * classes drawn uniformly from the configured range and the current
 * parameter tuning applied.
 */

use log::info;
use rand::Rng;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::registry::{BoidId, BoidRegistry, ConfigError};

/// Spawn-time configuration for one school.
#[derive(Debug, Clone, Copy)]
pub struct SpawnConfig {
    pub count: usize,
    pub min_weight_class: u32,
    pub max_weight_class: u32,
}

impl SpawnConfig {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            count: params.num_boids,
            min_weight_class: 1,
            max_weight_class: params.max_weight_class,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_weight_class == 0 {
            return Err(ConfigError::InvalidSpawn("weight classes start at 1"));
        }
        if self.max_weight_class < self.min_weight_class {
            return Err(ConfigError::InvalidSpawn(
                "max weight class below min weight class",
            ));
        }
        Ok(())
    }
}

/// Replace the registry's population with a freshly spawned school.
pub fn spawn_school(
    registry: &mut BoidRegistry,
    config: &SpawnConfig,
    params: &SimulationParams,
    rng: &mut impl Rng,
) -> Result<Vec<BoidId>, ConfigError> {
    config.validate()?;

    let stale: Vec<BoidId> = registry.iter().map(|(id, _)| id).collect();
    for id in stale {
        registry.despawn(id);
    }

    let mut ids = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let position = registry.boundary().random_point(rng);
        let class = rng.gen_range(config.min_weight_class..=config.max_weight_class);
        let mut boid = Boid::new(position, class, rng);
        params.apply_to(&mut boid);
        ids.push(registry.spawn(boid));
    }

    info!(
        "spawned {} boids, weight classes {}..={}",
        ids.len(),
        config.min_weight_class,
        config.max_weight_class
    );
    Ok(ids)
}
