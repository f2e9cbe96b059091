/*
 * Eating Module
 *
 * The eat-and-grow collaborator. Eating is expressed as two small
 * capabilities over the closed set of entities (boids and the player fish):
 * Morsel for anything with a size and a food value, Eater for anything that
 * can swallow a sufficiently smaller Morsel and grow from it. Collision is a
 * plain volume-overlap test; the steering core knows nothing about any of
 * this beyond losing registered boids when they get eaten.
 */

use std::collections::HashSet;

use log::{debug, info};
use nannou::prelude::*;

use crate::boid::Boid;
use crate::player::PlayerFish;
use crate::registry::{BoidId, BoidRegistry};

// An eater must outsize a morsel by this ratio before it can swallow it.
pub const EAT_SIZE_RATIO: f32 = 1.5;
// Fraction of the combined sizes treated as mouth-contact distance.
pub const CONTACT_RADIUS_SCALE: f32 = 0.6;
// Nutrition-to-size conversion rate and the ceiling growth saturates at.
pub const GROWTH_RATE: f32 = 0.1;
pub const MAX_SIZE: f32 = 10.0;

const PLAYER_NUTRITION: f32 = 10.0;

/// Anything with a size and a food value.
pub trait Morsel {
    fn size(&self) -> f32;
    fn nutrition(&self) -> f32;
}

/// Anything that can swallow a sufficiently smaller morsel.
pub trait Eater: Morsel {
    fn can_eat(&self, target: &dyn Morsel) -> bool {
        self.size() > target.size() * EAT_SIZE_RATIO
    }

    /// Convert swallowed nutrition into growth.
    fn digest(&mut self, nutrition: f32);
}

impl Morsel for Boid {
    fn size(&self) -> f32 {
        self.scale
    }

    fn nutrition(&self) -> f32 {
        self.nutrition
    }
}

impl Eater for Boid {
    fn digest(&mut self, nutrition: f32) {
        self.grow(nutrition * GROWTH_RATE, MAX_SIZE);
    }
}

impl Morsel for PlayerFish {
    fn size(&self) -> f32 {
        self.size
    }

    fn nutrition(&self) -> f32 {
        PLAYER_NUTRITION
    }
}

impl Eater for PlayerFish {
    fn digest(&mut self, nutrition: f32) {
        self.grow(nutrition * GROWTH_RATE, MAX_SIZE);
    }
}

/// What one resolution pass did.
#[derive(Debug, Default)]
pub struct EatReport {
    /// Boids consumed this pass, already despawned from the registry.
    pub eaten: Vec<BoidId>,
    /// How many of them the player swallowed.
    pub player_kills: usize,
    /// Total nutrition the player swallowed.
    pub nutrition_gained: f32,
    /// A boid big enough to eat the player made mouth contact.
    pub player_eaten: bool,
}

// Mouth contact: centers closer than a fraction of the combined sizes.
fn in_contact(a_pos: Vec3, a_size: f32, b_pos: Vec3, b_size: f32) -> bool {
    let reach = (a_size + b_size) * CONTACT_RADIUS_SCALE;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Run one eating pass: the player against every boid, then boid against
/// boid. Victims are collected during the scan and despawned afterwards, so
/// the scan itself never mutates registry membership.
pub fn resolve(registry: &mut BoidRegistry, player: &mut PlayerFish) -> EatReport {
    let mut report = EatReport::default();
    let mut victims: HashSet<BoidId> = HashSet::new();
    let mut boid_meals: Vec<(BoidId, f32)> = Vec::new();

    for (id, boid) in registry.iter() {
        if !in_contact(player.position, player.size, boid.position, boid.scale) {
            continue;
        }
        if player.can_eat(boid) {
            victims.insert(id);
            report.player_kills += 1;
            report.nutrition_gained += Morsel::nutrition(boid);
        } else if boid.can_eat(&*player) {
            report.player_eaten = true;
        }
    }

    let ids: Vec<BoidId> = registry.iter().map(|(id, _)| id).collect();
    for (i, &a) in ids.iter().enumerate() {
        if victims.contains(&a) {
            continue;
        }
        for &b in &ids[i + 1..] {
            if victims.contains(&a) || victims.contains(&b) {
                continue;
            }
            let Some(boid_a) = registry.get(a) else { continue };
            let Some(boid_b) = registry.get(b) else { continue };
            if !in_contact(boid_a.position, boid_a.scale, boid_b.position, boid_b.scale) {
                continue;
            }
            if boid_a.can_eat(boid_b) {
                victims.insert(b);
                boid_meals.push((a, Morsel::nutrition(boid_b)));
            } else if boid_b.can_eat(boid_a) {
                victims.insert(a);
                boid_meals.push((b, Morsel::nutrition(boid_a)));
            }
        }
    }

    for (id, nutrition) in boid_meals {
        // A fish that was itself swallowed this frame digests nothing.
        if victims.contains(&id) {
            continue;
        }
        if let Some(boid) = registry.get_mut(id) {
            boid.digest(nutrition);
        }
    }

    for &id in &victims {
        registry.despawn(id);
    }

    if report.nutrition_gained > 0.0 {
        player.digest(report.nutrition_gained);
        debug!(
            "player swallowed {:.1} nutrition, growing toward {:.2}",
            report.nutrition_gained,
            player.target_size()
        );
    }
    if report.player_eaten {
        info!("player fish was eaten");
    }

    report.eaten = victims.into_iter().collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BoundaryVolume;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_registry() -> BoidRegistry {
        BoidRegistry::new(BoundaryVolume::new(Vec3::ZERO, vec3(200.0, 100.0, 200.0)).unwrap())
    }

    fn sized_boid(position: Vec3, scale: f32) -> Boid {
        let mut rng = StdRng::seed_from_u64(3);
        let mut boid = Boid::new(position, 1, &mut rng);
        boid.scale = scale;
        boid.velocity = Vec3::ZERO;
        boid
    }

    #[test]
    fn eating_needs_a_decisive_size_advantage() {
        let big = sized_boid(Vec3::ZERO, 2.0);
        let small = sized_boid(Vec3::ZERO, 1.0);
        let close = sized_boid(Vec3::ZERO, 1.4);

        assert!(big.can_eat(&small));
        assert!(!big.can_eat(&close));
        assert!(!small.can_eat(&big));
    }

    #[test]
    fn player_swallows_an_overlapping_smaller_boid() {
        let mut registry = empty_registry();
        let victim = registry.spawn(sized_boid(vec3(0.5, 0.0, 0.0), 0.5));
        let bystander = registry.spawn(sized_boid(vec3(50.0, 0.0, 0.0), 0.5));

        let mut player = PlayerFish::new(Vec3::ZERO);
        player.size = 2.0;

        let report = resolve(&mut registry, &mut player);

        assert_eq!(report.eaten, vec![victim]);
        assert_eq!(report.player_kills, 1);
        assert!(!report.player_eaten);
        assert!(report.nutrition_gained > 0.0);
        assert!(!registry.contains(victim));
        assert!(registry.contains(bystander));
        assert!(player.target_size() > player.size);
    }

    #[test]
    fn an_overlapping_giant_ends_the_player() {
        let mut registry = empty_registry();
        let giant = registry.spawn(sized_boid(vec3(0.5, 0.0, 0.0), 5.0));

        let mut player = PlayerFish::new(Vec3::ZERO);
        player.size = 1.0;

        let report = resolve(&mut registry, &mut player);

        assert!(report.player_eaten);
        assert!(report.eaten.is_empty());
        assert!(registry.contains(giant));
    }

    #[test]
    fn boids_eat_each_other_on_contact() {
        let mut registry = empty_registry();
        let hunter = registry.spawn(sized_boid(vec3(0.0, 0.0, 0.0), 3.0));
        let meal = registry.spawn(sized_boid(vec3(1.0, 0.0, 0.0), 1.0));

        // Player far away from the action.
        let mut player = PlayerFish::new(vec3(90.0, 0.0, 90.0));

        let report = resolve(&mut registry, &mut player);

        assert_eq!(report.eaten, vec![meal]);
        assert_eq!(report.player_kills, 0);
        assert!(!registry.contains(meal));
        let hunter_boid = registry.get(hunter).unwrap();
        assert!(hunter_boid.target_scale() > hunter_boid.scale);
    }

    #[test]
    fn separated_fish_leave_each_other_alone() {
        let mut registry = empty_registry();
        let a = registry.spawn(sized_boid(vec3(-40.0, 0.0, 0.0), 3.0));
        let b = registry.spawn(sized_boid(vec3(40.0, 0.0, 0.0), 1.0));

        let mut player = PlayerFish::new(vec3(0.0, 40.0, 0.0));
        player.size = 4.0;

        let report = resolve(&mut registry, &mut player);

        assert!(report.eaten.is_empty());
        assert_eq!(report.nutrition_gained, 0.0);
        assert!(registry.contains(a));
        assert!(registry.contains(b));
    }

    #[test]
    fn growth_saturates_at_the_cap() {
        let mut player = PlayerFish::new(Vec3::ZERO);
        for _ in 0..200 {
            player.digest(100.0);
        }
        assert!(player.target_size() <= MAX_SIZE + 1e-4);
    }
}
