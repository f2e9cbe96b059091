/*
 * Player Fish Module
 *
 * The player-controlled fish. It is not a boid: it does not flock and the
 * registry does not own it. The app steers it toward a world-space target
 * derived from the mouse, ramps its forward speed while the thrust key is
 * held, and hands its position and size to the registry every frame so the
 * school can react to it.
 */

use nannou::prelude::*;

use crate::boid::slerp_unit;
use crate::registry::BoundaryVolume;

pub const PLAYER_START_SIZE: f32 = 1.2;
pub const DEFAULT_MAX_FORWARD_SPEED: f32 = 22.0;
pub const DEFAULT_TIME_TO_MAX_SPEED: f32 = 2.0;

// Turn gain toward the steering target, fraction of remaining angle per second.
const ROTATION_GAIN: f32 = 5.0;
// Visible size eases toward the target size after eating.
const SIZE_SETTLE_GAIN: f32 = 5.0;
// Steering targets closer than this leave the facing alone.
const TARGET_DEADZONE_SQ: f32 = 0.04;

pub struct PlayerFish {
    pub position: Vec3,
    /// Unit vector the fish points and swims along.
    pub facing: Vec3,
    /// Physical size, eased toward `target_size` after eating.
    pub size: f32,
    target_size: f32,
    forward_speed: f32,
    pub max_forward_speed: f32,
    pub time_to_max_speed: f32,
}

impl PlayerFish {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            facing: Vec3::Z,
            size: PLAYER_START_SIZE,
            target_size: PLAYER_START_SIZE,
            forward_speed: 0.0,
            max_forward_speed: DEFAULT_MAX_FORWARD_SPEED,
            time_to_max_speed: DEFAULT_TIME_TO_MAX_SPEED,
        }
    }

    /// Turn toward `steer_target`, ramp the forward speed while thrusting
    /// (and bleed it off while coasting), then advance and stay in the tank.
    pub fn update(
        &mut self,
        dt: f32,
        steer_target: Vec3,
        thrusting: bool,
        boundary: &BoundaryVolume,
    ) {
        let to_target = steer_target - self.position;
        if to_target.length_squared() > TARGET_DEADZONE_SQ {
            self.facing = slerp_unit(
                self.facing,
                to_target.normalize(),
                (ROTATION_GAIN * dt).min(1.0),
            );
        }

        let ramp = self.max_forward_speed / self.time_to_max_speed * dt;
        if thrusting {
            self.forward_speed = (self.forward_speed + ramp).min(self.max_forward_speed);
        } else {
            self.forward_speed = (self.forward_speed - ramp).max(0.0);
        }

        self.position += self.facing * self.forward_speed * dt;
        self.position = boundary.clamp(self.position);

        self.size += (self.target_size - self.size) * (SIZE_SETTLE_GAIN * dt).min(1.0);
    }

    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    /// Raise the target size by `increment`, never past `cap`.
    pub fn grow(&mut self, increment: f32, cap: f32) {
        self.target_size = (self.target_size + increment).min(cap);
    }

    pub fn target_size(&self) -> f32 {
        self.target_size
    }

    /// Back to the starting state, used on game restart.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.facing = Vec3::Z;
        self.size = PLAYER_START_SIZE;
        self.target_size = PLAYER_START_SIZE;
        self.forward_speed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> BoundaryVolume {
        BoundaryVolume::new(Vec3::ZERO, vec3(100.0, 100.0, 100.0)).unwrap()
    }

    #[test]
    fn forward_speed_ramps_up_and_bleeds_off() {
        let mut player = PlayerFish::new(Vec3::ZERO);
        let boundary = tank();
        let dt = 1.0 / 60.0;

        // Two seconds of thrust reaches max speed.
        for _ in 0..120 {
            player.update(dt, player.position + Vec3::Z * 10.0, true, &boundary);
        }
        assert!((player.forward_speed() - player.max_forward_speed).abs() < 0.5);

        // Two seconds of coasting bleeds it back to zero.
        for _ in 0..120 {
            player.update(dt, player.position + Vec3::Z * 10.0, false, &boundary);
        }
        assert!(player.forward_speed() < 0.5);
    }

    #[test]
    fn the_tank_wall_stops_the_player() {
        let mut player = PlayerFish::new(Vec3::ZERO);
        let boundary = tank();
        let dt = 1.0 / 60.0;
        // Swim at the far wall for longer than it takes to reach it.
        for _ in 0..600 {
            player.update(dt, vec3(0.0, 0.0, 1_000.0), true, &boundary);
        }
        assert!(boundary.contains(player.position));
        assert!((player.position.z - boundary.max().z).abs() < 1e-3);
    }

    #[test]
    fn facing_turns_toward_the_steer_target() {
        let mut player = PlayerFish::new(Vec3::ZERO);
        let boundary = tank();
        for _ in 0..120 {
            player.update(1.0 / 60.0, vec3(40.0, 0.0, 0.0), false, &boundary);
        }
        assert!(player.facing.x > 0.99);
    }

    #[test]
    fn reset_restores_the_starting_state() {
        let mut player = PlayerFish::new(Vec3::ZERO);
        let boundary = tank();
        player.grow(5.0, 10.0);
        player.update(1.0 / 60.0, Vec3::Z, true, &boundary);
        player.reset(vec3(1.0, 2.0, 3.0));
        assert_eq!(player.size, PLAYER_START_SIZE);
        assert_eq!(player.target_size(), PLAYER_START_SIZE);
        assert_eq!(player.forward_speed(), 0.0);
        assert_eq!(player.position, vec3(1.0, 2.0, 3.0));
    }
}
