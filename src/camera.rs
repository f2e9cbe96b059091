/*
 * Camera Module
 *
 * This module defines the OrbitCamera struct that orbits the aquarium and
 * projects world-space points onto the screen. It provides the coordinate
 * transformations for rendering, a mouse ray for steering the player fish,
 * and drag-to-orbit / wheel-to-zoom controls.
 */

use nannou::prelude::*;

// Clip anything closer than this to the eye.
const NEAR_PLANE: f32 = 1.0;
// Orbit sensitivity, radians per pixel of drag.
const ORBIT_GAIN: f32 = 0.008;
// Keep the pitch off the poles so the view basis stays well-defined.
const PITCH_LIMIT: f32 = 1.45;
// How far past the player the mouse aim point sits.
const AIM_LEAD: f32 = 30.0;

pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    last_cursor_pos: Vec2,
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            yaw: 0.6,
            pitch: 0.35,
            distance,
            fov_y: std::f32::consts::FRAC_PI_3,
            min_distance: 40.0,
            max_distance: 800.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // View basis: forward points from the eye at the target.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let offset = vec3(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        let forward = -offset;
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (forward, right, up)
    }

    pub fn position(&self) -> Vec3 {
        let (forward, _, _) = self.basis();
        self.target - forward * self.distance
    }

    fn focal_length(&self, window_rect: Rect) -> f32 {
        window_rect.h() * 0.5 / (self.fov_y * 0.5).tan()
    }

    /// Project a world point onto the screen. Returns the screen position and
    /// the view depth, or None for points behind the near plane.
    pub fn world_to_screen(&self, point: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        let (forward, right, up) = self.basis();
        let rel = point - self.position();
        let depth = rel.dot(forward);
        if depth <= NEAR_PLANE {
            return None;
        }
        let scale = self.focal_length(window_rect) / depth;
        Some((vec2(rel.dot(right) * scale, rel.dot(up) * scale), depth))
    }

    /// On-screen size multiplier for an object at the given view depth.
    pub fn perspective_scale(&self, depth: f32, window_rect: Rect) -> f32 {
        self.focal_length(window_rect) / depth.max(NEAR_PLANE)
    }

    /// World-space direction of the ray under a screen position.
    pub fn mouse_ray(&self, screen: Vec2, window_rect: Rect) -> Vec3 {
        let (forward, right, up) = self.basis();
        (forward * self.focal_length(window_rect) + right * screen.x + up * screen.y).normalize()
    }

    /// World point the player steers toward: the mouse ray pushed a little
    /// past the reference depth, so the fish swims into the scene.
    pub fn aim_point(&self, screen: Vec2, window_rect: Rect, reference: Vec3) -> Vec3 {
        let eye = self.position();
        let (forward, _, _) = self.basis();
        let depth = (reference - eye).dot(forward).max(self.distance * 0.25) + AIM_LEAD;
        eye + self.mouse_ray(screen, window_rect) * depth
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let factor = 1.0 - scroll_delta.y * 0.1;
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    // Start orbiting the camera
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Update the orbit angles while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * ORBIT_GAIN;
                self.pitch = (self.pitch + delta.y * ORBIT_GAIN).clamp(-PITCH_LIMIT, PITCH_LIMIT);
                self.last_cursor_pos = position;
            }
        }
    }

    // End dragging
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
