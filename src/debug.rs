/*
 * Debug Information Module
 *
 * Performance counters and session stats surfaced by the debug overlay:
 * frame timing, fixed-step cadence, how much of the school survived the
 * culling pass, and how far up the food chain the player has eaten.
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_updates_per_frame: usize,
    /// Boids the player has swallowed since the last restart.
    pub fish_eaten: usize,
    // Written from the render pass, which only holds &Model.
    pub visible_boids: Arc<Mutex<usize>>,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            physics_updates_per_frame: 0,
            fish_eaten: 0,
            visible_boids: Arc::new(Mutex::new(0)),
        }
    }
}
