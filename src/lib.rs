/*
 * Shoal Aquarium - Module Definitions
 *
 * This file defines the module structure for the aquarium simulation.
 * The core lives in registry (agent registry + spatial queries + boundary)
 * and boid (per-agent steering); everything else is presentation, input
 * and game-state glue around it.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::Boid;
pub use camera::OrbitCamera;
pub use debug::DebugInfo;
pub use game_state::{GamePhase, GameState};
pub use hunger::Hunger;
pub use params::SimulationParams;
pub use player::PlayerFish;
pub use registry::{BoidId, BoidRegistry, BoundaryVolume, ConfigError};

// Define modules
pub mod app;
pub mod boid;
pub mod camera;
pub mod debug;
pub mod eating;
pub mod game_state;
pub mod hunger;
pub mod input;
pub mod params;
pub mod player;
pub mod registry;
pub mod renderer;
pub mod spawner;
pub mod ui;

// Constants
pub const BOID_SPRITE_SIZE: f32 = 6.0;
pub const WORLD_SIZE: f32 = 240.0;
pub const WORLD_HEIGHT: f32 = 120.0;
