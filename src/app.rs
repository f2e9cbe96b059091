/*
 * Application Module
 *
 * This module defines the main application model and update loop for the
 * aquarium. It wires the core simulation (registry + boids) to the player
 * fish, the eating and hunger collaborators, the game state, the egui
 * parameter panel and the renderer. Physics runs on a fixed timestep fed
 * by an accumulator.
 */

use log::{error, info};
use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::camera::OrbitCamera;
use crate::debug::DebugInfo;
use crate::eating;
use crate::game_state::GameState;
use crate::hunger::Hunger;
use crate::params::SimulationParams;
use crate::player::PlayerFish;
use crate::registry::{BoidRegistry, BoundaryVolume};
use crate::spawner::{self, SpawnConfig};
use crate::{input, renderer, ui, WORLD_HEIGHT, WORLD_SIZE};

// Longest stretch of real time a single frame is allowed to simulate.
const MAX_FRAME_DEBT: Duration = Duration::from_millis(250);

// Main model for the application
pub struct Model {
    pub registry: BoidRegistry,
    pub player: PlayerFish,
    pub hunger: Hunger,
    pub game: GameState,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: OrbitCamera,
    pub mouse_position: Vec2,
    pub thrusting: bool,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
    pub rng: StdRng,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Shoal Aquarium")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .key_released(input::key_released)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();

    // A degenerate aquarium is a configuration bug; stop right here.
    let boundary = BoundaryVolume::new(Vec3::ZERO, vec3(WORLD_SIZE, WORLD_HEIGHT, WORLD_SIZE))
        .expect("aquarium boundary volume must have positive extents");

    let mut registry = BoidRegistry::new(boundary);
    registry.set_turn_gain(params.boundary_turn_gain);

    let mut rng = StdRng::from_entropy();
    let spawn = SpawnConfig::from_params(&params);
    spawner::spawn_school(&mut registry, &spawn, &params, &mut rng)
        .expect("initial spawn configuration must be valid");

    let player = PlayerFish::new(Vec3::ZERO);
    registry.bind_player(player.position, player.size);

    let mut game = GameState::new();
    game.start();

    let physics_step_size = Duration::from_secs_f32(1.0 / params.fixed_physics_fps);
    let now = Instant::now();

    Model {
        registry,
        player,
        hunger: Hunger::default(),
        game,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera: OrbitCamera::new(Vec3::ZERO, 320.0),
        mouse_position: Vec2::ZERO,
        thrusting: false,
        physics_accumulator: Duration::ZERO,
        physics_step_size,
        last_update_time: now,
        rng,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        &model.hunger,
        &model.game,
        model.registry.len(),
    );

    if actions.ui_changed {
        model.physics_step_size = Duration::from_secs_f32(1.0 / model.params.fixed_physics_fps);
        model.registry.set_turn_gain(model.params.boundary_turn_gain);
        // Push the new tuning onto every live boid
        for (_, boid) in model.registry.iter_mut() {
            model.params.apply_to(boid);
        }
    }

    if actions.respawn || actions.population_changed {
        respawn_school(model);
    }

    if actions.restart {
        restart_game(model);
    }

    // Advance the wall clock
    let current_time = Instant::now();
    let frame_time = current_time.duration_since(model.last_update_time);
    model.last_update_time = current_time;

    if model.params.pause_simulation || !model.game.is_playing() {
        // Don't bank time while frozen; unpausing must not fast-forward.
        model.physics_accumulator = Duration::ZERO;
        model.debug_info.physics_updates_per_frame = 0;
        return;
    }

    model.physics_accumulator += frame_time;
    if model.physics_accumulator > MAX_FRAME_DEBT {
        model.physics_accumulator = MAX_FRAME_DEBT;
    }

    let window_rect = app.window_rect();
    let dt = model.physics_step_size.as_secs_f32();
    let mut physics_updates_this_frame = 0;

    // Run fixed timestep updates
    while model.physics_accumulator >= model.physics_step_size {
        step_once(model, window_rect, dt);
        model.physics_accumulator -= model.physics_step_size;
        physics_updates_this_frame += 1;

        if !model.game.is_playing() {
            model.physics_accumulator = Duration::ZERO;
            break;
        }
    }

    model.debug_info.physics_updates_per_frame = physics_updates_this_frame;
}

// One fixed-size simulation step
fn step_once(model: &mut Model, window_rect: Rect, dt: f32) {
    let steer_target =
        model
            .camera
            .aim_point(model.mouse_position, window_rect, model.player.position);
    let boundary = *model.registry.boundary();
    model.player.update(dt, steer_target, model.thrusting, &boundary);

    // The school reacts to where the player is now
    model.registry.bind_player(model.player.position, model.player.size);
    model.registry.step(dt);

    let report = eating::resolve(&mut model.registry, &mut model.player);
    model.debug_info.fish_eaten += report.player_kills;
    if report.nutrition_gained > 0.0 {
        model.hunger.feed(report.nutrition_gained);
    }
    if report.player_eaten {
        model.game.end();
    }

    if model.hunger.tick(dt) && model.game.is_playing() {
        info!("player starved");
        model.game.end();
    }
}

// Replace the school, keeping everything else going
fn respawn_school(model: &mut Model) {
    let spawn = SpawnConfig::from_params(&model.params);
    if let Err(err) =
        spawner::spawn_school(&mut model.registry, &spawn, &model.params, &mut model.rng)
    {
        error!("respawn failed: {err}");
    }
}

// Fresh aquarium: school, hunger meter, player and game phase
fn restart_game(model: &mut Model) {
    respawn_school(model);
    model.hunger.reset();
    model.debug_info.fish_eaten = 0;
    model.player.reset(Vec3::ZERO);
    model.registry.bind_player(model.player.position, model.player.size);
    model.game.restart();
}
