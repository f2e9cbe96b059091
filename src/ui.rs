/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters,
 * the hunger bar, and game state actions. Parameter change detection is
 * handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::game_state::{GamePhase, GameState};
use crate::hunger::Hunger;
use crate::params::SimulationParams;

/// What the user asked for this frame.
#[derive(Default)]
pub struct UiActions {
    pub respawn: bool,
    pub restart: bool,
    pub population_changed: bool,
    pub ui_changed: bool,
}

// Update the UI and report the requested actions and parameter changes
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    hunger: &Hunger,
    game: &GameState,
    population: usize,
) -> UiActions {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Aquarium Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            let phase_label = match game.phase() {
                GamePhase::WaitingToStart => "Waiting to start",
                GamePhase::Playing => "Playing",
                GamePhase::GameOver => "Game over",
            };
            ui.label(format!("State: {phase_label}"));
            ui.add(
                egui::ProgressBar::new(hunger.fraction())
                    .text(format!("Hunger {:.0}/{:.0}", hunger.current(), hunger.max())),
            );
            if ui.button("Restart Game").clicked() {
                actions.restart = true;
            }

            ui.collapsing("School", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range())
                        .text("Number of Fish"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.max_weight_class,
                        SimulationParams::get_weight_class_range(),
                    )
                    .text("Weight Classes"),
                );
                if ui.button("Respawn School").clicked() {
                    actions.respawn = true;
                }
                ui.add(
                    egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range())
                        .text("Max Speed"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_force, SimulationParams::get_max_force_range())
                        .text("Max Force"),
                );
            });

            ui.collapsing("Flocking", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.separation_weight,
                        SimulationParams::get_weight_range(),
                    )
                    .text("Separation Weight"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.alignment_weight,
                        SimulationParams::get_weight_range(),
                    )
                    .text("Alignment Weight"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.cohesion_weight,
                        SimulationParams::get_weight_range(),
                    )
                    .text("Cohesion Weight"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.separation_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Separation Radius"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.alignment_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Alignment Radius"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.cohesion_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Cohesion Radius"),
                );
            });

            ui.collapsing("Predators and Prey", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.fear_weight, SimulationParams::get_weight_range())
                        .text("Fear Weight"),
                );
                ui.add(
                    egui::Slider::new(&mut params.hunt_weight, SimulationParams::get_weight_range())
                        .text("Hunt Weight"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.predator_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Predator Detection"),
                );
                ui.add(
                    egui::Slider::new(&mut params.prey_radius, SimulationParams::get_radius_range())
                        .text("Prey Detection"),
                );
            });

            ui.collapsing("Boundary and Timing", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.boundary_turn_gain,
                        SimulationParams::get_turn_gain_range(),
                    )
                    .text("Boundary Turn Gain"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.fixed_physics_fps,
                        SimulationParams::get_physics_fps_range(),
                    )
                    .text("Physics FPS"),
                );

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!(
                    "Frame time: {:.2} ms",
                    debug_info.frame_time.as_secs_f64() * 1000.0
                ));
                ui.label(format!("Population: {population}"));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    // Detect parameter changes
    let (population_changed, ui_changed) = params.detect_changes();
    actions.population_changed = population_changed;
    actions.ui_changed = ui_changed;
    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    population: usize,
) {
    // Create a background panel in the top-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Population: {population}"),
        format!("Visible: {}", *debug_info.visible_boids.lock().unwrap()),
        format!(
            "Physics steps/frame: {}",
            debug_info.physics_updates_per_frame
        ),
        format!("Fish eaten: {}", debug_info.fish_eaten),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
