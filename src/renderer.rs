/*
 * Renderer Module
 *
 * This module handles the rendering of the aquarium.
 * It draws the boundary box wireframe, the school depth-sorted back to
 * front, the player fish, and the debug overlay. Boids outside the view
 * are culled before drawing.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::game_state::GamePhase;
use crate::ui;
use crate::BOID_SPRITE_SIZE;

// Extra off-screen margin before a fish is culled.
const CULL_MARGIN: f32 = 40.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Deep water background
    draw.background().color(rgb(0.012, 0.043, 0.102));

    let window_rect = app.window_rect();

    draw_boundary(&draw, model, window_rect);

    // Project every fish, cull, then paint back to front
    let mut sprites: Vec<Sprite> = Vec::with_capacity(model.registry.len() + 1);
    for (_, boid) in model.registry.iter() {
        if let Some(sprite) = project_fish(
            model,
            window_rect,
            boid.position,
            boid.facing,
            boid.scale,
            class_color(boid.weight_class),
        ) {
            sprites.push(sprite);
        }
    }

    // Track visible fish count for the debug overlay
    if model.params.show_debug {
        *model.debug_info.visible_boids.lock().unwrap() = sprites.len();
    }

    if let Some(sprite) = project_fish(
        model,
        window_rect,
        model.player.position,
        model.player.facing,
        model.player.size,
        rgb(1.0, 0.78, 0.29),
    ) {
        sprites.push(sprite);
    }

    sprites.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(std::cmp::Ordering::Equal));

    for sprite in &sprites {
        let size = sprite.size;
        let points = [
            pt2(size, 0.0),
            pt2(-size, size / 2.0),
            pt2(-size, -size / 2.0),
        ];
        draw.polygon()
            .color(sprite.color)
            .points(points.iter().cloned())
            .xy(pt2(sprite.screen.x, sprite.screen.y))
            .rotate(sprite.angle);
    }

    if model.game.phase() == GamePhase::GameOver {
        draw.text("GAME OVER")
            .x_y(0.0, 40.0)
            .color(rgb(0.95, 0.3, 0.25))
            .font_size(48);
        draw.text("restart from the control panel")
            .x_y(0.0, -10.0)
            .color(WHITE)
            .font_size(18);
    }

    // Draw debug visualization if enabled
    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.registry.len());
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

struct Sprite {
    screen: Vec2,
    depth: f32,
    size: f32,
    angle: f32,
    color: Rgb<f32>,
}

// Project one fish into a screen-space sprite, or None when culled
fn project_fish(
    model: &Model,
    window_rect: Rect,
    position: Vec3,
    facing: Vec3,
    scale: f32,
    color: Rgb<f32>,
) -> Option<Sprite> {
    let (screen, depth) = model.camera.world_to_screen(position, window_rect)?;
    if screen.x.abs() > window_rect.w() / 2.0 + CULL_MARGIN
        || screen.y.abs() > window_rect.h() / 2.0 + CULL_MARGIN
    {
        return None;
    }

    let size = scale * BOID_SPRITE_SIZE * model.camera.perspective_scale(depth, window_rect) * 0.5;

    // Heading on screen comes from projecting a point just ahead of the nose.
    let angle = match model
        .camera
        .world_to_screen(position + facing * scale, window_rect)
    {
        Some((tip, _)) if (tip - screen).length_squared() > 1e-6 => {
            let dir = tip - screen;
            dir.y.atan2(dir.x)
        }
        _ => 0.0,
    };

    Some(Sprite {
        screen,
        depth,
        size,
        angle,
        color,
    })
}

// Wireframe of the boundary volume
fn draw_boundary(draw: &Draw, model: &Model, window_rect: Rect) {
    let min = model.registry.boundary().min();
    let max = model.registry.boundary().max();

    let corners = [
        vec3(min.x, min.y, min.z),
        vec3(max.x, min.y, min.z),
        vec3(max.x, min.y, max.z),
        vec3(min.x, min.y, max.z),
        vec3(min.x, max.y, min.z),
        vec3(max.x, max.y, min.z),
        vec3(max.x, max.y, max.z),
        vec3(min.x, max.y, max.z),
    ];
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    for (a, b) in EDGES {
        let start = model.camera.world_to_screen(corners[a], window_rect);
        let end = model.camera.world_to_screen(corners[b], window_rect);
        if let (Some((start, _)), Some((end, _))) = (start, end) {
            draw.line()
                .start(pt2(start.x, start.y))
                .end(pt2(end.x, end.y))
                .weight(1.0)
                .color(rgba(0.2, 0.55, 0.6, 0.5));
        }
    }
}

// Cool colors for the light tiers, warm for the heavy ones
fn class_color(weight_class: u32) -> Rgb<f32> {
    match weight_class {
        1 => rgb(0.67, 0.86, 0.9),
        2 => rgb(0.47, 0.75, 0.63),
        3 => rgb(0.92, 0.71, 0.39),
        4 => rgb(0.86, 0.47, 0.35),
        _ => rgb(0.78, 0.55, 0.78),
    }
}
