//! Shape generation for 2D primitives and frame assembly

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::Settings;
use crate::sim::{GameState, Rect};

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (r.left(), r.top());
    let (x1, y1) = (r.right(), r.bottom());

    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Assemble the full scene for one frame in game coordinates
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);

    for brick in &state.bricks {
        vertices.extend_from_slice(&rect(&brick.rect, brick.color));
    }

    for power_up in &state.power_ups {
        vertices.extend_from_slice(&rect(&power_up.rect, power_up.kind.color()));
    }

    for laser in &state.lasers {
        vertices.extend_from_slice(&rect(&laser.rect, colors::LASER));
    }

    vertices.extend_from_slice(&rect(&state.paddle.rect, colors::PADDLE));
    vertices.extend(circle(state.ball.pos, state.ball.radius, colors::BALL, 24));

    if settings.particles {
        for p in &state.particles {
            vertices.extend(circle(p.pos, p.size, p.color, 8));
        }
    }

    if settings.fireworks {
        for fw in &state.fireworks {
            if !fw.exploded {
                vertices.extend(circle(fw.pos, 3.0, colors::FIREWORK_SHELL, 8));
            }
            for p in &fw.particles {
                vertices.extend(circle(p.pos, p.size, p.color, 8));
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let verts = rect(&r, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&10.0) && xs.contains(&40.0));
        assert!(ys.contains(&20.0) && ys.contains(&60.0));
    }

    #[test]
    fn test_build_frame_draws_whole_wall() {
        let state = GameState::new(7);
        let settings = Settings::default();
        let verts = build_frame(&state, &settings);
        // At least 6 vertices per brick plus paddle and ball
        assert!(verts.len() >= state.bricks.len() * 6 + 6 + 24 * 3);
    }
}
