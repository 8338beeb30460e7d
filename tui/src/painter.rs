//! Scene Painter
//!
//! Replays a core [`Scene`] onto a ratatui buffer. Shapes go through a
//! braille [`Canvas`]; button fills are applied afterwards as cell
//! backgrounds since braille dots cannot be solid-filled.

use std::f64::consts::FRAC_PI_2;

use namegen_core::{DrawCommand, Scene, SurfaceSize, TextAlign};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Clear, Widget};
use unicode_width::UnicodeWidthStr;

use crate::surface::{cells_for, surface_size};
use crate::theme::to_color;

/// Concentric strokes used to give spinner ribbons some thickness
const RIBBON_STROKES: usize = 3;

/// Points sampled along each rounded corner
const CORNER_SAMPLES: usize = 6;

/// Paints scenes into a terminal area
#[derive(Clone, Copy, Debug, Default)]
pub struct ScenePainter;

impl ScenePainter {
    /// Create a painter
    pub fn new() -> Self {
        Self
    }

    /// Paint `scene` into `area` of `buf`
    pub fn render(&self, scene: &Scene, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let size = surface_size(area);
        let placed = place(scene);

        if placed
            .iter()
            .any(|(_, command)| matches!(command, DrawCommand::Clear))
        {
            Clear.render(area, buf);
        }

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, size.width])
            .y_bounds([0.0, size.height])
            .paint(|ctx| {
                for (origin, command) in &placed {
                    paint_command(ctx, *origin, command, size);
                }
            })
            .render(area, buf);

        for ((ox, oy), command) in &placed {
            if let DrawCommand::RoundRect {
                x,
                y,
                width,
                height,
                fill,
                ..
            } = command
            {
                let cells = cells_for(area, ox + x, oy + y, *width, *height);
                buf.set_style(cells, Style::default().bg(to_color(*fill)));
            }
        }
    }
}

/// Pair every command with the origin in effect when it runs
fn place(scene: &Scene) -> Vec<((f64, f64), &DrawCommand)> {
    let mut origin = (0.0, 0.0);
    let mut placed = Vec::with_capacity(scene.commands.len());

    for command in &scene.commands {
        match command {
            DrawCommand::Translate { x, y } => {
                origin = (origin.0 + x, origin.1 + y);
            }
            DrawCommand::Clear => {
                origin = (0.0, 0.0);
                placed.push((origin, command));
            }
            _ => placed.push((origin, command)),
        }
    }
    placed
}

/// Scene y grows downward, canvas y grows upward
fn flip(size: SurfaceSize, x: f64, y: f64) -> (f64, f64) {
    (x, size.height - y)
}

fn paint_command(
    ctx: &mut Context<'_>,
    origin: (f64, f64),
    command: &DrawCommand,
    size: SurfaceSize,
) {
    let (ox, oy) = origin;

    match command {
        DrawCommand::Clear | DrawCommand::Translate { .. } => {}
        DrawCommand::Text {
            text,
            x,
            y,
            color,
            align,
            ..
        } => {
            let width = text.width() as f64;
            let left = match align {
                TextAlign::Center => ox + x - width / 2.0,
                TextAlign::Left => ox + x,
            };
            let (px, py) = flip(size, left.max(0.0), oy + y);
            ctx.print(
                px,
                py,
                TextLine::styled(text.clone(), Style::default().fg(to_color(*color))),
            );
        }
        DrawCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            thickness,
            color,
        } => {
            for stroke in 0..RIBBON_STROKES {
                let r = radius - thickness * stroke as f64 / (RIBBON_STROKES - 1) as f64;
                let (x1, y1) = flip(
                    size,
                    ox + cx + r * start_angle.cos(),
                    oy + cy + r * start_angle.sin(),
                );
                let (x2, y2) = flip(
                    size,
                    ox + cx + r * end_angle.cos(),
                    oy + cy + r * end_angle.sin(),
                );
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: to_color(*color),
                });
            }
        }
        DrawCommand::RoundRect {
            x,
            y,
            width,
            height,
            radius,
            stroke,
            ..
        } => {
            let color = to_color(*stroke);
            let (left, top) = (ox + x, oy + y);
            let (right, bottom) = (left + width, top + height);
            let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);

            let edges = [
                ((left + r, top), (right - r, top)),
                ((left + r, bottom), (right - r, bottom)),
                ((left, top + r), (left, bottom - r)),
                ((right, top + r), (right, bottom - r)),
            ];
            for ((ax, ay), (bx, by)) in edges {
                let (x1, y1) = flip(size, ax, ay);
                let (x2, y2) = flip(size, bx, by);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }

            // Corner centres with the angle each quarter-arc starts at
            let corners = [
                (right - r, top + r, -FRAC_PI_2),
                (right - r, bottom - r, 0.0),
                (left + r, bottom - r, FRAC_PI_2),
                (left + r, top + r, 2.0 * FRAC_PI_2),
            ];
            let mut coords = Vec::with_capacity(corners.len() * (CORNER_SAMPLES + 1));
            for (ccx, ccy, start) in corners {
                for i in 0..=CORNER_SAMPLES {
                    let a = start + FRAC_PI_2 * i as f64 / CORNER_SAMPLES as f64;
                    coords.push(flip(size, ccx + r * a.cos(), ccy + r * a.sin()));
                }
            }
            ctx.draw(&Points {
                coords: &coords,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namegen_core::{AnimationController, NameGenerator, WidgetState};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_place_tracks_translate() {
        let scene = Scene {
            commands: vec![
                DrawCommand::Clear,
                DrawCommand::Translate { x: 10.0, y: 5.0 },
                DrawCommand::Translate { x: 1.0, y: 1.0 },
                DrawCommand::Clear,
            ],
        };
        let placed = place(&scene);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].0, (0.0, 0.0));
        assert_eq!(placed[1].0, (0.0, 0.0));
    }

    #[test]
    fn test_loading_scene_paints_label() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let mut state = WidgetState::new(NameGenerator::seeded(1));
        let scene = AnimationController::new().render_frame(&mut state, surface_size(area));

        ScenePainter::new().render(&scene, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Loading presets..."), "{text}");
    }

    #[test]
    fn test_zero_area_is_noop() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 0, 0));
        ScenePainter::new().render(&Scene::default(), Rect::new(0, 0, 0, 0), &mut buf);
    }
}
