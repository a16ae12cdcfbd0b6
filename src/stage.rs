// Display area painting: gradient background, dot grid, flying labels

use crate::animation::{AnimationEntry, AnimationRegistry, SpawnSampler, frame_at};
use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Pos2, Rect, Vec2, pos2, vec2};
use std::time::Instant;

const GRADIENT: [Color32; 3] = [
    Color32::from_rgb(192, 132, 252), // purple
    Color32::from_rgb(236, 72, 153),  // pink
    Color32::from_rgb(239, 68, 68),   // red
];
const DOT_SPACING: f32 = 50.0;
const LABEL_PADDING: Vec2 = vec2(16.0, 8.0);
const LABEL_FONT_SIZE: f32 = 18.0;
const CAP_SEGMENTS: usize = 8;

/// 16:9 area the entries fly across. Positions of entries are relative to
/// the top-left corner of `rect`.
pub struct Stage {
    pub rect: Rect,
}

impl Stage {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn paint<S: SpawnSampler>(
        &self,
        painter: &egui::Painter,
        registry: &AnimationRegistry<S>,
        now: Instant,
    ) {
        self.paint_background(painter);

        for entry in registry.entries() {
            self.paint_entry(painter, entry, now);
        }

        if registry.is_empty() {
            self.paint_empty_hint(painter);
        }
    }

    fn paint_background(&self, painter: &egui::Painter) {
        let rect = self.rect;
        let mut mesh = egui::Mesh::default();
        for (i, color) in GRADIENT.iter().enumerate() {
            let t = i as f32 / (GRADIENT.len() - 1) as f32;
            let x = rect.left() + rect.width() * t;
            mesh.colored_vertex(pos2(x, rect.top()), *color);
            mesh.colored_vertex(pos2(x, rect.bottom()), *color);
        }
        for band in 0..(GRADIENT.len() as u32 - 1) {
            let base = band * 2;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }
        painter.add(egui::Shape::mesh(mesh));

        let dot = Color32::from_white_alpha(26);
        let mut y = rect.top() + DOT_SPACING / 2.0;
        while y < rect.bottom() {
            let mut x = rect.left() + DOT_SPACING / 2.0;
            while x < rect.right() {
                painter.circle_filled(pos2(x, y), 1.0, dot);
                x += DOT_SPACING;
            }
            y += DOT_SPACING;
        }
    }

    fn paint_entry(&self, painter: &egui::Painter, entry: &AnimationEntry, now: Instant) {
        let Some(frame) = frame_at(entry, now) else {
            return;
        };

        let galley = painter.layout_no_wrap(
            entry.text.clone(),
            FontId::proportional(LABEL_FONT_SIZE),
            Color32::from_gray(31),
        );
        let size = galley.size() + LABEL_PADDING * 2.0;

        // Position is the label's top-left corner, rotation is about its center
        let top_left = self.rect.min + vec2(frame.position.x, frame.position.y);
        let center = top_left + size / 2.0;
        let rot = Rot2::from_angle(frame.rotation_deg.to_radians());

        let fill = Color32::WHITE.gamma_multiply(0.9 * frame.opacity);
        painter.add(egui::Shape::convex_polygon(
            pill_outline(center, size / 2.0, rot),
            fill,
            egui::Stroke::NONE,
        ));

        let text_pos = center + rot * (-galley.size() / 2.0);
        painter.add(
            TextShape::new(text_pos, galley, Color32::from_gray(31))
                .with_angle(rot.angle())
                .with_opacity_factor(frame.opacity),
        );
    }

    fn paint_empty_hint(&self, painter: &egui::Painter) {
        let center = self.rect.center();
        let color = Color32::from_white_alpha(204);
        painter.text(
            center - vec2(0.0, 28.0),
            egui::Align2::CENTER_CENTER,
            "✨",
            FontId::proportional(48.0),
            color,
        );
        painter.text(
            center + vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            "Enter text above to see animations!",
            FontId::proportional(20.0),
            color,
        );
    }
}

/// Outline of a stadium shape (rectangle with half-circle ends), rotated
/// about `center`. Points are in clockwise order for `convex_polygon`.
fn pill_outline(center: Pos2, half: Vec2, rot: Rot2) -> Vec<Pos2> {
    let radius = half.y.min(half.x);
    let straight = half.x - radius;
    let mut points = Vec::with_capacity((CAP_SEGMENTS + 1) * 2);

    // right cap, top to bottom, then left cap, bottom to top
    for (cap_x, start) in [(straight, -90.0_f32), (-straight, 90.0_f32)] {
        for step in 0..=CAP_SEGMENTS {
            let angle = (start + 180.0 * step as f32 / CAP_SEGMENTS as f32).to_radians();
            let local = vec2(cap_x + radius * angle.cos(), radius * angle.sin());
            points.push(center + rot * local);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pill_outline_bounds() {
        let center = pos2(100.0, 50.0);
        let points = pill_outline(center, vec2(40.0, 10.0), Rot2::IDENTITY);

        assert_eq!(points.len(), (CAP_SEGMENTS + 1) * 2);
        for p in &points {
            assert!(p.x >= 60.0 - 1e-3 && p.x <= 140.0 + 1e-3, "{:?}", p);
            assert!(p.y >= 40.0 - 1e-3 && p.y <= 60.0 + 1e-3, "{:?}", p);
        }
    }

    #[test]
    fn test_pill_outline_rotates_about_center() {
        let center = pos2(0.0, 0.0);
        let rot = Rot2::from_angle(std::f32::consts::FRAC_PI_2);
        let points = pill_outline(center, vec2(30.0, 10.0), rot);

        // quarter turn swaps the long axis onto y
        let max_y = points.iter().map(|p| p.y.abs()).fold(0.0, f32::max);
        let max_x = points.iter().map(|p| p.x.abs()).fold(0.0, f32::max);
        assert!((max_y - 30.0).abs() < 1e-3);
        assert!((max_x - 10.0).abs() < 1e-3);
    }
}
