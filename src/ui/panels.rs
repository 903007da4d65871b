use egui::{Color32, Context, Pos2, Rect, RichText, ScrollArea, Stroke, TextEdit, Ui};

use crate::math::FlatPattern;
use crate::math::pattern::ProfileSample;
use crate::ui::state::{PatternView, UiState};
use crate::ui::theme::*;

const PROFILE_PLOT_HEIGHT: f32 = 140.0;

#[derive(Default)]
pub struct UiActions {
    pub preview: bool,
}

/// Per-frame numbers shown in the stats overlay.
pub struct SceneStats {
    pub fps: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub rotation: f32,
    pub frames: u64,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    last_error: &Option<String>,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(320.0)
        .max_width(480.0)
        .default_width(360.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Fold Preview").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Tube bent around a fold")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "PARAMETERS");
                parameter_grid(ui, state);
                ui.add_space(8.0);
                if ui
                    .add(
                        egui::Button::new(RichText::new("Preview").color(BG_PURE_BLACK))
                            .fill(ACCENT_STEEL)
                            .min_size(egui::vec2(ui.available_width(), 32.0)),
                    )
                    .clicked()
                {
                    actions.preview = true;
                }
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "PATTERN");
                pattern_image(ui, &state.pattern, last_error);
                ui.add_space(16.0);

                if state.show_profile {
                    section_header(ui, "PROFILE");
                    profile_plot(ui, &state.profile);
                    ui.add_space(16.0);
                }

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "DISPLAY");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.vsync_enabled, "VSync");
                    ui.checkbox(&mut state.show_profile, "Profile");
                    ui.checkbox(&mut state.show_stats, "Stats");
                });
            });
        });

    actions
}

fn section_header(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn parameter_grid(ui: &mut Ui, state: &mut UiState) {
    let inputs = &mut state.inputs;
    egui::Grid::new("parameters")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (label, hint, text) in [
                ("R", "bend radius", &mut inputs.bend_radius),
                ("r", "tube radius", &mut inputs.tube_radius),
                ("phi", "fold angle, degrees", &mut inputs.phi),
                ("t", "wall thickness", &mut inputs.thickness),
            ] {
                ui.label(RichText::new(label).color(TEXT_BRIGHT).monospace());
                ui.add(
                    TextEdit::singleline(text)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();
            }
        });
}

fn pattern_image(ui: &mut Ui, pattern: &PatternView, last_error: &Option<String>) {
    if let Some(texture) = &pattern.texture {
        ui.add(
            egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                .max_width(ui.available_width())
                .maintain_aspect_ratio(true),
        );
    }

    if pattern.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("fetching pattern").color(TEXT_MUTED).size(11.0));
        });
    } else if let Some(message) = last_error {
        ui.label(RichText::new(message).color(TEXT_MUTED).size(11.0).italics());
    } else if pattern.texture.is_none() {
        ui.label(RichText::new("no pattern").color(TEXT_MUTED).size(11.0));
    }
}

fn profile_plot(ui: &mut Ui, pattern: &FlatPattern) {
    ui.label(format!(
        "Edge of pattern is {:.2}in from center of tube",
        pattern.edge_distance
    ));
    ui.add_space(4.0);

    let Some((depth_min, depth_max, arc_max)) = pattern.extent() else {
        ui.label(RichText::new("profile undefined").color(TEXT_MUTED).size(11.0));
        return;
    };

    let size = egui::vec2(ui.available_width(), PROFILE_PLOT_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 3.0, BG_PURE_BLACK);

    let plot = PlotFrame::new(rect.shrink(6.0), arc_max, depth_min, depth_max);

    // zero depth is the tube centre
    let baseline = [plot.point(0.0, 0.0), plot.point(arc_max, 0.0)];
    painter.line_segment(baseline, Stroke::new(1.0, BORDER_SUBTLE));

    for (depth_of, color) in [
        (outer_depth as fn(&ProfileSample) -> f64, PLOT_OUTER),
        (inner_depth as fn(&ProfileSample) -> f64, PLOT_INNER),
    ] {
        for run in finite_runs(&pattern.samples, depth_of) {
            let points = run.iter().map(|&(arc, d)| plot.point(arc, d)).collect();
            painter.add(egui::Shape::line(points, Stroke::new(1.5, color)));
        }
    }

    for &(arc, depth) in &pattern.quarter_marks {
        if depth.is_finite() {
            painter.circle_filled(plot.point(arc, depth), 3.0, PLOT_MARK);
        }
    }

    ui.add_space(4.0);
    if ui.button("Copy as text").clicked() {
        ui.ctx().copy_text(pattern.to_text());
    }
}

fn outer_depth(s: &ProfileSample) -> f64 {
    s.outer_depth
}

fn inner_depth(s: &ProfileSample) -> f64 {
    s.inner_depth
}

/// Consecutive samples with a finite depth, as `(arc, depth)` polylines.
fn finite_runs(
    samples: &[ProfileSample],
    depth_of: fn(&ProfileSample) -> f64,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for s in samples {
        let depth = depth_of(s);
        if depth.is_finite() {
            current.push((s.arc, depth));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.retain(|r| r.len() > 1);
    runs
}

struct PlotFrame {
    rect: Rect,
    arc_max: f64,
    depth_min: f64,
    depth_span: f64,
}

impl PlotFrame {
    fn new(rect: Rect, arc_max: f64, depth_min: f64, depth_max: f64) -> Self {
        Self {
            rect,
            arc_max: arc_max.max(f64::EPSILON),
            depth_min,
            depth_span: (depth_max - depth_min).max(f64::EPSILON),
        }
    }

    /// Arc runs left to right; the deepest point touches the top edge.
    fn point(&self, arc: f64, depth: f64) -> Pos2 {
        let x = (arc / self.arc_max) as f32;
        let y = 1.0 - ((depth - self.depth_min) / self.depth_span) as f32;
        Pos2::new(
            self.rect.left() + x * self.rect.width(),
            self.rect.top() + y * self.rect.height(),
        )
    }
}

pub fn draw_view_overlay(ctx: &Context, stats: &SceneStats) {
    egui::Area::new(egui::Id::new("view_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new(format!(
                            "{:.0} fps | {} vertices | {} triangles",
                            stats.fps, stats.vertices, stats.triangles
                        ))
                        .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!(
                            "frame {} | rotation {:.3} rad",
                            stats.frames, stats.rotation
                        ))
                        .color(TEXT_MUTED),
                    );
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(arc: f64, outer_depth: f64) -> ProfileSample {
        ProfileSample {
            arc,
            outer_depth,
            inner_depth: outer_depth,
        }
    }

    #[test]
    fn runs_break_at_nan() {
        let samples = [
            sample(0.0, 1.0),
            sample(0.1, 2.0),
            sample(0.2, f64::NAN),
            sample(0.3, 3.0),
            sample(0.4, 3.5),
            sample(0.5, 4.0),
        ];
        let runs = finite_runs(&samples, outer_depth);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(0.0, 1.0), (0.1, 2.0)]);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn lone_points_are_not_lines() {
        let samples = [sample(0.0, 1.0), sample(0.1, f64::INFINITY), sample(0.2, 2.0)];
        assert!(finite_runs(&samples, outer_depth).is_empty());
    }

    #[test]
    fn plot_corners() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(100.0, 50.0));
        let plot = PlotFrame::new(rect, 2.0, 0.0, 4.0);
        assert_eq!(plot.point(0.0, 4.0), Pos2::new(10.0, 20.0));
        assert_eq!(plot.point(2.0, 0.0), Pos2::new(110.0, 70.0));
    }
}
