use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const BG_PURE_BLACK: Color32 = Color32::from_rgb(0, 0, 0);
pub const BG_PANEL: Color32 = Color32::from_rgb(12, 12, 14);
pub const BG_WIDGET: Color32 = Color32::from_rgb(24, 24, 28);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(36, 36, 42);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(176, 176, 180);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 110, 116);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(224, 224, 228);

pub const ACCENT_STEEL: Color32 = Color32::from_rgb(160, 160, 160);
pub const ACCENT_BLUE: Color32 = Color32::from_rgb(84, 126, 206);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(200, 130, 40);
pub const ACCENT_RED: Color32 = Color32::from_rgb(180, 50, 50);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(44, 44, 52);

/// Profile plot colors.
pub const PLOT_OUTER: Color32 = ACCENT_STEEL;
pub const PLOT_INNER: Color32 = ACCENT_BLUE;
pub const PLOT_MARK: Color32 = ACCENT_ORANGE;

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_PURE_BLACK;
    visuals.faint_bg_color = BG_WIDGET;
    visuals.hyperlink_color = ACCENT_BLUE;
    visuals.warn_fg_color = ACCENT_ORANGE;
    visuals.error_fg_color = ACCENT_RED;
    visuals.selection.bg_fill = ACCENT_BLUE.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_BLUE);

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(3.0);
        widget.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    }
    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_BRIGHT);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT_BLUE);

    ctx.style_mut(|style| {
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        ]
        .into();
    });
}
